//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → config file (TOML, optional) → loader.rs (parse & deserialize)
//!     → environment (NASA_API_KEY, PORT) → loader.rs (overrides)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → handed to HttpServer, shared via Arc by the forwarder
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults to allow minimal configs
//! - Upstream base addresses are constants, settable only from code
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ApiKey, CorsConfig, EmptyResultsPolicy, ListenerConfig, LogFormat, ObservabilityConfig,
    ProxyConfig, SearchConfig, SecurityConfig, UpstreamConfig, UpstreamTargets,
};
