//! Request forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Handler (route params)
//!     → service.rs (validate required input, build upstream URL + query,
//!                   inject credential, single upstream call)
//!     → route.rs (route name, failure message)
//!     → error.rs (MissingParameter | NoResults | Upstream)
//!     → back to handler as payload or ForwardError
//! ```
//!
//! # Design Decisions
//! - One upstream call per inbound request, no retries
//! - Upstream payloads are opaque JSON, except the media search which keeps
//!   only `collection.items`
//! - The credential never appears in client-facing errors or logs

pub mod error;
pub mod route;
pub mod service;

pub use error::{ForwardError, UpstreamFailure};
pub use route::Route;
pub use service::{BuildError, Forwarder, MediaCollection, MediaSearchResponse};
