//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign / propagate request ID)
//!     → handlers.rs (extract params, call forwarder)
//!     → response.rs (payload as JSON, or error envelope)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::ErrorEnvelope;
pub use server::{AppState, HttpServer, ServerError};
