//! NASA media proxy library.

pub mod config;
pub mod forwarder;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use forwarder::Forwarder;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
