//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// NASA Image and Video Library search endpoint.
pub const MEDIA_SEARCH_URL: &str = "https://images-api.nasa.gov/search";

/// NASA EPIC (Earth Polychromatic Imaging Camera) natural-colour endpoint.
pub const EPIC_URL: &str = "https://api.nasa.gov/EPIC/api/natural";

/// NASA Astronomy Picture of the Day endpoint.
pub const APOD_URL: &str = "https://api.nasa.gov/planetary/apod";

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Upstream provider settings (credential, timeout).
    pub upstream: UpstreamConfig,

    /// Media search behaviour.
    pub search: SearchConfig,

    /// Cross-origin settings.
    pub cors: CorsConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind.
    pub host: IpAddr,

    /// Port to bind.
    pub port: u16,
}

impl ListenerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
        }
    }
}

/// API key sent to the upstream provider.
///
/// Never serialized and redacted in `Debug` output so it cannot leak through
/// logs or config dumps.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiKey(<unset>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}

/// Base addresses of the upstream endpoints.
///
/// Fixed for a running process. Not read from files or the environment;
/// only code (tests, embedders) may point these elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTargets {
    pub media_search: String,
    pub epic: String,
    pub apod: String,
}

impl Default for UpstreamTargets {
    fn default() -> Self {
        Self {
            media_search: MEDIA_SEARCH_URL.to_string(),
            epic: EPIC_URL.to_string(),
            apod: APOD_URL.to_string(),
        }
    }
}

/// Upstream provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Credential, usually supplied through `NASA_API_KEY`.
    #[serde(skip_serializing)]
    pub api_key: ApiKey,

    /// Attach `api_key` to every upstream call.
    pub send_api_key: bool,

    /// Upstream call timeout in seconds (0 = no timeout).
    pub timeout_secs: u64,

    #[serde(skip)]
    pub targets: UpstreamTargets,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            send_api_key: true,
            timeout_secs: 30,
            targets: UpstreamTargets::default(),
        }
    }
}

/// What the media search returns when upstream finds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyResultsPolicy {
    /// 404 with a `message` envelope.
    #[default]
    NotFound,
    /// 200 with an empty items array.
    EmptySuccess,
}

/// Media search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    pub empty_results: EmptyResultsPolicy,
}

/// Cross-origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allow any origin, method and header.
    pub enabled: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON lines.
    pub log_format: LogFormat,

    /// Enable Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
