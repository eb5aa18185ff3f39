//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{ApiKey, ProxyConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the upstream credential.
pub const API_KEY_ENV: &str = "NASA_API_KEY";

/// Environment variable holding the listening port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: `{value}`")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse configuration from TOML text. Missing sections fall back to defaults.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Taking the lookup as a closure keeps this testable without touching the
/// process environment.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(API_KEY_ENV) {
        config.upstream.api_key = ApiKey::new(key);
    }

    if let Some(raw) = lookup(PORT_ENV).filter(|v| !v.is_empty()) {
        config.listener.port = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            var: PORT_ENV,
            value: raw.clone(),
        })?;
    }

    Ok(())
}

/// Load configuration: defaults, then the optional TOML file, then the
/// process environment. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            parse_config(&content)?
        }
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{EmptyResultsPolicy, LogFormat};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_parse_partial_file() {
        let config = parse_config(
            r#"
            [listener]
            port = 8080

            [search]
            empty_results = "empty_success"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.search.empty_results, EmptyResultsPolicy::EmptySuccess);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        // untouched sections keep defaults
        assert_eq!(config.upstream.timeout_secs, 30);
        assert!(config.cors.enabled);
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        let err = parse_config("[search]\nempty_results = \"maybe\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_file_cannot_override_targets() {
        let config = parse_config(
            r#"
            [upstream]
            targets = { media_search = "http://evil.example" }
            "#,
        )
        .unwrap();
        assert_eq!(
            config.upstream.targets.media_search,
            crate::config::schema::MEDIA_SEARCH_URL
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = parse_config("[upstream]\napi_key = \"from-file\"").unwrap();
        apply_env_overrides(&mut config, env(&[("NASA_API_KEY", "from-env"), ("PORT", "7000")]))
            .unwrap();

        assert_eq!(config.upstream.api_key.expose(), "from-env");
        assert_eq!(config.listener.port, 7000);
    }

    #[test]
    fn test_empty_port_falls_back_to_default() {
        let mut config = ProxyConfig::default();
        apply_env_overrides(&mut config, env(&[("PORT", "")])).unwrap();
        assert_eq!(config.listener.port, 5000);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut config = ProxyConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: "PORT", .. }));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError::ZeroBodyLimit,
            ValidationError::UnknownLogLevel("loud".into()),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: max_body_size must be greater than zero, unknown log_level `loud`"
        );
    }
}
