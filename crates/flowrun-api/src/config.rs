// Server configuration loaded from environment variables.
// Decision: Every setting has a default so the server starts with no environment at all
// Decision: Swagger UI is on by default; set SWAGGER_UI_ENABLED=false to hide it

use axum::http::HeaderValue;
use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_ADDR '{value}' is not a valid socket address: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// Prefix nested in front of the workflow routes, e.g. "/api"
    pub api_prefix: String,
    /// Origins allowed by CORS. Empty means no CORS layer (same-origin only)
    pub cors_allowed_origins: Vec<HeaderValue>,
    /// Whether to serve Swagger UI and the OpenAPI document
    pub swagger_ui_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 9000)),
            api_prefix: String::new(),
            cors_allowed_origins: Vec::new(),
            swagger_ui_enabled: true,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_value = lookup("BIND_ADDR")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .trim()
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::BindAddr {
                value: bind_value.clone(),
                source,
            })?;

        // Example: API_PREFIX="/api" results in routes like /api/defs
        let api_prefix = lookup("API_PREFIX")
            .map(|s| normalize_prefix(&s))
            .unwrap_or_default();

        // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .filter_map(|s| match s.parse::<HeaderValue>() {
                        Ok(origin) => Some(origin),
                        Err(_) => {
                            tracing::warn!(origin = %s, "Ignoring invalid CORS origin");
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let swagger_ui_enabled = match lookup("SWAGGER_UI_ENABLED") {
            Some(value) => parse_bool(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "SWAGGER_UI_ENABLED is not a boolean, using default");
                true
            }),
            None => true,
        };

        Ok(Self {
            bind_addr,
            api_prefix,
            cors_allowed_origins,
            swagger_ui_enabled,
        })
    }
}

/// "/api/", "api" and "/api" all become "/api"; "/" and "" become ""
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, ApiConfig::default().bind_addr);
        assert_eq!(config.api_prefix, "");
        assert!(config.cors_allowed_origins.is_empty());
        assert!(config.swagger_ui_enabled);
    }

    #[test]
    fn test_bind_addr() {
        let config = config_from(&[("BIND_ADDR", "127.0.0.1:8080")]).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);

        let err = config_from(&[("BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert!(err.to_string().contains("not-an-addr"));
    }

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(normalize_prefix("/api"), "/api");
        assert_eq!(normalize_prefix("api/"), "/api");
        assert_eq!(normalize_prefix("/v1/workflows/"), "/v1/workflows");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
    }

    #[test]
    fn test_cors_origins() {
        let config = config_from(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://a.example.com, ,https://b.example.com",
        )])
        .unwrap();
        assert_eq!(config.cors_allowed_origins.len(), 2);
        assert_eq!(config.cors_allowed_origins[1], "https://b.example.com");
    }

    #[test]
    fn test_swagger_toggle() {
        assert!(!config_from(&[("SWAGGER_UI_ENABLED", "false")]).unwrap().swagger_ui_enabled);
        assert!(!config_from(&[("SWAGGER_UI_ENABLED", "0")]).unwrap().swagger_ui_enabled);
        assert!(config_from(&[("SWAGGER_UI_ENABLED", "YES")]).unwrap().swagger_ui_enabled);
        assert!(config_from(&[("SWAGGER_UI_ENABLED", "maybe")]).unwrap().swagger_ui_enabled);
    }
}
