//! Authorization server configuration.
//!
//! These types describe how the endpoints present themselves (issuer,
//! advertised scopes) and which optional endpoints are mounted.

use serde::{Deserialize, Serialize};

use crate::oauth::metadata::validate_issuer_url;

/// Root authorization server configuration.
///
/// # Example (TOML)
///
/// ```toml
/// [auth]
/// issuer = "https://auth.example.com"
/// service_documentation_url = "https://docs.example.com/oauth"
/// scopes_supported = ["read", "write"]
///
/// [auth.revocation]
/// enabled = true
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Issuer URL advertised in the server metadata.
    /// Endpoint URLs are derived from it.
    pub issuer: String,

    /// Optional link to human-readable documentation.
    pub service_documentation_url: Option<String>,

    /// Scopes advertised in the server metadata.
    /// Advertising is informational; clients are checked against their own registration.
    pub scopes_supported: Option<Vec<String>>,

    /// Token revocation endpoint options.
    pub revocation: RevocationOptions,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: "http://localhost:8080".to_string(),
            service_documentation_url: None,
            scopes_supported: None,
            revocation: RevocationOptions::default(),
        }
    }
}

/// Token revocation endpoint options.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RevocationOptions {
    /// Mount `/revoke` and advertise it in the metadata.
    pub enabled: bool,
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// A required configuration value is missing.
    #[error("Missing required configuration: {0}")]
    Missing(String),
}

impl AuthConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the issuer is empty, and
    /// `ConfigError::InvalidValue` if:
    /// - The issuer is not an acceptable issuer URL
    /// - The service documentation URL is not an absolute URL
    /// - An advertised scope is empty or contains a space
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.issuer.is_empty() {
            return Err(ConfigError::Missing("auth.issuer".to_string()));
        }

        validate_issuer_url(&self.issuer)?;

        if let Some(doc_url) = &self.service_documentation_url
            && url::Url::parse(doc_url).is_err()
        {
            return Err(ConfigError::InvalidValue(format!(
                "service_documentation_url is not an absolute URL: '{doc_url}'"
            )));
        }

        if let Some(scopes) = &self.scopes_supported {
            for scope in scopes {
                if scope.is_empty() || scope.contains(' ') {
                    return Err(ConfigError::InvalidValue(format!(
                        "Invalid scope in scopes_supported: '{scope}'"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AuthConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.revocation.enabled);
    }

    #[test]
    fn test_empty_issuer() {
        let config = AuthConfig {
            issuer: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Missing(_))));
    }

    #[test]
    fn test_plain_http_issuer_rejected() {
        let config = AuthConfig {
            issuer: "http://auth.example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_invalid_documentation_url() {
        let config = AuthConfig {
            service_documentation_url: Some("docs".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_scope() {
        let config = AuthConfig {
            scopes_supported: Some(vec!["read write".to_string()]),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AuthConfig = serde_json::from_str(
            r#"{"issuer": "https://auth.example.com", "revocation": {"enabled": true}}"#,
        )
        .unwrap();
        assert_eq!(config.issuer, "https://auth.example.com");
        assert!(config.revocation.enabled);
        assert!(config.scopes_supported.is_none());
    }
}
