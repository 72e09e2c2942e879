//! Authorization server metadata (RFC 8414).

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{AuthConfig, ConfigError};

/// Path of the authorization endpoint.
pub const AUTHORIZATION_PATH: &str = "/authorize";
/// Path of the token endpoint, served by the token service.
pub const TOKEN_PATH: &str = "/token";
/// Path of the revocation endpoint.
pub const REVOCATION_PATH: &str = "/revoke";
/// Well-known path of the metadata document.
pub const METADATA_PATH: &str = "/.well-known/oauth-authorization-server";

/// OAuth 2.0 Authorization Server Metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationServerMetadata {
    pub issuer: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes_supported: Option<Vec<String>>,

    pub response_types_supported: Vec<String>,
    pub grant_types_supported: Vec<String>,
    pub token_endpoint_auth_methods_supported: Vec<String>,
    pub code_challenge_methods_supported: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_documentation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocation_endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocation_endpoint_auth_methods_supported: Option<Vec<String>>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Builds the metadata document for a configuration.
///
/// Endpoint URLs are the issuer with any trailing slash removed, followed by
/// the endpoint path.
#[must_use]
pub fn build_metadata(config: &AuthConfig) -> AuthorizationServerMetadata {
    let issuer = config.issuer.trim_end_matches('/');

    let (revocation_endpoint, revocation_auth_methods) = if config.revocation.enabled {
        (
            Some(format!("{issuer}{REVOCATION_PATH}")),
            Some(strings(&["client_secret_post"])),
        )
    } else {
        (None, None)
    };

    AuthorizationServerMetadata {
        issuer: issuer.to_string(),
        authorization_endpoint: format!("{issuer}{AUTHORIZATION_PATH}"),
        token_endpoint: format!("{issuer}{TOKEN_PATH}"),
        scopes_supported: config.scopes_supported.clone(),
        response_types_supported: strings(&["code"]),
        grant_types_supported: strings(&["authorization_code", "refresh_token"]),
        token_endpoint_auth_methods_supported: strings(&["client_secret_post"]),
        code_challenge_methods_supported: strings(&["S256"]),
        service_documentation: config
            .service_documentation_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string()),
        revocation_endpoint,
        revocation_endpoint_auth_methods_supported: revocation_auth_methods,
    }
}

/// Checks that a URL is usable as an OAuth 2.0 issuer.
///
/// HTTPS is required except for `localhost` and `127.0.0.1` hosts. Fragments
/// and query strings are not allowed.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` describing the first violation.
pub fn validate_issuer_url(issuer: &str) -> Result<(), ConfigError> {
    let url = Url::parse(issuer)
        .map_err(|e| ConfigError::InvalidValue(format!("Issuer URL is invalid: {e}")))?;

    let host = url.host_str().unwrap_or_default();
    let local = host == "localhost" || host.starts_with("127.0.0.1");
    if url.scheme() != "https" && !local {
        return Err(ConfigError::InvalidValue(
            "Issuer URL must be HTTPS".to_string(),
        ));
    }

    if url.fragment().is_some() {
        return Err(ConfigError::InvalidValue(
            "Issuer URL must not have a fragment".to_string(),
        ));
    }
    if url.query().is_some() {
        return Err(ConfigError::InvalidValue(
            "Issuer URL must not have a query string".to_string(),
        ));
    }

    Ok(())
}
