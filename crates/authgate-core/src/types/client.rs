//! OAuth 2.0 client registration types.
//!
//! This module defines the `ClientRegistration` struct and the enums describing
//! what a registered client is allowed to do. Field names follow the RFC 7591
//! client metadata vocabulary.

use serde::{Deserialize, Serialize};
use url::Url;

// =============================================================================
// Grant Type
// =============================================================================

/// OAuth 2.0 grant types a client may be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    /// Authorization Code flow (with PKCE).
    AuthorizationCode,
    /// Refresh Token flow.
    RefreshToken,
}

impl GrantType {
    /// Returns the OAuth 2.0 grant_type parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::RefreshToken => "refresh_token",
        }
    }
}

impl std::fmt::Display for GrantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Response Type
// =============================================================================

/// Response types a client may be registered for.
///
/// Only the authorization code response type is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// `response_type=code`.
    Code,
}

impl ResponseType {
    /// Returns the OAuth 2.0 response_type parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
        }
    }
}

// =============================================================================
// Token Endpoint Auth Method
// =============================================================================

/// How a client authenticates at the token and revocation endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEndpointAuthMethod {
    /// Public client, no secret.
    None,
    /// Secret sent in the request body.
    #[default]
    ClientSecretPost,
}

impl TokenEndpointAuthMethod {
    /// Returns the registered metadata value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ClientSecretPost => "client_secret_post",
        }
    }
}

impl std::fmt::Display for TokenEndpointAuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Client Registration
// =============================================================================

fn default_grant_types() -> Vec<GrantType> {
    vec![GrantType::AuthorizationCode]
}

fn default_response_types() -> Vec<ResponseType> {
    vec![ResponseType::Code]
}

/// A registered OAuth 2.0 client.
///
/// Read-only from the point of view of the authorization and revocation
/// endpoints. The descriptive metadata fields are stored but never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRegistration {
    /// Unique client identifier used in OAuth flows.
    pub client_id: String,

    /// Plaintext client secret for confidential clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// When the client id was issued (unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id_issued_at: Option<i64>,

    /// When the client secret expires (unix seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret_expires_at: Option<i64>,

    /// Registered redirect URIs, in registration order.
    pub redirect_uris: Vec<String>,

    #[serde(default)]
    pub token_endpoint_auth_method: TokenEndpointAuthMethod,

    #[serde(default = "default_grant_types")]
    pub grant_types: Vec<GrantType>,

    #[serde(default = "default_response_types")]
    pub response_types: Vec<ResponseType>,

    /// Space-delimited list of scopes the client may request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tos_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwks_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
}

impl ClientRegistration {
    /// Creates a registration with the given id and redirect URIs and default metadata.
    #[must_use]
    pub fn new(client_id: impl Into<String>, redirect_uris: Vec<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            client_id_issued_at: None,
            client_secret_expires_at: None,
            redirect_uris,
            token_endpoint_auth_method: TokenEndpointAuthMethod::default(),
            grant_types: default_grant_types(),
            response_types: default_response_types(),
            scope: None,
            client_name: None,
            client_uri: None,
            logo_uri: None,
            contacts: None,
            tos_uri: None,
            policy_uri: None,
            jwks_uri: None,
            software_id: None,
            software_version: None,
        }
    }

    /// Sets the client secret.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Sets the space-delimited scope string.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Validates that the registration is usable by the authorization endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the client id is empty, no redirect URI is
    /// registered, or a redirect URI is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ClientValidationError> {
        if self.client_id.is_empty() {
            return Err(ClientValidationError::EmptyClientId);
        }

        if self.redirect_uris.is_empty() {
            return Err(ClientValidationError::NoRedirectUris);
        }

        for uri in &self.redirect_uris {
            if !is_absolute_http_url(uri) {
                return Err(ClientValidationError::InvalidRedirectUri(uri.clone()));
            }
        }

        Ok(())
    }

    /// Returns the scopes the client is allowed to request.
    ///
    /// Empty when no scope string is registered.
    #[must_use]
    pub fn allowed_scopes(&self) -> Vec<&str> {
        self.scope
            .as_deref()
            .map(|s| s.split(' ').collect())
            .unwrap_or_default()
    }

    /// Checks if the given redirect URI is registered, byte for byte.
    #[must_use]
    pub fn is_redirect_uri_registered(&self, uri: &str) -> bool {
        self.redirect_uris.iter().any(|registered| registered == uri)
    }
}

/// Returns `true` for an absolute URL with an `http` or `https` scheme and a host.
#[must_use]
pub fn is_absolute_http_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

// =============================================================================
// Validation Error
// =============================================================================

/// Errors that can occur during client validation.
#[derive(Debug, thiserror::Error)]
pub enum ClientValidationError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty")]
    EmptyClientId,

    /// Authorization code flow requires redirect URIs.
    #[error("At least one redirect URI is required")]
    NoRedirectUris,

    /// A registered redirect URI is not an absolute http(s) URL.
    #[error("Redirect URI is not an absolute http(s) URL: {0}")]
    InvalidRedirectUri(String),
}

// =============================================================================
// Tests
// =============================================================================
