//! Client authentication for the revocation endpoint.
//!
//! # Authentication Methods
//!
//! - `none` - Public clients (client_id only)
//! - `client_secret_post` - client_id and client_secret in the request body
//!
//! A client registered with a secret must always present it. A client
//! registered without one authenticates by id alone.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use time::OffsetDateTime;

use crate::AuthResult;
use crate::error::AuthError;
use crate::storage::ClientDirectory;
use crate::types::{ClientRegistration, TokenEndpointAuthMethod};

/// Client credentials carried in a request body.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Result of successful client authentication.
///
/// Contains the authenticated client and the method used for authentication.
#[derive(Debug, Clone)]
pub struct AuthenticatedClient {
    /// The authenticated client.
    pub client: ClientRegistration,

    /// The authentication method used.
    pub auth_method: TokenEndpointAuthMethod,
}

/// Verifies client credentials.
#[async_trait]
pub trait ClientAuthenticator: Send + Sync {
    /// Authenticates the client named in `credentials`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidClient` when authentication fails, or a server-side
    /// error when the client store cannot be reached.
    async fn authenticate(&self, credentials: &ClientCredentials)
    -> AuthResult<AuthenticatedClient>;
}

/// Authenticates clients against a [`ClientDirectory`].
#[derive(Clone)]
pub struct DirectoryClientAuthenticator {
    directory: Arc<dyn ClientDirectory>,
}

impl DirectoryClientAuthenticator {
    /// Creates an authenticator backed by `directory`.
    pub fn new(directory: Arc<dyn ClientDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl ClientAuthenticator for DirectoryClientAuthenticator {
    async fn authenticate(
        &self,
        credentials: &ClientCredentials,
    ) -> AuthResult<AuthenticatedClient> {
        let client = self
            .directory
            .get_client(&credentials.client_id)
            .await?
            .ok_or_else(|| AuthError::invalid_client("Invalid client_id"))?;

        let Some(expected) = client.client_secret.as_deref().filter(|s| !s.is_empty()) else {
            return Ok(AuthenticatedClient {
                client,
                auth_method: TokenEndpointAuthMethod::None,
            });
        };

        let provided = credentials
            .client_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| AuthError::invalid_client("Client secret is required"))?;

        if !bool::from(expected.as_bytes().ct_eq(provided.as_bytes())) {
            return Err(AuthError::invalid_client("Invalid client_secret"));
        }

        // 0 means the secret never expires
        if let Some(expires_at) = client.client_secret_expires_at
            && expires_at != 0
            && expires_at < OffsetDateTime::now_utc().unix_timestamp()
        {
            return Err(AuthError::invalid_client("Client secret has expired"));
        }

        Ok(AuthenticatedClient {
            client,
            auth_method: TokenEndpointAuthMethod::ClientSecretPost,
        })
    }
}
