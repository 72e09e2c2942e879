//! Token revocation (RFC 7009).
//!
//! The request body is JSON:
//!
//! ```text
//! POST /revoke
//! Content-Type: application/json
//!
//! {"token": "...", "token_type_hint": "refresh_token",
//!  "client_id": "my-app", "client_secret": "..."}
//! ```
//!
//! Per RFC 7009 an authenticated client always gets a 200, whether or not the
//! token existed.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::AuthResult;
use crate::error::AuthError;
use crate::oauth::client_auth::{ClientAuthenticator, ClientCredentials};
use crate::oauth::provider::TokenRevoker;

// =============================================================================
// Request Types
// =============================================================================

/// Hint about the type of the token being revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenTypeHint {
    AccessToken,
    RefreshToken,
}

impl TokenTypeHint {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
        }
    }
}

impl fmt::Display for TokenTypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parsed revocation request.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRequest {
    /// The token to revoke.
    pub token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type_hint: Option<TokenTypeHint>,

    /// Credentials of the client asking for revocation.
    #[serde(flatten)]
    pub credentials: ClientCredentials,
}

impl fmt::Debug for RevocationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevocationRequest")
            .field("token", &"***")
            .field("token_type_hint", &self.token_type_hint)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl RevocationRequest {
    /// Parses a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` describing why the body was rejected.
    pub fn from_json(body: &[u8]) -> AuthResult<Self> {
        serde_json::from_slice(body)
            .map_err(|e| AuthError::invalid_request(format!("Invalid request body: {e}")))
    }
}

// =============================================================================
// Handler
// =============================================================================

/// Handles token revocation requests.
#[derive(Clone)]
pub struct RevocationHandler {
    authenticator: Arc<dyn ClientAuthenticator>,
    revoker: Option<Arc<dyn TokenRevoker>>,
}

impl RevocationHandler {
    /// Creates a revocation handler.
    ///
    /// Without a `revoker`, requests are authenticated and acknowledged only.
    pub fn new(
        authenticator: Arc<dyn ClientAuthenticator>,
        revoker: Option<Arc<dyn TokenRevoker>>,
    ) -> Self {
        Self {
            authenticator,
            revoker,
        }
    }

    /// Processes a raw JSON request body.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the body does not parse
    /// - whatever the authenticator returns, unchanged
    /// - `Internal` if the revocation hook fails
    pub async fn handle(&self, body: &[u8]) -> AuthResult<()> {
        let request = RevocationRequest::from_json(body)?;

        let client = match self.authenticator.authenticate(&request.credentials).await {
            Ok(client) => client,
            Err(e) => {
                tracing::debug!(
                    client_id = %request.credentials.client_id,
                    error = %e,
                    "Revocation: client authentication failed"
                );
                return Err(e);
            }
        };

        if let Some(revoker) = &self.revoker
            && let Err(e) = revoker.revoke(&client, &request).await
        {
            tracing::error!(
                client_id = %client.client.client_id,
                error = %e,
                "Token revocation hook failed"
            );
            return Err(AuthError::internal("Token revocation failed"));
        }

        tracing::info!(
            client_id = %client.client.client_id,
            token_type_hint = ?request.token_type_hint,
            "Token revocation successful"
        );
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::oauth::client_auth::{AuthenticatedClient, DirectoryClientAuthenticator};
    use crate::storage::MemoryClientDirectory;
    use crate::types::ClientRegistration;

    #[derive(Default)]
    struct RecordingRevoker {
        revoked: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl TokenRevoker for RecordingRevoker {
        async fn revoke(
            &self,
            client: &AuthenticatedClient,
            request: &RevocationRequest,
        ) -> AuthResult<()> {
            self.revoked
                .lock()
                .unwrap()
                .push((client.client.client_id.clone(), request.token.clone()));
            Ok(())
        }
    }

    struct FailingRevoker;

    #[async_trait]
    impl TokenRevoker for FailingRevoker {
        async fn revoke(
            &self,
            _client: &AuthenticatedClient,
            _request: &RevocationRequest,
        ) -> AuthResult<()> {
            Err(AuthError::storage("token store offline"))
        }
    }

    fn authenticator() -> Arc<dyn ClientAuthenticator> {
        Arc::new(DirectoryClientAuthenticator::new(Arc::new(
            MemoryClientDirectory::from_clients([ClientRegistration::new(
                "app",
                vec!["https://a.example/cb".to_string()],
            )
            .with_secret("s3cret")]),
        )))
    }

    fn handler(revoker: Option<Arc<dyn TokenRevoker>>) -> RevocationHandler {
        RevocationHandler::new(authenticator(), revoker)
    }

    #[test]
    fn test_parse_request() {
        let request = RevocationRequest::from_json(
            br#"{"token":"t1","token_type_hint":"refresh_token","client_id":"app"}"#,
        )
        .unwrap();
        assert_eq!(request.token, "t1");
        assert_eq!(request.token_type_hint, Some(TokenTypeHint::RefreshToken));
        assert_eq!(request.credentials.client_id, "app");
        assert_eq!(request.credentials.client_secret, None);
    }

    #[test]
    fn test_parse_rejects_unknown_hint() {
        let err = RevocationRequest::from_json(
            br#"{"token":"t1","token_type_hint":"id_token","client_id":"app"}"#,
        )
        .unwrap_err();
        assert!(err.description().starts_with("Invalid request body: "));
    }

    #[test]
    fn test_debug_hides_token() {
        let request =
            RevocationRequest::from_json(br#"{"token":"secret-token","client_id":"app"}"#)
                .unwrap();
        assert!(!format!("{request:?}").contains("secret-token"));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let err = handler(None).handle(b"token=abc").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRequest { .. }));
        assert!(err.description().starts_with("Invalid request body: "));
    }

    #[tokio::test]
    async fn test_missing_token_field() {
        let err = handler(None)
            .handle(br#"{"client_id":"app","client_secret":"s3cret"}"#)
            .await
            .unwrap_err();
        assert_eq!(err.oauth_error_code(), "invalid_request");
    }

    #[tokio::test]
    async fn test_failed_authentication_skips_hook() {
        let revoker = Arc::new(RecordingRevoker::default());
        let err = handler(Some(revoker.clone()))
            .handle(br#"{"token":"t","client_id":"app","client_secret":"wrong"}"#)
            .await
            .unwrap_err();

        assert_eq!(err.oauth_error_code(), "invalid_client");
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert!(revoker.revoked.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_successful_revocation_invokes_hook() {
        let revoker = Arc::new(RecordingRevoker::default());
        handler(Some(revoker.clone()))
            .handle(br#"{"token":"unknown-token","client_id":"app","client_secret":"s3cret"}"#)
            .await
            .unwrap();

        assert_eq!(
            *revoker.revoked.lock().unwrap(),
            vec![("app".to_string(), "unknown-token".to_string())]
        );
    }

    #[tokio::test]
    async fn test_without_hook_succeeds() {
        handler(None)
            .handle(br#"{"token":"t","client_id":"app","client_secret":"s3cret"}"#)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_hook_failure_is_server_error() {
        let err = handler(Some(Arc::new(FailingRevoker)))
            .handle(br#"{"token":"t","client_id":"app","client_secret":"s3cret"}"#)
            .await
            .unwrap_err();
        assert_eq!(err.oauth_error_code(), "server_error");
        assert!(err.is_server_error());
    }
}
