//! Revocation hook for deployments where tokens live in an external service.

use async_trait::async_trait;
use authgate_core::oauth::{AuthenticatedClient, RevocationRequest, TokenRevoker};
use authgate_core::AuthResult;

/// Records revocation requests in the log and otherwise does nothing.
///
/// The token itself is never logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTokenRevoker;

#[async_trait]
impl TokenRevoker for TracingTokenRevoker {
    async fn revoke(
        &self,
        client: &AuthenticatedClient,
        request: &RevocationRequest,
    ) -> AuthResult<()> {
        tracing::info!(
            client_id = %client.client.client_id,
            auth_method = %client.auth_method,
            token_type_hint = ?request.token_type_hint,
            "revocation requested"
        );
        Ok(())
    }
}
