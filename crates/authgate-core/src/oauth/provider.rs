//! External collaborators consulted by the endpoints.
//!
//! The authorization decision (consent, login, code issuance) and the actual
//! token invalidation live outside this crate and are plugged in through these
//! traits.

use async_trait::async_trait;

use crate::AuthResult;
use crate::oauth::authorize::AuthorizationParams;
use crate::oauth::client_auth::AuthenticatedClient;
use crate::oauth::revoke::RevocationRequest;
use crate::types::ClientRegistration;

/// Decides what happens to a fully validated authorization request.
#[async_trait]
pub trait AuthorizationProvider: Send + Sync {
    /// Returns the URI the user-agent is sent to next.
    ///
    /// This is typically a login or consent page, or the client's redirect
    /// URI carrying an authorization code.
    ///
    /// # Errors
    ///
    /// Any error is reported to the client as `server_error`.
    async fn authorize(
        &self,
        client: &ClientRegistration,
        params: &AuthorizationParams,
    ) -> AuthResult<String>;
}

/// Invalidates a token on behalf of an authenticated client.
#[async_trait]
pub trait TokenRevoker: Send + Sync {
    /// Revokes the token named in `request`.
    ///
    /// Unknown or already revoked tokens must be treated as success.
    ///
    /// # Errors
    ///
    /// Returns an error only when the token store itself fails.
    async fn revoke(
        &self,
        client: &AuthenticatedClient,
        request: &RevocationRequest,
    ) -> AuthResult<()>;
}
