//! Authorization endpoint state machine.
//!
//! Each step can fail, and each failure is reported with exactly the trust
//! established before it:
//!
//! 1. parse the request (best-effort client recovery)
//! 2. resolve the client (unknown client: always direct)
//! 3. verify the redirect URI (direct, no redirect target yet)
//! 4. validate scope (redirected to the client)
//! 5. delegate to the [`AuthorizationProvider`]
//!
//! Unexpected failures from the directory or provider are caught in one place
//! and reported as `server_error`.

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::AuthResult;
use crate::error::AuthError;
use crate::oauth::authorize::{AuthorizationErrorCode, AuthorizationParams, AuthorizationRequest};
use crate::oauth::context::{AuthorizeContext, AuthorizeOutcome};
use crate::oauth::params::ParameterSource;
use crate::oauth::provider::AuthorizationProvider;
use crate::oauth::redirect::validate_redirect_uri;
use crate::oauth::scope::validate_scope;
use crate::storage::ClientDirectory;

const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Handles OAuth 2.0 authorization requests.
#[derive(Clone)]
pub struct AuthorizationHandler {
    directory: Arc<dyn ClientDirectory>,
    provider: Arc<dyn AuthorizationProvider>,
}

impl AuthorizationHandler {
    /// Creates a new authorization handler.
    pub fn new(
        directory: Arc<dyn ClientDirectory>,
        provider: Arc<dyn AuthorizationProvider>,
    ) -> Self {
        Self {
            directory,
            provider,
        }
    }

    /// Processes one authorization request.
    ///
    /// Never fails: every error becomes either a redirect to the client or a
    /// direct error report.
    pub async fn handle(&self, params: &dyn ParameterSource) -> AuthorizeOutcome {
        let mut ctx = AuthorizeContext::new(params, self.directory.as_ref());

        match self.process(&mut ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    category = %e.category(),
                    "Unexpected error in authorization handler"
                );
                ctx.report_error(AuthorizationErrorCode::ServerError, UNEXPECTED_ERROR)
                    .await
            }
        }
    }

    async fn process(&self, ctx: &mut AuthorizeContext<'_>) -> AuthResult<AuthorizeOutcome> {
        let request = match AuthorizationRequest::from_params(ctx.params()) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "Malformed authorization request");
                return Ok(ctx.report_error(e.error_code(), e.describe()).await);
            }
        };
        ctx.set_state(request.state.clone());

        let Some(client) = self.directory.get_client(&request.client_id).await? else {
            tracing::debug!(client_id = %request.client_id, "Unknown client");
            ctx.suppress_client_recovery();
            return Ok(ctx
                .report_error(
                    AuthorizationErrorCode::InvalidRequest,
                    format!("Client ID '{}' not found", request.client_id),
                )
                .await);
        };
        ctx.set_client(client.clone());

        let redirect_uri = match validate_redirect_uri(request.redirect_uri.as_deref(), &client) {
            Ok(uri) => uri,
            Err(e) => {
                tracing::debug!(client_id = %client.client_id, error = %e, "Redirect URI rejected");
                return Ok(ctx
                    .report_error(AuthorizationErrorCode::InvalidRequest, e.description())
                    .await);
            }
        };
        ctx.set_redirect_uri(redirect_uri.clone());

        let scopes = match validate_scope(request.scope.as_deref(), &client) {
            Ok(scopes) => scopes,
            Err(e) => {
                tracing::debug!(client_id = %client.client_id, error = %e, "Scope rejected");
                return Ok(ctx
                    .report_error(AuthorizationErrorCode::InvalidScope, e.description())
                    .await);
            }
        };

        let params = AuthorizationParams {
            state: request.state,
            scopes,
            code_challenge: request.code_challenge,
            redirect_uri,
        };

        let location = self.provider.authorize(&client, &params).await?;
        if HeaderValue::from_str(&location).is_err() {
            return Err(AuthError::internal(
                "authorization provider returned an invalid redirect location",
            ));
        }
        Ok(AuthorizeOutcome::Redirect { location })
    }
}
