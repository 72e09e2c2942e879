//! Best-effort error reporting for the authorization endpoint.
//!
//! An [`AuthorizeContext`] records how much of the request has been trusted so
//! far. When something fails, [`AuthorizeContext::report_error`] tries to fill
//! in whatever is still missing from the raw parameters and then picks the
//! reporting channel:
//!
//! - a 302 redirect to the client, when both the client and a verified
//!   redirect URI are known;
//! - a direct 400 JSON response otherwise.
//!
//! Recovery never produces a secondary error. A lookup that fails or a URI
//! that does not verify simply leaves that piece of context unknown.

use crate::oauth::authorize::{AuthorizationErrorCode, ErrorReport};
use crate::oauth::params::ParameterSource;
use crate::oauth::redirect::{VerifiedRedirectUri, validate_redirect_uri};
use crate::storage::ClientDirectory;
use crate::types::{ClientRegistration, is_absolute_http_url};

/// Result of an authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizeOutcome {
    /// Send the user-agent to `location` with a 302.
    Redirect { location: String },
    /// Answer the user-agent directly with a 400 JSON body.
    DirectError(ErrorReport),
}

/// Trust accumulated while processing one authorization request.
pub struct AuthorizeContext<'a> {
    params: &'a dyn ParameterSource,
    directory: &'a dyn ClientDirectory,
    client: Option<ClientRegistration>,
    redirect_uri: Option<VerifiedRedirectUri>,
    state: Option<String>,
    client_recovery: bool,
}

impl<'a> AuthorizeContext<'a> {
    /// Creates a context with nothing trusted yet.
    ///
    /// The raw `state` is captured immediately so it can be echoed even if
    /// the request fails to parse.
    pub fn new(params: &'a dyn ParameterSource, directory: &'a dyn ClientDirectory) -> Self {
        Self {
            params,
            directory,
            client: None,
            redirect_uri: None,
            state: params.get("state").map(str::to_owned),
            client_recovery: true,
        }
    }

    /// The raw parameters of the request.
    pub fn params(&self) -> &'a dyn ParameterSource {
        self.params
    }

    pub fn client(&self) -> Option<&ClientRegistration> {
        self.client.as_ref()
    }

    pub fn redirect_uri(&self) -> Option<&VerifiedRedirectUri> {
        self.redirect_uri.as_ref()
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn set_state(&mut self, state: Option<String>) {
        self.state = state;
    }

    pub fn set_client(&mut self, client: ClientRegistration) {
        self.client = Some(client);
    }

    pub fn set_redirect_uri(&mut self, redirect_uri: VerifiedRedirectUri) {
        self.redirect_uri = Some(redirect_uri);
    }

    /// Forbids looking the client up again from the raw `client_id`.
    ///
    /// Used once the directory has answered that the client does not exist.
    pub fn suppress_client_recovery(&mut self) {
        self.client_recovery = false;
    }

    /// Reports an error through the most specific channel the context allows.
    pub async fn report_error(
        &mut self,
        error: AuthorizationErrorCode,
        description: impl Into<String>,
    ) -> AuthorizeOutcome {
        self.recover_client().await;
        self.recover_redirect_uri();
        if self.state.is_none() {
            self.state = self.params.get("state").map(str::to_owned);
        }

        let report = ErrorReport::new(error, description, self.state.clone());

        match (&self.client, &self.redirect_uri) {
            (Some(_), Some(redirect_uri)) => match report.to_redirect_url(redirect_uri) {
                Ok(location) => AuthorizeOutcome::Redirect { location },
                Err(e) => {
                    tracing::warn!(error = %e, "Verified redirect URI could not be parsed");
                    AuthorizeOutcome::DirectError(report)
                }
            },
            _ => AuthorizeOutcome::DirectError(report),
        }
    }

    async fn recover_client(&mut self) {
        if self.client.is_some() || !self.client_recovery {
            return;
        }
        let Some(client_id) = self.params.get("client_id").filter(|id| !id.is_empty()) else {
            return;
        };
        match self.directory.get_client(client_id).await {
            Ok(client) => self.client = client,
            Err(e) => {
                tracing::debug!(client_id = %client_id, error = %e, "Client recovery lookup failed");
            }
        }
    }

    fn recover_redirect_uri(&mut self) {
        if self.redirect_uri.is_some() {
            return;
        }
        let Some(client) = &self.client else {
            return;
        };

        let raw = self.params.get("redirect_uri").filter(|uri| !uri.is_empty());
        if raw.is_some_and(|uri| !is_absolute_http_url(uri)) {
            return;
        }
        self.redirect_uri = validate_redirect_uri(raw, client).ok();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::AuthResult;
    use crate::error::AuthError;
    use crate::oauth::params::QueryParams;
    use crate::storage::MemoryClientDirectory;

    struct FailingDirectory;

    #[async_trait]
    impl ClientDirectory for FailingDirectory {
        async fn get_client(&self, _client_id: &str) -> AuthResult<Option<ClientRegistration>> {
            Err(AuthError::storage("directory unavailable"))
        }
    }

    fn directory() -> MemoryClientDirectory {
        MemoryClientDirectory::from_clients([
            ClientRegistration::new("single", vec!["https://a.example/cb".to_string()]),
            ClientRegistration::new(
                "multi",
                vec![
                    "https://a.example/cb".to_string(),
                    "https://b.example/cb".to_string(),
                ],
            ),
        ])
    }

    fn query_pairs(location: &str) -> HashMap<String, String> {
        url::Url::parse(location)
            .unwrap()
            .query_pairs()
            .into_owned()
            .collect()
    }

    #[tokio::test]
    async fn test_recovers_client_and_sole_redirect_uri() {
        let directory = directory();
        let params = QueryParams::from_query(Some("client_id=single&state=abc"));
        let mut ctx = AuthorizeContext::new(&params, &directory);

        let outcome = ctx
            .report_error(AuthorizationErrorCode::UnsupportedResponseType, "bad")
            .await;

        let AuthorizeOutcome::Redirect { location } = outcome else {
            panic!("expected redirect, got {outcome:?}");
        };
        assert!(location.starts_with("https://a.example/cb?"));
        let pairs = query_pairs(&location);
        assert_eq!(pairs["error"], "unsupported_response_type");
        assert_eq!(pairs["state"], "abc");

        assert_eq!(ctx.client().map(|c| c.client_id.as_str()), Some("single"));
        assert_eq!(
            ctx.redirect_uri().map(VerifiedRedirectUri::as_str),
            Some("https://a.example/cb")
        );
        assert_eq!(ctx.state(), Some("abc"));
    }

    #[tokio::test]
    async fn test_unknown_client_reports_directly() {
        let directory = directory();
        let params = QueryParams::from_query(Some(
            "client_id=ghost&redirect_uri=https%3A%2F%2Fa.example%2Fcb",
        ));
        let mut ctx = AuthorizeContext::new(&params, &directory);

        let outcome = ctx
            .report_error(AuthorizationErrorCode::InvalidRequest, "bad")
            .await;
        assert!(matches!(outcome, AuthorizeOutcome::DirectError(_)));
        assert!(ctx.client().is_none());
        assert!(ctx.redirect_uri().is_none());
    }

    #[tokio::test]
    async fn test_suppressed_recovery_reports_directly() {
        let directory = directory();
        let params = QueryParams::from_query(Some("client_id=single"));
        let mut ctx = AuthorizeContext::new(&params, &directory);
        ctx.suppress_client_recovery();

        let outcome = ctx
            .report_error(AuthorizationErrorCode::InvalidRequest, "bad")
            .await;
        assert!(matches!(outcome, AuthorizeOutcome::DirectError(_)));
        assert!(ctx.client().is_none());
    }

    #[tokio::test]
    async fn test_multiple_uris_without_candidate_reports_directly() {
        let directory = directory();
        let params = QueryParams::from_query(Some("client_id=multi&state=s"));
        let mut ctx = AuthorizeContext::new(&params, &directory);

        let outcome = ctx
            .report_error(AuthorizationErrorCode::InvalidRequest, "bad")
            .await;
        let AuthorizeOutcome::DirectError(report) = outcome else {
            panic!("expected direct error");
        };
        assert_eq!(report.state.as_deref(), Some("s"));
        assert!(ctx.client().is_some());
        assert!(ctx.redirect_uri().is_none());
    }

    #[tokio::test]
    async fn test_malformed_redirect_uri_is_swallowed() {
        let directory = directory();
        let params = QueryParams::from_query(Some("client_id=single&redirect_uri=not%20a%20url"));
        let mut ctx = AuthorizeContext::new(&params, &directory);

        let outcome = ctx
            .report_error(AuthorizationErrorCode::InvalidRequest, "bad")
            .await;
        assert!(matches!(outcome, AuthorizeOutcome::DirectError(_)));
        assert!(ctx.redirect_uri().is_none());
    }

    #[tokio::test]
    async fn test_empty_redirect_uri_counts_as_absent() {
        let directory = directory();
        let params = QueryParams::from_query(Some("client_id=single&redirect_uri="));
        let mut ctx = AuthorizeContext::new(&params, &directory);

        let outcome = ctx
            .report_error(AuthorizationErrorCode::InvalidRequest, "bad")
            .await;
        assert!(matches!(outcome, AuthorizeOutcome::Redirect { .. }));
    }

    #[tokio::test]
    async fn test_directory_failure_never_escalates() {
        let directory = FailingDirectory;
        let params = QueryParams::from_query(Some("client_id=single&state=keep"));
        let mut ctx = AuthorizeContext::new(&params, &directory);

        let outcome = ctx
            .report_error(AuthorizationErrorCode::ServerError, "An unexpected error occurred")
            .await;
        let AuthorizeOutcome::DirectError(report) = outcome else {
            panic!("expected direct error");
        };
        assert_eq!(report.error, AuthorizationErrorCode::ServerError);
        assert_eq!(report.state.as_deref(), Some("keep"));
        assert!(ctx.client().is_none());
        assert_eq!(ctx.state(), Some("keep"));
    }

    #[tokio::test]
    async fn test_absent_state_is_not_invented() {
        let directory = directory();
        let params = QueryParams::from_query(Some("client_id=single"));
        let mut ctx = AuthorizeContext::new(&params, &directory);

        let AuthorizeOutcome::Redirect { location } = ctx
            .report_error(AuthorizationErrorCode::InvalidScope, "bad")
            .await
        else {
            panic!("expected redirect");
        };
        assert!(!query_pairs(&location).contains_key("state"));
        assert_eq!(ctx.state(), None);
    }
}
