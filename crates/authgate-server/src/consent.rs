//! Authorization decision that hands validated requests to a consent page.

use async_trait::async_trait;
use authgate_core::oauth::authorize::CODE_CHALLENGE_METHOD_S256;
use authgate_core::oauth::{AuthorizationParams, AuthorizationProvider, construct_redirect_uri};
use authgate_core::{AuthError, AuthResult, ClientRegistration};

/// Redirects every validated authorization request to an external
/// login/consent page.
///
/// The page receives the validated parameters in its query string and is
/// responsible for issuing the authorization code.
#[derive(Debug, Clone)]
pub struct ConsentRedirectProvider {
    consent_url: String,
}

impl ConsentRedirectProvider {
    pub fn new(consent_url: impl Into<String>) -> Self {
        Self {
            consent_url: consent_url.into(),
        }
    }
}

#[async_trait]
impl AuthorizationProvider for ConsentRedirectProvider {
    async fn authorize(
        &self,
        client: &ClientRegistration,
        params: &AuthorizationParams,
    ) -> AuthResult<String> {
        let scope = params.scopes.as_ref().map(|s| s.join(" "));

        construct_redirect_uri(
            &self.consent_url,
            &[
                ("client_id", Some(client.client_id.as_str())),
                ("redirect_uri", Some(params.redirect_uri.as_str())),
                ("code_challenge", Some(params.code_challenge.as_str())),
                ("code_challenge_method", Some(CODE_CHALLENGE_METHOD_S256)),
                ("scope", scope.as_deref()),
                ("state", params.state.as_deref()),
            ],
        )
        .map_err(|e| AuthError::configuration(format!("consent URL is invalid: {e}")))
    }
}
