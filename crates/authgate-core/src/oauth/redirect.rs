//! Redirect URI verification.
//!
//! [`validate_redirect_uri`] is the only way to obtain a [`VerifiedRedirectUri`],
//! and a `VerifiedRedirectUri` is the only redirect target the error reporting
//! code accepts. An unverified URI can therefore never be used as a redirect.

use std::fmt;

use crate::error::AuthError;
use crate::types::ClientRegistration;

/// A redirect URI checked against a specific client's registered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedRedirectUri(String);

impl VerifiedRedirectUri {
    /// Returns the URI exactly as registered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerifiedRedirectUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves the redirect URI for a request.
///
/// - A supplied candidate must match a registered URI byte for byte.
/// - An absent candidate selects the sole registered URI, if there is exactly one.
///
/// # Errors
///
/// Returns `InvalidRequest` if the candidate is not registered, or if it is
/// absent and the client does not have exactly one registered URI.
pub fn validate_redirect_uri(
    candidate: Option<&str>,
    client: &ClientRegistration,
) -> Result<VerifiedRedirectUri, AuthError> {
    match candidate {
        Some(uri) if client.is_redirect_uri_registered(uri) => {
            Ok(VerifiedRedirectUri(uri.to_owned()))
        }
        Some(uri) => Err(AuthError::invalid_request(format!(
            "Redirect URI '{uri}' not registered for client"
        ))),
        None => match client.redirect_uris.as_slice() {
            [only] => Ok(VerifiedRedirectUri(only.clone())),
            _ => Err(AuthError::invalid_request(
                "redirect_uri must be specified when client has multiple registered URIs",
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(uris: &[&str]) -> ClientRegistration {
        ClientRegistration::new("app", uris.iter().map(|u| (*u).to_string()).collect())
    }

    #[test]
    fn test_registered_candidate_is_verified() {
        let client = client(&["https://a.example/cb", "https://b.example/cb"]);
        let verified = validate_redirect_uri(Some("https://b.example/cb"), &client).unwrap();
        assert_eq!(verified.as_str(), "https://b.example/cb");
    }

    #[test]
    fn test_unregistered_candidate_rejected() {
        let client = client(&["https://a.example/cb"]);
        let err = validate_redirect_uri(Some("https://evil.example/cb"), &client).unwrap_err();
        assert_eq!(
            err.description(),
            "Redirect URI 'https://evil.example/cb' not registered for client"
        );
    }

    #[test]
    fn test_comparison_is_byte_for_byte() {
        let client = client(&["https://a.example/cb"]);
        assert!(validate_redirect_uri(Some("https://a.example/cb/"), &client).is_err());
        assert!(validate_redirect_uri(Some("https://a.example/cb?x=1"), &client).is_err());
    }

    #[test]
    fn test_absent_candidate_selects_sole_uri() {
        let client = client(&["https://a.example/cb"]);
        let verified = validate_redirect_uri(None, &client).unwrap();
        assert_eq!(verified.to_string(), "https://a.example/cb");
    }

    #[test]
    fn test_absent_candidate_with_multiple_uris() {
        let client = client(&["https://a.example/cb", "https://b.example/cb"]);
        let err = validate_redirect_uri(None, &client).unwrap_err();
        assert_eq!(err.oauth_error_code(), "invalid_request");
        assert_eq!(
            err.description(),
            "redirect_uri must be specified when client has multiple registered URIs"
        );
    }

    #[test]
    fn test_absent_candidate_with_no_uris() {
        let client = client(&[]);
        assert!(validate_redirect_uri(None, &client).is_err());
    }
}
