//! Authorization endpoint types.
//!
//! This module provides the request model for the OAuth 2.0 authorization
//! endpoint, the error report it produces, and helpers to build redirect URLs.
//!
//! # OAuth 2.0 Authorization Code Flow
//!
//! 1. Client redirects the user to the authorization endpoint
//! 2. The endpoint validates the request and hands it to the authorization decision
//! 3. The user is eventually redirected back to the client with a code or an error
//!
//! # Security Requirements
//!
//! - PKCE is required (`code_challenge`)
//! - Only the S256 challenge method is supported
//! - Errors are only redirected to a verified redirect URI

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::oauth::params::ParameterSource;
use crate::oauth::redirect::VerifiedRedirectUri;
use crate::types::is_absolute_http_url;

/// The only supported PKCE challenge method.
pub const CODE_CHALLENGE_METHOD_S256: &str = "S256";

// =============================================================================
// Authorization Request
// =============================================================================

/// Validated authorization request parameters.
///
/// # Example
///
/// ```ignore
/// GET /authorize?
///   response_type=code
///   &client_id=my-app
///   &redirect_uri=https://app.example.com/callback
///   &scope=read write
///   &state=abc123xyz
///   &code_challenge=E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM
///   &code_challenge_method=S256
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    /// Client identifier issued during registration.
    pub client_id: String,

    /// Requested redirect URI, kept exactly as received.
    /// An empty value is treated as absent.
    pub redirect_uri: Option<String>,

    /// Always `code`.
    pub response_type: String,

    /// PKCE code challenge.
    pub code_challenge: String,

    /// Always `S256`.
    pub code_challenge_method: String,

    /// Opaque client state, echoed verbatim.
    pub state: Option<String>,

    /// Requested scopes (space-separated).
    pub scope: Option<String>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending parameter.
    pub field: &'static str,
    /// What was wrong with it.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors found while parsing an authorization request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.describe())]
pub struct RequestParseError {
    pub fields: Vec<FieldError>,
}

impl RequestParseError {
    /// Returns the error code this failure is reported with.
    ///
    /// Any problem with `response_type` wins over every other field.
    #[must_use]
    pub fn error_code(&self) -> AuthorizationErrorCode {
        if self.fields.iter().any(|f| f.field == "response_type") {
            AuthorizationErrorCode::UnsupportedResponseType
        } else {
            AuthorizationErrorCode::InvalidRequest
        }
    }

    /// Every field error as `field: message`, one per line.
    #[must_use]
    pub fn describe(&self) -> String {
        self.fields
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

const FIELD_REQUIRED: &str = "Field required";

impl AuthorizationRequest {
    /// Parses and validates the request from raw parameters.
    ///
    /// # Errors
    ///
    /// Returns every field-level failure, not just the first.
    pub fn from_params(params: &dyn ParameterSource) -> Result<Self, RequestParseError> {
        let mut errors = Vec::new();

        let client_id = params.get("client_id");
        if client_id.is_none() {
            errors.push(field_error("client_id", FIELD_REQUIRED));
        }

        let redirect_uri = params.get("redirect_uri").filter(|uri| !uri.is_empty());
        if let Some(uri) = redirect_uri
            && !is_absolute_http_url(uri)
        {
            errors.push(field_error(
                "redirect_uri",
                "Input should be a valid absolute http(s) URL",
            ));
        }

        let response_type = params.get("response_type");
        match response_type {
            None => errors.push(field_error("response_type", FIELD_REQUIRED)),
            Some("code") => {}
            Some(_) => errors.push(field_error("response_type", "Input should be 'code'")),
        }

        let code_challenge = params.get("code_challenge");
        if code_challenge.is_none() {
            errors.push(field_error("code_challenge", FIELD_REQUIRED));
        }

        let code_challenge_method = params
            .get("code_challenge_method")
            .unwrap_or(CODE_CHALLENGE_METHOD_S256);
        if code_challenge_method != CODE_CHALLENGE_METHOD_S256 {
            errors.push(field_error(
                "code_challenge_method",
                "Input should be 'S256'",
            ));
        }

        if !errors.is_empty() {
            return Err(RequestParseError { fields: errors });
        }

        Ok(Self {
            client_id: client_id.unwrap_or_default().to_owned(),
            redirect_uri: redirect_uri.map(str::to_owned),
            response_type: response_type.unwrap_or_default().to_owned(),
            code_challenge: code_challenge.unwrap_or_default().to_owned(),
            code_challenge_method: code_challenge_method.to_owned(),
            state: params.get("state").map(str::to_owned),
            scope: params.get("scope").map(str::to_owned),
        })
    }
}

fn field_error(field: &'static str, message: &str) -> FieldError {
    FieldError {
        field,
        message: message.to_owned(),
    }
}

// =============================================================================
// Authorization Params
// =============================================================================

/// Validated parameters handed to the authorization decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationParams {
    pub state: Option<String>,
    /// Validated scopes, `None` when the request carried no scope.
    pub scopes: Option<Vec<String>>,
    pub code_challenge: String,
    pub redirect_uri: VerifiedRedirectUri,
}

// =============================================================================
// Error Report
// =============================================================================

/// Authorization error response.
///
/// Sent either as query parameters on a verified redirect URI or as a JSON
/// body when no redirect target can be trusted.
///
/// # Example
///
/// ```ignore
/// HTTP/1.1 302 Found
/// Location: https://app.example.com/callback?
///   error=invalid_scope
///   &error_description=Client+was+not+registered+with+scope+exec
///   &state=abc123xyz
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// OAuth 2.0 error code.
    pub error: AuthorizationErrorCode,

    /// Human-readable error description.
    pub error_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_uri: Option<String>,

    /// State copied verbatim from the request, never invented.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl ErrorReport {
    /// Creates a new error report without an error URI.
    #[must_use]
    pub fn new(
        error: AuthorizationErrorCode,
        description: impl Into<String>,
        state: Option<String>,
    ) -> Self {
        Self {
            error,
            error_description: description.into(),
            error_uri: None,
            state,
        }
    }

    /// Builds the redirect URL carrying this error.
    ///
    /// Existing query parameters on the redirect URI are preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if the redirect URI cannot be parsed.
    pub fn to_redirect_url(
        &self,
        redirect_uri: &VerifiedRedirectUri,
    ) -> Result<String, url::ParseError> {
        construct_redirect_uri(
            redirect_uri.as_str(),
            &[
                ("error", Some(self.error.as_str())),
                ("error_description", Some(self.error_description.as_str())),
                ("error_uri", self.error_uri.as_deref()),
                ("state", self.state.as_deref()),
            ],
        )
    }
}

/// Appends query parameters to a base URI.
///
/// The base URI's existing query pairs are kept. Parameters whose value is
/// `None` are skipped.
///
/// # Errors
///
/// Returns an error if `base` is not a valid absolute URL.
pub fn construct_redirect_uri(
    base: &str,
    params: &[(&str, Option<&str>)],
) -> Result<String, url::ParseError> {
    let mut url = url::Url::parse(base)?;
    if params.iter().any(|(_, value)| value.is_some()) {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            if let Some(value) = value {
                pairs.append_pair(key, value);
            }
        }
    }
    Ok(url.to_string())
}

// =============================================================================
// Error Codes
// =============================================================================

/// OAuth 2.0 authorization error codes.
///
/// These error codes are defined in RFC 6749 Section 4.1.2.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationErrorCode {
    /// The request is missing a required parameter, includes an invalid
    /// parameter value, includes a parameter more than once, or is
    /// otherwise malformed.
    InvalidRequest,

    /// The client is not authorized to request an authorization code
    /// using this method.
    UnauthorizedClient,

    /// The resource owner or authorization server denied the request.
    AccessDenied,

    /// The authorization server does not support obtaining an authorization
    /// code using this method.
    UnsupportedResponseType,

    /// The requested scope is invalid, unknown, or malformed.
    InvalidScope,

    /// The authorization server encountered an unexpected condition.
    ServerError,

    /// The authorization server is temporarily unable to handle the request.
    TemporarilyUnavailable,
}

impl AuthorizationErrorCode {
    /// Returns the string representation of the error code.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::UnauthorizedClient => "unauthorized_client",
            Self::AccessDenied => "access_denied",
            Self::UnsupportedResponseType => "unsupported_response_type",
            Self::InvalidScope => "invalid_scope",
            Self::ServerError => "server_error",
            Self::TemporarilyUnavailable => "temporarily_unavailable",
        }
    }
}

impl fmt::Display for AuthorizationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
