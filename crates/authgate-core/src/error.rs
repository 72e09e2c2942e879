//! Error type shared by collaborators, validators and the revocation endpoint.
//!
//! Rendered over HTTP as an OAuth 2.0 JSON error body.

use std::fmt;

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors raised while authorizing or revoking.
///
/// The first five variants are failures caused by the caller; the rest are
/// failures of this server or its collaborators and surface as `server_error`.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid client: {message}")]
    InvalidClient { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// For providers that narrow scopes further than the registration does.
    /// The endpoint's own scope check reports `invalid_scope` through
    /// `AuthorizationErrorCode`.
    #[error("Invalid scope: {message}")]
    InvalidScope { message: String },

    /// For collaborators; request parsing reports this through
    /// `AuthorizationErrorCode`.
    #[error("Unsupported response type: {response_type}")]
    UnsupportedResponseType { response_type: String },

    /// Raised by authorization providers when the resource owner refuses.
    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    /// Client directory or token store failure.
    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AuthError {
    #[must_use]
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::InvalidClient {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn invalid_scope(message: impl Into<String>) -> Self {
        Self::InvalidScope {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unsupported_response_type(response_type: impl Into<String>) -> Self {
        Self::UnsupportedResponseType {
            response_type: response_type.into(),
        }
    }

    #[must_use]
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The text sent as `error_description`. Unlike `Display`, it carries no
    /// variant prefix.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::UnsupportedResponseType { response_type } => {
                format!("Unsupported response type: {response_type}")
            }
            Self::InvalidClient { message }
            | Self::InvalidRequest { message }
            | Self::InvalidScope { message }
            | Self::AccessDenied { message }
            | Self::Storage { message }
            | Self::Configuration { message }
            | Self::Internal { message } => message.clone(),
        }
    }

    /// `true` when the failure lies with this server rather than the caller.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. } | Self::Configuration { .. } | Self::Internal { .. }
        )
    }

    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidClient { .. } => ErrorCategory::Authentication,
            Self::InvalidRequest { .. } | Self::UnsupportedResponseType { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidScope { .. } | Self::AccessDenied { .. } => ErrorCategory::Authorization,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// OAuth 2.0 `error` value. Server-side failures all map to `server_error`.
    #[must_use]
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::InvalidClient { .. } => "invalid_client",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::InvalidScope { .. } => "invalid_scope",
            Self::UnsupportedResponseType { .. } => "unsupported_response_type",
            Self::AccessDenied { .. } => "access_denied",
            Self::Storage { .. } | Self::Configuration { .. } | Self::Internal { .. } => {
                "server_error"
            }
        }
    }

    /// 500 for server-side failures, 400 for everything else, client
    /// authentication failures included.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        if self.is_server_error() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::BAD_REQUEST
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.oauth_error_code(),
            "error_description": self.description(),
        });

        (
            self.status_code(),
            [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
            Json(body),
        )
            .into_response()
    }
}

/// Coarse grouping of [`AuthError`] used as a log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Authentication,
    Authorization,
    Validation,
    Infrastructure,
    Configuration,
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
            Self::Validation => "validation",
            Self::Infrastructure => "infrastructure",
            Self::Configuration => "configuration",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}
