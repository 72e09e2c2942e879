//! # authgate-core
//!
//! OAuth 2.0 authorization endpoint and token revocation endpoint.
//!
//! This crate provides:
//! - Authorization request validation for the authorization code flow with PKCE
//! - Error reporting that only redirects to a verified client redirect URI
//! - Token revocation with client authentication
//! - Authorization server metadata
//!
//! ## Overview
//!
//! The authorization endpoint establishes trust step by step: first the
//! request shape, then the client, then the redirect target, then the scope.
//! Errors found before the redirect target is verified are answered directly;
//! errors found after are redirected back to the client.
//!
//! Client storage, the authorization decision and token invalidation are
//! external collaborators plugged in through traits.
//!
//! ## Modules
//!
//! - [`config`] - Issuer and endpoint configuration
//! - [`oauth`] - Endpoint logic, independent of the HTTP framework
//! - [`storage`] - Client directory trait and in-memory implementation
//! - [`types`] - Client registration types
//! - [`http`] - Axum handlers and router

pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod storage;
pub mod types;

pub use config::{AuthConfig, ConfigError, RevocationOptions};
pub use error::{AuthError, ErrorCategory};
pub use http::{
    AuthorizeState, MetadataState, RevocationState, auth_router, authorize_get, authorize_post,
    metadata_handler, revoke_handler,
};
pub use oauth::{
    AuthenticatedClient, AuthorizationErrorCode, AuthorizationHandler, AuthorizationParams,
    AuthorizationProvider, AuthorizeOutcome, ClientAuthenticator, ClientCredentials,
    DirectoryClientAuthenticator, ErrorReport, RevocationHandler, RevocationRequest, TokenRevoker,
    VerifiedRedirectUri,
};
pub use storage::{ClientDirectory, MemoryClientDirectory};
pub use types::{ClientRegistration, ClientValidationError, GrantType, TokenEndpointAuthMethod};

/// Type alias for authentication/authorization results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use authgate_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::config::{AuthConfig, ConfigError, RevocationOptions};
    pub use crate::error::{AuthError, ErrorCategory};
    pub use crate::http::auth_router;
    pub use crate::oauth::{
        AuthenticatedClient, AuthorizationErrorCode, AuthorizationHandler, AuthorizationParams,
        AuthorizationProvider, AuthorizeOutcome, ClientAuthenticator, ClientCredentials,
        DirectoryClientAuthenticator, ErrorReport, RevocationHandler, RevocationRequest,
        TokenRevoker, TokenTypeHint, VerifiedRedirectUri, construct_redirect_uri,
    };
    pub use crate::storage::{ClientDirectory, MemoryClientDirectory};
    pub use crate::types::{
        ClientRegistration, ClientValidationError, GrantType, ResponseType,
        TokenEndpointAuthMethod,
    };
}
