//! OAuth 2.0 authorization and revocation endpoint logic.
//!
//! This module is transport-independent: handlers take raw parameters or a
//! raw body and return an outcome. The [`crate::http`] module adapts them to
//! axum.
//!
//! # Authorization Code Flow
//!
//! - [`params`] - Query string and form body parameter sources
//! - [`authorize`] - Request parsing, error report and redirect construction
//! - [`redirect`] - Redirect URI verification
//! - [`scope`] - Requested scope validation
//! - [`context`] - Best-effort error reporting
//! - [`handler`] - The authorization state machine
//!
//! # Example
//!
//! ```ignore
//! use authgate_core::oauth::{AuthorizationHandler, AuthorizeOutcome, QueryParams};
//!
//! let handler = AuthorizationHandler::new(directory, provider);
//! match handler.handle(&QueryParams::from_query(Some(query))).await {
//!     AuthorizeOutcome::Redirect { location } => { /* 302 */ }
//!     AuthorizeOutcome::DirectError(report) => { /* 400 JSON */ }
//! }
//! ```

pub mod authorize;
pub mod client_auth;
pub mod context;
pub mod handler;
pub mod metadata;
pub mod params;
pub mod provider;
pub mod redirect;
pub mod revoke;
pub mod scope;

// Authorization endpoint types
pub use authorize::{
    AuthorizationErrorCode, AuthorizationParams, AuthorizationRequest, ErrorReport, FieldError,
    RequestParseError, construct_redirect_uri,
};
pub use context::{AuthorizeContext, AuthorizeOutcome};
pub use handler::AuthorizationHandler;
pub use params::{FormParams, ParameterSource, QueryParams};
pub use redirect::{VerifiedRedirectUri, validate_redirect_uri};
pub use scope::validate_scope;

// Client authentication
pub use client_auth::{
    AuthenticatedClient, ClientAuthenticator, ClientCredentials, DirectoryClientAuthenticator,
};

// Collaborators
pub use provider::{AuthorizationProvider, TokenRevoker};

// Revocation
pub use revoke::{RevocationHandler, RevocationRequest, TokenTypeHint};

// Metadata
pub use metadata::{
    AUTHORIZATION_PATH, AuthorizationServerMetadata, METADATA_PATH, REVOCATION_PATH, TOKEN_PATH,
    build_metadata, validate_issuer_url,
};
