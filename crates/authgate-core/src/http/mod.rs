//! HTTP handlers for the OAuth 2.0 endpoints.
//!
//! # Available Handlers
//!
//! - [`authorize`] - Authorization endpoint (GET and POST)
//! - [`revoke`] - Token revocation endpoint (RFC 7009)
//! - [`metadata`] - Authorization server metadata (RFC 8414)
//!
//! [`auth_router`] wires all of them together.

pub mod authorize;
pub mod metadata;
pub mod revoke;
pub mod router;

pub use authorize::{AuthorizeState, authorize_get, authorize_post};
pub use metadata::{MetadataState, metadata_handler};
pub use revoke::{RevocationState, revoke_handler};
pub use router::auth_router;
