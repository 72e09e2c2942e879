//! Token revocation endpoint handler (RFC 7009).
//!
//! # Usage
//!
//! ```ignore
//! use axum::{Router, routing::post};
//! use authgate_core::http::{RevocationState, revoke_handler};
//!
//! let app = Router::new()
//!     .route("/revoke", post(revoke_handler))
//!     .with_state(RevocationState::new(handler));
//! ```
//!
//! # Request Format
//!
//! ```text
//! POST /revoke
//! Content-Type: application/json
//!
//! {"token": "...", "client_id": "...", "client_secret": "..."}
//! ```
//!
//! # Response
//!
//! - 200 OK with an empty body once the client is authenticated
//! - 400 Bad Request for a malformed body or failed client authentication
//! - 500 Internal Server Error when the token store fails

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::oauth::RevocationHandler;

// =============================================================================
// State Types
// =============================================================================

/// State required for the revocation endpoint.
#[derive(Clone)]
pub struct RevocationState {
    pub handler: RevocationHandler,
}

impl RevocationState {
    /// Creates a new revocation state.
    pub fn new(handler: RevocationHandler) -> Self {
        Self { handler }
    }
}

// =============================================================================
// Handler
// =============================================================================

/// Token revocation endpoint handler.
pub async fn revoke_handler(State(state): State<RevocationState>, body: Bytes) -> Response {
    match state.handler.handle(&body).await {
        Ok(()) => (
            StatusCode::OK,
            [
                (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
                (header::PRAGMA, HeaderValue::from_static("no-cache")),
            ],
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
