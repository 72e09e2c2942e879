//! Authorization endpoint handlers.
//!
//! ```text
//! GET  /authorize?response_type=code&client_id=...
//! POST /authorize   (application/x-www-form-urlencoded)
//! ```
//!
//! Both return either `302 Found` with a `Location` header or `400 Bad Request`
//! with a JSON error body. Every response carries `Cache-Control: no-store`.

use axum::{
    Json,
    body::Bytes,
    extract::{RawQuery, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::oauth::{AuthorizationHandler, AuthorizeOutcome, FormParams, QueryParams};

// =============================================================================
// State Types
// =============================================================================

/// State required for the authorization endpoint.
#[derive(Clone)]
pub struct AuthorizeState {
    pub handler: AuthorizationHandler,
}

impl AuthorizeState {
    /// Creates a new authorization endpoint state.
    pub fn new(handler: AuthorizationHandler) -> Self {
        Self { handler }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handler for `GET /authorize`.
pub async fn authorize_get(
    State(state): State<AuthorizeState>,
    RawQuery(query): RawQuery,
) -> Response {
    let params = QueryParams::from_query(query.as_deref());
    state.handler.handle(&params).await.into_response()
}

/// Handler for `POST /authorize` with a form-encoded body.
pub async fn authorize_post(State(state): State<AuthorizeState>, body: Bytes) -> Response {
    let params = FormParams::from_body(&body);
    state.handler.handle(&params).await.into_response()
}

// =============================================================================
// Response Conversion
// =============================================================================

fn no_store() -> HeaderValue {
    HeaderValue::from_static("no-store")
}

impl IntoResponse for AuthorizeOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect { location } => match HeaderValue::try_from(location) {
                Ok(location) => (
                    StatusCode::FOUND,
                    [(header::LOCATION, location), (header::CACHE_CONTROL, no_store())],
                )
                    .into_response(),
                Err(e) => {
                    tracing::error!(error = %e, "Redirect location is not a valid header value");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        [(header::CACHE_CONTROL, no_store())],
                    )
                        .into_response()
                }
            },
            Self::DirectError(report) => (
                StatusCode::BAD_REQUEST,
                [(header::CACHE_CONTROL, no_store())],
                Json(report),
            )
                .into_response(),
        }
    }
}
