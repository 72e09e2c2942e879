//! Authorization server metadata discovery handler.
//!
//! Provides the `/.well-known/oauth-authorization-server` endpoint (RFC 8414).

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::oauth::AuthorizationServerMetadata;

/// State for the metadata endpoint.
///
/// The document is built once when the router is assembled.
#[derive(Clone)]
pub struct MetadataState {
    pub metadata: Arc<AuthorizationServerMetadata>,
}

impl MetadataState {
    /// Creates a new metadata state.
    pub fn new(metadata: AuthorizationServerMetadata) -> Self {
        Self {
            metadata: Arc::new(metadata),
        }
    }
}

/// Handler for `GET /.well-known/oauth-authorization-server`.
pub async fn metadata_handler(State(state): State<MetadataState>) -> impl IntoResponse {
    Json(state.metadata.as_ref().clone())
}
