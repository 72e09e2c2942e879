//! Router assembling the authorization server endpoints.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::config::AuthConfig;
use crate::http::authorize::{AuthorizeState, authorize_get, authorize_post};
use crate::http::metadata::{MetadataState, metadata_handler};
use crate::http::revoke::{RevocationState, revoke_handler};
use crate::oauth::{
    AUTHORIZATION_PATH, AuthorizationHandler, AuthorizationProvider, ClientAuthenticator,
    METADATA_PATH, REVOCATION_PATH, RevocationHandler, TokenRevoker, build_metadata,
};
use crate::storage::ClientDirectory;

/// Builds the authorization server router.
///
/// Routes:
/// - `GET|POST /authorize`
/// - `GET /.well-known/oauth-authorization-server`
/// - `POST /revoke`, only when `config.revocation.enabled`
pub fn auth_router(
    config: &AuthConfig,
    directory: Arc<dyn ClientDirectory>,
    provider: Arc<dyn AuthorizationProvider>,
    authenticator: Arc<dyn ClientAuthenticator>,
    revoker: Option<Arc<dyn TokenRevoker>>,
) -> Router {
    let authorize_state = AuthorizeState::new(AuthorizationHandler::new(directory, provider));
    let metadata_state = MetadataState::new(build_metadata(config));

    let mut router = Router::new()
        .route(
            AUTHORIZATION_PATH,
            get(authorize_get).post(authorize_post),
        )
        .with_state(authorize_state)
        .merge(
            Router::new()
                .route(METADATA_PATH, get(metadata_handler))
                .with_state(metadata_state),
        );

    if config.revocation.enabled {
        let revocation_state =
            RevocationState::new(RevocationHandler::new(authenticator, revoker));
        router = router.merge(
            Router::new()
                .route(REVOCATION_PATH, post(revoke_handler))
                .with_state(revocation_state),
        );
    }

    router
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::AuthResult;
    use crate::config::RevocationOptions;
    use crate::oauth::{AuthorizationParams, DirectoryClientAuthenticator};
    use crate::storage::MemoryClientDirectory;
    use crate::types::ClientRegistration;

    struct CodeProvider;

    #[async_trait]
    impl AuthorizationProvider for CodeProvider {
        async fn authorize(
            &self,
            _client: &ClientRegistration,
            params: &AuthorizationParams,
        ) -> AuthResult<String> {
            crate::oauth::construct_redirect_uri(
                params.redirect_uri.as_str(),
                &[("code", Some("c0de")), ("state", params.state.as_deref())],
            )
            .map_err(|e| crate::error::AuthError::internal(e.to_string()))
        }
    }

    fn router(revocation: bool) -> Router {
        let directory: Arc<dyn ClientDirectory> =
            Arc::new(MemoryClientDirectory::from_clients([ClientRegistration::new(
                "app",
                vec!["https://a.example/cb".to_string()],
            )
            .with_secret("s3cret")
            .with_scope("read write")]));
        let config = AuthConfig {
            issuer: "https://auth.example.com".to_string(),
            revocation: RevocationOptions {
                enabled: revocation,
            },
            ..Default::default()
        };
        auth_router(
            &config,
            directory.clone(),
            Arc::new(CodeProvider),
            Arc::new(DirectoryClientAuthenticator::new(directory)),
            None,
        )
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_authorize_get_success() {
        let response = router(false)
            .oneshot(
                Request::get("/authorize?response_type=code&client_id=app&code_challenge=x&state=s")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://a.example/cb?code=c0de&state=s"
        );
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
    }

    #[tokio::test]
    async fn test_authorize_post_scope_error() {
        let response = router(false)
            .oneshot(
                Request::post("/authorize")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "response_type=code&client_id=app&code_challenge=x&scope=read+exec&state=s",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        let location = response.headers().get(header::LOCATION).unwrap();
        assert_eq!(
            location,
            "https://a.example/cb?error=invalid_scope\
             &error_description=Client+was+not+registered+with+scope+exec&state=s"
        );
    }

    #[tokio::test]
    async fn test_authorize_unknown_client() {
        let response = router(false)
            .oneshot(
                Request::get("/authorize?response_type=code&client_id=ghost&code_challenge=x")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid_request");
        assert_eq!(json["error_description"], "Client ID 'ghost' not found");
    }

    #[tokio::test]
    async fn test_metadata() {
        let response = router(true)
            .oneshot(
                Request::get("/.well-known/oauth-authorization-server")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["issuer"], "https://auth.example.com");
        assert_eq!(json["revocation_endpoint"], "https://auth.example.com/revoke");
    }

    #[tokio::test]
    async fn test_revoke_not_mounted_when_disabled() {
        let response = router(false)
            .oneshot(
                Request::post("/revoke")
                    .body(Body::from(r#"{"token":"t","client_id":"app"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_revoke_success() {
        let response = router(true)
            .oneshot(
                Request::post("/revoke")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"token":"never-issued","client_id":"app","client_secret":"s3cret"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
        assert_eq!(response.headers().get(header::PRAGMA).unwrap(), "no-cache");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_revoke_bad_credentials() {
        let response = router(true)
            .oneshot(
                Request::post("/revoke")
                    .body(Body::from(
                        r#"{"token":"t","client_id":"app","client_secret":"nope"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid_client");
        assert_eq!(json["error_description"], "Invalid client_secret");
    }

    #[tokio::test]
    async fn test_revoke_malformed_body() {
        let response = router(true)
            .oneshot(Request::post("/revoke").body(Body::from("{")).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "invalid_request");
        assert!(
            json["error_description"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request body: ")
        );
    }
}
