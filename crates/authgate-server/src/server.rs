use std::net::SocketAddr;
use std::sync::Arc;

use authgate_core::oauth::{
    AuthorizationProvider, ClientAuthenticator, DirectoryClientAuthenticator, TokenRevoker,
};
use authgate_core::storage::{ClientDirectory, MemoryClientDirectory};
use authgate_core::auth_router;
use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::{config::AppConfig, consent::ConsentRedirectProvider, revocation::TracingTokenRevoker};

pub struct AuthgateServer {
    addr: SocketAddr,
    app: Router,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

pub fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    cfg.validate().map_err(anyhow::Error::msg)?;

    let directory: Arc<dyn ClientDirectory> =
        Arc::new(MemoryClientDirectory::from_clients(cfg.clients.clone()));
    let provider: Arc<dyn AuthorizationProvider> =
        Arc::new(ConsentRedirectProvider::new(cfg.consent.url.clone()));
    let authenticator: Arc<dyn ClientAuthenticator> =
        Arc::new(DirectoryClientAuthenticator::new(directory.clone()));
    let revoker: Arc<dyn TokenRevoker> = Arc::new(TracingTokenRevoker);

    tracing::info!(
        issuer = %cfg.auth.issuer,
        clients = cfg.clients.len(),
        revocation = cfg.auth.revocation.enabled,
        "authorization endpoints configured"
    );

    let body_limit = cfg.server.body_limit_bytes;
    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(auth_router(
            &cfg.auth,
            directory,
            provider,
            authenticator,
            Some(revoker),
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    use tracing::field::Empty;
                    // Query strings carry client state and challenges; log the path only
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri().path(),
                        http.status_code = Empty,
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        .layer(axum::extract::DefaultBodyLimit::max(body_limit));

    Ok(app)
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    pub fn build(self) -> anyhow::Result<AuthgateServer> {
        let app = build_app(&self.config)?;

        Ok(AuthgateServer {
            addr: self.addr,
            app,
        })
    }
}

impl AuthgateServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
