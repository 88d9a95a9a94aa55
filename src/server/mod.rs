//! HTTP surface
//!
//! Marketing pages, the signed-in dashboard and the JSON API are served
//! from one axum router. Everything stateful hangs off [`AppState`].

pub mod api;
pub mod pages;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::{AuthProvider, SessionAuth};
use crate::config::PortalConfig;
use crate::diagnostic::DiagnosticRunner;
use crate::error::Result;
use crate::notify::NotificationQueue;
use crate::storage::PortalStorage;

pub use state::{AppState, RunState};

/// Assemble the shared application state
pub fn build_state(
    storage: Arc<dyn PortalStorage>,
    auth: Arc<dyn AuthProvider>,
    step_delay: Duration,
) -> Result<AppState> {
    let notifications = Arc::new(NotificationQueue::new());
    let runner = Arc::new(DiagnosticRunner::new(
        storage.clone(),
        notifications.clone(),
        step_delay,
    ));
    Ok(AppState {
        storage,
        auth,
        notifications,
        runner,
        run_state: Arc::new(RunState::new()),
        templates: Arc::new(pages::templates()?),
    })
}

/// Build the portal router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(pages::landing))
        .route("/architecture", get(pages::architecture))
        .route("/api", get(pages::api_catalog))
        .route("/code", get(pages::code))
        .route("/auth", get(pages::auth_page))
        .route("/dashboard", get(pages::dashboard))
        // JSON API
        .route("/api/v0.3/events", get(api::list_events))
        .route(
            "/api/v0.3/diagnostics",
            post(api::run_diagnostics).get(api::diagnostics_status),
        )
        .route("/api/v0.3/logs", get(api::list_logs))
        .route("/api/v0.3/password/strength", post(api::password_strength))
        .route("/api/v0.3/notifications", get(api::drain_notifications))
        .route("/api/v0.3/health", get(api::health_check))
        .route("/api/v0.3/auth/signup", post(api::sign_up))
        .route("/api/v0.3/auth/signin", post(api::sign_in))
        .route("/api/v0.3/auth/signout", post(api::sign_out))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The portal server
pub struct PortalServer {
    config: PortalConfig,
    storage: Arc<dyn PortalStorage>,
}

impl PortalServer {
    pub fn new(config: PortalConfig, storage: Arc<dyn PortalStorage>) -> Self {
        Self { config, storage }
    }

    pub async fn start(self) -> Result<()> {
        let auth: Arc<dyn AuthProvider> = Arc::new(SessionAuth::new());
        let state = build_state(
            self.storage,
            auth,
            self.config.diagnostics.step_delay,
        )?;
        let app = build_router(state);

        let addr: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .map_err(|e| crate::error::Error::Config(format!("Invalid listen address: {e}")))?;
        info!("Sakram portal listening on http://{addr}");

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;
        Ok(())
    }
}
