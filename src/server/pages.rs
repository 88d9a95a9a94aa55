//! HTML page handlers
//!
//! Pages render marketing and demo copy from embedded tera templates.
//! The architecture narrated on these pages (task queues, plugin
//! interface layer, federated nodes) is copy text describing the
//! product, not behavior this service implements.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Html,
};
use tera::{Context, Tera};
use tracing::error;

use super::api::session_profile;
use super::state::AppState;
use crate::storage::EventStatus;

/// Build the template registry from the embedded sources
pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("templates/base.html")),
        ("landing.html", include_str!("templates/landing.html")),
        (
            "architecture.html",
            include_str!("templates/architecture.html"),
        ),
        ("api.html", include_str!("templates/api.html")),
        ("code.html", include_str!("templates/code.html")),
        ("auth.html", include_str!("templates/auth.html")),
        ("dashboard.html", include_str!("templates/dashboard.html")),
        (
            "signin_required.html",
            include_str!("templates/signin_required.html"),
        ),
    ])?;
    Ok(tera)
}

fn render(state: &AppState, template: &str, context: &Context) -> Result<Html<String>, StatusCode> {
    state
        .templates
        .render(template, context)
        .map(Html)
        .map_err(|e| {
            error!("Failed to render {template}: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

pub async fn landing(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    render(&state, "landing.html", &Context::new())
}

pub async fn architecture(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    render(&state, "architecture.html", &Context::new())
}

pub async fn api_catalog(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    render(&state, "api.html", &Context::new())
}

pub async fn code(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    render(&state, "code.html", &Context::new())
}

pub async fn auth_page(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    render(&state, "auth.html", &Context::new())
}

/// The dashboard requires a live session; without one it renders the
/// sign-in placeholder rather than an error.
pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, StatusCode> {
    let profile = match session_profile(&state, &headers).await {
        Some(profile) => profile,
        None => return render(&state, "signin_required.html", &Context::new()),
    };

    let events = state
        .storage
        .event_store()
        .list()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let active_count = events
        .iter()
        .filter(|e| e.status == EventStatus::Active)
        .count();

    let mut context = Context::new();
    context.insert("profile", &profile);
    context.insert("events", &events);
    context.insert("active_count", &active_count);
    context.insert("running", &state.run_state.is_running());
    render(&state, "dashboard.html", &context)
}
