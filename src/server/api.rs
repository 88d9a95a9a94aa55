//! JSON API handlers under `/api/v0.3`

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::state::AppState;
use crate::auth::UserProfile;
use crate::notify::{Notification, Notifier};
use crate::password;
use crate::storage::{HealthStatus, LogEntry, SystemEvent};

pub(crate) const SESSION_COOKIE: &str = "sakram_session";

/// Extract the session token from the request cookies
pub(crate) fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Resolve the signed-in profile for a request, if any
pub(crate) async fn session_profile(
    state: &AppState,
    headers: &HeaderMap,
) -> Option<UserProfile> {
    let token = session_token(headers)?;
    state.auth.session(&token).await
}

fn session_cookie(token: &str) -> (header::HeaderName, String) {
    (
        header::SET_COOKIE,
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly"),
    )
}

fn clear_session_cookie() -> (header::HeaderName, String) {
    (
        header::SET_COOKIE,
        format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0"),
    )
}

pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<SystemEvent>>, StatusCode> {
    state
        .storage
        .event_store()
        .list()
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to list events: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Trigger a diagnostic run. The run executes in the background; its
/// completion notification (when an event was resolved) arrives through
/// the notification queue. Rejected with 409 while a run is in flight.
pub async fn run_diagnostics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    if session_profile(&state, &headers).await.is_none() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    // The run resolves against the event list as seen at trigger time
    let events = state
        .storage
        .event_store()
        .list()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if !state.run_state.try_begin() {
        return Err(StatusCode::CONFLICT);
    }

    let runner = state.runner.clone();
    let run_state = state.run_state.clone();
    let notifications = state.notifications.clone();
    tokio::spawn(async move {
        if let Err(e) = runner.run(&events).await {
            error!("Diagnostic run failed: {e}");
            notifications.notify(Notification::error("Diagnostic failed", e.to_string()));
        }
        run_state.finish();
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "status": "started" })),
    ))
}

/// Report whether a diagnostic run is currently in flight; the
/// dashboard polls this to know when to refresh after triggering a run.
pub async fn diagnostics_status(
    State(state): State<AppState>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "running": state.run_state.is_running() }))
}

pub async fn list_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<LogEntry>>, StatusCode> {
    match state.runner.fetch_logs().await {
        Ok(logs) => Ok(Json(logs)),
        Err(e) => {
            error!("Failed to fetch logs: {e}");
            state
                .notifications
                .notify(Notification::error("Error", "Failed to fetch Sakram logs"));
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

pub async fn password_strength(
    Json(request): Json<PasswordRequest>,
) -> Json<password::StrengthEvaluation> {
    Json(password::evaluate(&request.password))
}

pub async fn drain_notifications(
    State(state): State<AppState>,
) -> Json<Vec<Notification>> {
    Json(state.notifications.drain())
}

pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthStatus>, StatusCode> {
    state
        .storage
        .health_check()
        .await
        .map(Json)
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)
}

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub profile: UserProfile,
}

pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let token = state
        .auth
        .sign_up(&request.name, &request.email, &request.password)
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let profile = state
        .auth
        .session(&token)
        .await
        .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "session lost".to_string()))?;
    Ok((
        [session_cookie(&token)],
        Json(SessionResponse { profile }),
    ))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let token = state
        .auth
        .sign_in(&request.email, &request.password)
        .await
        .map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))?;
    let profile = state
        .auth
        .session(&token)
        .await
        .ok_or((StatusCode::INTERNAL_SERVER_ERROR, "session lost".to_string()))?;
    Ok((
        [session_cookie(&token)],
        Json(SessionResponse { profile }),
    ))
}

pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let result = match session_token(&headers) {
        Some(token) => state.auth.sign_out(&token).await,
        None => Err(crate::auth::AuthError::NoSuchSession),
    };

    match result {
        Ok(()) => {
            state.notifications.notify(Notification::success(
                "Signed out successfully",
                "You have been signed out of your account.",
            ));
            (
                StatusCode::OK,
                [clear_session_cookie()],
                Json(serde_json::json!({ "status": "signed_out" })),
            )
        }
        Err(e) => {
            state
                .notifications
                .notify(Notification::error("Sign out failed", e.to_string()));
            (
                StatusCode::UNAUTHORIZED,
                [clear_session_cookie()],
                Json(serde_json::json!({ "error": e.to_string() })),
            )
        }
    }
}
