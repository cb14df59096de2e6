// src/server/handlers.rs

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use crate::engine::TriggerOutcome;

use super::{AppState, SECRET_HEADER};

pub const SPAWNED_STATUS: &str = "Process spawned successfully";
pub const CONFLICT_STATUS: &str = "job still running in background";

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ExitCodeBody {
    pub exit_code: i32,
}

/// `GET /ready`
pub async fn ready() -> Json<StatusBody> {
    Json(StatusBody { status: "ok" })
}

/// 405 for methods axum would otherwise route to a GET handler.
pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET")])
}

/// `POST /execute`
pub async fn execute(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !is_authorized(&headers, &state.secret) {
        warn!("rejected /execute: missing or wrong secret");
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    match state.controller.trigger().await {
        Ok(TriggerOutcome::Completed(outcome)) => {
            let status = if outcome.is_success() {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            let body = ExitCodeBody {
                exit_code: outcome.exit_code,
            };
            (status, Json(body)).into_response()
        }
        Ok(TriggerOutcome::Spawned) => (
            StatusCode::OK,
            Json(StatusBody {
                status: SPAWNED_STATUS,
            }),
        )
            .into_response(),
        Ok(TriggerOutcome::AlreadyRunning) => (
            StatusCode::CONFLICT,
            Json(StatusBody {
                status: CONFLICT_STATUS,
            }),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "failed to execute command");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

fn is_authorized(headers: &HeaderMap, secret: &str) -> bool {
    headers
        .get(SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|given| given == secret)
}
