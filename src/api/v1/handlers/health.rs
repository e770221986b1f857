/*
 * Responsibility
 * - GET /health (liveness)
 * - Also used to check that router-level middleware (security headers) is applied
 */
use axum::{Json, extract::State};

use crate::{api::v1::dto::health::HealthResponse, config::AppEnv, state::AppState};

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let environment = match state.app_env {
        AppEnv::Production => "production",
        AppEnv::Development => "development",
    };

    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        environment,
    })
}
