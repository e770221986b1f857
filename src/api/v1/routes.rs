/*
 * Responsibility
 * - URL layout of v1
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::health::health;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
