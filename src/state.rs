/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Cheap to Clone
 */
use crate::config::{AppEnv, Config};

#[derive(Clone, Debug)]
pub struct AppState {
    pub app_env: AppEnv,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            app_env: config.app_env,
        }
    }
}
