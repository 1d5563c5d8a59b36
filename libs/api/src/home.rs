use axum::{extract::State, http::StatusCode};

use crate::ApiState;

pub(super) async fn get_home(State(state): State<ApiState>) -> String {
    format!(
        "This is BA_CHAT API endpoint. (Build: {})",
        state.config.server.version
    )
}

pub(super) async fn get_health() -> StatusCode {
    StatusCode::OK
}

pub(super) async fn get_404() -> StatusCode {
    StatusCode::NOT_FOUND
}
