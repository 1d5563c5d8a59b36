use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::FixedOffset;
use tracing::info;
use util::format_now;

/// One line per request: local timestamp, method and path with query.
pub async fn log_request(
    State(offset): State<FixedOffset>,
    req: Request,
    next: Next,
) -> Response {
    info!("[{}] {} {}", format_now(offset), req.method(), req.uri());

    next.run(req).await
}
