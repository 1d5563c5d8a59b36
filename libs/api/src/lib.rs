use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Json, Router,
};
use chrono::FixedOffset;
use huggingface::Models;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use util::parse_utc_offset;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};

pub mod config;
pub mod hf;
mod home;
mod log;
pub mod request;
pub mod response;

pub use config::Config;
pub use response::Envelope;

const MEGABYTE: usize = 1_000_000;

/// Reasons an `/hf` request ends without a result. Each one becomes an
/// envelope with its own application status.
#[derive(Debug)]
pub enum ApiError {
    InsufficientFields,
    InsufficientMessageFields { rowno: usize },
    MalformedBody(String),
    InferenceError(String),
    NotImage,
    FileTooLarge,
    ServerError(String),
}

#[derive(Clone, Debug)]
pub struct ApiState {
    models: Models,
    config: Arc<Config>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        hf::get_home,
        hf::chat::post_chat,
        hf::translate::post_translate,
        hf::image_to_text::post_image_to_text,
        hf::text_to_image::post_text_to_image,
    ),
    components(schemas(
        Envelope,
        hf::chat::request::ChatRequest,
        hf::chat::request::ChatMessage,
        hf::translate::request::TranslateRequest,
        hf::image_to_text::request::ImageToTextForm,
        hf::text_to_image::request::TextToImageBody,
        hf::text_to_image::GeneratedImage,
    )),
    tags(
        (name = "hf", description = "Hugging Face inference gateway")
    )
)]
struct ApiDoc;

pub async fn serve(config: Config, models: Models) -> anyhow::Result<Router> {
    info!(task = "start api serving");

    let log_offset: FixedOffset = parse_utc_offset(&config.log.utc_offset)
        .context("invalid log.utc_offset")?;
    let cors = cors_layer(&config.cors.allow_origins)?;
    let body_limit = DefaultBodyLimit::max(config.server.body_limit_mb * MEGABYTE);

    let state = ApiState {
        models,
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/", get(home::get_home))
        .route("/healthz", get(home::get_health))
        .merge(hf::router())
        .with_state(state);

    let router = Router::new()
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .route("/api-docs/openapi.json", get(get_openapi))
        .merge(app)
        .fallback(home::get_404)
        .layer(body_limit)
        .layer(middleware::from_fn_with_state(log_offset, log::log_request))
        .layer(cors);

    Ok(router)
}

async fn get_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn cors_layer(allow_origins: &[String]) -> anyhow::Result<CorsLayer> {
    if allow_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = allow_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid cors origin: {origin}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
