use axum::{
    routing::{get, post},
    Router,
};
use serde_json::{Map, Value};
use util::{is_truthy, to_safe_string};

use crate::ApiState;

pub mod chat;
pub mod image_to_text;
pub mod text_to_image;
pub mod translate;

pub(crate) fn router() -> Router<ApiState> {
    Router::new()
        .route("/hf", get(get_home))
        .route("/hf/", get(get_home))
        .route("/hf/chat", post(chat::post_chat))
        .route("/hf/translate", post(translate::post_translate))
        .route("/hf/imagetotext", post(image_to_text::post_image_to_text))
        .route("/hf/texttoimage", post(text_to_image::post_text_to_image))
}

/// Hugging Face greeting
#[utoipa::path(
    get,
    path = "/hf/",
    tag = "hf",
    responses(
        (status = 200, description = "Plain text greeting", body = String)
    )
)]
pub async fn get_home() -> &'static str {
    "This is -Hugging Face- API endpoint."
}

/// The named field, or `Null` when absent.
pub(crate) fn field<'a>(fields: &'a Map<String, Value>, name: &str) -> &'a Value {
    fields.get(name).unwrap_or(&Value::Null)
}

/// The value as a non-empty string, if it is truthy and has a textual form.
pub(crate) fn required_string(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    let s = to_safe_string(value);
    (!s.is_empty()).then_some(s)
}
