use axum::extract::State;
use huggingface::models::translation::Translation;

pub mod request;

use crate::{
    request::HfPayload,
    response::{ApiResponse, Envelope, IntoApiResponse},
    ApiState,
};

use self::request::TranslateRequest;

/// Translation
#[utoipa::path(
    post,
    path = "/hf/translate",
    tag = "hf",
    request_body = TranslateRequest,
    responses(
        (status = 200, description = "`result` holds `{translation_text}`", body = Envelope)
    )
)]
pub async fn post_translate(
    State(state): State<ApiState>,
    payload: HfPayload,
) -> ApiResponse<Envelope> {
    let request = TranslateRequest::validate(&payload.fields)?;

    let output = state
        .models
        .translation(request.into())
        .await
        .into_response("translation")?;

    Envelope::ok(output)
}
