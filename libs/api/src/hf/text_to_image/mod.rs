use axum::extract::State;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use huggingface::models::text_to_image::TextToImage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod request;

use crate::{
    request::HfPayload,
    response::{ApiResponse, Envelope, IntoApiResponse},
    ApiState,
};

use self::request::TextToImageBody;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GeneratedImage {
    /// Base64 of the image bytes returned by the model.
    pub generated_image: String,
}

/// Text to image
#[utoipa::path(
    post,
    path = "/hf/texttoimage",
    tag = "hf",
    request_body = TextToImageBody,
    responses(
        (status = 200, description = "`result` holds `{generated_image}`", body = Envelope)
    )
)]
pub async fn post_text_to_image(
    State(state): State<ApiState>,
    payload: HfPayload,
) -> ApiResponse<Envelope> {
    let body = TextToImageBody::validate(&payload.fields)?;

    let image = state
        .models
        .text_to_image(body.into())
        .await
        .into_response("text to image")?;

    Envelope::ok(GeneratedImage {
        generated_image: STANDARD.encode(&image),
    })
}
