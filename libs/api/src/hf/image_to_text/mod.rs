use axum::extract::State;
use huggingface::models::image_to_text::ImageToText;
use tracing::debug;

pub mod request;

use crate::{
    request::HfPayload,
    response::{ApiResponse, Envelope, IntoApiResponse},
    ApiState,
};

use self::request::ImageToTextUpload;

/// Image to text
#[utoipa::path(
    post,
    path = "/hf/imagetotext",
    tag = "hf",
    request_body(content = ImageToTextForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "`result` holds `{generated_text}`", body = Envelope)
    )
)]
pub async fn post_image_to_text(
    State(state): State<ApiState>,
    payload: HfPayload,
) -> ApiResponse<Envelope> {
    let upload = ImageToTextUpload::validate(
        &payload.fields,
        payload.file,
        &state.config.upload,
    )?;
    debug!(
        task = "image to text",
        file_name = upload.file.file_name.as_str(),
        size = upload.file.size()
    );

    let output = state
        .models
        .image_to_text(upload.into())
        .await
        .into_response("image to text")?;

    Envelope::ok(output)
}
