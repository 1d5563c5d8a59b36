use anyhow::Context;
use axum::extract::State;
use huggingface::models::chat_completion::ChatCompletion;

pub mod request;

use crate::{
    request::HfPayload,
    response::{ApiResponse, Envelope, IntoApiResponse},
    ApiState,
};

use self::request::ChatRequest;

/// Chat completion
///
/// Every message is validated but only the first one is sent to the model
/// unless `chat.forward_history` is enabled.
#[utoipa::path(
    post,
    path = "/hf/chat",
    tag = "hf",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "`result` holds the assistant message", body = Envelope)
    )
)]
pub async fn post_chat(
    State(state): State<ApiState>,
    payload: HfPayload,
) -> ApiResponse<Envelope> {
    let request = ChatRequest::validate(&payload.fields, &state.config.chat)?;

    let message = state
        .models
        .chat_completion(request.into_completion(state.config.chat.forward_history))
        .await
        .and_then(|response| {
            response
                .into_first_message()
                .context("chat completion returned no choices")
        })
        .into_response("chat completion")?;

    Envelope::ok(message)
}
