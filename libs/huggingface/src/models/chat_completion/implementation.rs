use anyhow::Context;

use crate::models::Models;

use super::{ChatCompletion, ChatCompletionRequest, ChatCompletionResponse};

impl ChatCompletion for Models {
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> anyhow::Result<ChatCompletionResponse> {
        let url = format!("{}/v1/chat/completions", self.model_url(&request.model));
        let body = serde_json::to_string(&request)
            .context("failed to serialize chat completion request")?;

        let text = self.json_response(url, body).await?;

        let response =
            serde_json::from_str(&text).context("failed to parse response")?;

        Ok(response)
    }
}
