use anyhow::Context;
use serde_json::Value;

use crate::models::{first_output, Models};

use super::{Translation, TranslationOutput, TranslationRequest, TRANSLATION_TASK};

impl Translation for Models {
    async fn translation(
        &self,
        request: TranslationRequest,
    ) -> anyhow::Result<TranslationOutput> {
        let model = match request.model.as_deref() {
            Some(model) if !model.is_empty() => model.to_string(),
            _ => self.default_model(TRANSLATION_TASK).await?,
        };
        let body = serde_json::to_string(&request)
            .context("failed to serialize translation request")?;

        let text = self.json_response(self.model_url(&model), body).await?;

        let output: Value =
            serde_json::from_str(&text).context("failed to parse response")?;

        serde_json::from_value(first_output(output))
            .context("expected translation_text in response")
    }
}
