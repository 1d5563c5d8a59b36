use anyhow::Context;
use serde_json::Value;

use crate::models::{first_output, Models};

use super::{ImageToText, ImageToTextOutput, ImageToTextRequest};

impl ImageToText for Models {
    async fn image_to_text(
        &self,
        request: ImageToTextRequest,
    ) -> anyhow::Result<ImageToTextOutput> {
        let text = self
            .string_response(
                self.model_url(&request.model),
                request.data,
                request.content_type.as_deref(),
            )
            .await?;

        let output: Value =
            serde_json::from_str(&text).context("failed to parse response")?;

        serde_json::from_value(first_output(output))
            .context("expected generated_text in response")
    }
}
