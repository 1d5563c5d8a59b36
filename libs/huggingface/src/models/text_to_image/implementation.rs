use anyhow::Context;
use bytes::Bytes;

use crate::models::Models;

use super::{TextToImage, TextToImageRequest};

impl TextToImage for Models {
    async fn text_to_image(
        &self,
        request: TextToImageRequest,
    ) -> anyhow::Result<Bytes> {
        let body = serde_json::to_string(&request)
            .context("failed to serialize text to image request")?;

        let bytes = self
            .binary_response(self.model_url(&request.model), body)
            .await?;

        Ok(bytes)
    }
}
