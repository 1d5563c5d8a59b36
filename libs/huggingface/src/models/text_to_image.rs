pub mod implementation;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

pub trait TextToImage {
    /// Raw image bytes as produced by the model.
    fn text_to_image(
        &self,
        request: TextToImageRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<Bytes>> + Send;
}

#[derive(Debug, Serialize, Default)]
pub struct TextToImageRequest {
    #[serde(skip)]
    pub model: String,
    pub inputs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}
