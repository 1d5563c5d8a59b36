pub mod implementation;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub trait ImageToText {
    fn image_to_text(
        &self,
        request: ImageToTextRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<ImageToTextOutput>> + Send;
}

#[derive(Debug, Clone)]
pub struct ImageToTextRequest {
    pub model: String,
    pub data: Bytes,
    /// Sent as `Content-Type` when known.
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageToTextOutput {
    pub generated_text: String,
}
