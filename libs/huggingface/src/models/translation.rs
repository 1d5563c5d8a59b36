pub mod implementation;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub static TRANSLATION_TASK: &str = "translation";

pub trait Translation {
    /// Translates with `request.model`, or with the recommended translation
    /// model when none is given.
    fn translation(
        &self,
        request: TranslationRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<TranslationOutput>> + Send;
}

#[derive(Debug, Default, Serialize)]
pub struct TranslationRequest {
    #[serde(skip)]
    pub model: Option<String>,
    pub inputs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationOutput {
    pub translation_text: String,
}
