pub mod implementation;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub trait ChatCompletion {
    fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<ChatCompletionResponse>>
           + Send;
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatCompletionOutputMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message as returned by the API. Fields beyond `role` and
/// `content` (tool calls and the like) are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionOutputMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatCompletionResponse {
    pub fn into_first_message(self) -> Option<ChatCompletionOutputMessage> {
        self.choices.into_iter().next().map(|choice| choice.message)
    }
}
