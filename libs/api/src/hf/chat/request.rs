use huggingface::models::chat_completion::{ChatCompletionRequest, Message};
use serde::Serialize;
use serde_json::{Map, Value};
use util::{is_truthy, to_safe_number};
use utoipa::ToSchema;

use crate::{
    config::Chat,
    hf::{field, required_string},
    ApiError,
};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChatRequest {
    pub model: String,
    /// Falls back to the configured default (100) when missing or not
    /// positive.
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatRequest {
    /// Checks `model`, then every message in order. The first message
    /// without a role or content is reported by its 1-based position.
    pub fn validate(
        fields: &Map<String, Value>,
        config: &Chat,
    ) -> Result<Self, ApiError> {
        let Some(Value::Array(messages)) = fields.get("messages") else {
            return Err(ApiError::InsufficientFields);
        };
        let Some(model) = required_string(field(fields, "model")) else {
            return Err(ApiError::InsufficientFields);
        };
        if messages.is_empty() {
            return Err(ApiError::InsufficientFields);
        }

        let mut validated = Vec::with_capacity(messages.len());
        for (index, message) in messages.iter().enumerate() {
            let role = message.get("role").and_then(required_string);
            let content = message.get("content").and_then(required_string);
            let (Some(role), Some(content)) = (role, content) else {
                return Err(ApiError::InsufficientMessageFields { rowno: index + 1 });
            };
            validated.push(ChatMessage { role, content });
        }

        Ok(Self {
            model,
            max_tokens: max_tokens(field(fields, "max_tokens"), config),
            messages: validated,
        })
    }

    /// Remote request carrying the first message only, or the whole
    /// conversation when `forward_history` is set.
    pub fn into_completion(self, forward_history: bool) -> ChatCompletionRequest {
        let take = if forward_history { self.messages.len() } else { 1 };

        ChatCompletionRequest {
            model: self.model,
            messages: self
                .messages
                .into_iter()
                .take(take)
                .map(|message| Message {
                    role: message.role,
                    content: message.content,
                })
                .collect(),
            max_tokens: Some(self.max_tokens),
        }
    }
}

fn max_tokens(value: &Value, config: &Chat) -> u32 {
    if !is_truthy(value) {
        return config.default_max_tokens;
    }

    let n = to_safe_number(value).trunc();
    if n.is_finite() && n >= 1.0 {
        n.min(f64::from(u32::MAX)) as u32
    } else {
        config.default_max_tokens
    }
}

#[cfg(test)]
mod test {
    use serde_json::{json, Map, Value};

    use super::*;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(fields) => fields,
            _ => panic!("expected object"),
        }
    }

    fn validate(value: Value) -> Result<ChatRequest, ApiError> {
        ChatRequest::validate(&fields(value), &Chat::default())
    }

    fn rejection(value: Value) -> String {
        validate(value).unwrap_err().message()
    }

    #[test]
    fn test_missing_model_or_messages() {
        let message = json!([{"role": "user", "content": "hi"}]);

        assert_eq!(
            rejection(json!({"messages": message})),
            "Insufficient required fields"
        );
        assert_eq!(
            rejection(json!({"model": "", "messages": message})),
            "Insufficient required fields"
        );
        assert_eq!(
            rejection(json!({"model": "x", "messages": "hi"})),
            "Insufficient required fields"
        );
        assert_eq!(
            rejection(json!({"model": "x", "messages": []})),
            "Insufficient required fields"
        );
    }

    #[test]
    fn test_first_failing_row_is_reported() {
        assert_eq!(
            rejection(json!({
                "model": "x",
                "messages": [
                    {"role": "user", "content": "hi"},
                    {"role": "user"},
                    {"content": "also broken"}
                ]
            })),
            "Insufficient required fields (rowno=2)"
        );
        assert_eq!(
            rejection(json!({
                "model": "x",
                "messages": ["hi", {"role": "user", "content": "hi"}]
            })),
            "Insufficient required fields (rowno=1)"
        );
        assert_eq!(
            rejection(json!({
                "model": "x",
                "messages": [{"role": "user", "content": ""}]
            })),
            "Insufficient required fields (rowno=1)"
        );
    }

    #[test]
    fn test_validation_is_repeatable() {
        let body = json!({
            "model": "x",
            "messages": [{"role": "user", "content": "hi"}, {"role": ""}]
        });

        assert_eq!(rejection(body.clone()), rejection(body));
    }

    #[test]
    fn test_max_tokens() {
        let messages = json!([{"role": "user", "content": "hi"}]);

        let request = validate(json!({"model": "x", "messages": messages})).unwrap();
        assert_eq!(request.max_tokens, 100);

        let request = validate(json!({
            "model": "x", "max_tokens": "256", "messages": messages
        }))
        .unwrap();
        assert_eq!(request.max_tokens, 256);

        let request = validate(json!({
            "model": "x", "max_tokens": -5, "messages": messages
        }))
        .unwrap();
        assert_eq!(request.max_tokens, 100);
    }

    #[test]
    fn test_only_first_message_is_forwarded() {
        // Arrange
        let request = validate(json!({
            "model": "x",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hi"}
            ]
        }))
        .unwrap();

        // Act
        let first_only = request.clone().into_completion(false);
        let history = request.into_completion(true);

        // Assert
        assert_eq!(first_only.messages.len(), 1);
        assert_eq!(first_only.messages[0].content, "be brief");
        assert_eq!(first_only.max_tokens, Some(100));
        assert_eq!(history.messages.len(), 2);
        assert_eq!(history.messages[1].content, "hi");
    }
}
