use huggingface::models::text_to_image::TextToImageRequest;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::{
    hf::{field, required_string},
    ApiError,
};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TextToImageBody {
    pub model: String,
    pub inputs: String,
    /// Passed to the model untouched, e.g. `{"negative_prompt": "blurry"}`.
    #[schema(value_type = Option<Object>)]
    pub parameters: Option<Value>,
}

impl TextToImageBody {
    pub fn validate(fields: &Map<String, Value>) -> Result<Self, ApiError> {
        let (Some(model), Some(inputs)) = (
            required_string(field(fields, "model")),
            required_string(field(fields, "inputs")),
        ) else {
            return Err(ApiError::InsufficientFields);
        };

        Ok(Self {
            model,
            inputs,
            parameters: parameters(field(fields, "parameters")),
        })
    }
}

/// Form encodings deliver `parameters` as text; a JSON object inside it is
/// decoded so the model receives the same shape as from a JSON body.
fn parameters(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(decoded @ Value::Object(_)) => Some(decoded),
            _ => Some(value.clone()),
        },
        value => Some(value.clone()),
    }
}

impl From<TextToImageBody> for TextToImageRequest {
    fn from(val: TextToImageBody) -> Self {
        TextToImageRequest {
            model: val.model,
            inputs: val.inputs,
            parameters: val.parameters,
        }
    }
}
