use huggingface::models::translation::TranslationRequest;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::{
    hf::{field, required_string},
    ApiError,
};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TranslateRequest {
    /// Omit to let the hub pick the recommended translation model.
    pub model: Option<String>,
    pub inputs: String,
}

impl TranslateRequest {
    pub fn validate(fields: &Map<String, Value>) -> Result<Self, ApiError> {
        let Some(inputs) = required_string(field(fields, "inputs")) else {
            return Err(ApiError::InsufficientFields);
        };

        Ok(Self {
            model: required_string(field(fields, "model")),
            inputs,
        })
    }
}

impl From<TranslateRequest> for TranslationRequest {
    fn from(val: TranslateRequest) -> Self {
        TranslationRequest {
            model: val.model,
            inputs: val.inputs,
            parameters: None,
        }
    }
}
