use std::fmt::Display;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::ApiError;

pub const STATUS_OK: i32 = 1;
pub const STATUS_SERVER_ERROR: i32 = 2;
pub const STATUS_INSUFFICIENT_FIELDS: i32 = 3;
pub const STATUS_MALFORMED_BODY: i32 = 4;
pub const STATUS_INFERENCE_FAILED: i32 = 5;
pub const STATUS_NOT_IMAGE: i32 = 1000;
pub const STATUS_FILE_TOO_LARGE: i32 = 1001;

/// Body of every `/hf` response. The HTTP status is always 200; callers read
/// `status` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    pub status: i32,
    pub message: String,
    #[schema(value_type = Vec<Object>)]
    pub result: Vec<Value>,
}

impl Envelope {
    pub fn ok<T: Serialize>(result: T) -> ApiResponse<Self> {
        let result = serde_json::to_value(result).map_err(|e| {
            error!(task = "serialize result", error = %e);
            ApiError::ServerError(e.to_string())
        })?;

        Ok(Self {
            status: STATUS_OK,
            message: "ok".to_string(),
            result: vec![result],
        })
    }

    pub fn fail(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            result: Vec::new(),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl ApiError {
    pub fn status(&self) -> i32 {
        match self {
            ApiError::InsufficientFields
            | ApiError::InsufficientMessageFields { .. } => {
                STATUS_INSUFFICIENT_FIELDS
            }
            ApiError::MalformedBody(_) => STATUS_MALFORMED_BODY,
            ApiError::InferenceError(_) => STATUS_INFERENCE_FAILED,
            ApiError::NotImage => STATUS_NOT_IMAGE,
            ApiError::FileTooLarge => STATUS_FILE_TOO_LARGE,
            ApiError::ServerError(_) => STATUS_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::InsufficientFields => {
                "Insufficient required fields".to_string()
            }
            ApiError::InsufficientMessageFields { rowno } => {
                format!("Insufficient required fields (rowno={rowno})")
            }
            ApiError::MalformedBody(_) => "Malformed request body".to_string(),
            ApiError::InferenceError(cause) => {
                format!("Remote inference failed: {cause}")
            }
            ApiError::NotImage => "File is not an image".to_string(),
            ApiError::FileTooLarge => "File size is too big".to_string(),
            ApiError::ServerError(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::MalformedBody(reason) = &self {
            info!(task = "parse body", reason = reason.as_str());
        }

        Envelope::fail(self.status(), self.message()).into_response()
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    /// Logs the failure under `task` and turns it into an envelope error.
    fn into_response(self, task: &str) -> ApiResponse<T>;
}

impl<T, E> IntoApiResponse<T> for Result<T, E>
where
    E: Display,
{
    fn into_response(self, task: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            let cause = format!("{:#}", e);
            error!(task = task, error = cause.as_str());
            ApiError::InferenceError(cause)
        })
    }
}
