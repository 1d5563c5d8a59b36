use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde_json::{Map, Value};

use crate::ApiError;

/// Multipart field that carries the uploaded file.
pub const FILE_FIELD: &str = "data";

/// Request fields of an `/hf` call, whatever encoding the client used.
///
/// JSON, url-encoded and multipart bodies are accepted. Any other content
/// type, and JSON bodies that are not objects, produce no fields at all so
/// the handler reports the missing ones.
#[derive(Debug, Default)]
pub struct HfPayload {
    pub fields: Map<String, Value>,
    pub file: Option<UploadedFile>,
}

/// File held in memory; never written to disk.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

#[async_trait]
impl<S> FromRequest<S> for HfPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| body_error(e.status(), e.body_text()))?;
            return from_multipart(multipart).await;
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| body_error(e.status(), e.body_text()))?;
            return Ok(Self {
                fields: fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::String(value)))
                    .collect(),
                file: None,
            });
        }

        if is_json(&content_type) {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| body_error(e.status(), e.body_text()))?;
            // an empty JSON body carries no fields
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Self::default());
            }
            let Json(value) = Json::<Value>::from_bytes(&bytes)
                .map_err(|e| body_error(e.status(), e.body_text()))?;
            let fields = match value {
                Value::Object(fields) => fields,
                _ => Map::new(),
            };
            return Ok(Self { fields, file: None });
        }

        Ok(Self::default())
    }
}

fn is_json(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    mime == "application/json"
        || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Bodies cut off by the size limit report the same code whatever their
/// encoding.
fn body_error(status: StatusCode, reason: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::FileTooLarge;
    }
    ApiError::MalformedBody(reason)
}

async fn from_multipart(mut multipart: Multipart) -> Result<HfPayload, ApiError> {
    let mut payload = HfPayload::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            // other file parts are dropped unread
            if name != FILE_FIELD {
                continue;
            }
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.map_err(multipart_error)?;
            payload.file = Some(UploadedFile {
                file_name,
                content_type,
                data,
            });
            continue;
        }

        let text = field.text().await.map_err(multipart_error)?;
        payload.fields.insert(name, Value::String(text));
    }

    Ok(payload)
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> ApiError {
    body_error(e.status(), e.body_text())
}
