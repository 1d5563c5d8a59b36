use huggingface::models::image_to_text::ImageToTextRequest;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::{
    config::Upload,
    hf::{field, required_string},
    request::UploadedFile,
    ApiError,
};

const MEGABYTE: u64 = 1_000_000;

/// Multipart form accepted by `/hf/imagetotext`.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ImageToTextForm {
    pub model: String,
    #[schema(value_type = String, format = Binary)]
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ImageToTextUpload {
    pub model: String,
    pub file: UploadedFile,
}

impl ImageToTextUpload {
    /// Requires `model` and the `data` file, then applies the optional
    /// type and size guards.
    pub fn validate(
        fields: &Map<String, Value>,
        file: Option<UploadedFile>,
        guard: &Upload,
    ) -> Result<Self, ApiError> {
        let (Some(model), Some(file)) =
            (required_string(field(fields, "model")), file)
        else {
            return Err(ApiError::InsufficientFields);
        };

        if guard.images_only {
            let is_image = file
                .content_type
                .as_deref()
                .is_some_and(|mime| mime.starts_with("image"));
            if !is_image {
                return Err(ApiError::NotImage);
            }
        }
        if guard.max_size_mb > 0
            && file.data.len() as u64 > guard.max_size_mb * MEGABYTE
        {
            return Err(ApiError::FileTooLarge);
        }

        Ok(Self { model, file })
    }
}

impl From<ImageToTextUpload> for ImageToTextRequest {
    fn from(val: ImageToTextUpload) -> Self {
        ImageToTextRequest {
            model: val.model,
            data: val.file.data,
            content_type: val.file.content_type,
        }
    }
}

#[cfg(test)]
mod test {
    use axum::body::Bytes;
    use serde_json::{json, Map, Value};

    use super::*;

    fn model() -> Map<String, Value> {
        let Value::Object(fields) = json!({"model": "vit-gpt2"}) else {
            panic!("expected object");
        };
        fields
    }

    fn file(content_type: &str, size: usize) -> UploadedFile {
        UploadedFile {
            file_name: "cat.png".to_string(),
            content_type: Some(content_type.to_string()),
            data: Bytes::from(vec![0u8; size]),
        }
    }

    #[test]
    fn test_model_and_file_required() {
        let guard = Upload::default();

        assert_eq!(
            ImageToTextUpload::validate(&model(), None, &guard)
                .unwrap_err()
                .status(),
            3
        );
        assert_eq!(
            ImageToTextUpload::validate(&Map::new(), Some(file("image/png", 4)), &guard)
                .unwrap_err()
                .status(),
            3
        );
    }

    #[test]
    fn test_guards_are_off_by_default() {
        let upload = ImageToTextUpload::validate(
            &model(),
            Some(file("text/plain", 3_000_000)),
            &Upload::default(),
        )
        .unwrap();

        assert_eq!(upload.model, "vit-gpt2");
        assert_eq!(upload.file.size(), 3_000_000);
    }

    #[test]
    fn test_guards() {
        let guard = Upload {
            images_only: true,
            max_size_mb: 1,
        };

        assert_eq!(
            ImageToTextUpload::validate(&model(), Some(file("text/plain", 10)), &guard)
                .unwrap_err()
                .status(),
            1000
        );
        assert_eq!(
            ImageToTextUpload::validate(
                &model(),
                Some(file("image/png", 1_000_001)),
                &guard
            )
            .unwrap_err()
            .status(),
            1001
        );
        assert!(ImageToTextUpload::validate(
            &model(),
            Some(file("image/png", 1_000_000)),
            &guard
        )
        .is_ok());
    }
}
