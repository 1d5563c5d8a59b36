use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use huggingface::models::{
    chat_completion::{ChatCompletion, ChatCompletionRequest, Message},
    image_to_text::{ImageToText, ImageToTextRequest},
    text_to_image::{TextToImage, TextToImageRequest},
    translation::{Translation, TranslationRequest},
    Models,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral port and returns its base url.
async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{address}")
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[tokio::test]
async fn test_chat_completion() {
    // Arrange
    let router = Router::new().route(
        "/models/:model/v1/chat/completions",
        post(
            |Path(model): Path<String>,
             headers: HeaderMap,
             Json(body): Json<Value>| async move {
                let content = format!(
                    "{}|{}|{}|{}|{}",
                    model,
                    body["model"].as_str().unwrap_or_default(),
                    header_value(&headers, header::AUTHORIZATION),
                    body["max_tokens"],
                    body["messages"][0]["content"].as_str().unwrap_or_default(),
                );
                Json(json!({
                    "choices": [{
                        "index": 0,
                        "message": {"role": "assistant", "content": content},
                        "finish_reason": "stop"
                    }]
                }))
            },
        ),
    );
    let base_url = spawn(router).await;
    let models = Models::new(&base_url, &base_url, "secret").unwrap();

    // Act
    let response = models
        .chat_completion(ChatCompletionRequest {
            model: "tiny-chat".to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: "hi".to_string(),
            }],
            max_tokens: Some(100),
        })
        .await
        .unwrap();

    // Assert
    let message = response.into_first_message().unwrap();
    assert_eq!(message.role, "assistant");
    assert_eq!(
        message.content.as_deref(),
        Some("tiny-chat|tiny-chat|Bearer secret|100|hi")
    );
}

#[tokio::test]
async fn test_translation_resolves_default_model_once() {
    // Arrange
    let lookups = Arc::new(AtomicUsize::new(0));
    let counter = lookups.clone();
    let router = Router::new()
        .route(
            "/api/tasks",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!({
                        "translation": {"models": [{"id": "t5-small"}, {"id": "t5-base"}]}
                    }))
                }
            }),
        )
        .route(
            "/models/:model",
            post(|Path(model): Path<String>, Json(body): Json<Value>| async move {
                Json(json!([{
                    "translation_text": format!(
                        "{}:{}",
                        model,
                        body["inputs"].as_str().unwrap_or_default()
                    )
                }]))
            }),
        );
    let base_url = spawn(router).await;
    let models = Models::new(&base_url, &base_url, "").unwrap();

    // Act
    let first = models
        .translation(TranslationRequest {
            inputs: "Hello".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let second = models
        .translation(TranslationRequest {
            inputs: "Bye".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let explicit = models
        .translation(TranslationRequest {
            model: Some("opus-mt".to_string()),
            inputs: "Hi".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    // Assert
    assert_eq!(first.translation_text, "t5-small:Hello");
    assert_eq!(second.translation_text, "t5-small:Bye");
    assert_eq!(explicit.translation_text, "opus-mt:Hi");
    assert_eq!(lookups.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_remote_error_is_reported() {
    // Arrange
    let router = Router::new().route(
        "/models/:model",
        post(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": "Model tiny is currently loading"})),
            )
        }),
    );
    let base_url = spawn(router).await;
    let models = Models::new(&base_url, &base_url, "").unwrap();

    // Act
    let result = models
        .translation(TranslationRequest {
            model: Some("tiny".to_string()),
            inputs: "Hello".to_string(),
            ..Default::default()
        })
        .await;

    // Assert
    let error = format!("{:#}", result.unwrap_err());
    assert!(error.contains("503"), "{error}");
    assert!(error.contains("Model tiny is currently loading"), "{error}");
}

#[tokio::test]
async fn test_malformed_output_is_an_error() {
    // Arrange
    let router = Router::new().route(
        "/models/:model",
        post(|| async { Json(json!([{"label": "cat"}])) }),
    );
    let base_url = spawn(router).await;
    let models = Models::new(&base_url, &base_url, "").unwrap();

    // Act
    let result = models
        .image_to_text(ImageToTextRequest {
            model: "tiny".to_string(),
            data: Bytes::from_static(b"img"),
            content_type: None,
        })
        .await;

    // Assert
    assert!(result.is_err());
}

#[tokio::test]
async fn test_image_to_text_sends_raw_bytes() {
    // Arrange
    let router = Router::new().route(
        "/models/:model",
        post(|headers: HeaderMap, body: Bytes| async move {
            Json(json!([{
                "generated_text": format!(
                    "{} bytes of {}",
                    body.len(),
                    header_value(&headers, header::CONTENT_TYPE)
                )
            }]))
        }),
    );
    let base_url = spawn(router).await;
    let models = Models::new(&base_url, &base_url, "").unwrap();

    // Act
    let output = models
        .image_to_text(ImageToTextRequest {
            model: "tiny".to_string(),
            data: Bytes::from_static(&[1, 2, 3, 4, 5]),
            content_type: Some("image/png".to_string()),
        })
        .await
        .unwrap();

    // Assert
    assert_eq!(output.generated_text, "5 bytes of image/png");
}

#[tokio::test]
async fn test_text_to_image_returns_body_bytes() {
    // Arrange
    let router = Router::new().route(
        "/models/:model",
        post(|body: Bytes| async move { body }),
    );
    let base_url = spawn(router).await;
    let models = Models::new(&base_url, &base_url, "").unwrap();

    // Act
    let bytes = models
        .text_to_image(TextToImageRequest {
            model: "tiny".to_string(),
            inputs: "a tortoise".to_string(),
            parameters: Some(json!({"negative_prompt": "blurry"})),
        })
        .await
        .unwrap();

    // Assert
    let echoed: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        echoed,
        json!({"inputs": "a tortoise", "parameters": {"negative_prompt": "blurry"}})
    );
}
