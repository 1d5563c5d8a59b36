use std::sync::Arc;

use anyhow::{bail, Context};
use bytes::Bytes;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Body, Client, Response,
};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, info};

pub mod chat_completion;
pub mod image_to_text;
pub mod text_to_image;
pub mod translation;

pub static INFERENCE_URL: &str = "https://api-inference.huggingface.co";
pub static HUB_URL: &str = "https://huggingface.co";

static JSON: &str = "application/json";

/// Shared handle to the inference API.
///
/// Holds no per-request state; clones share the connection pool and the
/// task catalogue.
#[derive(Debug, Clone)]
pub struct Models {
    inference_url: String,
    hub_url: String,
    client: Client,
    tasks: Arc<OnceCell<Value>>,
}

impl Models {
    pub fn new(
        inference_url: &str,
        hub_url: &str,
        token: &str,
    ) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        if !token.is_empty() {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(format!("Bearer {}", token).as_str())
                    .context("api key is not a valid header value")?,
            );
        }

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            inference_url: inference_url.trim_end_matches('/').to_string(),
            hub_url: hub_url.trim_end_matches('/').to_string(),
            client,
            tasks: Arc::new(OnceCell::new()),
        })
    }

    /// Recommended model for `task`, from the hub task catalogue. The
    /// catalogue is fetched once per process.
    pub async fn default_model(&self, task: &str) -> anyhow::Result<String> {
        let client = self.client.clone();
        let url = format!("{}/api/tasks", self.hub_url);
        let tasks = self
            .tasks
            .get_or_try_init(|| async move {
                info!(task = "fetch task catalogue", url = %url);
                let response = client
                    .get(&url)
                    .send()
                    .await
                    .context("failed to fetch task catalogue")?;
                let text = ensure_success(response)
                    .await?
                    .text()
                    .await
                    .context("failed to read task catalogue")?;
                serde_json::from_str::<Value>(&text)
                    .context("failed to parse task catalogue")
            })
            .await?;

        tasks
            .get(task)
            .and_then(|info| info.get("models"))
            .and_then(|models| models.get(0))
            .and_then(|model| model.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .with_context(|| format!("no recommended model for task {task}"))
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.inference_url, model)
    }

    async fn send<R: Into<Body>>(
        &self,
        url: String,
        request: R,
        content_type: Option<&str>,
    ) -> anyhow::Result<Response> {
        debug!(task = "inference request", url = %url);

        let mut builder = self.client.post(&url).body(request);
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("failed to send request to {url}"))?;

        ensure_success(response).await
    }

    async fn string_response<R: Into<Body>>(
        &self,
        url: String,
        request: R,
        content_type: Option<&str>,
    ) -> anyhow::Result<String> {
        self.send(url, request, content_type)
            .await?
            .text()
            .await
            .context("failed to read response body")
    }

    async fn json_response(
        &self,
        url: String,
        request: String,
    ) -> anyhow::Result<String> {
        self.string_response(url, request, Some(JSON)).await
    }

    async fn binary_response(
        &self,
        url: String,
        request: String,
    ) -> anyhow::Result<Bytes> {
        self.send(url, request, Some(JSON))
            .await?
            .bytes()
            .await
            .context("failed to read response bytes")
    }
}

async fn ensure_success(response: Response) -> anyhow::Result<Response> {
    let status_code = response.status();
    if status_code.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    bail!(
        "status code: {}, response: {}",
        status_code,
        remote_error(&text)
    )
}

/// The `error` field of an inference API error body, or the raw text.
fn remote_error(text: &str) -> String {
    let Ok(body) = serde_json::from_str::<Value>(text) else {
        return text.to_string();
    };

    match body.get("error") {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Array(messages)) => messages
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        _ => text.to_string(),
    }
}

/// Unwraps the single-element arrays the inference API returns for one
/// input.
fn first_output(value: Value) -> Value {
    match value {
        Value::Array(mut values) if !values.is_empty() => values.swap_remove(0),
        value => value,
    }
}
