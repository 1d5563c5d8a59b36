use anyhow::Context;
use huggingface::models::{
    text_to_image::{TextToImage, TextToImageRequest},
    Models, HUB_URL, INFERENCE_URL,
};
use serde_json::json;
use util::Env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = Env::load()?;

    let models =
        Models::new(INFERENCE_URL, HUB_URL, &env.huggingfacehub_api_key)?;

    let result = models
        .text_to_image(TextToImageRequest {
            model: "stabilityai/stable-diffusion-2".to_string(),
            inputs: "award winning high resolution photo of a giant tortoise"
                .to_string(),
            parameters: Some(json!({ "negative_prompt": "blurry" })),
        })
        .await?;

    std::fs::write("image.jpg", &result).context("failed to write image.jpg")?;

    Ok(())
}
