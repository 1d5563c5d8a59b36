use anyhow::Context;
use huggingface::models::{
    image_to_text::{ImageToText, ImageToTextRequest},
    Models, HUB_URL, INFERENCE_URL,
};
use util::Env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = Env::load()?;
    let path = std::env::args().nth(1).context("usage: image_to_text <image>")?;
    let data = std::fs::read(&path)
        .with_context(|| format!("failed to read {path}"))?;

    let models =
        Models::new(INFERENCE_URL, HUB_URL, &env.huggingfacehub_api_key)?;

    let result = models
        .image_to_text(ImageToTextRequest {
            model: "nlpconnect/vit-gpt2-image-captioning".to_string(),
            data: data.into(),
            content_type: None,
        })
        .await?;

    println!("{:?}", result);

    Ok(())
}
