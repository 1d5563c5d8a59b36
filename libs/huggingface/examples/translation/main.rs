use huggingface::models::{
    translation::{Translation, TranslationRequest},
    Models, HUB_URL, INFERENCE_URL,
};
use util::Env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = Env::load()?;

    let models =
        Models::new(INFERENCE_URL, HUB_URL, &env.huggingfacehub_api_key)?;

    let result = models
        .translation(TranslationRequest {
            model: Some("t5-base".to_string()),
            inputs: "My name is Wolfgang and I live in Amsterdam".to_string(),
            ..Default::default()
        })
        .await?;

    println!("{:?}", result);

    Ok(())
}
