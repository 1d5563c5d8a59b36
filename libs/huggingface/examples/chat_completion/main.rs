use huggingface::models::{
    chat_completion::{ChatCompletion, ChatCompletionRequest, Message},
    Models, HUB_URL, INFERENCE_URL,
};
use util::Env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = Env::load()?;

    let models =
        Models::new(INFERENCE_URL, HUB_URL, &env.huggingfacehub_api_key)?;

    let result = models
        .chat_completion(ChatCompletionRequest {
            model: "mistralai/Mistral-7B-Instruct-v0.2".to_string(),
            messages: vec![Message {
                role: "user".to_string(),
                content: "Complete this sentence with words one plus one is equal "
                    .to_string(),
            }],
            max_tokens: Some(100),
        })
        .await?;

    println!("{:?}", result.into_first_message());

    Ok(())
}
