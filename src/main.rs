use anyhow::Context;
use api::Config;
use huggingface::Models;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use util::{load_config, workspace_dir, Env};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let env = Env::load()?;
    let config = if workspace_dir().join(&env.config_name).exists() {
        load_config::<Config>(&env.config_name)?
    } else {
        warn!(
            task = "load config",
            "{} was not found, using defaults", env.config_name
        );
        Config::default()
    };

    let models = Models::new(
        &config.huggingface.inference_url,
        &config.huggingface.hub_url,
        &env.huggingfacehub_api_key,
    )?;

    let address = format!("{}:{}", config.server.host, config.server.port);
    let version = config.server.version.clone();
    let router = api::serve(config, models).await?;

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(
        "Welcome to BA_CHAT API (Build: {}), listening on {}",
        version, address
    );

    axum::serve(listener, router).await.context("server stopped")
}
