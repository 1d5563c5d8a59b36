use toml::{map::Map, Value};
use tracing::warn;

use crate::load_env;

const API_KEY: &str = "HUGGINGFACEHUB_API_KEY";
const CONFIG: &str = "CONFIG";
const DEFAULT_CONFIG_NAME: &str = "Config.toml";

/// Process settings read once at startup.
#[derive(Clone, Debug, Default)]
pub struct Env {
    pub huggingfacehub_api_key: String,
    pub config_name: String,
}

impl Env {
    /// `Secrets.toml` first, then the process environment on top.
    pub fn load() -> anyhow::Result<Self> {
        let secrets = load_env()?;
        Ok(Self::from_sources(&secrets, |key| std::env::var(key).ok()))
    }

    pub fn from_sources(
        secrets: &Map<String, Value>,
        var: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let lookup = |key: &str| {
            var(key).or_else(|| {
                secrets
                    .get(key)
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
        };

        let huggingfacehub_api_key = lookup(API_KEY).unwrap_or_default();
        if huggingfacehub_api_key.is_empty() {
            warn!(task = "load env", "{API_KEY} is not set");
        }

        let config = lookup(CONFIG).unwrap_or_default();
        let config_name = if config.is_empty() {
            DEFAULT_CONFIG_NAME.to_string()
        } else {
            format!("Config{}", config)
        };

        Self {
            huggingfacehub_api_key,
            config_name,
        }
    }
}
