use serde::Deserialize;

/// Contents of `Config.toml`. Every section and field may be omitted.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: Server,
    pub log: Log,
    pub cors: Cors,
    pub huggingface: HuggingFace,
    pub chat: Chat,
    pub upload: Upload,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub host: String,
    pub port: u16,
    pub version: String,
    pub body_limit_mb: usize,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8008,
            version: "v1.1.20240804".to_string(),
            body_limit_mb: 20,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Offset of the timestamps in request log lines, e.g. `+07:00`.
    pub utc_offset: String,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            utc_offset: "+07:00".to_string(),
        }
    }
}

/// An empty origin list allows any origin.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Cors {
    pub allow_origins: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HuggingFace {
    pub inference_url: String,
    pub hub_url: String,
}

impl Default for HuggingFace {
    fn default() -> Self {
        Self {
            inference_url: huggingface::models::INFERENCE_URL.to_string(),
            hub_url: huggingface::models::HUB_URL.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Chat {
    pub default_max_tokens: u32,
    /// Forward every validated message instead of only the first one.
    pub forward_history: bool,
}

impl Default for Chat {
    fn default() -> Self {
        Self {
            default_max_tokens: 100,
            forward_history: false,
        }
    }
}

/// Guards for `/hf/imagetotext` uploads. Both are off by default.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Upload {
    pub images_only: bool,
    /// `0` disables the size check.
    pub max_size_mb: u64,
}
