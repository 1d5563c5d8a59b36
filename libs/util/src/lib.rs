use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use toml::{map::Map, Value};

pub mod array;
pub mod conversion;
pub mod env;
pub mod text;
pub mod time;

pub use array::dedupe_append;
pub use conversion::{
    is_data, is_truthy, to_array, to_numeric_char, to_safe_boolean,
    to_safe_date, to_safe_number, to_safe_string, to_sql_like,
};
pub use env::Env;
pub use text::{
    append_comma, extract_bearer, get_hashed, random_password, zero_pad,
};
pub use time::{
    add_hours, add_minutes, add_seconds, date_to_sql, diff_days, format_date,
    format_now, parse_utc_offset,
};

/// Directory holding the workspace `Cargo.toml`, or the current directory
/// when cargo cannot be asked (e.g. a deployed binary).
pub fn workspace_dir() -> PathBuf {
    let located = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok());

    if let Some(located) = located {
        if let Some(parent) = Path::new(located.trim()).parent() {
            return parent.to_path_buf();
        }
    }

    std::env::current_dir().unwrap_or_default()
}

/// Reads `config_name` from the workspace directory into `T`.
pub fn load_config<T: DeserializeOwned>(config_name: &str) -> anyhow::Result<T> {
    let path = workspace_dir().join(config_name);
    let config = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<T>(&config)
        .with_context(|| format!("failed to parse {}", config_name))
}

/// Reads `Secrets.toml` from the workspace directory. A missing file yields
/// an empty table.
pub fn load_env() -> anyhow::Result<Map<String, Value>> {
    let path = workspace_dir().join("Secrets.toml");
    if !path.exists() {
        return Ok(Map::new());
    }

    let secrets = std::fs::read_to_string(&path)
        .context("failed to read Secrets.toml")?;

    toml::from_str::<Map<String, Value>>(&secrets)
        .context("failed to parse Secrets.toml")
}
