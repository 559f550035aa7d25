//! Configuration loading for the ludoteca CLI and backend client.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level ludoteca configuration.
///
/// Note: Custom Debug impl masks the API token to prevent accidental
/// exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct LudotecaConfig {
    /// Backend base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token for the backend, if it requires one.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Where game definition files live.
    #[serde(default = "default_games_dir")]
    pub games_dir: PathBuf,
    /// Where the settings store file lives.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

impl std::fmt::Debug for LudotecaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LudotecaConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .field("games_dir", &self.games_dir)
            .field("store_path", &self.store_path)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_games_dir() -> PathBuf {
    PathBuf::from("./games")
}
fn default_store_path() -> PathBuf {
    PathBuf::from("./ludoteca-settings.json")
}

impl Default for LudotecaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            timeout_secs: default_timeout(),
            games_dir: default_games_dir(),
            store_path: default_store_path(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `ludoteca.toml` in the current directory
/// 2. `~/.config/ludoteca/config.toml`
///
/// Environment variable overrides: `LUDOTECA_API_URL`, `LUDOTECA_API_TOKEN`.
pub fn load_config() -> Result<LudotecaConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LudotecaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("ludoteca.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<LudotecaConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LudotecaConfig::default(),
    };

    // Apply env var overrides
    if let Ok(url) = std::env::var("LUDOTECA_API_URL") {
        config.base_url = url;
    }
    if let Ok(token) = std::env::var("LUDOTECA_API_TOKEN") {
        config.api_token = Some(token);
    }

    config.base_url = resolve_env_vars(&config.base_url);
    config.api_token = config.api_token.as_ref().map(|t| resolve_env_vars(t));

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("ludoteca"))
}
