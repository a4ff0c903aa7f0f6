//! TOML configuration for the `cite` CLI.
//!
//! Every section and field is optional; see [`Config::default`] for the
//! values used when a key is missing.
//!
//! ```toml
//! [display]
//! snippet_max_chars = 240
//! page_size = 5
//!
//! [links]
//! base_url = "https://kb.example.com"
//!
//! [api]
//! timeout_secs = 30
//! max_retries = 2
//! token_env = "CITE_API_TOKEN"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./config/cite.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Character budget for snippets cut from chunk text.
    #[serde(default = "default_snippet_max_chars")]
    pub snippet_max_chars: usize,
    /// Chunks shown per document page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            snippet_max_chars: default_snippet_max_chars(),
            page_size: default_page_size(),
        }
    }
}

fn default_snippet_max_chars() -> usize {
    240
}
fn default_page_size() -> usize {
    5
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LinksConfig {
    /// Prefix for knowledge-base node links. Empty gives relative links.
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra attempts after a 429, 5xx, or network error.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Name of the environment variable holding a bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            token_env: default_token_env(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    2
}
fn default_token_env() -> String {
    "CITE_API_TOKEN".to_string()
}

impl ApiConfig {
    /// Bearer token from the configured environment variable, if set.
    pub fn token(&self) -> Option<String> {
        if self.token_env.is_empty() {
            return None;
        }
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

/// Parse and validate configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.display.snippet_max_chars == 0 {
        anyhow::bail!("display.snippet_max_chars must be > 0");
    }

    if config.display.page_size == 0 {
        anyhow::bail!("display.page_size must be > 0");
    }

    if config.api.timeout_secs == 0 {
        anyhow::bail!("api.timeout_secs must be > 0");
    }

    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config: {}", path.display()))
}

/// Load `explicit` if given (it must exist), else [`DEFAULT_CONFIG_PATH`]
/// when present, else built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        return load_config(default_path);
    }

    tracing::debug!("no config at {}, using defaults", DEFAULT_CONFIG_PATH);
    Ok(Config::default())
}
