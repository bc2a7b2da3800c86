use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use client_core::{FileTokenStore, DEFAULT_API_URL};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "jobboard.toml";
const FALLBACK_TOKEN_FILE: &str = ".jobboard-session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub token_path: PathBuf,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            token_path: FileTokenStore::default_path()
                .unwrap_or_else(|| PathBuf::from(FALLBACK_TOKEN_FILE)),
            log_level: "warn".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_url: Option<String>,
    token_path: Option<PathBuf>,
    log_level: Option<String>,
}

/// Defaults, then the config file, then the process environment.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(config_path, |key| std::env::var(key).ok())
}

/// Like [`load_settings`] with the environment supplied by `env`. An explicit
/// `config_path` must exist; the default `jobboard.toml` is optional.
pub fn load_settings_with(
    config_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => {
            let file_cfg: FileSettings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
            if let Some(v) = file_cfg.api_url {
                settings.api_url = v;
            }
            if let Some(v) = file_cfg.token_path {
                settings.token_path = v;
            }
            if let Some(v) = file_cfg.log_level {
                settings.log_level = v;
            }
        }
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    if let Some(v) = env("JOBBOARD_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("JOBBOARD_TOKEN_PATH") {
        settings.token_path = PathBuf::from(v);
    }
    if let Some(v) = env("JOBBOARD_LOG") {
        settings.log_level = v;
    }

    settings.api_url = normalize_api_url(&settings.api_url)?;
    Ok(settings)
}

impl Settings {
    /// Applies the `--api-url` flag, which beats every other source.
    pub fn with_api_url_override(mut self, api_url: Option<&str>) -> anyhow::Result<Self> {
        if let Some(url) = api_url {
            self.api_url = normalize_api_url(url)?;
        }
        Ok(self)
    }
}

pub fn normalize_api_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).with_context(|| format!("invalid api url '{raw}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("api url '{raw}' must use http or https");
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
