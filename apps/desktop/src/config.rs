use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use client_core::EmptyEpisodePolicy;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "bbquotes.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub production: String,
    pub seed_dir: Option<PathBuf>,
    pub empty_episode: EmptyEpisodePolicy,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://breaking-bad-api-six.vercel.app/api".into(),
            production: "Breaking Bad".into(),
            seed_dir: None,
            empty_episode: EmptyEpisodePolicy::KeepStale,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    base_url: Option<String>,
    production: Option<String>,
    seed_dir: Option<PathBuf>,
    empty_episode: Option<EmptyEpisodePolicy>,
    log_filter: Option<String>,
}

impl Settings {
    pub fn base_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(self.base_url.trim())
            .with_context(|| format!("invalid base_url '{}'", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }
        Ok(url)
    }
}

/// Defaults, then the optional config file, then environment overrides.
pub fn load_settings(config_path: &Path) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if config_path.exists() {
        let raw = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config '{}'", config_path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config '{}'", config_path.display()))?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.base_url {
        settings.base_url = v;
    }
    if let Some(v) = file_cfg.production {
        settings.production = v;
    }
    if let Some(v) = file_cfg.seed_dir {
        settings.seed_dir = Some(v);
    }
    if let Some(v) = file_cfg.empty_episode {
        settings.empty_episode = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    Ok(())
}

fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("BBQUOTES_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = lookup("BBQUOTES_PRODUCTION") {
        settings.production = v;
    }
    if let Some(v) = lookup("BBQUOTES_SEED_DIR") {
        settings.seed_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = lookup("BBQUOTES_EMPTY_EPISODE") {
        settings.empty_episode = v
            .parse()
            .map_err(|err: String| anyhow!("BBQUOTES_EMPTY_EPISODE: {err}"))?;
    }
    if let Some(v) = lookup("BBQUOTES_LOG") {
        settings.log_filter = v;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
