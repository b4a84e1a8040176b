//! lingo configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::CefrLevel;
use crate::scoring::ScoringOptions;

/// Defaults applied to attempts that don't say otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDefaults {
    #[serde(default = "default_level")]
    pub level: CefrLevel,
    #[serde(default = "default_topic")]
    pub topic: String,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            level: default_level(),
            topic: default_topic(),
        }
    }
}

/// Top-level lingo configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LingoConfig {
    /// Where progress records are appended.
    #[serde(default = "default_progress_file")]
    pub progress_file: PathBuf,
    #[serde(default)]
    pub scoring: ScoringOptions,
    #[serde(default)]
    pub session: SessionDefaults,
}

fn default_level() -> CefrLevel {
    CefrLevel::A1
}
fn default_topic() -> String {
    "general".to_string()
}
fn default_progress_file() -> PathBuf {
    PathBuf::from("./lingo-progress.json")
}

impl Default for LingoConfig {
    fn default() -> Self {
        Self {
            progress_file: default_progress_file(),
            scoring: ScoringOptions::default(),
            session: SessionDefaults::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("${") {
        let start = search_from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        search_from = start + value.len();
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `lingo.toml` in the current directory
/// 2. `~/.config/lingo/config.toml`
///
/// Environment variable override: `LINGO_PROGRESS_FILE`.
pub fn load_config() -> Result<LingoConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LingoConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lingo.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => LingoConfig::default(),
    };

    if let Ok(file) = std::env::var("LINGO_PROGRESS_FILE") {
        config.progress_file = PathBuf::from(file);
    }

    Ok(config)
}

/// Parse a TOML config string, expanding `${VAR}` references in paths and topics.
pub fn parse_config_str(content: &str) -> Result<LingoConfig> {
    let mut config: LingoConfig = toml::from_str(content)?;
    config.progress_file = PathBuf::from(resolve_env_vars(&config.progress_file.to_string_lossy()));
    config.session.topic = resolve_env_vars(&config.session.topic);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lingo"))
}
