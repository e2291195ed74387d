//! Configuration file loading.
//!
//! Looked up in this order:
//! 1. an explicit `--config` path
//! 2. `~/.config/study-quiz/config.toml`
//!
//! Missing files fall back to defaults; command-line flags are applied on top
//! by the binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::catalog::DEFAULT_CATALOG_URL;
use crate::scoring::GradingScale;

const LOG_FILE_NAME: &str = "study-quiz.log";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Where the question store and log file live.
    pub storage_dir: Option<PathBuf>,
    pub catalog_url: String,
    pub grading: GradingScale,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_filter: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            grading: GradingScale::default(),
            log_filter: "study_quiz=info".to_string(),
        }
    }
}

impl QuizConfig {
    /// Configured storage directory, else the user config directory, else
    /// the working directory.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir
            .clone()
            .or_else(dirs_path)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn log_path(&self) -> PathBuf {
        self.storage_dir().join(LOG_FILE_NAME)
    }
}

/// Load config from an explicit path, or search the default location.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("config file not found: {}", p.display());
            }
            Some(p.to_path_buf())
        }
        None => dirs_path()
            .map(|dir| dir.join("config.toml"))
            .filter(|p| p.exists()),
    };

    let Some(path) = config_path else {
        return Ok(QuizConfig::default());
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config: QuizConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(|h| PathBuf::from(h).join(".config").join("study-quiz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "grading = \"score-only\"\nstorage_dir = \"/tmp/quiz\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.grading, GradingScale::ScoreOnly);
        assert_eq!(config.storage_dir(), PathBuf::from("/tmp/quiz"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/quiz/study-quiz.log"));
        assert_eq!(config.catalog_url, DEFAULT_CATALOG_URL);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/study-quiz.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn test_unknown_grading_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "grading = \"letters\"\n").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }
}
