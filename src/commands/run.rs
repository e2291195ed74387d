//! The interactive `study-quiz run` command.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use study_quiz::config::QuizConfig;
use study_quiz::{App, CatalogClient, FileStore, Quiz, read_question_file};
use tracing::info;

use super::env_filter;

pub async fn execute(config: QuizConfig, questions: Option<PathBuf>) -> Result<()> {
    let storage_dir = config.storage_dir();
    fs::create_dir_all(&storage_dir)
        .with_context(|| format!("failed to create {}", storage_dir.display()))?;
    init_file_logging(&config)?;

    let preload = questions
        .map(read_question_file)
        .transpose()
        .context("failed to read the question file")?;

    let store = FileStore::new(&storage_dir);
    info!(path = %store.path().display(), "using question store");

    let mut app = App::new(Box::new(store), config.grading);
    if let Some(raw) = preload {
        app.set_yaml_input(raw);
    }

    let catalog = CatalogClient::new(&config.catalog_url)?;
    Quiz::new(app, catalog).run().await?;
    Ok(())
}

/// The terminal belongs to the UI, so logs go to a file next to the store.
fn init_file_logging(config: &QuizConfig) -> Result<()> {
    let log_path = config.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
