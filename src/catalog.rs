//! Remote subject catalog.
//!
//! The catalog is a repository listing: each folder is a subject and holds
//! one or more YAML question files. Only the text of the first question file
//! is returned; the importer does the rest.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Contents listing of the public question repository.
pub const DEFAULT_CATALOG_URL: &str =
    "https://api.github.com/repos/kamil-rusiecki/study-app-questions/contents";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("study-quiz/", env!("CARGO_PKG_VERSION"));
const QUESTION_FILE_EXTENSIONS: [&str; 2] = [".yaml", ".yml"];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{url} returned HTTP {status}")]
    Status { status: u16, url: String },

    #[error("unexpected catalog response: {0}")]
    Decode(String),

    #[error("subject '{0}' has no question file")]
    NoQuestionFile(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct Entry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    download_url: Option<String>,
}

/// A subject folder in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
}

impl Subject {
    /// Folder names use dashes for spaces.
    pub fn display_name(&self) -> String {
        self.name.replace('-', " ")
    }
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Subject folders, in listing order.
    #[instrument(skip(self), fields(url = %self.base_url))]
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, CatalogError> {
        let entries = self.list(&self.base_url).await?;
        let subjects: Vec<Subject> = entries
            .into_iter()
            .filter(|entry| entry.kind == "dir")
            .map(|entry| Subject { name: entry.name })
            .collect();

        info!(count = subjects.len(), "catalog subjects listed");
        Ok(subjects)
    }

    /// Raw text of the subject's first question file.
    #[instrument(skip(self, subject), fields(subject = %subject.name))]
    pub async fn fetch_questions(&self, subject: &Subject) -> Result<String, CatalogError> {
        let url = format!("{}/{}", self.base_url, subject.name);
        let entries = self.list(&url).await?;

        let download_url = entries
            .into_iter()
            .filter(|entry| is_question_file(&entry.name))
            .find_map(|entry| entry.download_url)
            .ok_or_else(|| CatalogError::NoQuestionFile(subject.name.clone()))?;

        debug!(%download_url, "downloading question file");
        let response = self.get(&download_url).await?;
        Ok(response.text().await?)
    }

    async fn list(&self, url: &str) -> Result<Vec<Entry>, CatalogError> {
        let response = self.get(url).await?;
        response
            .json::<Vec<Entry>>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, CatalogError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

fn is_question_file(name: &str) -> bool {
    QUESTION_FILE_EXTENSIONS
        .iter()
        .any(|extension| name.ends_with(extension))
}
