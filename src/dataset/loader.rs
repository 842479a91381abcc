use chrono::{DateTime, Local};
use std::fmt;
use std::path::PathBuf;

use super::delimited::parse_delimited;
use super::error::LoadError;
use super::projector::{project_records, Record};

/// Conventional name of the dataset next to the binary
pub const DEFAULT_SOURCE: &str = "data.csv";

/// Where the dataset text comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` locations are fetched, anything else is a path
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::Path(PathBuf::from(location))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Path(PathBuf::from(DEFAULT_SOURCE))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// Fetch the raw text once. No retry: a failure is reported to the caller.
pub async fn load_text(source: &DataSource) -> Result<String, LoadError> {
    match source {
        DataSource::Path(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })
        }
        DataSource::Url(url) => {
            let response = reqwest::get(url.as_str()).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            Ok(response.text().await?)
        }
    }
}

/// Records loaded from one source
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub loaded_at: DateTime<Local>,
}

impl Dataset {
    /// Parse and project already fetched text
    pub fn from_text(text: &str) -> Self {
        let rows = parse_delimited(text);
        let records = project_records(&rows);
        tracing::debug!(rows = rows.len(), records = records.len(), "projected dataset");

        Self {
            records,
            loaded_at: Local::now(),
        }
    }

    /// Fetch, parse and project the dataset at `source`
    pub async fn load(source: &DataSource) -> Result<Self, LoadError> {
        tracing::info!(%source, "loading dataset");
        let text = load_text(source).await?;
        let dataset = Self::from_text(&text);
        tracing::info!(%source, records = dataset.records.len(), "dataset loaded");
        Ok(dataset)
    }
}
