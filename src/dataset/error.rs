use std::path::PathBuf;
use thiserror::Error;

/// Failure to fetch the raw dataset text
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to load {url}: HTTP {status}")]
    Status { url: String, status: u16 },
}
