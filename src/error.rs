//! Error types for dataset loading

use std::path::PathBuf;

use thiserror::Error;

use crate::data::TopologyError;

/// Errors that can occur while fetching or decoding the datasets
#[derive(Error, Debug)]
pub enum LoadError {
    /// Transport failure before a status was received
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-2xx status
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    /// Local source could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Body is not the expected JSON shape
    #[error("failed to decode {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Topology decoded but its counties could not be extracted
    #[error("invalid topology: {0}")]
    Topology(#[from] TopologyError),
}

impl LoadError {
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            url: url.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure came from an unsuccessful HTTP status
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}
