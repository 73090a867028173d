//! Concurrent retrieval and decoding of the two datasets

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::LoadError;

use super::model::{CountyGeometry, EducationRecord};
use super::topology::Topology;

/// Default location of the county topology
pub const DEFAULT_TOPOLOGY_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/counties.json";

/// Default location of the education statistics
pub const DEFAULT_EDUCATION_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/choropleth_map/for_user_education.json";

/// Topology object holding the county geometries
pub const COUNTIES_OBJECT: &str = "counties";

/// Raw response: status code plus body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A 200 response with the given body
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of dataset bytes
///
/// Implementations report transport failures as errors and hand non-2xx
/// statuses back to the caller, which decides what a failed status means.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, source: &str) -> Result<FetchResponse, LoadError>;
}

/// Fetches `http(s)://` sources with reqwest and anything else from disk
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Fetcher backed by a default reqwest client
    pub fn new() -> Self {
        Self::default()
    }
}

/// Whether a source names a remote resource rather than a local path
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, source: &str) -> Result<FetchResponse, LoadError> {
        if !is_remote(source) {
            let body = tokio::fs::read(source)
                .await
                .map_err(|e| LoadError::read(source, e))?;
            return Ok(FetchResponse::ok(body));
        }

        let response = self
            .client
            .get(source)
            .send()
            .await
            .map_err(|e| LoadError::request(source, e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::request(source, e))?;
        tracing::debug!(url = source, status, bytes = body.len(), "fetched");
        Ok(FetchResponse::new(status, body.to_vec()))
    }
}

/// Locations of the two datasets (URLs or file paths)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub topology: String,
    pub education: String,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            topology: DEFAULT_TOPOLOGY_URL.to_string(),
            education: DEFAULT_EDUCATION_URL.to_string(),
        }
    }
}

impl Sources {
    pub fn new(topology: impl Into<String>, education: impl Into<String>) -> Self {
        Self {
            topology: topology.into(),
            education: education.into(),
        }
    }
}

/// Both datasets, decoded
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    pub geometries: Vec<CountyGeometry>,
    pub records: Vec<EducationRecord>,
}

/// Fetch, check and decode both datasets
///
/// Both requests are in flight at the same time. A non-2xx status on either
/// one aborts the load before anything is decoded.
pub async fn load_datasets<F>(fetcher: &F, sources: &Sources) -> Result<Datasets, LoadError>
where
    F: Fetch + ?Sized,
{
    tracing::info!(
        topology = %sources.topology,
        education = %sources.education,
        "loading datasets"
    );

    let (topology, education) = tokio::try_join!(
        fetcher.fetch(&sources.topology),
        fetcher.fetch(&sources.education)
    )?;

    for (url, response) in [
        (&sources.topology, &topology),
        (&sources.education, &education),
    ] {
        if !response.is_success() {
            return Err(LoadError::Status {
                url: url.clone(),
                status: response.status,
            });
        }
    }

    let topology = Topology::from_slice(&topology.body)?;
    let records: Vec<EducationRecord> = decode(&sources.education, &education.body)?;
    let geometries = topology.features(COUNTIES_OBJECT)?;

    tracing::info!(
        counties = geometries.len(),
        records = records.len(),
        "datasets loaded"
    );

    Ok(Datasets {
        geometries,
        records,
    })
}

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> Result<T, LoadError> {
    serde_json::from_slice(body).map_err(|source| LoadError::Decode {
        url: url.to_string(),
        source,
    })
}
