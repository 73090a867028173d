//! Dataset loading: county topology, education statistics and their join key
//!
//! The loader fetches both resources concurrently, decodes them and turns the
//! topology's `counties` object into a flat list of [`CountyGeometry`] features.

pub mod loader;
pub mod model;
pub mod topology;

pub use loader::{load_datasets, Datasets, Fetch, FetchResponse, HttpFetcher, Sources};
pub use model::{CountyGeometry, CountyId, EducationRecord};
pub use topology::{Topology, TopologyError};
