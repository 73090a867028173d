//! TopoJSON feature extraction
//!
//! Arc decoding and stitching are left to the `topojson` crate, which turns a
//! named object into a GeoJSON feature collection. Each feature is then
//! converted into geo-types and tagged with its county id.

use std::collections::HashMap;

use geo_types::Geometry;
use geojson::feature::Id;
use geojson::Feature;
use serde::Deserialize;
use thiserror::Error;
use topojson::TopoJson;

use super::model::{CountyGeometry, CountyId};

/// Errors raised while extracting features from a topology
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("invalid topology document: {0}")]
    Parse(String),

    #[error("document is TopoJSON but not a Topology")]
    NotATopology,

    #[error("topology has no object named '{0}'")]
    MissingObject(String),

    #[error("cannot extract '{object}': {message}")]
    Extract { object: String, message: String },

    #[error("invalid geometry: {0}")]
    Geometry(#[from] geojson::Error),
}

/// Object ids as they appear in the document, member order preserved
#[derive(Debug, Default, Deserialize)]
struct ObjectIds {
    #[serde(default)]
    objects: HashMap<String, IdNode>,
}

#[derive(Debug, Deserialize)]
struct IdNode {
    #[serde(rename = "type")]
    kind: Option<String>,
    id: Option<CountyId>,
    #[serde(default)]
    geometries: Vec<IdNode>,
}

impl IdNode {
    /// One id per extracted feature
    fn feature_ids(&self) -> Vec<Option<&CountyId>> {
        if self.kind.as_deref() == Some("GeometryCollection") {
            self.geometries.iter().map(|g| g.id.as_ref()).collect()
        } else {
            vec![self.id.as_ref()]
        }
    }
}

/// A decoded TopoJSON topology
pub struct Topology {
    topology: topojson::Topology,
    ids: ObjectIds,
}

impl Topology {
    /// Parse a TopoJSON document
    pub fn from_slice(body: &[u8]) -> Result<Self, TopologyError> {
        let text = std::str::from_utf8(body).map_err(|e| TopologyError::Parse(e.to_string()))?;
        let ids: ObjectIds =
            serde_json::from_str(text).map_err(|e| TopologyError::Parse(e.to_string()))?;
        match text.parse::<TopoJson>() {
            Ok(TopoJson::Topology(topology)) => Ok(Self { topology, ids }),
            Ok(_) => Err(TopologyError::NotATopology),
            Err(e) => Err(TopologyError::Parse(e.to_string())),
        }
    }

    /// Extract the named object as a flat list of features
    ///
    /// A `GeometryCollection` expands into one feature per member; any other
    /// object yields a single feature.
    pub fn features(&self, object: &str) -> Result<Vec<CountyGeometry>, TopologyError> {
        let ids = self
            .ids
            .objects
            .get(object)
            .ok_or_else(|| TopologyError::MissingObject(object.to_string()))?
            .feature_ids();

        let collection = topojson::to_geojson(&self.topology, object).map_err(|e| {
            TopologyError::Extract {
                object: object.to_string(),
                message: e.to_string(),
            }
        })?;

        collection
            .features
            .into_iter()
            .enumerate()
            .map(|(i, feature)| -> Result<CountyGeometry, TopologyError> {
                let id = feature_id(&feature).or_else(|| ids.get(i).copied().flatten().cloned());
                let geometry = feature
                    .geometry
                    .map(|g| Geometry::<f64>::try_from(g.value))
                    .transpose()?;
                Ok(CountyGeometry {
                    id,
                    properties: feature.properties,
                    geometry,
                })
            })
            .collect()
    }
}

fn feature_id(feature: &Feature) -> Option<CountyId> {
    match &feature.id {
        Some(Id::String(s)) => Some(CountyId::new(s.as_str())),
        Some(Id::Number(n)) => Some(CountyId::from(n)),
        None => feature
            .foreign_members
            .as_ref()
            .and_then(|members| members.get("id"))
            .and_then(|id| serde_json::from_value(id.clone()).ok()),
    }
}
