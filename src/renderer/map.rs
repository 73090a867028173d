//! County map: joins geometries with records and assigns colours

use crate::data::model::CountyIndex;
use crate::data::{CountyGeometry, CountyId, EducationRecord};
use crate::interaction::{tooltip_html, Stroke};
use crate::scale::ColorScale;
use crate::RenderConfig;

use super::legend::{render_legend, LegendView};
use super::path::PathGenerator;

/// Fill for counties without an education record
pub const FALLBACK_FILL: &str = "#ccc";

/// One drawn county
#[derive(Debug, Clone, PartialEq)]
pub struct CountyPath {
    /// SVG path data
    pub d: String,
    /// Matched FIPS code
    pub fips: Option<CountyId>,
    /// Matched percentage, verbatim from the record
    pub education: Option<f64>,
    pub fill: String,
    pub stroke: Stroke,
    /// Tooltip markup shown on hover
    pub tooltip: Option<String>,
}

impl CountyPath {
    pub fn is_matched(&self) -> bool {
        self.fips.is_some()
    }
}

/// Laid-out map surface
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub width: f64,
    pub height: f64,
    pub counties: Vec<CountyPath>,
}

/// Output of one render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMap {
    pub map: MapView,
    pub legend: LegendView,
    pub scale: ColorScale,
}

/// Draw every geometry, in input order, then lay out the legend
///
/// Geometries without a record get [`FALLBACK_FILL`] and no data attributes.
/// Records without a geometry are not drawn.
pub fn render_map(
    geometries: &[CountyGeometry],
    records: &[EducationRecord],
    config: &RenderConfig,
) -> RenderedMap {
    let scale = ColorScale::from_records(records);
    let index = CountyIndex::build(records);
    let paths = PathGenerator::new(config.map.precision, config.map.point_radius);

    let counties: Vec<CountyPath> = geometries
        .iter()
        .map(|county| {
            let d = county
                .geometry
                .as_ref()
                .map(|g| paths.path(g))
                .unwrap_or_default();
            match index.get(county.id.as_ref()) {
                Some(record) => CountyPath {
                    d,
                    fips: Some(record.fips.clone()),
                    education: Some(record.bachelors_or_higher),
                    fill: scale.color(record.bachelors_or_higher).to_string(),
                    stroke: Stroke::resting(),
                    tooltip: Some(tooltip_html(record)),
                },
                None => CountyPath {
                    d,
                    fips: None,
                    education: None,
                    fill: FALLBACK_FILL.to_string(),
                    stroke: Stroke::resting(),
                    tooltip: None,
                },
            }
        })
        .collect();

    let matched = counties.iter().filter(|c| c.is_matched()).count();
    tracing::info!(
        counties = counties.len(),
        matched,
        unmatched = counties.len() - matched,
        "map rendered"
    );

    let legend = render_legend(&scale, &config.legend);

    RenderedMap {
        map: MapView {
            width: config.map.width,
            height: config.map.height,
            counties,
        },
        legend,
        scale,
    }
}
