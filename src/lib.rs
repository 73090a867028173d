//! County Choropleth - bachelor's degree attainment across US counties
//!
//! This library loads a county topology and per-county education statistics,
//! joins them by FIPS code, and renders a coloured map, a legend and a hover
//! tooltip as a single HTML page.
//!
//! # Example
//!
//! ```rust
//! use county_choropleth::{render_html, AppConfig, Datasets};
//!
//! let datasets = Datasets { geometries: vec![], records: vec![] };
//! let html = render_html(&datasets, &AppConfig::default());
//! assert!(html.contains(r#"id="map""#));
//! assert!(html.contains(r#"id="legend""#));
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod interaction;
pub mod renderer;
pub mod scale;
pub mod view;

pub use config::{AppConfig, ConfigError, PageConfig};
pub use data::{
    load_datasets, CountyGeometry, CountyId, Datasets, EducationRecord, Fetch, FetchResponse,
    HttpFetcher, Sources,
};
pub use error::LoadError;
pub use renderer::{render_map, LegendConfig, MapConfig, SvgConfig, FALLBACK_FILL};
pub use scale::ColorScale;
pub use view::{Page, ViewController, ViewState};

use thiserror::Error;

/// Errors that can stop the command-line pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Error reading or parsing the configuration file
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Error fetching or decoding a dataset
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Error writing the rendered page
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for the map and legend renderers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderConfig {
    /// Map canvas and path settings
    pub map: MapConfig,
    /// Legend geometry
    pub legend: LegendConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the map configuration
    pub fn with_map(mut self, config: MapConfig) -> Self {
        self.map = config;
        self
    }

    /// Set the legend configuration
    pub fn with_legend(mut self, config: LegendConfig) -> Self {
        self.legend = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }
}

/// Render already-loaded datasets straight to an HTML page
///
/// This skips fetching and the view controller; the page is always rendered,
/// even when either dataset is empty.
pub fn render_html(datasets: &Datasets, config: &AppConfig) -> String {
    let render = config.render_config();
    let rendered = render_map(&datasets.geometries, &datasets.records, &render);

    let mut page = Page::new(&config.page);
    page.map = Some(rendered.map);
    page.legend = Some(rendered.legend);
    page.to_html(&render.svg)
}
