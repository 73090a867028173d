//! View controller: load once, render once
//!
//! [`ViewController::mount`] fetches both datasets a single time and fills
//! the two [`ViewState`] slots. The first time both slots hold data the map
//! and legend are rendered into the [`Page`]; later triggers are no-ops.

use crate::config::{AppConfig, PageConfig};
use crate::data::{load_datasets, CountyGeometry, EducationRecord, Fetch, Sources};
use crate::error::LoadError;
use crate::interaction::Tooltip;
use crate::renderer::{render_map, render_page, LegendView, MapView, SvgConfig};
use crate::RenderConfig;

/// The two dataset slots, each written at most once
#[derive(Debug, Default)]
pub struct ViewState {
    geometries: Option<Vec<CountyGeometry>>,
    records: Option<Vec<EducationRecord>>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the geometry slot; returns `false` if it was already set
    pub fn set_geometries(&mut self, geometries: Vec<CountyGeometry>) -> bool {
        if self.geometries.is_some() {
            return false;
        }
        self.geometries = Some(geometries);
        true
    }

    /// Fill the record slot; returns `false` if it was already set
    pub fn set_records(&mut self, records: Vec<EducationRecord>) -> bool {
        if self.records.is_some() {
            return false;
        }
        self.records = Some(records);
        true
    }

    pub fn geometries(&self) -> Option<&[CountyGeometry]> {
        self.geometries.as_deref()
    }

    pub fn records(&self) -> Option<&[EducationRecord]> {
        self.records.as_deref()
    }

    /// Both slots, once both are present
    pub fn resolved(&self) -> Option<(&[CountyGeometry], &[EducationRecord])> {
        Some((self.geometries.as_deref()?, self.records.as_deref()?))
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved().is_some()
    }
}

/// The document: fixed text plus the map, legend and tooltip regions
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub description: String,
    /// `#map` contents; `None` while empty
    pub map: Option<MapView>,
    /// `#legend` contents; `None` while empty
    pub legend: Option<LegendView>,
    pub tooltip: Tooltip,
}

impl Page {
    pub fn new(config: &PageConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            map: None,
            legend: None,
            tooltip: Tooltip::new(),
        }
    }

    /// Number of county paths in `#map`
    pub fn county_count(&self) -> usize {
        self.map.as_ref().map_or(0, |m| m.counties.len())
    }

    /// Number of colour blocks in `#legend`
    pub fn legend_block_count(&self) -> usize {
        self.legend.as_ref().map_or(0, |l| l.blocks.len())
    }

    pub fn to_html(&self, config: &SvgConfig) -> String {
        render_page(self, config)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(&PageConfig::default())
    }
}

/// Owns the view state and the page, drives loading and rendering
pub struct ViewController<F> {
    fetcher: F,
    sources: Sources,
    render: RenderConfig,
    state: ViewState,
    page: Page,
    mounted: bool,
    rendered: bool,
    load_error: Option<LoadError>,
}

impl<F: Fetch> ViewController<F> {
    pub fn new(fetcher: F, config: &AppConfig) -> Self {
        Self {
            fetcher,
            sources: config.sources.clone(),
            render: config.render_config(),
            state: ViewState::new(),
            page: Page::new(&config.page),
            mounted: false,
            rendered: false,
            load_error: None,
        }
    }

    /// Load the datasets on first call, then render if both are present
    ///
    /// Load failures are logged and recorded; the page stays empty.
    pub async fn mount(&mut self) -> &Page {
        if !self.mounted {
            self.mounted = true;
            match load_datasets(&self.fetcher, &self.sources).await {
                Ok(datasets) => {
                    self.state.set_geometries(datasets.geometries);
                    self.state.set_records(datasets.records);
                }
                Err(e) => {
                    tracing::error!(error = %e, "error loading the data");
                    self.load_error = Some(e);
                }
            }
        }
        self.on_state_change();
        &self.page
    }

    /// Render the page the first time both slots are present
    ///
    /// Returns `true` only for the call that actually rendered.
    pub fn on_state_change(&mut self) -> bool {
        if self.rendered {
            return false;
        }
        let Some((geometries, records)) = self.state.resolved() else {
            return false;
        };

        let rendered = render_map(geometries, records, &self.render);
        self.page.map = Some(rendered.map);
        self.page.legend = Some(rendered.legend);
        self.rendered = true;
        true
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    /// Page serialised with this controller's SVG settings
    pub fn to_html(&self) -> String {
        self.page.to_html(&self.render.svg)
    }

    pub fn into_page(self) -> Page {
        self.page
    }
}
