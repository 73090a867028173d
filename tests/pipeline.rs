//! End-to-end tests: in-memory sources through the view controller to HTML

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use county_choropleth::interaction::{Stroke, Tooltip};
use county_choropleth::scale::YL_OR_RD_9;
use county_choropleth::{
    AppConfig, Fetch, FetchResponse, LoadError, Sources, ViewController, FALLBACK_FILL,
};

const TOPOLOGY: &str = r#"{
    "type": "Topology",
    "transform": { "scale": [1, 1], "translate": [0, 0] },
    "arcs": [
        [[0, 0], [10, 0], [0, 10], [-10, 0], [0, -10]],
        [[10, 0], [10, 0], [0, 10], [-10, 0], [0, -10]]
    ],
    "objects": {
        "counties": {
            "type": "GeometryCollection",
            "geometries": [
                { "type": "Polygon", "id": "01001", "arcs": [[0]] },
                { "type": "Polygon", "id": "01003", "arcs": [[1]] }
            ]
        }
    }
}"#;

const EDUCATION: &str = r#"[
    { "fips": "01001", "state": "AL", "area_name": "A", "bachelorsOrHigher": 20 },
    { "fips": "01005", "state": "AL", "area_name": "B", "bachelorsOrHigher": 40 }
]"#;

/// Serves fixed responses by source name and counts requests
#[derive(Default)]
struct MemoryFetcher {
    responses: HashMap<String, FetchResponse>,
    requests: AtomicUsize,
}

impl MemoryFetcher {
    fn with(mut self, source: &str, response: FetchResponse) -> Self {
        self.responses.insert(source.to_string(), response);
        self
    }

    fn standard() -> Self {
        Self::default()
            .with("topology", FetchResponse::ok(TOPOLOGY))
            .with("education", FetchResponse::ok(EDUCATION))
    }

    fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetch for MemoryFetcher {
    async fn fetch(&self, source: &str) -> Result<FetchResponse, LoadError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .responses
            .get(source)
            .cloned()
            .unwrap_or_else(|| FetchResponse::new(404, "")))
    }
}

fn config() -> AppConfig {
    AppConfig {
        sources: Sources::new("topology", "education"),
        ..AppConfig::default()
    }
}

/// Contents of the `<div id="...">` region, up to its closing tag
fn region<'a>(html: &'a str, id: &str) -> &'a str {
    let open = format!(r#"<div id="{}">"#, id);
    let start = html.find(&open).map(|i| i + open.len()).unwrap_or(html.len());
    let end = html[start..].find("</div>").map_or(html.len(), |i| start + i);
    &html[start..end]
}

#[tokio::test]
async fn test_matched_and_unmatched_counties() {
    let mut controller = ViewController::new(MemoryFetcher::standard(), &config());
    let page = controller.mount().await;

    let map = page.map.as_ref().expect("map rendered");
    assert_eq!(map.counties.len(), 2);

    let matched = &map.counties[0];
    assert_eq!(matched.fips.as_ref().map(|f| f.as_str()), Some("01001"));
    assert_eq!(matched.education, Some(20.0));
    assert_eq!(matched.fill, YL_OR_RD_9[0]);
    assert_eq!(matched.d, "M0,0L10,0L10,10L0,10Z");

    let unmatched = &map.counties[1];
    assert_eq!(unmatched.fips, None);
    assert_eq!(unmatched.education, None);
    assert_eq!(unmatched.fill, FALLBACK_FILL);
    assert_eq!(unmatched.d, "M10,0L20,0L20,10L10,10Z");

    let html = controller.to_html();
    let map_html = region(&html, "map");
    assert!(map_html.contains(r#"data-fips="01001" data-education="20""#));
    assert!(map_html.contains(r##"class="county" fill="#ccc""##));
    assert_eq!(map_html.matches("data-education").count(), 1);
}

#[tokio::test]
async fn test_legend_from_loaded_records() {
    let mut controller = ViewController::new(MemoryFetcher::standard(), &config());
    let page = controller.mount().await;

    let legend = page.legend.as_ref().expect("legend rendered");
    let labels: Vec<&str> = legend.ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["20%", "23%", "25%", "28%", "30%", "33%", "35%", "38%", "40%"]
    );
    assert_eq!(legend.blocks.len(), 8);
    assert_eq!(legend.blocks[0].width, 50.0);
    assert_eq!(legend.blocks[0].fill, YL_OR_RD_9[0]);
    assert_eq!(legend.axis_y, 10.0);

    let html = controller.to_html();
    let legend_html = region(&html, "legend");
    assert!(legend_html.contains("position: absolute; top: 20px; right: 20px"));
    assert_eq!(legend_html.matches("<rect").count(), 8);
}

#[tokio::test]
async fn test_failed_status_leaves_page_empty() {
    for failing in ["topology", "education"] {
        let fetcher = MemoryFetcher::standard().with(failing, FetchResponse::new(500, ""));
        let mut controller = ViewController::new(fetcher, &config());
        let page = controller.mount().await;

        assert_eq!(page.county_count(), 0);
        assert_eq!(page.legend_block_count(), 0);
        assert!(!controller.is_rendered());
        assert!(controller.load_error().is_some_and(LoadError::is_status));

        let html = controller.to_html();
        assert!(!region(&html, "map").contains("<path"));
        assert!(!region(&html, "legend").contains("<rect"));
        assert!(!html.contains("county-data"));
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let fetcher = MemoryFetcher::standard().with("education", FetchResponse::ok("{ nope"));
    let mut controller = ViewController::new(fetcher, &config());
    controller.mount().await;

    assert!(matches!(
        controller.load_error(),
        Some(LoadError::Decode { url, .. }) if url == "education"
    ));
    assert_eq!(controller.page().county_count(), 0);
}

#[tokio::test]
async fn test_mount_loads_and_renders_once() {
    let mut controller = ViewController::new(MemoryFetcher::standard(), &config());
    controller.mount().await;
    let first = controller.page().clone();

    controller.mount().await;
    assert!(!controller.on_state_change());
    assert_eq!(controller.page(), &first);
    assert!(controller.is_rendered());
    assert!(controller.state().is_resolved());
}

#[tokio::test]
async fn test_mount_fetches_each_source_once() {
    let mut controller = ViewController::new(MemoryFetcher::standard(), &config());
    controller.mount().await;
    controller.mount().await;
    assert_eq!(controller.fetcher().requests(), 2);

    let page = controller.into_page();
    assert_eq!(page.county_count(), 2);
}

#[tokio::test]
async fn test_hover_cycle_on_rendered_county() {
    let mut controller = ViewController::new(MemoryFetcher::standard(), &config());
    controller.mount().await;

    let page = controller.page_mut();
    let mut tooltip = Tooltip::new();
    let map = page.map.as_mut().expect("map rendered");

    let county = &mut map.counties[0];
    tooltip.pointer_enter(county);
    tooltip.pointer_move(county, 100.0, 200.0);
    assert_eq!(tooltip.education, Some(20.0));
    assert_eq!(
        tooltip.html.as_deref(),
        Some("<strong>A</strong><br>Bachelor's Degree: 20%<br>State: AL")
    );
    assert_eq!(tooltip.left, Some(120.0));
    assert_eq!(tooltip.top, Some(170.0));
    assert_eq!(county.stroke, Stroke::hovered());

    tooltip.pointer_leave(county);
    assert!(!tooltip.visible);
    assert_eq!(county.stroke.width, 0.5);

    // Unmatched county keeps the previous content
    let unmatched = &mut map.counties[1];
    tooltip.pointer_enter(unmatched);
    assert_eq!(tooltip.education, Some(20.0));
}

#[tokio::test]
async fn test_page_regions_and_script() {
    let mut controller = ViewController::new(MemoryFetcher::standard(), &config());
    controller.mount().await;
    let html = controller.to_html();

    for id in ["container", "title", "description", "map", "legend", "tooltip"] {
        assert!(html.contains(&format!(r#"id="{}""#, id)), "missing #{}", id);
    }
    assert!(html.contains(r#"<script type="application/json" id="county-data">"#));
    assert!(html.contains(r#""01001":{"html":"<strong>A<\/strong>"#));
    assert!(!html.contains(r#""01003""#));
}
