//! HTML page assembly
//!
//! Produces the document skeleton with the fixed region ids (`container`,
//! `title`, `description`, `map`, `legend`, `tooltip`), filling the map and
//! legend regions only once they have been rendered.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::interaction::{escape_html, hover_script};
use crate::view::Page;

use super::config::SvgConfig;
use super::map::MapView;
use super::svg::{render_legend_svg, render_map_svg};

const PAGE_STYLE: &str = r#"body { font-family: sans-serif; margin: 20px; }
#container { position: relative; }
#title { margin: 0 0 8px; }
#description { margin-bottom: 16px; color: #444; }
#tooltip { position: absolute; display: none; padding: 6px 8px; background: rgba(255, 255, 255, 0.95); border: 1px solid #999; border-radius: 4px; font-size: 12px; line-height: 1.4; pointer-events: none; }"#;

#[derive(Serialize)]
struct TooltipEntry<'a> {
    html: &'a str,
    education: f64,
}

/// Tooltip content for every matched county, keyed by FIPS
fn county_data(map: Option<&MapView>) -> String {
    let entries: BTreeMap<&str, TooltipEntry> = map
        .into_iter()
        .flat_map(|m| m.counties.iter())
        .filter_map(|county| {
            let fips = county.fips.as_ref()?;
            Some((
                fips.as_str(),
                TooltipEntry {
                    html: county.tooltip.as_deref()?,
                    education: county.education?,
                },
            ))
        })
        .collect();
    let json = serde_json::to_string(&entries).unwrap_or_else(|_| "{}".to_string());
    // Keep "</strong>" and friends from closing the script element
    json.replace("</", "<\\/")
}

/// Render the full HTML document for `page`
pub fn render_page(page: &Page, config: &SvgConfig) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&page.title)));
    html.push_str(&format!("<style>\n{}\n</style>\n", PAGE_STYLE));
    html.push_str("</head>\n<body>\n<div id=\"container\">\n");
    html.push_str(&format!(
        "<h1 id=\"title\">{}</h1>\n",
        escape_html(&page.title)
    ));
    html.push_str(&format!(
        "<div id=\"description\">{}</div>\n",
        escape_html(&page.description)
    ));

    html.push_str("<div id=\"map\">");
    if let Some(map) = &page.map {
        html.push('\n');
        html.push_str(&render_map_svg(map, config));
        html.push('\n');
    }
    html.push_str("</div>\n");

    html.push_str("<div id=\"legend\">");
    if let Some(legend) = &page.legend {
        html.push('\n');
        html.push_str(&render_legend_svg(legend, config));
        html.push('\n');
    }
    html.push_str("</div>\n");

    let tooltip = &page.tooltip;
    let mut tooltip_attrs = String::new();
    if let Some(education) = tooltip.education {
        tooltip_attrs.push_str(&format!(" data-education=\"{}\"", education));
    }
    if let Some(style) = tooltip.style() {
        tooltip_attrs.push_str(&format!(" style=\"{}\"", escape_html(&style)));
    }
    html.push_str(&format!(
        "<div id=\"tooltip\"{}>{}</div>\n",
        tooltip_attrs,
        tooltip.html.as_deref().unwrap_or_default()
    ));
    html.push_str("</div>\n");

    if page.map.is_some() {
        html.push_str(&format!(
            "<script type=\"application/json\" id=\"county-data\">{}</script>\n",
            county_data(page.map.as_ref())
        ));
        html.push_str(&format!("<script>\n{}\n</script>\n", hover_script()));
    }

    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CountyId;
    use crate::interaction::Stroke;
    use crate::renderer::map::CountyPath;

    #[test]
    fn test_county_data_escapes_closing_tags() {
        let map = MapView {
            width: 10.0,
            height: 10.0,
            counties: vec![
                CountyPath {
                    d: String::new(),
                    fips: Some(CountyId::from("01001")),
                    education: Some(20.0),
                    fill: "#fff".to_string(),
                    stroke: Stroke::resting(),
                    tooltip: Some("<strong>A</strong>".to_string()),
                },
                CountyPath {
                    d: String::new(),
                    fips: None,
                    education: None,
                    fill: "#ccc".to_string(),
                    stroke: Stroke::resting(),
                    tooltip: None,
                },
            ],
        };
        let json = county_data(Some(&map));
        assert_eq!(
            json,
            r#"{"01001":{"html":"<strong>A<\/strong>","education":20.0}}"#
        );
    }

    #[test]
    fn test_county_data_without_map() {
        assert_eq!(county_data(None), "{}");
    }

    fn matched_page() -> Page {
        let mut page = Page::default();
        page.map = Some(MapView {
            width: 10.0,
            height: 10.0,
            counties: vec![CountyPath {
                d: "M0,0L1,0L1,1Z".to_string(),
                fips: Some(CountyId::from("01001")),
                education: Some(20.5),
                fill: "#fed976".to_string(),
                stroke: Stroke::resting(),
                tooltip: Some("<strong>A</strong>".to_string()),
            }],
        });
        page
    }

    #[test]
    fn test_script_hooks_match_markup() {
        let html = render_page(&matched_page(), &SvgConfig::default());
        let script = hover_script();

        // Selector and lookup key
        assert!(script.contains(r##""#map path.county""##));
        assert!(html.contains(r#"<div id="map">"#));
        assert!(html.contains(r#"class="county" data-fips="01001""#));
        assert!(script.contains(r#"getAttribute("data-fips")"#));

        // Data island and tooltip target
        assert!(script.contains(r#"getElementById("county-data")"#));
        assert!(html.contains(
            r#"<script type="application/json" id="county-data">{"01001":{"html":"<strong>A<\/strong>","education":20.5}}</script>"#
        ));
        assert!(script.contains(r#"getElementById("tooltip")"#));
        assert!(html.contains(r#"<div id="tooltip"></div>"#));
        assert!(html.contains(&script));
    }

    #[test]
    fn test_tooltip_state_is_rendered() {
        let mut page = matched_page();
        let mut tooltip = page.tooltip.clone();
        if let Some(map) = page.map.as_mut() {
            let county = &mut map.counties[0];
            tooltip.pointer_enter(county);
            tooltip.pointer_move(county, 100.0, 200.0);
        }
        page.tooltip = tooltip;

        let html = render_page(&page, &SvgConfig::default());
        assert!(html.contains(
            r#"<div id="tooltip" data-education="20.5" style="top: 170px; left: 120px; display: block"><strong>A</strong></div>"#
        ));
        assert!(html.contains(r#"stroke="black" stroke-width="1""#));
    }
}
