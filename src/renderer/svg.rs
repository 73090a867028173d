//! SVG generation for the map and legend surfaces

use super::config::SvgConfig;
use super::legend::LegendView;
use super::map::MapView;

/// An attribute name and its unescaped value
pub type Attr<'a> = (&'a str, String);

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    attributes: Vec<(String, String)>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            attributes: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add an attribute to the root `<svg>` element
    pub fn add_root_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.push((name.to_string(), value.into()));
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a path element; an empty `d` omits the attribute
    pub fn add_path(&mut self, d: &str, attrs: &[Attr]) {
        let d_attr = if d.is_empty() {
            String::new()
        } else {
            format!(r#" d="{}""#, escape_xml(d))
        };
        self.elements.push(format!(
            "{}<path{}{}/>",
            self.indent_str(),
            d_attr,
            format_attrs(attrs)
        ));
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, x: f64, y: f64, w: f64, h: f64, attrs: &[Attr]) {
        self.elements.push(format!(
            r#"{}<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            x,
            y,
            w,
            h,
            format_attrs(attrs)
        ));
    }

    /// Add a line element
    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, attrs: &[Attr]) {
        self.elements.push(format!(
            r#"{}<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            self.indent_str(),
            x1,
            y1,
            x2,
            y2,
            format_attrs(attrs)
        ));
    }

    /// Add a text element
    pub fn add_text(&mut self, text: &str, x: f64, y: f64, attrs: &[Attr]) {
        self.elements.push(format!(
            r#"{}<text x="{}" y="{}"{}>{}</text>"#,
            self.indent_str(),
            x,
            y,
            format_attrs(attrs),
            escape_xml(text)
        ));
    }

    /// Open a group element
    pub fn start_group(&mut self, attrs: &[Attr]) {
        self.elements
            .push(format!("{}<g{}>", self.indent_str(), format_attrs(attrs)));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string for a surface of the given pixel size
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();

        let root_attrs: String = self
            .attributes
            .iter()
            .map(|(name, value)| format!(r#" {}="{}""#, name, escape_xml(value)))
            .collect();

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}"{}>"#,
            width, height, root_attrs
        );
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render the map surface: one `path.county` per geometry
pub fn render_map_svg(map: &MapView, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());

    for county in &map.counties {
        let mut attrs: Vec<Attr> = vec![("class", "county".to_string())];
        if let Some(fips) = &county.fips {
            attrs.push(("data-fips", fips.to_string()));
        }
        if let Some(education) = county.education {
            attrs.push(("data-education", education.to_string()));
        }
        attrs.push(("fill", county.fill.clone()));
        attrs.push(("stroke", county.stroke.color.clone()));
        attrs.push(("stroke-width", county.stroke.width.to_string()));
        builder.add_path(&county.d, &attrs);
    }

    builder.build(map.width, map.height)
}

/// Render the legend surface: colour blocks above a bottom axis
pub fn render_legend_svg(legend: &LegendView, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_root_attribute(
        "style",
        format!(
            "position: absolute; top: {}px; right: {}px",
            legend.top, legend.right
        ),
    );

    builder.start_group(&[(
        "transform",
        format!("translate({}, {})", legend.margin.left, legend.margin.top),
    )]);

    builder.start_group(&[("class", "legend-blocks".to_string())]);
    for block in &legend.blocks {
        builder.add_rect(
            block.x,
            0.0,
            block.width,
            block.height,
            &[("fill", block.fill.clone())],
        );
    }
    builder.end_group();

    builder.start_group(&[
        ("class", "axis".to_string()),
        ("transform", format!("translate(0, {})", legend.axis_y)),
        ("fill", "none".to_string()),
        ("font-size", "10".to_string()),
        ("font-family", "sans-serif".to_string()),
        ("text-anchor", "middle".to_string()),
    ]);
    builder.add_path(
        &format!("M0,6V0H{}V6", legend.width),
        &[
            ("class", "domain".to_string()),
            ("stroke", "currentColor".to_string()),
        ],
    );
    for tick in &legend.ticks {
        builder.start_group(&[
            ("class", "tick".to_string()),
            ("transform", format!("translate({}, 0)", tick.x)),
        ]);
        builder.add_line(0.0, 0.0, 0.0, 6.0, &[("stroke", "currentColor".to_string())]);
        builder.add_text(
            &tick.label,
            0.0,
            9.0,
            &[
                ("fill", "currentColor".to_string()),
                ("dy", "0.71em".to_string()),
            ],
        );
        builder.end_group();
    }
    builder.end_group();

    builder.end_group();

    let (width, height) = legend.outer_size();
    builder.build(width, height)
}

fn format_attrs(attrs: &[Attr]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(r#" {}="{}""#, name, escape_xml(value)))
        .collect()
}

/// Escape special XML characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
