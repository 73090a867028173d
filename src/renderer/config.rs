//! Configuration for map, legend and SVG output

use serde::Deserialize;

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    /// Whether to format output with indentation
    pub pretty_print: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self { pretty_print: true }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }
}

/// Map drawing surface
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: f64,
    pub height: f64,

    /// Decimal digits kept in path coordinates
    pub precision: u32,

    /// Radius of point geometries
    pub point_radius: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            precision: 3,
            point_radius: 4.5,
        }
    }
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the surface size in pixels
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of decimal digits in path data
    pub fn with_precision(mut self, digits: u32) -> Self {
        self.precision = digits;
        self
    }
}

/// Space around the legend content
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 20.0,
            left: 20.0,
        }
    }
}

/// Legend surface and its overlay position
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    /// Content width; the colour ramp spans all of it
    pub width: f64,
    /// Content height
    pub height: f64,
    pub margin: Margin,
    pub block_height: f64,
    /// Offset from the top of the page
    pub top: f64,
    /// Offset from the right of the page
    pub right: f64,
    /// Number of evenly spaced ticks before the appended maximum
    pub tick_count: usize,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 50.0,
            margin: Margin::default(),
            block_height: 10.0,
            top: 20.0,
            right: 20.0,
            tick_count: 8,
        }
    }
}

impl LegendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content size
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Vertical position of the axis inside the content area
    pub fn axis_y(&self) -> f64 {
        self.height - 40.0
    }
}
