//! Map, legend and page renderers
//!
//! Rendering is split in two steps: [`map::render_map`] lays out county paths
//! and the legend as plain data, then the `svg` and `page` modules serialise
//! that data into markup.

pub mod config;
pub mod legend;
pub mod map;
pub mod page;
pub mod path;
pub mod svg;

pub use config::{LegendConfig, MapConfig, Margin, SvgConfig};
pub use legend::{render_legend, LegendView};
pub use map::{render_map, CountyPath, MapView, RenderedMap, FALLBACK_FILL};
pub use page::render_page;
pub use svg::{render_legend_svg, render_map_svg};
