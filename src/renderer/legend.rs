//! Legend: a horizontal colour ramp with percentage ticks

use crate::scale::{ColorScale, LinearScale};

use super::config::{LegendConfig, Margin};

/// One coloured block of the ramp
#[derive(Debug, Clone, PartialEq)]
pub struct LegendBlock {
    /// Domain value the block starts at
    pub start: f64,
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
}

/// One labelled axis tick
#[derive(Debug, Clone, PartialEq)]
pub struct LegendTick {
    pub value: f64,
    pub x: f64,
    pub label: String,
}

/// Laid-out legend, ready for SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct LegendView {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub top: f64,
    pub right: f64,
    pub axis_y: f64,
    pub blocks: Vec<LegendBlock>,
    pub ticks: Vec<LegendTick>,
}

impl LegendView {
    /// Surface size including margins
    pub fn outer_size(&self) -> (f64, f64) {
        (
            self.width + self.margin.left + self.margin.right,
            self.height + self.margin.top + self.margin.bottom,
        )
    }
}

/// `count` values stepping from `lo` towards `hi`, stopping short of `hi`
fn stepped(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    if count == 0 || hi <= lo {
        return vec![];
    }
    let step = (hi - lo) / count as f64;
    (0..count)
        .map(|i| lo + i as f64 * step)
        .filter(|v| *v < hi)
        .collect()
}

/// Tick values over `[lo, hi]`: `count` evenly spaced values below `hi`, then `hi`
///
/// A zero-width domain yields the single tick `hi`.
pub fn legend_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let mut ticks = stepped(lo, hi, count);
    ticks.push(hi);
    ticks
}

/// Tick label: the value rounded to a whole percentage
pub fn tick_label(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

/// Lay out the legend for `scale`
pub fn render_legend(scale: &ColorScale, config: &LegendConfig) -> LegendView {
    let (min, max) = scale.domain();
    let (lo, hi) = (min.ceil(), max.ceil());

    let ticks = legend_ticks(lo, hi, config.tick_count);
    let position = LinearScale::new((lo, hi), (0.0, config.width));

    let block_count = ticks.len().saturating_sub(1);
    let blocks = if block_count == 0 {
        vec![]
    } else {
        let block_width = config.width / block_count as f64;
        stepped(lo, hi, block_count)
            .into_iter()
            .map(|start| LegendBlock {
                start,
                x: position.apply(start),
                width: block_width,
                height: config.block_height,
                fill: scale.color(start).to_string(),
            })
            .collect()
    };

    tracing::debug!(
        lo,
        hi,
        ticks = ticks.len(),
        blocks = blocks.len(),
        "legend laid out"
    );

    LegendView {
        width: config.width,
        height: config.height,
        margin: config.margin,
        top: config.top,
        right: config.right,
        axis_y: config.axis_y(),
        ticks: ticks
            .into_iter()
            .map(|value| LegendTick {
                value,
                x: position.apply(value),
                label: tick_label(value),
            })
            .collect(),
        blocks,
    }
}
