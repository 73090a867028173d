//! Colour and position scales shared by the map and the legend

use crate::data::EducationRecord;

/// Nine-class yellow-orange-red sequential scheme
pub const YL_OR_RD_9: [&str; 9] = [
    "#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#bd0026",
    "#800026",
];

/// Quantize scale: splits a numeric domain into equal-width colour buckets
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    domain: (f64, f64),
    colors: Vec<String>,
    thresholds: Vec<f64>,
}

impl ColorScale {
    /// Build a scale over `[lo, hi]` with one bucket per colour
    pub fn new<S: AsRef<str>>(lo: f64, hi: f64, colors: &[S]) -> Self {
        let colors: Vec<String> = colors.iter().map(|c| c.as_ref().to_string()).collect();
        let n = colors.len().saturating_sub(1);
        let thresholds = (0..n)
            .map(|i| {
                let i = i as f64;
                let n = n as f64;
                ((i + 1.0) * hi - (i - n) * lo) / (n + 1.0)
            })
            .collect();
        Self {
            domain: (lo, hi),
            colors,
            thresholds,
        }
    }

    /// Scale over the min/max education percentage of `records`
    ///
    /// An empty record list gives the domain `[0, 0]`.
    pub fn from_records(records: &[EducationRecord]) -> Self {
        let (lo, hi) = records
            .iter()
            .map(|r| r.bachelors_or_higher)
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
            .unwrap_or((0.0, 0.0));
        Self::new(lo, hi, &YL_OR_RD_9)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn bucket_count(&self) -> usize {
        self.colors.len()
    }

    /// Index of the bucket holding `value`; out-of-domain values clamp
    pub fn bucket(&self, value: f64) -> usize {
        self.thresholds.partition_point(|t| *t <= value)
    }

    pub fn color(&self, value: f64) -> &str {
        self.colors
            .get(self.bucket(value))
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Linear mapping from a numeric domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map `value` into the range; a zero-width domain maps to the range midpoint
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 {
            0.5
        } else {
            (value - d0) / span
        };
        r0 + t * (r1 - r0)
    }
}
