//! Geographic path generation
//!
//! Converts geo-types geometries into SVG path `d` strings. No projection is
//! applied: planar coordinates are plotted as screen positions.

use geo_types::{Coord, Geometry, LineString, Polygon};

/// Decimal digits beyond what an `f64` can represent
pub const MAX_PRECISION: u32 = 15;

/// A segment in a resolved path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Coord<f64>),
    /// Straight line to point
    LineTo(Coord<f64>),
    /// Full circle around a point geometry
    Circle { center: Coord<f64>, radius: f64 },
    /// Close the current ring
    Close,
}

/// A resolved path ready for SVG rendering
#[derive(Debug, Default)]
pub struct ResolvedPath {
    pub segments: Vec<PathSegment>,
}

impl ResolvedPath {
    /// Convert to SVG path `d` attribute string, rounding to `digits` decimals
    pub fn to_svg_d(&self, digits: u32) -> String {
        let mut d = String::new();
        let n = |v: f64| format_number(v, digits);

        for seg in &self.segments {
            match seg {
                PathSegment::MoveTo(p) => {
                    d.push_str(&format!("M{},{}", n(p.x), n(p.y)));
                }
                PathSegment::LineTo(p) => {
                    d.push_str(&format!("L{},{}", n(p.x), n(p.y)));
                }
                PathSegment::Circle { center, radius } => {
                    let r = n(*radius);
                    // Two half-circle arcs starting below the centre
                    d.push_str(&format!(
                        "M{},{}m0,{r}a{r},{r} 0 1,1 0,{}a{r},{r} 0 1,1 0,{}z",
                        n(center.x),
                        n(center.y),
                        n(-2.0 * radius),
                        n(2.0 * radius),
                    ));
                }
                PathSegment::Close => d.push('Z'),
            }
        }

        d
    }
}

/// Builds path data for geometries with an identity projection
#[derive(Debug, Clone, Copy)]
pub struct PathGenerator {
    digits: u32,
    point_radius: f64,
}

impl Default for PathGenerator {
    fn default() -> Self {
        Self {
            digits: 3,
            point_radius: 4.5,
        }
    }
}

impl PathGenerator {
    pub fn new(digits: u32, point_radius: f64) -> Self {
        Self {
            digits,
            point_radius,
        }
    }

    /// SVG path data for `geometry`; empty when there is nothing to draw
    pub fn path(&self, geometry: &Geometry<f64>) -> String {
        let mut path = ResolvedPath::default();
        self.resolve(geometry, &mut path);
        path.to_svg_d(self.digits)
    }

    fn resolve(&self, geometry: &Geometry<f64>, path: &mut ResolvedPath) {
        match geometry {
            Geometry::Point(p) => self.point(p.0, path),
            Geometry::MultiPoint(mp) => {
                for p in &mp.0 {
                    self.point(p.0, path);
                }
            }
            Geometry::Line(line) => {
                line_segments(&[line.start, line.end], path);
            }
            Geometry::LineString(ls) => line_segments(&ls.0, path),
            Geometry::MultiLineString(mls) => {
                for ls in &mls.0 {
                    line_segments(&ls.0, path);
                }
            }
            Geometry::Polygon(polygon) => polygon_segments(polygon, path),
            Geometry::MultiPolygon(mp) => {
                for polygon in &mp.0 {
                    polygon_segments(polygon, path);
                }
            }
            Geometry::Rect(rect) => polygon_segments(&rect.to_polygon(), path),
            Geometry::Triangle(triangle) => polygon_segments(&triangle.to_polygon(), path),
            Geometry::GeometryCollection(collection) => {
                for member in &collection.0 {
                    self.resolve(member, path);
                }
            }
        }
    }

    fn point(&self, center: Coord<f64>, path: &mut ResolvedPath) {
        path.segments.push(PathSegment::Circle {
            center,
            radius: self.point_radius,
        });
    }
}

fn line_segments(coords: &[Coord<f64>], path: &mut ResolvedPath) {
    let mut iter = coords.iter();
    if let Some(first) = iter.next() {
        path.segments.push(PathSegment::MoveTo(*first));
        path.segments.extend(iter.map(|c| PathSegment::LineTo(*c)));
    }
}

fn polygon_segments(polygon: &Polygon<f64>, path: &mut ResolvedPath) {
    ring_segments(polygon.exterior(), path);
    for interior in polygon.interiors() {
        ring_segments(interior, path);
    }
}

/// A closed ring: the repeated closing coordinate is replaced by `Z`
fn ring_segments(ring: &LineString<f64>, path: &mut ResolvedPath) {
    let coords = &ring.0;
    if coords.is_empty() {
        return;
    }
    let open = match coords.split_last() {
        Some((last, rest)) if !rest.is_empty() && *last == coords[0] => rest,
        _ => coords.as_slice(),
    };
    line_segments(open, path);
    path.segments.push(PathSegment::Close);
}

/// Round to `digits` decimals and print without trailing zeros
pub fn format_number(value: f64, digits: u32) -> String {
    let factor = 10f64.powi(digits.min(MAX_PRECISION) as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        // Avoid printing "-0"
        return "0".to_string();
    }
    rounded.to_string()
}
