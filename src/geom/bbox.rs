use std::sync::OnceLock;

use crate::geom::algorithm::{on_segment, rings_contain, segments_intersect};
use crate::geom::{Feature, Geometry, Position, Ring};

/// Longitude used for the inner edges of the two halves of a wrapping box.
const ANTIMERIDIAN_EDGE: f64 = 179.99999;

/// Axis-aligned extent in (x_min, y_min, x_max, y_max) = (lon, lat, lon, lat)
/// order. `x_min > x_max` denotes a box that wraps across the antimeridian.
#[derive(Debug, Clone, Default)]
pub struct BoundingBox {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,

    /// Non-wrapping parts of this box; built on first access and cleared by
    /// every setter.
    split: OnceLock<Vec<BoundingBox>>,
}

impl PartialEq for BoundingBox {
    fn eq(&self, other: &Self) -> bool { self.bounds() == other.bounds() }
}

impl BoundingBox {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self { x_min, y_min, x_max, y_max, split: OnceLock::new() }
    }

    /// Tight non-wrapping box around `positions`, skipping empty (NaN) ones.
    pub fn from_positions<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Option<Self> {
        positions.into_iter()
            .filter(|p| !p.is_empty())
            .fold(None, |acc: Option<[f64; 4]>, p| Some(match acc {
                None => [p.longitude, p.latitude, p.longitude, p.latitude],
                Some([x0, y0, x1, y1]) => [
                    x0.min(p.longitude),
                    y0.min(p.latitude),
                    x1.max(p.longitude),
                    y1.max(p.latitude),
                ],
            }))
            .map(|[x0, y0, x1, y1]| Self::new(x0, y0, x1, y1))
    }

    /// Bounding box of a geometry, or `None` if it has no positions.
    #[inline]
    pub fn of(geometry: &Geometry) -> Option<Self> { Self::from_positions(geometry.positions()) }

    #[inline] pub fn x_min(&self) -> f64 { self.x_min }
    #[inline] pub fn y_min(&self) -> f64 { self.y_min }
    #[inline] pub fn x_max(&self) -> f64 { self.x_max }
    #[inline] pub fn y_max(&self) -> f64 { self.y_max }

    /// All four bounds in (x_min, y_min, x_max, y_max) order.
    #[inline] pub fn bounds(&self) -> [f64; 4] { [self.x_min, self.y_min, self.x_max, self.y_max] }

    #[inline] pub fn is_wrapping(&self) -> bool { self.x_min > self.x_max }

    pub fn set_x_min(&mut self, value: f64) { self.x_min = value; self.invalidate(); }
    pub fn set_y_min(&mut self, value: f64) { self.y_min = value; self.invalidate(); }
    pub fn set_x_max(&mut self, value: f64) { self.x_max = value; self.invalidate(); }
    pub fn set_y_max(&mut self, value: f64) { self.y_max = value; self.invalidate(); }

    /// Replace all four bounds at once.
    pub fn set(&mut self, x_min: f64, y_min: f64, x_max: f64, y_max: f64) {
        (self.x_min, self.y_min, self.x_max, self.y_max) = (x_min, y_min, x_max, y_max);
        self.invalidate();
    }

    #[inline]
    fn invalidate(&mut self) { self.split.take(); }

    /// Longitudinal extent in degrees, measured eastward across the
    /// antimeridian for wrapping boxes.
    pub fn width(&self) -> f64 {
        if self.is_wrapping() { self.x_max - self.x_min + 360.0 } else { self.x_max - self.x_min }
    }

    #[inline] pub fn height(&self) -> f64 { self.y_max - self.y_min }

    /// Area in square degrees.
    #[inline] pub fn area(&self) -> f64 { self.width() * self.height() }

    /// Center position, normalized to [-180, 180] for wrapping boxes.
    pub fn center(&self) -> Position {
        let mut lon = self.x_min + self.width() / 2.0;
        if lon > 180.0 { lon -= 360.0 }
        Position::new(lon, (self.y_min + self.y_max) / 2.0)
    }

    /// Split into non-wrapping parts: `[self]` unless the box crosses the
    /// antimeridian, in which case an eastern part ending at 179.99999 and a
    /// western part starting at -179.99999. The result is cached.
    pub fn split_along_antimeridian(&self) -> &[BoundingBox] {
        self.split.get_or_init(|| {
            if !self.is_wrapping() {
                vec![Self::new(self.x_min, self.y_min, self.x_max, self.y_max)]
            } else {
                vec![
                    Self::new(self.x_min, self.y_min, ANTIMERIDIAN_EDGE, self.y_max),
                    Self::new(-ANTIMERIDIAN_EDGE, self.y_min, self.x_max, self.y_max),
                ]
            }
        })
    }

    /// AABB overlap test across every pair of non-wrapping parts.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.split_along_antimeridian().iter().any(|this| {
            other.split_along_antimeridian().iter().any(|that| {
                that.x_max >= this.x_min
                    && that.x_min <= this.x_max
                    && that.y_max >= this.y_min
                    && that.y_min <= this.y_max
            })
        })
    }

    /// Inclusive containment of a single position.
    pub fn contains_position(&self, position: &Position) -> bool {
        self.split_along_antimeridian().iter().any(|part| part.part_contains(position))
    }

    /// True if any part of the feature's geometry lies inside this box.
    #[inline]
    pub fn contains_feature(&self, feature: &Feature) -> bool { self.contains_geometry(&feature.geometry) }

    /// True if any part of `geometry` lies inside this box.
    pub fn contains_geometry(&self, geometry: &Geometry) -> bool {
        self.split_along_antimeridian().iter().any(|part| part.part_contains_geometry(geometry))
    }

    // -----------------------------------------------------------------------
    // Per-part tests (only called on non-wrapping parts)
    // -----------------------------------------------------------------------

    #[inline]
    fn part_contains(&self, p: &Position) -> bool {
        p.longitude >= self.x_min && p.longitude <= self.x_max && p.latitude >= self.y_min && p.latitude <= self.y_max
    }

    fn corners(&self) -> [Position; 4] {
        [
            Position::new(self.x_min, self.y_min),
            Position::new(self.x_min, self.y_max),
            Position::new(self.x_max, self.y_max),
            Position::new(self.x_max, self.y_min),
        ]
    }

    fn part_crosses_segment(&self, a: &Position, b: &Position) -> bool {
        let corners = self.corners();
        (0..4).any(|i| {
            let (c, d) = (&corners[i], &corners[(i + 1) % 4]);
            segments_intersect(a, b, c, d) || on_segment(c, a, b)
        })
    }

    fn part_touches_path(&self, path: &[Position]) -> bool {
        path.iter().any(|p| self.part_contains(p))
            || path.windows(2).any(|w| self.part_crosses_segment(&w[0], &w[1]))
    }

    fn part_touches_rings(&self, rings: &[Ring]) -> bool {
        rings.first().is_some_and(|exterior| {
            let closed = exterior.iter().chain(exterior.first());
            self.part_touches_path(&closed.copied().collect::<Vec<_>>())
                || self.corners().iter().any(|c| rings_contain(rings.iter().map(|r| r.as_slice()), c))
        })
    }

    fn part_contains_geometry(&self, geometry: &Geometry) -> bool {
        match geometry {
            Geometry::Point(point) => self.part_contains(point.position()),
            Geometry::MultiPoint(points) => points.positions().iter().any(|p| self.part_contains(p)),
            Geometry::LineString(line) => self.part_touches_path(line.positions()),
            Geometry::MultiLineString(lines) => lines.lines().iter().any(|l| self.part_touches_path(l.positions())),
            Geometry::Polygon(polygon) => self.part_touches_rings(polygon.rings()),
            Geometry::MultiPolygon(polygons) => polygons.polygons().iter().any(|p| self.part_touches_rings(p.rings())),
            Geometry::GeometryCollection(collection) => {
                collection.geometries().iter().any(|g| self.part_contains_geometry(g))
            }
        }
    }
}
