//! Intersection, containment and measurement per geometry variant.
//!
//! Nothing here fails: empty or NaN input yields `false` or `0.0`.

use crate::geom::algorithm::{
    finite_or_zero, on_segment, path_length, ring_area, ring_edges, ring_perimeter, rings_contain,
    segments_intersect, signed_planar_area,
};
use crate::geom::{
    BoundingBox, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon, Position, Ring,
};

/// A geometry broken into the primitive shapes the pairwise tests operate on.
enum Part<'a> {
    Point(&'a Position),
    Path(&'a [Position]),
    /// Ring set evaluated with the accumulate-and-flip parity rule. A
    /// multipolygon contributes a single part holding all of its rings.
    Area(Vec<&'a [Position]>),
}

fn parts(geometry: &Geometry) -> Vec<Part<'_>> {
    let mut out = Vec::new();
    collect_parts(geometry, &mut out);
    out
}

fn collect_parts<'a>(geometry: &'a Geometry, out: &mut Vec<Part<'a>>) {
    match geometry {
        Geometry::Point(point) => {
            if !point.is_empty() { out.push(Part::Point(point.position())) }
        }
        Geometry::MultiPoint(points) => out.extend(points.positions().iter().map(Part::Point)),
        Geometry::LineString(line) => out.push(Part::Path(line.positions())),
        Geometry::MultiLineString(lines) => out.extend(lines.lines().iter().map(|l| Part::Path(l.positions()))),
        Geometry::Polygon(polygon) => out.push(Part::Area(ring_slices(polygon.rings()))),
        Geometry::MultiPolygon(polygons) => out.push(Part::Area(
            polygons.polygons().iter().flat_map(|p| p.rings().iter().map(|r| r.as_slice())).collect(),
        )),
        Geometry::GeometryCollection(collection) => {
            for member in collection.geometries() { collect_parts(member, out) }
        }
    }
}

#[inline]
fn ring_slices(rings: &[Ring]) -> Vec<&[Position]> { rings.iter().map(|r| r.as_slice()).collect() }

#[inline]
fn same_xy(a: &Position, b: &Position) -> bool { a.longitude == b.longitude && a.latitude == b.latitude }

fn path_touches_point(path: &[Position], p: &Position) -> bool {
    match path {
        [] => false,
        [only] => same_xy(only, p),
        _ => path.windows(2).any(|w| on_segment(p, &w[0], &w[1])),
    }
}

fn paths_cross(a: &[Position], b: &[Position]) -> bool {
    a.windows(2).any(|s| b.windows(2).any(|t| segments_intersect(&s[0], &s[1], &t[0], &t[1])))
}

fn path_crosses_rings(path: &[Position], rings: &[&[Position]]) -> bool {
    path.windows(2).any(|s| {
        rings.iter().any(|ring| ring_edges(ring).any(|(c, d)| segments_intersect(&s[0], &s[1], c, d)))
    })
}

fn path_intersects_area(path: &[Position], rings: &[&[Position]]) -> bool {
    path.iter().any(|p| rings_contain(rings.iter().copied(), p)) || path_crosses_rings(path, rings)
}

fn areas_intersect(a: &[&[Position]], b: &[&[Position]]) -> bool {
    let any_vertex_inside = |from: &[&[Position]], into: &[&[Position]]| {
        from.first().is_some_and(|exterior| exterior.iter().any(|p| rings_contain(into.iter().copied(), p)))
    };
    any_vertex_inside(a, b)
        || any_vertex_inside(b, a)
        || a.iter().any(|ring| {
            ring_edges(ring).any(|(p, q)| {
                b.iter().any(|other| ring_edges(other).any(|(r, s)| segments_intersect(p, q, r, s)))
            })
        })
}

fn parts_intersect(a: &Part<'_>, b: &Part<'_>) -> bool {
    match (a, b) {
        (Part::Point(p), Part::Point(q)) => same_xy(p, q),
        (Part::Point(p), Part::Path(path)) | (Part::Path(path), Part::Point(p)) => path_touches_point(path, p),
        (Part::Point(p), Part::Area(rings)) | (Part::Area(rings), Part::Point(p)) => {
            rings_contain(rings.iter().copied(), p)
        }
        (Part::Path(s), Part::Path(t)) => paths_cross(s, t),
        (Part::Path(path), Part::Area(rings)) | (Part::Area(rings), Part::Path(path)) => {
            path_intersects_area(path, rings)
        }
        (Part::Area(r), Part::Area(s)) => areas_intersect(r, s),
    }
}

// ---------------------------------------------------------------------------
// Per-variant API
// ---------------------------------------------------------------------------

impl LineString {
    /// Every consecutive-segment pair is tested against `other`'s segments.
    pub fn intersects_line(&self, other: &LineString) -> bool { paths_cross(self.positions(), other.positions()) }

    /// Vertex-inside check first, then segment-vs-ring-edge crossings.
    pub fn intersects_polygon(&self, polygon: &Polygon) -> bool {
        path_intersects_area(self.positions(), &ring_slices(polygon.rings()))
    }

    /// Vertex-inside check first, then segment-vs-box-edge crossings.
    pub fn intersects_bbox(&self, bbox: &BoundingBox) -> bool { bbox.contains_geometry(&self.clone().into()) }

    pub fn intersects(&self, other: &Geometry) -> bool {
        let this = Part::Path(self.positions());
        parts(other).iter().any(|part| parts_intersect(&this, part))
    }

    /// Great-circle length in km.
    pub fn length(&self) -> f64 { finite_or_zero(path_length(self.positions())) / 1000.0 }
}

impl Polygon {
    /// Ray-casting containment; ring 0 sets the parity and every hole that
    /// contains the position flips it.
    pub fn contains_position(&self, position: &Position) -> bool {
        rings_contain(self.rings().iter().map(|r| r.as_slice()), position)
    }

    pub fn intersects(&self, other: &Geometry) -> bool {
        let this = Part::Area(ring_slices(self.rings()));
        parts(other).iter().any(|part| parts_intersect(&this, part))
    }

    /// Spherical area in km²: the exterior ring adds, every hole subtracts.
    pub fn area(&self) -> f64 {
        let m2 = self.rings().iter().enumerate()
            .map(|(i, ring)| if i == 0 { ring_area(ring).abs() } else { -ring_area(ring).abs() })
            .sum::<f64>();
        finite_or_zero(m2) / 1e6
    }

    /// Great-circle perimeter of the exterior ring in km, wrap-around included.
    pub fn perimeter(&self) -> f64 {
        finite_or_zero(self.exterior().map_or(0.0, ring_perimeter)) / 1000.0
    }

    /// Make the exterior counter-clockwise and every hole clockwise.
    pub fn normalize_winding(&mut self) {
        for (i, ring) in self.0.iter_mut().enumerate() {
            let area = signed_planar_area(ring);
            if (i == 0 && area < 0.0) || (i > 0 && area > 0.0) { ring.reverse() }
        }
    }
}

impl MultiPolygon {
    /// Bounding-box pre-filter, then parity across every ring of every member.
    pub fn contains_position(&self, position: &Position) -> bool {
        let Some(bbox) = BoundingBox::from_positions(self.polygons().iter().flat_map(|p| p.rings().iter().flatten()))
        else { return false };
        if !bbox.contains_position(position) { return false }
        rings_contain(self.polygons().iter().flat_map(|p| p.rings().iter().map(|r| r.as_slice())), position)
    }

    pub fn intersects(&self, other: &Geometry) -> bool {
        let this: Geometry = self.clone().into();
        match (BoundingBox::of(&this), BoundingBox::of(other)) {
            (Some(a), Some(b)) if a.intersects(&b) => this.intersects(other),
            _ => false,
        }
    }

    pub fn area(&self) -> f64 { self.polygons().iter().map(Polygon::area).sum() }

    pub fn perimeter(&self) -> f64 { self.polygons().iter().map(Polygon::perimeter).sum() }
}

impl Point {
    pub fn intersects(&self, other: &Geometry) -> bool {
        if self.is_empty() { return false }
        let this = Part::Point(self.position());
        parts(other).iter().any(|part| parts_intersect(&this, part))
    }
}

impl Geometry {
    /// True if the two geometries share any point, under the crossing
    /// conventions of [`segments_intersect`].
    pub fn intersects(&self, other: &Geometry) -> bool {
        let theirs = parts(other);
        parts(self).iter().any(|mine| theirs.iter().any(|part| parts_intersect(mine, part)))
    }

    /// Containment of a position by the areal members of this geometry.
    /// Points and paths never contain anything.
    pub fn contains_position(&self, position: &Position) -> bool {
        match self {
            Geometry::Polygon(g) => g.contains_position(position),
            Geometry::MultiPolygon(g) => g.contains_position(position),
            Geometry::GeometryCollection(g) => g.geometries().iter().any(|m| m.contains_position(position)),
            Geometry::Point(_) | Geometry::LineString(_) | Geometry::MultiPoint(_) | Geometry::MultiLineString(_) => {
                false
            }
        }
    }

    /// Spherical area in km² (zero for non-areal geometries).
    pub fn area(&self) -> f64 {
        match self {
            Geometry::Polygon(g) => g.area(),
            Geometry::MultiPolygon(g) => g.area(),
            Geometry::GeometryCollection(g) => g.geometries().iter().map(Geometry::area).sum(),
            Geometry::Point(_) | Geometry::LineString(_) | Geometry::MultiPoint(_) | Geometry::MultiLineString(_) => {
                0.0
            }
        }
    }

    /// Exterior perimeter in km (zero for non-areal geometries).
    pub fn perimeter(&self) -> f64 {
        match self {
            Geometry::Polygon(g) => g.perimeter(),
            Geometry::MultiPolygon(g) => g.perimeter(),
            Geometry::GeometryCollection(g) => g.geometries().iter().map(Geometry::perimeter).sum(),
            Geometry::Point(_) | Geometry::LineString(_) | Geometry::MultiPoint(_) | Geometry::MultiLineString(_) => {
                0.0
            }
        }
    }

    /// Great-circle length of linear members in km.
    pub fn length(&self) -> f64 {
        match self {
            Geometry::LineString(g) => g.length(),
            Geometry::MultiLineString(g) => g.lines().iter().map(LineString::length).sum(),
            Geometry::GeometryCollection(g) => g.geometries().iter().map(Geometry::length).sum(),
            Geometry::Point(_) | Geometry::Polygon(_) | Geometry::MultiPoint(_) | Geometry::MultiPolygon(_) => 0.0,
        }
    }
}

impl MultiPoint {
    pub fn intersects(&self, other: &Geometry) -> bool { Geometry::from(self.clone()).intersects(other) }
}

impl MultiLineString {
    pub fn intersects(&self, other: &Geometry) -> bool { Geometry::from(self.clone()).intersects(other) }
}

impl GeometryCollection {
    pub fn intersects(&self, other: &Geometry) -> bool {
        self.geometries().iter().any(|member| member.intersects(other))
    }
}
