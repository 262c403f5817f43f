use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geom::{Dimension, Position};

/// A closed sequence of positions bounding a polygon or one of its holes.
pub type Ring = Vec<Position>;

/// A single position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(pub Position);

/// An ordered path of positions.
///
/// Every container carries the layout it was declared with, which is what
/// [`Geometry::dimension`] reports once it has no positions to go by.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString(pub Vec<Position>, pub(crate) Dimension);

/// Rings of a polygon: `rings[0]` is the exterior, the rest are holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon(pub Vec<Ring>, pub(crate) Dimension);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPoint(pub Vec<Position>, pub(crate) Dimension);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiLineString(pub Vec<LineString>, pub(crate) Dimension);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon(pub Vec<Polygon>, pub(crate) Dimension);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryCollection(pub Vec<Geometry>, pub(crate) Dimension);

/// Any supported geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

/// Variant tag of a [`Geometry`], carrying its WKT keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 7] = [
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPoint,
        GeometryKind::MultiLineString,
        GeometryKind::MultiPolygon,
        GeometryKind::GeometryCollection,
    ];

    /// Upper-case WKT keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            GeometryKind::Point => "POINT",
            GeometryKind::LineString => "LINESTRING",
            GeometryKind::Polygon => "POLYGON",
            GeometryKind::MultiPoint => "MULTIPOINT",
            GeometryKind::MultiLineString => "MULTILINESTRING",
            GeometryKind::MultiPolygon => "MULTIPOLYGON",
            GeometryKind::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }

    /// Look up a kind by its exact upper-case keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.keyword()) }
}

#[inline]
fn positions_of<C: Copy + Into<Position>>(coords: &[C]) -> Vec<Position> {
    coords.iter().map(|&c| c.into()).collect()
}

impl Point {
    #[inline] pub fn new(longitude: f64, latitude: f64) -> Self { Self(Position::new(longitude, latitude)) }

    /// A point with no coordinates (`NaN`, `NaN`).
    #[inline] pub fn empty() -> Self { Self(Position::EMPTY) }

    /// An empty point declared with `dimension`; its unset ordinates are NaN
    /// so the layout survives.
    pub fn empty_with(dimension: Dimension) -> Self {
        Self(Position::from_ordinates(&[f64::NAN; 4], dimension))
    }

    #[inline] pub fn position(&self) -> &Position { &self.0 }

    #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl LineString {
    #[inline] pub fn new(positions: Vec<Position>) -> Self { Self(positions, Dimension::Xy) }

    /// An empty linestring declared with `dimension`.
    #[inline] pub fn empty_with(dimension: Dimension) -> Self { Self(Vec::new(), dimension) }

    pub fn from_coords<C: Copy + Into<Position>>(coords: &[C]) -> Self { Self::new(positions_of(coords)) }

    #[inline] pub fn positions(&self) -> &[Position] { &self.0 }

    #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Consecutive segments as position pairs.
    #[inline]
    pub fn segments(&self) -> impl Iterator<Item = (&Position, &Position)> + '_ {
        self.0.windows(2).map(|w| (&w[0], &w[1]))
    }
}

impl Polygon {
    #[inline] pub fn new(rings: Vec<Ring>) -> Self { Self(rings, Dimension::Xy) }

    /// An empty polygon declared with `dimension`.
    #[inline] pub fn empty_with(dimension: Dimension) -> Self { Self(Vec::new(), dimension) }

    pub fn from_coords<C, R>(rings: &[R]) -> Self
    where
        C: Copy + Into<Position>,
        R: AsRef<[C]>,
    {
        Self::new(rings.iter().map(|ring| positions_of(ring.as_ref())).collect())
    }

    #[inline] pub fn rings(&self) -> &[Ring] { &self.0 }

    /// The exterior ring, if the polygon has any rings.
    #[inline] pub fn exterior(&self) -> Option<&[Position]> { self.0.first().map(|r| r.as_slice()) }

    /// Hole rings (every ring after the first).
    #[inline] pub fn holes(&self) -> &[Ring] { self.0.get(1..).unwrap_or(&[]) }

    #[inline] pub fn is_empty(&self) -> bool { self.0.iter().all(|ring| ring.is_empty()) }
}

impl MultiPoint {
    #[inline] pub fn new(positions: Vec<Position>) -> Self { Self(positions, Dimension::Xy) }

    /// An empty multipoint declared with `dimension`.
    #[inline] pub fn empty_with(dimension: Dimension) -> Self { Self(Vec::new(), dimension) }

    pub fn from_coords<C: Copy + Into<Position>>(coords: &[C]) -> Self { Self::new(positions_of(coords)) }

    #[inline] pub fn positions(&self) -> &[Position] { &self.0 }

    #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl MultiLineString {
    #[inline] pub fn new(lines: Vec<LineString>) -> Self { Self(lines, Dimension::Xy) }

    /// An empty multilinestring declared with `dimension`.
    #[inline] pub fn empty_with(dimension: Dimension) -> Self { Self(Vec::new(), dimension) }

    pub fn from_coords<C, L>(lines: &[L]) -> Self
    where
        C: Copy + Into<Position>,
        L: AsRef<[C]>,
    {
        Self::new(lines.iter().map(|line| LineString::new(positions_of(line.as_ref()))).collect())
    }

    #[inline] pub fn lines(&self) -> &[LineString] { &self.0 }

    #[inline] pub fn is_empty(&self) -> bool { self.0.iter().all(|line| line.is_empty()) }
}

impl MultiPolygon {
    #[inline] pub fn new(polygons: Vec<Polygon>) -> Self { Self(polygons, Dimension::Xy) }

    /// An empty multipolygon declared with `dimension`.
    #[inline] pub fn empty_with(dimension: Dimension) -> Self { Self(Vec::new(), dimension) }

    pub fn from_coords<C, R, P>(polygons: &[P]) -> Self
    where
        C: Copy + Into<Position>,
        R: AsRef<[C]>,
        P: AsRef<[R]>,
    {
        Self::new(polygons.iter().map(|rings| Polygon::from_coords(rings.as_ref())).collect())
    }

    #[inline] pub fn polygons(&self) -> &[Polygon] { &self.0 }

    #[inline] pub fn is_empty(&self) -> bool { self.0.iter().all(|polygon| polygon.is_empty()) }
}

impl GeometryCollection {
    #[inline] pub fn new(geometries: Vec<Geometry>) -> Self { Self(geometries, Dimension::Xy) }

    /// An empty collection declared with `dimension`.
    #[inline] pub fn empty_with(dimension: Dimension) -> Self { Self(Vec::new(), dimension) }

    #[inline] pub fn geometries(&self) -> &[Geometry] { &self.0 }

    #[inline] pub fn is_empty(&self) -> bool { self.0.iter().all(|geometry| geometry.is_empty()) }
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }

    /// Depth-first iterator over every position in the geometry.
    /// The empty point yields nothing.
    pub fn positions(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        match self {
            Geometry::Point(g) if g.is_empty() => Box::new(std::iter::empty()),
            Geometry::Point(g) => Box::new(std::iter::once(&g.0)),
            Geometry::LineString(g) => Box::new(g.0.iter()),
            Geometry::Polygon(g) => Box::new(g.0.iter().flatten()),
            Geometry::MultiPoint(g) => Box::new(g.0.iter()),
            Geometry::MultiLineString(g) => Box::new(g.0.iter().flat_map(|l| l.0.iter())),
            Geometry::MultiPolygon(g) => Box::new(g.0.iter().flat_map(|p| p.0.iter().flatten())),
            Geometry::GeometryCollection(g) => Box::new(g.0.iter().flat_map(|m| m.positions())),
        }
    }

    /// Dimensionality of the first position. Geometries without positions
    /// report the layout they were declared with.
    pub fn dimension(&self) -> Dimension {
        if let Some(position) = self.positions().next() { return position.dimension() }
        match self {
            Geometry::Point(g) => g.0.dimension(),
            Geometry::LineString(g) => g.1,
            Geometry::Polygon(g) => g.1,
            Geometry::MultiPoint(g) => g.1,
            Geometry::MultiLineString(g) => g.1,
            Geometry::MultiPolygon(g) => g.1,
            Geometry::GeometryCollection(g) => g.0.first().map_or(g.1, Geometry::dimension),
        }
    }

    /// First coordinate of the geometry, used as its anchor for clustering.
    pub fn representative_position(&self) -> Option<&Position> {
        self.positions().next().filter(|p| !p.is_empty())
    }
}

macro_rules! into_geometry {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Geometry {
                fn from(value: $variant) -> Self { Geometry::$variant(value) }
            }
        )*
    };
}

into_geometry!(Point, LineString, Polygon, MultiPoint, MultiLineString, MultiPolygon, GeometryCollection);

// ---------------------------------------------------------------------------
// Features
// ---------------------------------------------------------------------------

/// Caller-assigned identity of a feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(pub u64);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "FeatureId({})", self.0) }
}

/// A geometry with an identity, as handed over by the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: FeatureId,
    pub geometry: Geometry,
}

impl Feature {
    pub fn new(id: u64, geometry: impl Into<Geometry>) -> Self {
        Self { id: FeatureId(id), geometry: geometry.into() }
    }
}

// ---------------------------------------------------------------------------
// geo interop (XY only; altitude and measure are dropped)
// ---------------------------------------------------------------------------

fn to_geo_line(positions: &[Position]) -> geo::LineString<f64> {
    geo::LineString::new(positions.iter().map(|&p| p.into()).collect())
}

fn to_geo_polygon(polygon: &Polygon) -> geo::Polygon<f64> {
    let exterior = polygon.exterior().map(to_geo_line).unwrap_or_else(|| geo::LineString::new(vec![]));
    geo::Polygon::new(exterior, polygon.holes().iter().map(|ring| to_geo_line(ring)).collect())
}

fn from_geo_line(line: &geo::LineString<f64>) -> Vec<Position> {
    line.0.iter().map(|&c| c.into()).collect()
}

fn from_geo_polygon(polygon: &geo::Polygon<f64>) -> Polygon {
    if polygon.exterior().0.is_empty() && polygon.interiors().is_empty() { return Polygon::default() }
    let mut rings = vec![from_geo_line(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(from_geo_line));
    Polygon::new(rings)
}

impl From<&Geometry> for geo::Geometry<f64> {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(g) => geo::Geometry::Point(geo::Point::new(g.0.longitude, g.0.latitude)),
            Geometry::LineString(g) => geo::Geometry::LineString(to_geo_line(&g.0)),
            Geometry::Polygon(g) => geo::Geometry::Polygon(to_geo_polygon(g)),
            Geometry::MultiPoint(g) => geo::Geometry::MultiPoint(geo::MultiPoint::new(
                g.0.iter().map(|p| geo::Point::new(p.longitude, p.latitude)).collect(),
            )),
            Geometry::MultiLineString(g) => geo::Geometry::MultiLineString(geo::MultiLineString::new(
                g.0.iter().map(|l| to_geo_line(&l.0)).collect(),
            )),
            Geometry::MultiPolygon(g) => geo::Geometry::MultiPolygon(geo::MultiPolygon::new(
                g.0.iter().map(to_geo_polygon).collect(),
            )),
            Geometry::GeometryCollection(g) => geo::Geometry::GeometryCollection(geo::GeometryCollection(
                g.0.iter().map(geo::Geometry::from).collect(),
            )),
        }
    }
}

impl From<&geo::Geometry<f64>> for Geometry {
    fn from(geometry: &geo::Geometry<f64>) -> Self {
        match geometry {
            geo::Geometry::Point(p) => Point::new(p.x(), p.y()).into(),
            geo::Geometry::Line(l) => LineString::new(vec![l.start.into(), l.end.into()]).into(),
            geo::Geometry::LineString(l) => LineString::new(from_geo_line(l)).into(),
            geo::Geometry::Polygon(p) => from_geo_polygon(p).into(),
            geo::Geometry::MultiPoint(mp) => {
                MultiPoint::new(mp.0.iter().map(|p| Position::new(p.x(), p.y())).collect()).into()
            }
            geo::Geometry::MultiLineString(ml) => {
                MultiLineString::new(ml.0.iter().map(|l| LineString::new(from_geo_line(l))).collect()).into()
            }
            geo::Geometry::MultiPolygon(mp) => MultiPolygon::new(mp.0.iter().map(from_geo_polygon).collect()).into(),
            geo::Geometry::GeometryCollection(gc) => {
                GeometryCollection::new(gc.0.iter().map(Geometry::from).collect()).into()
            }
            geo::Geometry::Rect(r) => from_geo_polygon(&r.to_polygon()).into(),
            geo::Geometry::Triangle(t) => from_geo_polygon(&t.to_polygon()).into(),
        }
    }
}
