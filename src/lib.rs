#![doc = "geokit: geographic geometries, WKT/EWKT, geohashes and point clustering"]
pub mod cluster;
pub mod error;
pub mod geohash;
pub mod geom;
pub mod io;

#[doc(inline)]
pub use error::{DimensionalityError, Error, GeohashError, LexicalError, ParseError, Result, SyntaxError};

#[doc(inline)]
pub use geom::{
    BoundingBox, Dimension, Feature, FeatureId, Geometry, GeometryCollection, GeometryKind, LineString,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon, Position,
};

#[doc(inline)]
pub use io::wkt::{Ewkt, ThreeOrdinateLayout, WktReader, WktWriter, parse_ewkt, parse_wkt, write_ewkt, write_wkt};

#[doc(inline)]
pub use geohash::{Direction, Geohash, GeohashCache, GeohashCollection};

#[doc(inline)]
pub use cluster::{ClusterId, ClusterOptions, ClusterOrganizer, FeatureCluster, PixelPoint, Projection, WebMercator};
