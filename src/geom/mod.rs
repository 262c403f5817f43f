//! Geometry data model, bounding boxes and spatial predicates.

pub mod algorithm;
mod bbox;
mod geometry;
mod position;
mod predicates;

pub use bbox::BoundingBox;
pub use geometry::{
    Feature, FeatureId, Geometry, GeometryCollection, GeometryKind, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Ring,
};
pub use position::{Dimension, Position};
