//! Planar and spherical primitives shared by the geometry predicates.

mod measure;
mod orient;

pub use measure::{haversine_distance, path_length, ring_area, ring_perimeter, EARTH_RADIUS_M};
pub(crate) use measure::finite_or_zero;
pub use orient::{on_segment, ring_contains, ring_edges, rings_contain, segments_intersect, signed_planar_area};
