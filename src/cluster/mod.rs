//! Grid-accelerated incremental clustering of features in pixel space.

mod cluster;
mod grid;
mod organizer;
mod projection;

pub use cluster::{ClusterId, FeatureCluster};
pub use organizer::{ClusterOptions, ClusterOrganizer};
pub use projection::{MAX_MERCATOR_LATITUDE, PixelPoint, Projection, WebMercator};
