pub mod cluster;
pub mod geohash;
pub mod wkt;
