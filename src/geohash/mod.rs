//! Geohash cells: encoding, adjacency, a caller-owned interner, and a
//! collection that tiles a bounding box.

mod cache;
mod collection;
mod hash;

pub use cache::GeohashCache;
pub use collection::{CellChanges, GeohashCollection, precision_for_area};
pub use hash::{BASE32, Direction, Geohash, MAX_PRECISION};
