//! Text interchange formats.
//!
//! # Format Modules
//!
//! - `wkt` - Well-Known Text (and EWKT) reading and writing

pub mod wkt;
