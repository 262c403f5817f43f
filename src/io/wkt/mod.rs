//! Well-Known Text with the EWKT `SRID=<n>;` prefix and Z/M/ZM layouts.

mod lexer;
mod read;
mod write;

use std::str::FromStr;

pub use read::{Ewkt, ThreeOrdinateLayout, WktReader};
pub use write::WktWriter;

use crate::error::{DimensionalityError, ParseError};
use crate::geom::Geometry;

/// Parse WKT or EWKT, discarding any SRID.
pub fn parse_wkt(input: &str) -> Result<Geometry, ParseError> {
    WktReader::new().parse(input).map(|ewkt| ewkt.geometry)
}

/// Parse WKT or EWKT, keeping the embedded SRID.
pub fn parse_ewkt(input: &str) -> Result<Ewkt, ParseError> { WktReader::new().parse(input) }

/// Write canonical WKT in the geometry's own dimensionality.
pub fn write_wkt(geometry: &Geometry) -> Result<String, DimensionalityError> { WktWriter::new().write(geometry) }

/// Write canonical EWKT with an `SRID=<srid>;` prefix.
pub fn write_ewkt(geometry: &Geometry, srid: i32) -> Result<String, DimensionalityError> {
    WktWriter::new().with_srid(srid).write(geometry)
}

impl FromStr for Geometry {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { parse_wkt(s) }
}

impl Geometry {
    /// Canonical WKT of this geometry.
    #[inline]
    pub fn to_wkt(&self) -> Result<String, DimensionalityError> { write_wkt(self) }
}
