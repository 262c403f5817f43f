//! Error types for the WKT codec and geohash operations.
//!
//! Geometry predicates and measurements never fail; everything here comes from
//! parsing, serialization, or geohash construction.

use thiserror::Error;

use crate::geom::Dimension;

/// An unrecognized character (or malformed number) found by the WKT lexer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected character '{character}' at offset {offset}")]
pub struct LexicalError {
    pub character: char,
    pub offset: usize,
}

/// A token the WKT grammar did not expect at this position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected token '{token}' at offset {offset} in \"{input}\"")]
pub struct SyntaxError {
    /// Literal text of the offending token (`<EOF>` at end of input).
    pub token: String,
    /// Byte offset of the token in `input`.
    pub offset: usize,
    /// The full source string being parsed.
    pub input: String,
}

/// Any failure while reading WKT/EWKT text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// Serialization target does not match the geometry's dimensionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DimensionalityError {
    /// The geometry carries an axis the target would drop.
    #[error("geometry dimensionality {actual} exceeds target dimensionality {target}")]
    Exceeds { actual: Dimension, target: Dimension },
    /// The target requests an axis the geometry does not carry.
    #[error("target dimensionality {target} requires {axis} values missing from geometry dimensionality {actual}")]
    MissingAxis { axis: char, actual: Dimension, target: Dimension },
}

/// Invalid geohash identifiers or adjacency requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeohashError {
    #[error("invalid direction '{0}', expected one of n, s, e, w")]
    InvalidDirection(String),
    #[error("geohash identifier is empty")]
    Empty,
    #[error("invalid geohash character '{character}' in \"{identifier}\"")]
    InvalidCharacter { character: char, identifier: String },
}

/// Umbrella error for callers that mix the codec and geohash APIs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Dimensionality(#[from] DimensionalityError),
    #[error(transparent)]
    Geohash(#[from] GeohashError),
}

impl From<LexicalError> for Error {
    fn from(err: LexicalError) -> Self { Error::Parse(err.into()) }
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self { Error::Parse(err.into()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
