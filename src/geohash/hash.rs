use std::{fmt, str::FromStr, sync::Arc};

use crate::error::GeohashError;
use crate::geom::{BoundingBox, Position};

/// Base-32 geohash alphabet.
pub const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Longest supported identifier (60 bits).
pub const MAX_PRECISION: usize = 12;

/// Neighbor characters, indexed by identifier-length parity [even, odd].
const NEIGHBORS: [[&[u8; 32]; 2]; 4] = [
    [b"p0r21436x8zb9dcf5h7kjnmqesgutwvy", b"bc01fg45238967deuvhjyznpkmstqrwx"], // north
    [b"14365h7k9dcfesgujnmqp0r2twvyx8zb", b"238967debc01fg45kmstqrwxuvhjyznp"], // south
    [b"bc01fg45238967deuvhjyznpkmstqrwx", b"p0r21436x8zb9dcf5h7kjnmqesgutwvy"], // east
    [b"238967debc01fg45kmstqrwxuvhjyznp", b"14365h7k9dcfesgujnmqp0r2twvyx8zb"], // west
];

/// Characters on the edge of a parent cell in each direction, same indexing.
const BORDERS: [[&[u8]; 2]; 4] = [
    [b"prxz", b"bcfguvyz"],
    [b"028b", b"0145hjnp"],
    [b"bcfguvyz", b"prxz"],
    [b"0145hjnp", b"028b"],
];

#[inline]
fn decode_char(c: u8) -> Option<u8> {
    BASE32.iter().position(|&b| b == c.to_ascii_lowercase()).map(|i| i as u8)
}

/// Compass direction for adjacency walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::North, Direction::South, Direction::East, Direction::West];

    #[inline]
    fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

impl FromStr for Direction {
    type Err = GeohashError;

    /// Accepts `n`/`s`/`e`/`w` or the full names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Direction::North),
            "s" | "south" => Ok(Direction::South),
            "e" | "east" => Ok(Direction::East),
            "w" | "west" => Ok(Direction::West),
            _ => Err(GeohashError::InvalidDirection(s.to_string())),
        }
    }
}

/// A geohash cell, identified by its lowercase base-32 string. Equality and
/// hashing are by identifier; clones share the identifier allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Geohash {
    id: Arc<str>,
}

impl Geohash {
    /// Validate and normalize an identifier.
    pub fn new(identifier: &str) -> Result<Self, GeohashError> {
        if identifier.is_empty() { return Err(GeohashError::Empty) }
        if let Some(c) = identifier.chars().find(|&c| !c.is_ascii() || decode_char(c as u8).is_none()) {
            return Err(GeohashError::InvalidCharacter { character: c, identifier: identifier.to_string() });
        }
        Ok(Self { id: identifier.to_ascii_lowercase().into() })
    }

    /// Wrap an identifier already known to be valid lowercase base-32.
    #[inline]
    pub(crate) fn from_normalized(id: Arc<str>) -> Self { Self { id } }

    /// Encode a position at `precision` characters (clamped to 1..=12).
    pub fn encode(longitude: f64, latitude: f64, precision: usize) -> Self {
        Self { id: encode_identifier(longitude, latitude, precision).into() }
    }

    #[inline] pub fn as_str(&self) -> &str { &self.id }

    #[inline] pub(crate) fn shared(&self) -> &Arc<str> { &self.id }

    /// Number of characters (about 5 bits each).
    #[inline] pub fn precision(&self) -> usize { self.id.len() }

    /// The containing cell one character shorter, or `None` at precision 1.
    pub fn parent(&self) -> Option<Self> {
        (self.id.len() > 1).then(|| Self { id: self.id[..self.id.len() - 1].into() })
    }

    /// The cell this hash denotes, replayed from its bits.
    pub fn bounds(&self) -> BoundingBox {
        let (mut lon, mut lat) = ((-180.0, 180.0), (-90.0, 90.0));
        let mut even = true;
        for &c in self.id.as_bytes() {
            let bits = decode_char(c).unwrap_or(0);
            for shift in (0..5).rev() {
                let range: &mut (f64, f64) = if even { &mut lon } else { &mut lat };
                let mid = (range.0 + range.1) / 2.0;
                if (bits >> shift) & 1 == 1 { range.0 = mid } else { range.1 = mid }
                even = !even;
            }
        }
        BoundingBox::new(lon.0, lat.0, lon.1, lat.1)
    }

    /// Center of the cell.
    pub fn center(&self) -> Position { self.bounds().center() }

    /// The cell next to this one in `direction`, at the same precision.
    /// Walking off the east or west edge wraps around the antimeridian.
    pub fn adjacent(&self, direction: Direction) -> Result<Self, GeohashError> {
        adjacent_identifier(self.id.as_bytes(), direction)
            .map(|bytes| Self { id: String::from_utf8_lossy(&bytes).into() })
    }

    /// The eight surrounding cells, clockwise from north.
    pub fn neighbors(&self) -> Result<[Self; 8], GeohashError> {
        let n = self.adjacent(Direction::North)?;
        let s = self.adjacent(Direction::South)?;
        Ok([
            n.clone(),
            n.adjacent(Direction::East)?,
            self.adjacent(Direction::East)?,
            s.adjacent(Direction::East)?,
            s.clone(),
            s.adjacent(Direction::West)?,
            self.adjacent(Direction::West)?,
            n.adjacent(Direction::West)?,
        ])
    }
}

impl fmt::Display for Geohash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.id) }
}

impl FromStr for Geohash {
    type Err = GeohashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Geohash::new(s) }
}

impl AsRef<str> for Geohash {
    fn as_ref(&self) -> &str { &self.id }
}

/// Alternate bisection (longitude first), five bits per character.
pub(crate) fn encode_identifier(longitude: f64, latitude: f64, precision: usize) -> String {
    let precision = precision.clamp(1, MAX_PRECISION);
    let (mut lon, mut lat) = ((-180.0, 180.0), (-90.0, 90.0));
    let mut out = String::with_capacity(precision);
    let (mut bits, mut bit, mut even) = (0usize, 0, true);

    while out.len() < precision {
        let (range, value) = if even { (&mut lon, longitude) } else { (&mut lat, latitude) };
        let mid = (range.0 + range.1) / 2.0;
        bits <<= 1;
        if value >= mid {
            bits |= 1;
            range.0 = mid;
        } else {
            range.1 = mid;
        }
        even = !even;

        bit += 1;
        if bit == 5 {
            out.push(BASE32[bits] as char);
            (bits, bit) = (0, 0);
        }
    }
    out
}

fn adjacent_identifier(hash: &[u8], direction: Direction) -> Result<Vec<u8>, GeohashError> {
    let Some((&last, parent)) = hash.split_last() else { return Err(GeohashError::Empty) };
    let parity = hash.len() % 2;
    let d = direction.index();

    let mut prefix = parent.to_vec();
    if BORDERS[d][parity].contains(&last) && !parent.is_empty() {
        prefix = adjacent_identifier(parent, direction)?;
    }

    let position = NEIGHBORS[d][parity].iter().position(|&c| c == last).ok_or_else(|| {
        GeohashError::InvalidCharacter {
            character: last as char,
            identifier: String::from_utf8_lossy(hash).into_owned(),
        }
    })?;
    prefix.push(BASE32[position]);
    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gh(s: &str) -> Geohash { Geohash::new(s).unwrap() }

    #[test]
    fn known_encodings() {
        assert_eq!(Geohash::encode(-5.6, 42.6, 5).as_str(), "ezs42");
        assert_eq!(Geohash::encode(10.40744, 57.64911, 11).as_str(), "u4pruydqqvj");
    }

    #[test]
    fn precision_is_clamped() {
        assert_eq!(Geohash::encode(0.0, 0.0, 0).precision(), 1);
        assert_eq!(Geohash::encode(0.0, 0.0, 40).precision(), MAX_PRECISION);
    }

    #[test]
    fn bounds_of_known_cell() {
        let bounds = gh("ezs42").bounds();
        assert!((bounds.x_min() - -5.625).abs() < 1e-9);
        assert!((bounds.x_max() - -5.581_054_687_5).abs() < 1e-9);
        assert!((bounds.y_min() - 42.583_007_812_5).abs() < 1e-9);
        assert!((bounds.y_max() - 42.626_953_125).abs() < 1e-9);
    }

    #[test]
    fn identifiers_are_normalized() {
        assert_eq!(gh("EZS42"), gh("ezs42"));
        assert_eq!(gh("EZS42").as_str(), "ezs42");
        assert_eq!(Geohash::new(""), Err(GeohashError::Empty));
        assert!(matches!(Geohash::new("ezsa2"), Err(GeohashError::InvalidCharacter { character: 'a', .. })));
    }

    #[test]
    fn adjacent_cells() {
        assert_eq!(gh("u").adjacent(Direction::East).unwrap().as_str(), "v");
        assert_eq!(gh("ezs42").adjacent(Direction::North).unwrap().as_str(), "ezs48");
        assert_eq!(gh("ezs42").adjacent(Direction::South).unwrap().as_str(), "ezs40");
        assert_eq!(gh("ezs42").adjacent(Direction::East).unwrap().as_str(), "ezs43");
        assert_eq!(gh("ezs42").adjacent(Direction::West).unwrap().as_str(), "ezefr");
    }

    #[test]
    fn adjacency_round_trips() {
        for hash in ["ezs42", "u4pruydqqvj", "9q8yy", "dr5r"] {
            let hash = gh(hash);
            for direction in Direction::ALL {
                let there = hash.adjacent(direction).unwrap();
                assert_eq!(there.adjacent(direction.opposite()).unwrap(), hash, "{hash} {direction:?}");
            }
        }
    }

    #[test]
    fn east_of_last_column_wraps() {
        // "z" covers lon 135-180, lat 45-90; its eastern neighbor starts at -180.
        let wrapped = gh("z").adjacent(Direction::East).unwrap();
        assert_eq!(wrapped.bounds().x_min(), -180.0);
    }

    #[test]
    fn neighbors_surround_the_cell() {
        let center = gh("ezs42");
        let neighbors = center.neighbors().unwrap();
        let bounds = center.bounds();
        for neighbor in &neighbors {
            assert_ne!(neighbor, &center);
            assert!(neighbor.bounds().intersects(&bounds));
        }
    }

    #[test]
    fn direction_parsing() {
        assert_eq!("N".parse::<Direction>(), Ok(Direction::North));
        assert_eq!("west".parse::<Direction>(), Ok(Direction::West));
        assert_eq!("up".parse::<Direction>(), Err(GeohashError::InvalidDirection("up".into())));
    }

    #[test]
    fn parent_drops_last_character() {
        assert_eq!(gh("ezs42").parent(), Some(gh("ezs4")));
        assert_eq!(gh("e").parent(), None);
    }
}
