use std::fmt;

use serde::{Deserialize, Serialize};

/// Coordinate layout of a position or geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    #[default]
    Xy,
    Xyz,
    Xym,
    Xyzm,
}

impl Dimension {
    /// Build a layout from the presence of altitude (Z) and measure (M).
    #[inline]
    pub fn from_axes(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Dimension::Xy,
            (true, false) => Dimension::Xyz,
            (false, true) => Dimension::Xym,
            (true, true) => Dimension::Xyzm,
        }
    }

    #[inline] pub fn has_z(self) -> bool { matches!(self, Dimension::Xyz | Dimension::Xyzm) }

    #[inline] pub fn has_m(self) -> bool { matches!(self, Dimension::Xym | Dimension::Xyzm) }

    /// Number of ordinates in one tuple (2, 3 or 4).
    #[inline] pub fn ordinates(self) -> usize { 2 + self.has_z() as usize + self.has_m() as usize }

    /// The WKT dimensionality marker (empty for XY).
    pub fn marker(self) -> &'static str {
        match self {
            Dimension::Xy => "",
            Dimension::Xyz => "Z",
            Dimension::Xym => "M",
            Dimension::Xyzm => "ZM",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Xy => "XY",
            Dimension::Xyz => "XYZ",
            Dimension::Xym => "XYM",
            Dimension::Xyzm => "XYZM",
        })
    }
}

/// A geographic position: longitude and latitude in degrees, optional altitude
/// in meters and an optional linear-referencing measure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<f64>,
}

impl Position {
    /// The position of an empty point.
    pub const EMPTY: Position = Position { longitude: f64::NAN, latitude: f64::NAN, altitude: None, measure: None };

    #[inline]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude, altitude: None, measure: None }
    }

    #[inline]
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    #[inline]
    pub fn with_measure(mut self, measure: f64) -> Self {
        self.measure = Some(measure);
        self
    }

    /// Build a position from a raw ordinate slice laid out as `dim`.
    /// Missing trailing ordinates are left unset; extra ones are ignored.
    pub fn from_ordinates(ordinates: &[f64], dim: Dimension) -> Self {
        let get = |i: usize| ordinates.get(i).copied();
        let mut position = Position::new(get(0).unwrap_or(f64::NAN), get(1).unwrap_or(f64::NAN));
        match dim {
            Dimension::Xy => {}
            Dimension::Xyz => position.altitude = get(2),
            Dimension::Xym => position.measure = get(2),
            Dimension::Xyzm => {
                position.altitude = get(2);
                position.measure = get(3);
            }
        }
        position
    }

    /// Layout implied by which optional ordinates are set on this position.
    #[inline]
    pub fn dimension(&self) -> Dimension {
        Dimension::from_axes(self.altitude.is_some(), self.measure.is_some())
    }

    /// True if either horizontal ordinate is NaN (the empty point).
    #[inline]
    pub fn is_empty(&self) -> bool { self.longitude.is_nan() || self.latitude.is_nan() }
}

impl From<[f64; 2]> for Position {
    fn from([longitude, latitude]: [f64; 2]) -> Self { Position::new(longitude, latitude) }
}

/// Three ordinates are read as XYZ.
impl From<[f64; 3]> for Position {
    fn from([longitude, latitude, altitude]: [f64; 3]) -> Self {
        Position::new(longitude, latitude).with_altitude(altitude)
    }
}

impl From<[f64; 4]> for Position {
    fn from([longitude, latitude, altitude, measure]: [f64; 4]) -> Self {
        Position::new(longitude, latitude).with_altitude(altitude).with_measure(measure)
    }
}

impl From<(f64, f64)> for Position {
    fn from((longitude, latitude): (f64, f64)) -> Self { Position::new(longitude, latitude) }
}

impl From<Position> for geo::Coord<f64> {
    fn from(position: Position) -> Self { geo::Coord { x: position.longitude, y: position.latitude } }
}

impl From<geo::Coord<f64>> for Position {
    fn from(coord: geo::Coord<f64>) -> Self { Position::new(coord.x, coord.y) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinate_counts() {
        assert_eq!(Dimension::Xy.ordinates(), 2);
        assert_eq!(Dimension::Xyz.ordinates(), 3);
        assert_eq!(Dimension::Xym.ordinates(), 3);
        assert_eq!(Dimension::Xyzm.ordinates(), 4);
    }

    #[test]
    fn from_ordinates_places_third_value_by_layout() {
        let z = Position::from_ordinates(&[1.0, 2.0, 3.0], Dimension::Xyz);
        let m = Position::from_ordinates(&[1.0, 2.0, 3.0], Dimension::Xym);
        assert_eq!(z.altitude, Some(3.0));
        assert_eq!(z.measure, None);
        assert_eq!(m.altitude, None);
        assert_eq!(m.measure, Some(3.0));
        assert_eq!(m.dimension(), Dimension::Xym);
    }

    #[test]
    fn empty_position_is_nan() {
        assert!(Position::EMPTY.is_empty());
        assert!(!Position::new(0.0, 0.0).is_empty());
        assert_ne!(Position::EMPTY, Position::EMPTY);
    }

    #[test]
    fn equality_is_field_wise() {
        let a = Position::from([1.0, 2.0, 3.0]);
        assert_eq!(a, Position::new(1.0, 2.0).with_altitude(3.0));
        assert_ne!(a, Position::new(1.0, 2.0).with_measure(3.0));
    }
}
