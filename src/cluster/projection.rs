use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::geom::Position;

/// Latitude limit of the square Web Mercator world.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.05112878;

/// A point in screen space, in pixels from the top-left of the world at a zoom.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline] pub fn new(x: f64, y: f64) -> Self { Self { x, y } }

    #[inline] pub fn distance(&self, other: &PixelPoint) -> f64 { (self.x - other.x).hypot(self.y - other.y) }

    #[inline] pub fn is_finite(&self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

/// Maps geographic positions to pixel space at a zoom level.
pub trait Projection {
    fn project(&self, position: &Position, zoom: u8) -> PixelPoint;
}

impl<F: Fn(&Position, u8) -> PixelPoint> Projection for F {
    #[inline]
    fn project(&self, position: &Position, zoom: u8) -> PixelPoint { self(position, zoom) }
}

/// Spherical Web Mercator on a square world `tile_size * 2^zoom` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WebMercator {
    pub tile_size: f64,
}

impl Default for WebMercator {
    fn default() -> Self { Self { tile_size: 256.0 } }
}

impl WebMercator {
    /// World width in pixels at `zoom`.
    #[inline] pub fn world_size(&self, zoom: u8) -> f64 { self.tile_size * 2f64.powi(zoom as i32) }
}

impl Projection for WebMercator {
    fn project(&self, position: &Position, zoom: u8) -> PixelPoint {
        let scale = self.world_size(zoom);
        let latitude = position.latitude.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
        let sin = latitude.to_radians().sin();

        let x = (position.longitude + 180.0) / 360.0 * scale;
        let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * scale;
        PixelPoint::new(x, y)
    }
}
