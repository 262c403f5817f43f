use geo::{ChamberlainDuquetteArea, Distance, HaversineMeasure};

use crate::geom::Position;

/// Earth radius used for area and distance, in meters (WGS84 equatorial).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

const SPHERE: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS_M);

/// Spherical area of a ring in m² (Chamberlain–Duquette, "Some Algorithms for
/// Polygons on a Sphere"). Sign depends on winding; rings with fewer than 3
/// positions have zero area.
pub fn ring_area(ring: &[Position]) -> f64 {
    if ring.len() < 3 { return 0.0 }
    let exterior = geo::LineString::new(ring.iter().map(|&p| p.into()).collect());
    geo::Polygon::new(exterior, vec![]).chamberlain_duquette_signed_area()
}

/// Great-circle (haversine) distance between two positions, in meters.
pub fn haversine_distance(a: &Position, b: &Position) -> f64 {
    SPHERE.distance(geo::Point::new(a.longitude, a.latitude), geo::Point::new(b.longitude, b.latitude))
}

/// Total great-circle length of a path in meters.
pub fn path_length(path: &[Position]) -> f64 {
    path.windows(2).map(|w| haversine_distance(&w[0], &w[1])).sum()
}

/// Great-circle perimeter of a ring in meters, including the wrap-around edge
/// from the last position back to the first.
pub fn ring_perimeter(ring: &[Position]) -> f64 {
    if ring.len() < 3 { return 0.0 }
    path_length(ring) + haversine_distance(&ring[ring.len() - 1], &ring[0])
}

/// Replace NaN (from NaN coordinates) with zero.
#[inline]
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Position { Position::new(x, y) }

    #[test]
    fn one_degree_cell_at_equator() {
        let ring = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.0)];
        let area_km2 = ring_area(&ring).abs() / 1e6;
        assert!((12_300.0..12_400.0).contains(&area_km2), "area = {area_km2}");
    }

    #[test]
    fn winding_flips_area_sign() {
        let ring = vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let mut reversed = ring.clone();
        reversed.reverse();
        assert!((ring_area(&ring) + ring_area(&reversed)).abs() < 1e-3);
    }

    #[test]
    fn open_and_closed_rings_share_area() {
        let open = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let closed = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.0)];
        assert!((ring_area(&open) - ring_area(&closed)).abs() < 1e-3);
    }

    #[test]
    fn degenerate_ring_has_no_area() {
        assert_eq!(ring_area(&[]), 0.0);
        assert_eq!(ring_area(&[p(0.0, 0.0), p(1.0, 1.0)]), 0.0);
        assert_eq!(ring_perimeter(&[p(0.0, 0.0), p(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn quarter_meridian() {
        let d = haversine_distance(&p(0.0, 0.0), &p(0.0, 90.0));
        let expected = std::f64::consts::FRAC_PI_2 * EARTH_RADIUS_M;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn closed_and_open_rings_share_perimeter() {
        let open = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let closed = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(0.0, 0.0)];
        assert!((ring_perimeter(&open) - ring_perimeter(&closed)).abs() < 1e-6);
    }
}
