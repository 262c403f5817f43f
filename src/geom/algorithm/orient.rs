use crate::geom::Position;

/// Tolerance (degrees) for treating a point as lying on a segment.
const ON_SEGMENT_EPS: f64 = 1e-12;

/// True if `a`, `b`, `c` turn counter-clockwise. Collinear triples (zero cross
/// product) report `false`, i.e. they count as clockwise.
#[inline]
fn is_ccw(a: &Position, b: &Position, c: &Position) -> bool {
    (c.latitude - a.latitude) * (b.longitude - a.longitude)
        > (b.latitude - a.latitude) * (c.longitude - a.longitude)
}

/// Proper-crossing test for segments `p1p2` and `p3p4`.
///
/// Each segment must straddle the line through the other. Because collinear
/// orientations count as clockwise, touching endpoints and collinear overlaps
/// are not reported as intersections.
#[inline]
pub fn segments_intersect(p1: &Position, p2: &Position, p3: &Position, p4: &Position) -> bool {
    is_ccw(p1, p3, p4) != is_ccw(p2, p3, p4) && is_ccw(p1, p2, p3) != is_ccw(p1, p2, p4)
}

/// True if `p` lies on the closed segment `ab` (within a small tolerance).
pub fn on_segment(p: &Position, a: &Position, b: &Position) -> bool {
    let cross = (b.longitude - a.longitude) * (p.latitude - a.latitude)
        - (b.latitude - a.latitude) * (p.longitude - a.longitude);
    if !(cross.abs() <= ON_SEGMENT_EPS) { return false }

    p.longitude >= a.longitude.min(b.longitude) - ON_SEGMENT_EPS
        && p.longitude <= a.longitude.max(b.longitude) + ON_SEGMENT_EPS
        && p.latitude >= a.latitude.min(b.latitude) - ON_SEGMENT_EPS
        && p.latitude <= a.latitude.max(b.latitude) + ON_SEGMENT_EPS
}

/// Ray-casting parity test of `p` against a single ring. The ring may be open
/// or closed; rings with fewer than 3 positions never contain anything.
pub fn ring_contains(ring: &[Position], p: &Position) -> bool {
    if ring.len() < 3 { return false }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (&ring[i], &ring[j]);
        if (a.latitude > p.latitude) != (b.latitude > p.latitude)
            && p.longitude
                < (b.longitude - a.longitude) * (p.latitude - a.latitude) / (b.latitude - a.latitude) + a.longitude
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Accumulate-and-flip containment over a ring set: the first ring sets the
/// result and every later ring that contains `p` flips it.
pub fn rings_contain<'a, I>(rings: I, p: &Position) -> bool
where
    I: IntoIterator<Item = &'a [Position]>,
{
    rings.into_iter().fold(false, |inside, ring| inside ^ ring_contains(ring, p))
}

/// Segments of a ring including the closing edge from the last position back
/// to the first.
pub fn ring_edges(ring: &[Position]) -> impl Iterator<Item = (&Position, &Position)> + '_ {
    let n = ring.len();
    (0..if n < 2 { 0 } else { n }).map(move |i| (&ring[i], &ring[(i + 1) % n]))
}

/// Shoelace signed area in squared degrees; positive for counter-clockwise rings.
pub fn signed_planar_area(ring: &[Position]) -> f64 {
    ring_edges(ring)
        .map(|(a, b)| a.longitude * b.latitude - b.longitude * a.latitude)
        .sum::<f64>() / 2.0
}
