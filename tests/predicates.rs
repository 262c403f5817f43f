use geokit::{Geometry, LineString, MultiPolygon, Point, Polygon, Position, parse_wkt};

fn unit_square() -> Polygon {
    Polygon::from_coords(&[vec![[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0], [0.0, 0.0]]])
}

#[test]
fn polygon_contains_position() {
    let square = unit_square();
    assert!(square.contains_position(&Position::new(5.0, 5.0)));
    assert!(!square.contains_position(&Position::new(15.0, 15.0)));
}

#[test]
fn holes_are_excluded() {
    let donut = parse_wkt("POLYGON((0 0,0 10,10 10,10 0,0 0),(4 4,4 6,6 6,6 4,4 4))").unwrap();
    assert!(donut.contains_position(&Position::new(1.0, 1.0)));
    assert!(!donut.contains_position(&Position::new(5.0, 5.0)));
}

#[test]
fn winding_order_is_ignored() {
    let mut reversed = unit_square();
    reversed.0[0].reverse();
    assert!(reversed.contains_position(&Position::new(5.0, 5.0)));
    assert!((reversed.area() - unit_square().area()).abs() < 1e-6);
}

#[test]
fn degenerate_rings_are_harmless() {
    let sliver = Polygon::from_coords(&[vec![[0.0, 0.0], [1.0, 1.0]]]);
    assert!(!sliver.contains_position(&Position::new(0.5, 0.5)));
    assert_eq!(sliver.area(), 0.0);
    assert_eq!(sliver.perimeter(), 0.0);
    assert_eq!(Polygon::default().area(), 0.0);
}

#[test]
fn one_degree_square_area_and_perimeter() {
    let square = Polygon::from_coords(&[vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]]);
    assert!((square.area() - 12_391.3).abs() < 5.0, "area {}", square.area());
    assert!((square.perimeter() - 445.26).abs() < 0.1, "perimeter {}", square.perimeter());
}

#[test]
fn multipolygon_measures_sum_members() {
    let one = Polygon::from_coords(&[vec![[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]]);
    let two = Polygon::from_coords(&[vec![[0.0, 10.0], [0.0, 11.0], [1.0, 11.0], [1.0, 10.0], [0.0, 10.0]]]);
    let both = MultiPolygon::new(vec![one.clone(), two.clone()]);
    assert!((both.area() - (one.area() + two.area())).abs() < 1e-6);
    assert!(both.contains_position(&Position::new(0.5, 10.5)));
    assert!(!both.contains_position(&Position::new(0.5, 5.0)));
}

#[test]
fn crossing_lines_intersect() {
    let a = LineString::from_coords(&[[0.0, 0.0], [10.0, 10.0]]);
    let b = LineString::from_coords(&[[0.0, 10.0], [10.0, 0.0]]);
    let c = LineString::from_coords(&[[20.0, 20.0], [30.0, 20.0]]);
    assert!(a.intersects_line(&b));
    assert!(!a.intersects_line(&c));
}

#[test]
fn line_and_polygon_intersection() {
    let square = unit_square();
    let inside = LineString::from_coords(&[[2.0, 2.0], [3.0, 3.0]]);
    let crossing = LineString::from_coords(&[[-5.0, 5.0], [5.0, 5.0]]);
    let away = LineString::from_coords(&[[20.0, 20.0], [30.0, 30.0]]);
    assert!(inside.intersects_polygon(&square));
    assert!(crossing.intersects_polygon(&square));
    assert!(!away.intersects_polygon(&square));
}

#[test]
fn mixed_geometry_intersection() {
    let square: Geometry = unit_square().into();
    let point: Geometry = Point::new(5.0, 5.0).into();
    let far: Geometry = Point::new(50.0, 5.0).into();
    let overlapping = parse_wkt("POLYGON((5 5,5 15,15 15,15 5,5 5))").unwrap();
    let collection = parse_wkt("GEOMETRYCOLLECTION(POINT(50 50),LINESTRING(-1 5,1 5))").unwrap();

    assert!(square.intersects(&point) && point.intersects(&square));
    assert!(!square.intersects(&far));
    assert!(square.intersects(&overlapping));
    assert!(collection.intersects(&square));
    assert!(!Geometry::from(Point::empty()).intersects(&square));
}

#[test]
fn line_length_in_kilometers() {
    let line = LineString::from_coords(&[[0.0, 0.0], [1.0, 0.0]]);
    assert!((line.length() - 111.319).abs() < 0.01);
    assert_eq!(Geometry::from(line).area(), 0.0);
}
