use geokit::geohash::{Direction, Geohash, GeohashCache, GeohashCollection};
use geokit::{BoundingBox, GeohashError, Position};
use rand::{Rng, SeedableRng, rngs::StdRng};

#[test]
fn decoded_bounds_contain_the_encoded_position() {
    let mut rng = StdRng::seed_from_u64(0x6e0);
    for _ in 0..2000 {
        let lon = rng.random_range(-180.0..=180.0);
        let lat = rng.random_range(-90.0..=90.0);
        for precision in 1..=10 {
            let hash = Geohash::encode(lon, lat, precision);
            assert_eq!(hash.precision(), precision);
            let decoded: Geohash = hash.as_str().parse().unwrap();
            assert!(decoded.bounds().contains_position(&Position::new(lon, lat)), "{hash} does not contain ({lon}, {lat})");
        }
    }
}

#[test]
fn extreme_coordinates_encode_into_edge_cells() {
    assert_eq!(Geohash::encode(-180.0, -90.0, 4).as_str(), "0000");
    assert_eq!(Geohash::encode(180.0, 90.0, 4).as_str(), "zzzz");
}

#[test]
fn cells_are_prefix_nested() {
    let fine = Geohash::encode(2.2945, 48.8584, 9);
    let mut cell = fine.clone();
    while let Some(parent) = cell.parent() {
        assert!(fine.as_str().starts_with(parent.as_str()));
        let [x0, y0, x1, y1] = cell.bounds().bounds();
        let outer = parent.bounds();
        assert!(outer.contains_position(&Position::new(x0, y0)) && outer.contains_position(&Position::new(x1, y1)));
        cell = parent;
    }
    assert_eq!(cell.precision(), 1);
}

#[test]
fn adjacent_cells_share_an_edge() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let hash = Geohash::encode(rng.random_range(-170.0..170.0), rng.random_range(-80.0..80.0), 6);
        let bounds = hash.bounds();
        let north = hash.adjacent(Direction::North).unwrap().bounds();
        let east = hash.adjacent(Direction::East).unwrap().bounds();
        assert!((north.y_min() - bounds.y_max()).abs() < 1e-9);
        assert!((north.x_min() - bounds.x_min()).abs() < 1e-9);
        assert!((east.x_min() - bounds.x_max()).abs() < 1e-9);
        assert!((east.y_min() - bounds.y_min()).abs() < 1e-9);
    }
}

#[test]
fn invalid_directions_and_identifiers() {
    assert_eq!("x".parse::<Direction>(), Err(GeohashError::InvalidDirection("x".into())));
    assert_eq!("".parse::<Geohash>(), Err(GeohashError::Empty));
    assert!(matches!("abc".parse::<Geohash>(), Err(GeohashError::InvalidCharacter { character: 'a', .. })));
}

#[test]
fn cache_hands_out_equal_hashes() {
    let mut cache = GeohashCache::with_capacity(16);
    let a = cache.encode(2.2945, 48.8584, 7);
    let b = cache.get(a.as_str()).unwrap();
    assert_eq!(a, b);
    assert_eq!(cache.len(), 1);
}

#[test]
fn collection_tracks_bounds() {
    let mut collection = GeohashCollection::new(BoundingBox::new(-10.0, -10.0, 10.0, 10.0));
    assert_eq!(collection.precision(), 2);
    let center = Geohash::encode(0.0, 0.0, collection.precision());
    assert!(collection.contains(&center));

    // A much smaller box switches to a finer precision; every old cell leaves.
    let before: Vec<Geohash> = collection.cells().to_vec();
    let changes = collection.set_bounds(BoundingBox::new(0.0, 0.0, 1.0, 1.0));
    assert_eq!(collection.precision(), 4);
    assert_eq!(changes.removed.len(), before.len());
    assert_eq!(changes.added.len(), collection.len());
}

#[test]
fn collection_covers_its_bounds() {
    let mut rng = StdRng::seed_from_u64(9);
    let collection = GeohashCollection::new(BoundingBox::new(5.0, 45.0, 7.5, 47.0));
    for _ in 0..500 {
        let p = Position::new(rng.random_range(5.0..7.5), rng.random_range(45.0..47.0));
        let cell = Geohash::encode(p.longitude, p.latitude, collection.precision());
        assert!(collection.contains(&cell), "{cell} missing for {p:?}");
    }
}
