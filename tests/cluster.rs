use std::time::{Duration, Instant};

use geokit::{ClusterOptions, ClusterOrganizer, Feature, FeatureId, Point};
use rand::{Rng, SeedableRng, rngs::StdRng};

#[test]
fn points_on_both_sides_of_the_antimeridian() {
    let mut organizer = ClusterOrganizer::new(ClusterOptions { grid_size: 60.0, zoom: 0, use_grid_optimization: true });
    organizer.add_feature(Feature::new(1, Point::new(180.0, 0.0)));
    organizer.add_feature(Feature::new(2, Point::new(180.0, 0.0)));
    organizer.add_feature(Feature::new(3, Point::new(-180.0, 0.0)));
    assert_eq!(organizer.num_clusters(), 2);
    assert_eq!(organizer.num_features(), 3);

    organizer.remove_feature(FeatureId(3));
    assert_eq!(organizer.num_clusters(), 1);
    assert_eq!(organizer.num_features(), 2);

    organizer.remove_feature(FeatureId(1));
    assert_eq!(organizer.num_clusters(), 1);
    assert_eq!(organizer.num_features(), 1);

    organizer.remove_feature(FeatureId(2));
    assert_eq!(organizer.num_clusters(), 0);
    assert_eq!(organizer.num_features(), 0);
}

#[test]
fn every_feature_belongs_to_exactly_one_cluster() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut organizer = ClusterOrganizer::new(ClusterOptions { zoom: 3, ..Default::default() });
    for id in 0..500 {
        organizer.add_feature(Feature::new(id, Point::new(rng.random_range(-180.0..180.0), rng.random_range(-80.0..80.0))));
    }
    for id in (0..500).step_by(3) {
        organizer.remove_feature(FeatureId(id));
    }

    let members: usize = organizer.clusters().map(|c| c.len()).sum();
    assert_eq!(members, organizer.num_features());
    assert_eq!(organizer.clusters().count(), organizer.num_clusters());
    for feature in organizer.features() {
        let cluster = organizer.cluster_of(feature.id).unwrap();
        assert!(cluster.contains(feature.id));
    }
}

#[test]
fn grid_and_linear_scans_agree() {
    let mut rng = StdRng::seed_from_u64(2);
    let points: Vec<(f64, f64)> =
        (0..2000).map(|_| (rng.random_range(-180.0..180.0), rng.random_range(-80.0..80.0))).collect();

    let mut gridded = ClusterOrganizer::new(ClusterOptions { zoom: 4, ..Default::default() });
    let mut linear = ClusterOrganizer::new(ClusterOptions { zoom: 4, use_grid_optimization: false, ..Default::default() });
    for (id, &(lon, lat)) in points.iter().enumerate() {
        let a = gridded.add_feature(Feature::new(id as u64, Point::new(lon, lat)));
        let b = linear.add_feature(Feature::new(id as u64, Point::new(lon, lat)));
        assert_eq!(a, b, "feature {id}");
    }
    assert_eq!(gridded.num_clusters(), linear.num_clusters());
}

#[test]
fn options_deserialize_with_defaults() {
    let options: ClusterOptions = serde_json::from_str(r#"{ "zoom": 5 }"#).unwrap();
    assert_eq!(options, ClusterOptions { zoom: 5, ..Default::default() });
    assert_eq!(options.grid_size, 60.0);
    assert!(options.use_grid_optimization);
}

#[test]
fn grid_mode_clusters_tens_of_thousands_quickly() {
    let mut rng = StdRng::seed_from_u64(3);
    let features: Vec<Feature> = (0..20_000)
        .map(|id| Feature::new(id, Point::new(rng.random_range(-180.0..180.0), rng.random_range(-80.0..80.0))))
        .collect();

    let mut organizer = ClusterOrganizer::new(ClusterOptions { zoom: 6, ..Default::default() });
    let start = Instant::now();
    for feature in features {
        organizer.add_feature(feature);
    }
    let elapsed = start.elapsed();

    assert_eq!(organizer.num_features(), 20_000);
    assert!(elapsed < Duration::from_secs(2), "clustering took {elapsed:?}");
}
