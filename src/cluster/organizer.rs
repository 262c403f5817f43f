use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cluster::cluster::{ClusterId, FeatureCluster};
use crate::cluster::grid::{Cell, Grid};
use crate::cluster::projection::{PixelPoint, Projection, WebMercator};
use crate::geom::{Feature, FeatureId, Position};

/// Clustering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterOptions {
    /// Join radius in pixels; also the side of a grid cell.
    pub grid_size: f64,
    pub zoom: u8,
    /// Search only the 3×3 cell neighborhood instead of every cluster.
    pub use_grid_optimization: bool,
}

impl Default for ClusterOptions {
    fn default() -> Self { Self { grid_size: 60.0, zoom: 0, use_grid_optimization: true } }
}

/// Clustering state of one tracked feature.
#[derive(Debug, Clone)]
struct Entry {
    feature: Feature,
    sequence: u64,
    position: Position,
    pixel: PixelPoint,
    cluster: ClusterId,
}

/// Incremental greedy clusterer: each feature joins the nearest cluster whose
/// centroid is within `grid_size` pixels at the current zoom, or starts a new
/// one.
#[derive(Debug, Clone)]
pub struct ClusterOrganizer<P: Projection = WebMercator> {
    options: ClusterOptions,
    projection: P,

    clusters: Vec<Option<FeatureCluster>>, // Slots indexed by ClusterId
    free: Vec<ClusterId>,                  // Reclaimed slots
    cells: Vec<Cell>,                      // Grid cell of each slot's centroid
    num_clusters: usize,

    features: AHashMap<FeatureId, Entry>,
    next_sequence: u64,
    grid: Grid,
}

impl Default for ClusterOrganizer {
    fn default() -> Self { Self::new(ClusterOptions::default()) }
}

impl ClusterOrganizer {
    /// Organizer using Web Mercator with 256 px tiles.
    pub fn new(options: ClusterOptions) -> Self { Self::with_projection(options, WebMercator::default()) }
}

impl<P: Projection> ClusterOrganizer<P> {
    pub fn with_projection(options: ClusterOptions, projection: P) -> Self {
        Self {
            options,
            projection,
            clusters: Vec::new(),
            free: Vec::new(),
            cells: Vec::new(),
            num_clusters: 0,
            features: AHashMap::new(),
            next_sequence: 0,
            grid: Grid::new(options.grid_size),
        }
    }

    #[inline] pub fn options(&self) -> &ClusterOptions { &self.options }
    #[inline] pub fn zoom(&self) -> u8 { self.options.zoom }
    #[inline] pub fn grid_size(&self) -> f64 { self.options.grid_size }
    #[inline] pub fn num_clusters(&self) -> usize { self.num_clusters }
    #[inline] pub fn num_features(&self) -> usize { self.features.len() }

    /// Live clusters in slot order.
    pub fn clusters(&self) -> impl Iterator<Item = &FeatureCluster> + '_ {
        self.clusters.iter().flatten()
    }

    #[inline]
    pub fn cluster(&self, id: ClusterId) -> Option<&FeatureCluster> {
        self.clusters.get(id.0 as usize).and_then(Option::as_ref)
    }

    /// The cluster currently holding `feature`.
    pub fn cluster_of(&self, feature: FeatureId) -> Option<&FeatureCluster> {
        self.features.get(&feature).and_then(|entry| self.cluster(entry.cluster))
    }

    /// Tracked features (arbitrary order).
    pub fn features(&self) -> impl Iterator<Item = &Feature> + '_ {
        self.features.values().map(|entry| &entry.feature)
    }

    #[inline]
    pub fn feature(&self, id: FeatureId) -> Option<&Feature> { self.features.get(&id).map(|entry| &entry.feature) }

    // ----------------------------------------------------------------
    // Mutation
    // ----------------------------------------------------------------

    /// Cluster a feature by its representative position. Returns `None`, and
    /// does not track the feature, when it has no position or the position
    /// does not project to a finite pixel. A feature whose id is already
    /// tracked replaces the old one.
    pub fn add_feature(&mut self, feature: Feature) -> Option<ClusterId> {
        self.remove_feature(feature.id);
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.insert(feature, sequence)
    }

    /// Stop tracking a feature. Its cluster is dissolved and every remaining
    /// member is clustered again from scratch.
    pub fn remove_feature(&mut self, id: FeatureId) -> Option<Feature> {
        let entry = self.features.remove(&id)?;
        let cluster = self.take_cluster(entry.cluster);

        if let Some(cluster) = cluster {
            for member in cluster.dissolve() {
                if member == id { continue }
                let Some((pixel, position)) = self.features.get(&member).map(|e| (e.pixel, e.position)) else { continue };
                let placed = self.place(member, pixel, &position);
                if let Some(entry) = self.features.get_mut(&member) { entry.cluster = placed }
            }
        }
        Some(entry.feature)
    }

    /// Drop every cluster and feature.
    pub fn reset(&mut self) {
        self.clusters.clear();
        self.free.clear();
        self.cells.clear();
        self.num_clusters = 0;
        self.features.clear();
        self.grid.clear();
    }

    /// Change the zoom level. Pixel positions depend on zoom, so every feature
    /// is re-projected and clustered again in insertion order.
    pub fn set_zoom(&mut self, zoom: u8) {
        if zoom == self.options.zoom { return }
        debug!(from = self.options.zoom, to = zoom, features = self.features.len(), "[cluster::set_zoom] reclustering");

        let mut entries: Vec<Entry> = self.features.drain().map(|(_, entry)| entry).collect();
        entries.sort_unstable_by_key(|entry| entry.sequence);

        self.reset();
        self.options.zoom = zoom;
        for entry in entries {
            self.insert(entry.feature, entry.sequence);
        }
    }

    // ----------------------------------------------------------------
    // Internals
    // ----------------------------------------------------------------

    fn insert(&mut self, feature: Feature, sequence: u64) -> Option<ClusterId> {
        let Some(&position) = feature.geometry.representative_position() else {
            trace!(id = feature.id.0, "[cluster::add_feature] skipping feature without a position");
            return None;
        };
        let pixel = self.projection.project(&position, self.options.zoom);
        if !pixel.is_finite() {
            trace!(id = feature.id.0, "[cluster::add_feature] skipping feature with unprojectable position");
            return None;
        }

        let cluster = self.place(feature.id, pixel, &position);
        self.features.insert(feature.id, Entry { feature, sequence, position, pixel, cluster });
        Some(cluster)
    }

    /// Join the nearest cluster in range, or open a new one.
    fn place(&mut self, feature: FeatureId, pixel: PixelPoint, position: &Position) -> ClusterId {
        match self.nearest(&pixel) {
            Some(id) => {
                let slot = id.0 as usize;
                let Some(cluster) = self.clusters[slot].as_mut() else { return self.open(feature, pixel, position) };
                cluster.join(feature, pixel, position);
                let cell = self.grid.cell_of(&cluster.centroid());
                if cell != self.cells[slot] {
                    self.grid.remove(self.cells[slot], id);
                    self.grid.insert(cell, id);
                    self.cells[slot] = cell;
                }
                id
            }
            None => self.open(feature, pixel, position),
        }
    }

    /// Nearest cluster whose centroid lies within `grid_size` of `pixel`;
    /// ties go to the lower id.
    fn nearest(&self, pixel: &PixelPoint) -> Option<ClusterId> {
        let radius = self.options.grid_size;
        let closer = |best: Option<(f64, ClusterId)>, id: ClusterId| {
            let Some(cluster) = self.cluster(id) else { return best };
            let distance = cluster.centroid().distance(pixel);
            if distance > radius { return best }
            match best {
                Some((d, b)) if d < distance || (d == distance && b < id) => best,
                _ => Some((distance, id)),
            }
        };

        let best = if self.options.use_grid_optimization {
            self.grid.neighborhood(self.grid.cell_of(pixel)).fold(None, closer)
        } else {
            self.clusters.iter().flatten().map(FeatureCluster::id).fold(None, closer)
        };
        best.map(|(_, id)| id)
    }

    fn open(&mut self, feature: FeatureId, pixel: PixelPoint, position: &Position) -> ClusterId {
        let cell = self.grid.cell_of(&pixel);
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                self.clusters.push(None);
                self.cells.push(cell);
                ClusterId((self.clusters.len() - 1) as u32)
            }
        };
        let slot = id.0 as usize;
        self.clusters[slot] = Some(FeatureCluster::singleton(id, feature, pixel, position));
        self.cells[slot] = cell;
        self.grid.insert(cell, id);
        self.num_clusters += 1;
        id
    }

    fn take_cluster(&mut self, id: ClusterId) -> Option<FeatureCluster> {
        let slot = id.0 as usize;
        let cluster = self.clusters.get_mut(slot)?.take()?;
        self.grid.remove(self.cells[slot], id);
        self.free.push(id);
        self.num_clusters -= 1;
        Some(cluster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{LineString, Point};

    fn flat(p: &Position, _zoom: u8) -> PixelPoint { PixelPoint::new(p.longitude, p.latitude) }

    fn organizer(grid: bool) -> ClusterOrganizer<fn(&Position, u8) -> PixelPoint> {
        let options = ClusterOptions { grid_size: 10.0, zoom: 0, use_grid_optimization: grid };
        ClusterOrganizer::with_projection(options, flat as fn(&Position, u8) -> PixelPoint)
    }

    #[test]
    fn nearby_points_share_a_cluster() {
        for grid in [true, false] {
            let mut organizer = organizer(grid);
            let a = organizer.add_feature(Feature::new(1, Point::new(0.0, 0.0)));
            let b = organizer.add_feature(Feature::new(2, Point::new(5.0, 0.0)));
            let c = organizer.add_feature(Feature::new(3, Point::new(50.0, 0.0)));
            assert_eq!(a, b);
            assert_ne!(a, c);
            assert_eq!(organizer.num_clusters(), 2);
            assert_eq!(organizer.cluster_of(FeatureId(2)).map(|c| c.centroid()), Some(PixelPoint::new(2.5, 0.0)));
        }
    }

    #[test]
    fn join_radius_is_inclusive() {
        let mut organizer = organizer(true);
        let a = organizer.add_feature(Feature::new(1, Point::new(0.0, 0.0)));
        let b = organizer.add_feature(Feature::new(2, Point::new(10.0, 0.0)));
        assert_eq!(a, b);
    }

    #[test]
    fn joins_the_nearest_cluster() {
        let mut organizer = organizer(false);
        let left = organizer.add_feature(Feature::new(1, Point::new(0.0, 0.0))).unwrap();
        let right = organizer.add_feature(Feature::new(2, Point::new(15.0, 0.0))).unwrap();
        assert_ne!(left, right);
        assert_eq!(organizer.add_feature(Feature::new(3, Point::new(9.0, 0.0))), Some(right));
    }

    #[test]
    fn line_strings_cluster_by_first_position() {
        let mut organizer = organizer(true);
        organizer.add_feature(Feature::new(1, Point::new(0.0, 0.0)));
        let line = LineString::from_coords(&[[1.0, 1.0], [500.0, 500.0]]);
        assert_eq!(organizer.add_feature(Feature::new(2, line)), Some(ClusterId(0)));
    }

    #[test]
    fn features_without_positions_are_not_tracked() {
        let mut organizer = organizer(true);
        assert_eq!(organizer.add_feature(Feature::new(1, Point::empty())), None);
        assert_eq!(organizer.num_features(), 0);
        assert_eq!(organizer.num_clusters(), 0);
    }

    #[test]
    fn removal_dissolves_and_reclusters() {
        let mut organizer = organizer(true);
        organizer.add_feature(Feature::new(1, Point::new(0.0, 0.0)));
        organizer.add_feature(Feature::new(2, Point::new(8.0, 0.0)));
        organizer.add_feature(Feature::new(3, Point::new(16.0, 0.0)));
        // Centroid of 1+2 is 4, so 3 (12 away) starts its own cluster.
        assert_eq!(organizer.num_clusters(), 2);

        let removed = organizer.remove_feature(FeatureId(1)).unwrap();
        assert_eq!(removed.id, FeatureId(1));
        // 2 is re-added and joins 3.
        assert_eq!(organizer.num_clusters(), 1);
        assert_eq!(organizer.cluster_of(FeatureId(2)).unwrap().len(), 2);
        assert!(organizer.remove_feature(FeatureId(1)).is_none());
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut organizer = organizer(true);
        organizer.add_feature(Feature::new(1, Point::new(0.0, 0.0)));
        organizer.add_feature(Feature::new(2, Point::new(100.0, 0.0)));
        organizer.remove_feature(FeatureId(1));
        assert_eq!(organizer.add_feature(Feature::new(3, Point::new(200.0, 0.0))), Some(ClusterId(0)));
        assert_eq!(organizer.clusters().count(), 2);
    }

    #[test]
    fn re_adding_an_id_replaces_the_feature() {
        let mut organizer = organizer(true);
        organizer.add_feature(Feature::new(1, Point::new(0.0, 0.0)));
        organizer.add_feature(Feature::new(1, Point::new(100.0, 0.0)));
        assert_eq!(organizer.num_features(), 1);
        assert_eq!(organizer.num_clusters(), 1);
        assert_eq!(organizer.cluster_of(FeatureId(1)).unwrap().centroid(), PixelPoint::new(100.0, 0.0));
        let stored = organizer.feature(FeatureId(1)).unwrap();
        assert_eq!(stored.geometry, Point::new(100.0, 0.0).into());
        assert!(organizer.feature(FeatureId(2)).is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut organizer = organizer(true);
        organizer.add_feature(Feature::new(1, Point::new(0.0, 0.0)));
        organizer.reset();
        assert_eq!(organizer.num_features(), 0);
        assert_eq!(organizer.num_clusters(), 0);
        assert_eq!(organizer.grid.num_indexed(), 0);
    }

    #[test]
    fn zoom_change_reclusters() {
        let mut organizer: ClusterOrganizer = ClusterOrganizer::new(ClusterOptions::default());
        organizer.add_feature(Feature::new(1, Point::new(0.0, 0.0)));
        organizer.add_feature(Feature::new(2, Point::new(10.0, 0.0)));
        assert_eq!(organizer.num_clusters(), 1);

        // 10 degrees is ~7 px at zoom 0 and ~7000 px at zoom 10.
        organizer.set_zoom(10);
        assert_eq!(organizer.zoom(), 10);
        assert_eq!(organizer.num_features(), 2);
        assert_eq!(organizer.num_clusters(), 2);

        organizer.set_zoom(0);
        assert_eq!(organizer.num_clusters(), 1);
    }

    #[test]
    fn grid_and_linear_modes_agree() {
        let points = [(0.0, 0.0), (3.0, 4.0), (30.0, 30.0), (33.0, 29.0), (-40.0, 12.0), (7.0, -6.0), (31.0, 35.0)];
        let mut gridded = organizer(true);
        let mut linear = organizer(false);
        for (i, &(x, y)) in points.iter().enumerate() {
            let a = gridded.add_feature(Feature::new(i as u64, Point::new(x, y)));
            let b = linear.add_feature(Feature::new(i as u64, Point::new(x, y)));
            assert_eq!(a, b, "point {i}");
        }
    }

    #[test]
    fn grid_index_follows_moving_centroids() {
        let mut organizer = organizer(true);
        organizer.add_feature(Feature::new(1, Point::new(9.0, 0.0)));
        organizer.add_feature(Feature::new(2, Point::new(11.0, 0.0)));
        assert_eq!(organizer.grid.num_indexed(), 1);
        assert_eq!(organizer.cells[0], organizer.grid.cell_of(&PixelPoint::new(10.0, 0.0)));
    }
}
