use std::fmt;

use serde::Serialize;

use crate::cluster::projection::PixelPoint;
use crate::geom::{FeatureId, Position};

/// Slot index of a cluster inside its organizer. Ids of dissolved clusters
/// are reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClusterId(pub u32);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ClusterId({})", self.0) }
}

/// A group of features whose pixel positions lie near a shared centroid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCluster {
    id: ClusterId,
    members: Vec<FeatureId>,
    centroid: PixelPoint,
    center: Position,
    #[serde(skip)]
    pixel_sum: (f64, f64),
    #[serde(skip)]
    position_sum: (f64, f64),
}

impl FeatureCluster {
    pub(crate) fn singleton(id: ClusterId, feature: FeatureId, pixel: PixelPoint, position: &Position) -> Self {
        Self {
            id,
            members: vec![feature],
            centroid: pixel,
            center: Position::new(position.longitude, position.latitude),
            pixel_sum: (pixel.x, pixel.y),
            position_sum: (position.longitude, position.latitude),
        }
    }

    #[inline] pub fn id(&self) -> ClusterId { self.id }

    /// Member ids in join order.
    #[inline] pub fn members(&self) -> &[FeatureId] { &self.members }

    #[inline] pub fn len(&self) -> usize { self.members.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.members.is_empty() }

    #[inline] pub fn contains(&self, feature: FeatureId) -> bool { self.members.contains(&feature) }

    /// Mean pixel position of the members.
    #[inline] pub fn centroid(&self) -> PixelPoint { self.centroid }

    /// Mean geographic position of the members.
    #[inline] pub fn center(&self) -> Position { self.center }

    /// Add a member and update the running means.
    pub(crate) fn join(&mut self, feature: FeatureId, pixel: PixelPoint, position: &Position) {
        self.members.push(feature);
        self.pixel_sum.0 += pixel.x;
        self.pixel_sum.1 += pixel.y;
        self.position_sum.0 += position.longitude;
        self.position_sum.1 += position.latitude;

        let n = self.members.len() as f64;
        self.centroid = PixelPoint::new(self.pixel_sum.0 / n, self.pixel_sum.1 / n);
        self.center = Position::new(self.position_sum.0 / n, self.position_sum.1 / n);
    }

    /// Take the member list, leaving the cluster empty.
    pub(crate) fn dissolve(self) -> Vec<FeatureId> { self.members }
}
