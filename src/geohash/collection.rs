use ahash::AHashSet;
use tracing::debug;

use crate::geohash::cache::GeohashCache;
use crate::geohash::hash::{Direction, Geohash};
use crate::geom::BoundingBox;

/// Upper bound on steps along either axis of a regeneration walk.
const MAX_WALK: usize = 1024;

/// (minimum box area in deg², precision), checked top to bottom.
const PRECISION_BY_AREA: [(f64, usize); 6] = [
    (4000.0, 1),
    (120.0, 2),
    (4.0, 3),
    (0.12, 4),
    (0.004, 5),
    (0.00012, 6),
];

/// Geohash precision used to tile a box of `area` square degrees.
pub fn precision_for_area(area: f64) -> usize {
    PRECISION_BY_AREA.iter()
        .find(|(threshold, _)| area >= *threshold)
        .map_or(7, |&(_, precision)| precision)
}

/// Cells entering and leaving a collection after a bounds change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellChanges {
    pub added: Vec<Geohash>,
    pub removed: Vec<Geohash>,
}

impl CellChanges {
    #[inline] pub fn is_empty(&self) -> bool { self.added.is_empty() && self.removed.is_empty() }
}

/// The set of geohash cells covering a bounding box, kept in step with every
/// change to the box.
#[derive(Debug, Clone)]
pub struct GeohashCollection {
    bounds: BoundingBox,
    precision: usize,
    /// Cells in generation order: rows from north to south, alternating
    /// east and west.
    cells: Vec<Geohash>,
    members: AHashSet<Geohash>,
    cache: GeohashCache,
}

impl GeohashCollection {
    pub fn new(bounds: BoundingBox) -> Self {
        let mut collection = Self {
            bounds,
            precision: 1,
            cells: Vec::new(),
            members: AHashSet::new(),
            cache: GeohashCache::default(),
        };
        collection.regenerate();
        collection
    }

    #[inline] pub fn bounds(&self) -> &BoundingBox { &self.bounds }
    #[inline] pub fn precision(&self) -> usize { self.precision }
    #[inline] pub fn cells(&self) -> &[Geohash] { &self.cells }
    #[inline] pub fn len(&self) -> usize { self.cells.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.cells.is_empty() }
    #[inline] pub fn contains(&self, hash: &Geohash) -> bool { self.members.contains(hash) }

    pub fn set_bounds(&mut self, bounds: BoundingBox) -> CellChanges {
        self.bounds = bounds;
        self.regenerate()
    }

    pub fn set_x_min(&mut self, value: f64) -> CellChanges {
        self.bounds.set_x_min(value);
        self.regenerate()
    }

    pub fn set_y_min(&mut self, value: f64) -> CellChanges {
        self.bounds.set_y_min(value);
        self.regenerate()
    }

    pub fn set_x_max(&mut self, value: f64) -> CellChanges {
        self.bounds.set_x_max(value);
        self.regenerate()
    }

    pub fn set_y_max(&mut self, value: f64) -> CellChanges {
        self.bounds.set_y_max(value);
        self.regenerate()
    }

    // ----------------------------------------------------------------
    // Regeneration
    // ----------------------------------------------------------------

    /// Rebuild the cell grid from the current bounds and diff it against the
    /// previous members.
    fn regenerate(&mut self) -> CellChanges {
        let [x_min, y_min, x_max, y_max] = self.bounds.bounds();
        let precision = precision_for_area(self.bounds.area().abs());

        let sw = self.cache.encode(x_min, y_min, precision);
        let nw = self.cache.encode(x_min, y_max, precision);
        let ne = self.cache.encode(x_max, y_max, precision);

        let rows = self.walk_length(&sw, &nw, Direction::North);
        let columns = self.walk_length(&nw, &ne, Direction::East);

        let mut cells = Vec::with_capacity(rows * columns);
        let mut cell = nw;
        let mut direction = Direction::East;
        for row in 0..rows {
            for column in 0..columns {
                cells.push(cell.clone());
                if column + 1 < columns { cell = self.step(&cell, direction) }
            }
            if row + 1 < rows {
                cell = self.step(&cell, Direction::South);
                direction = direction.opposite();
            }
        }

        let members: AHashSet<Geohash> = cells.iter().cloned().collect();
        let changes = CellChanges {
            added: cells.iter().filter(|c| !self.members.contains(*c)).cloned().collect(),
            removed: self.cells.iter().filter(|c| !members.contains(*c)).cloned().collect(),
        };

        debug!(
            precision, rows, columns,
            added = changes.added.len(),
            removed = changes.removed.len(),
            "[geohash::collection] regenerated cells"
        );

        self.precision = precision;
        self.cells = cells;
        self.members = members;
        changes
    }

    /// Number of cells from `from` to `to` inclusive, walking in `direction`.
    fn walk_length(&mut self, from: &Geohash, to: &Geohash, direction: Direction) -> usize {
        let mut cell = from.clone();
        let mut length = 1;
        while &cell != to && length < MAX_WALK {
            cell = self.step(&cell, direction);
            length += 1;
        }
        length
    }

    /// Adjacent cell through the cache. Identifiers here are always
    /// encoder output, so adjacency cannot fail; if it did, stay in place.
    fn step(&mut self, cell: &Geohash, direction: Direction) -> Geohash {
        match cell.adjacent(direction) {
            Ok(next) => self.cache.intern(next),
            Err(_) => cell.clone(),
        }
    }
}
