use ahash::AHashMap;
use smallvec::SmallVec;

use crate::cluster::cluster::ClusterId;
use crate::cluster::projection::PixelPoint;

/// (row, column) of a grid cell.
pub(crate) type Cell = (i64, i64);

/// Spatial hash of clusters keyed by the cell holding their centroid.
#[derive(Debug, Clone)]
pub(crate) struct Grid {
    cell_size: f64,
    cells: AHashMap<Cell, SmallVec<[ClusterId; 4]>>,
}

impl Grid {
    pub(crate) fn new(cell_size: f64) -> Self { Self { cell_size, cells: AHashMap::new() } }

    #[inline]
    pub(crate) fn cell_of(&self, point: &PixelPoint) -> Cell {
        ((point.y / self.cell_size).floor() as i64, (point.x / self.cell_size).floor() as i64)
    }

    pub(crate) fn insert(&mut self, cell: Cell, cluster: ClusterId) {
        self.cells.entry(cell).or_default().push(cluster);
    }

    pub(crate) fn remove(&mut self, cell: Cell, cluster: ClusterId) {
        if let Some(list) = self.cells.get_mut(&cell) {
            list.retain(|&mut id| id != cluster);
            if list.is_empty() { self.cells.remove(&cell); }
        }
    }

    /// Clusters indexed in the 3×3 block of cells around `cell`.
    pub(crate) fn neighborhood(&self, (row, col): Cell) -> impl Iterator<Item = ClusterId> + '_ {
        (row - 1..=row + 1)
            .flat_map(move |r| (col - 1..=col + 1).map(move |c| (r, c)))
            .filter_map(|cell| self.cells.get(&cell))
            .flat_map(|list| list.iter().copied())
    }

    #[inline] pub(crate) fn clear(&mut self) { self.cells.clear() }

    #[cfg(test)]
    pub(crate) fn num_indexed(&self) -> usize { self.cells.values().map(|list| list.len()).sum() }
}
