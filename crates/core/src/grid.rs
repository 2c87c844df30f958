//! Volume grid - the 3D occupancy array
//!
//! The grid is a `BOARD_HEIGHT x BOARD_DEPTH x BOARD_WIDTH` volume stored as a
//! flat, layer-major array (`[y][z][x]`), so every horizontal layer is one
//! contiguous slice. Layer 0 is the floor.
//!
//! Transformations (`merge`, `compact`) return a new grid and leave `self`
//! untouched, so a snapshot held by a reader stays stable while the game
//! computes the next state.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, BOARD_DEPTH, BOARD_HEIGHT, BOARD_VOLUME, BOARD_WIDTH, LAYER_SIZE};

/// Layer indices, ascending. At most every layer of the volume.
pub type LayerList = ArrayVec<usize, BOARD_HEIGHT>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VolumeGrid {
    /// Flat array of cells, index `(y * DEPTH + z) * WIDTH + x`
    cells: Box<[Cell]>,
}

impl VolumeGrid {
    /// Create an empty volume
    pub fn empty() -> Self {
        Self {
            cells: vec![None; BOARD_VOLUME].into_boxed_slice(),
        }
    }

    pub fn new() -> Self {
        Self::empty()
    }

    #[inline(always)]
    fn index(x: i32, y: i32, z: i32) -> Option<usize> {
        if !Self::in_bounds(x, y, z) {
            return None;
        }
        Some(((y as usize) * BOARD_DEPTH + z as usize) * BOARD_WIDTH + x as usize)
    }

    /// Whether `(x, y, z)` lies inside the play volume
    #[inline]
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        (0..BOARD_WIDTH as i32).contains(&x)
            && (0..BOARD_HEIGHT as i32).contains(&y)
            && (0..BOARD_DEPTH as i32).contains(&z)
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    pub fn depth(&self) -> usize {
        BOARD_DEPTH
    }

    /// Get cell at `(x, y, z)`, or `None` when out of bounds
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Cell> {
        Self::index(x, y, z).map(|idx| self.cells[idx])
    }

    /// Set cell at `(x, y, z)`. Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, z: i32, cell: Cell) -> bool {
        match Self::index(x, y, z) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether the cell is occupied.
    ///
    /// Callers validate bounds first; placement checks do.
    pub fn is_occupied(&self, x: i32, y: i32, z: i32) -> bool {
        debug_assert!(
            Self::in_bounds(x, y, z),
            "is_occupied out of bounds: ({x}, {y}, {z})"
        );
        matches!(self.get(x, y, z), Some(Some(_)))
    }

    /// One horizontal layer as a `[z][x]` slice
    pub fn layer(&self, y: usize) -> &[Cell] {
        let start = y * LAYER_SIZE;
        &self.cells[start..start + LAYER_SIZE]
    }

    pub fn is_layer_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT {
            return false;
        }
        self.layer(y).iter().all(|cell| cell.is_some())
    }

    pub fn is_layer_empty(&self, y: usize) -> bool {
        y < BOARD_HEIGHT && self.layer(y).iter().all(|cell| cell.is_none())
    }

    /// Indices of every full layer, ascending
    pub fn scan_full_layers(&self) -> LayerList {
        (0..BOARD_HEIGHT)
            .filter(|&y| self.is_layer_full(y))
            .collect()
    }

    /// Write the piece's cells into a copy of the grid.
    ///
    /// Cells outside the vertical range are dropped, which lets a piece that
    /// pokes above the volume merge its in-range part. Nothing is ever written
    /// out of bounds.
    pub fn merge(&self, piece: &Piece) -> VolumeGrid {
        let mut merged = self.clone();
        for cell in piece.world_cells() {
            if !(0..BOARD_HEIGHT as i32).contains(&cell.y) {
                continue;
            }
            merged.set(cell.x, cell.y, cell.z, Some(piece.color));
        }
        merged
    }

    /// Remove the given layers and let everything above fall into the gaps.
    ///
    /// Equivalent to filtering the cleared layers out of the stack and padding
    /// fresh empty layers on top until the height is restored. Indices out of
    /// range or repeated are ignored.
    pub fn compact(&self, cleared: &[usize]) -> VolumeGrid {
        let mut compacted = VolumeGrid::empty();
        let mut write_y = 0usize;

        // Scan bottom to top, copying surviving layers down.
        for read_y in 0..BOARD_HEIGHT {
            if cleared.contains(&read_y) {
                continue;
            }
            let dst = write_y * LAYER_SIZE;
            compacted.cells[dst..dst + LAYER_SIZE].copy_from_slice(self.layer(read_y));
            write_y += 1;
        }

        // Layers from write_y up are already empty.
        compacted
    }

    /// Height of the column at `(x, z)`: one above its highest occupied cell,
    /// 0 for an empty column.
    pub fn column_height(&self, x: i32, z: i32) -> usize {
        (0..BOARD_HEIGHT as i32)
            .rev()
            .find(|&y| matches!(self.get(x, y, z), Some(Some(_))))
            .map_or(0, |y| y as usize + 1)
    }

    /// Highest occupied cell of the column at `(x, z)`
    pub fn column_top(&self, x: i32, z: i32) -> Option<(usize, crate::types::Color)> {
        (0..BOARD_HEIGHT as i32).rev().find_map(|y| match self.get(x, y, z) {
            Some(Some(color)) => Some((y as usize, color)),
            _ => None,
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Read-only view of the flat cell array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy into nested `[y][z][x]` vectors
    pub fn to_layers(&self) -> Vec<Vec<Vec<Cell>>> {
        (0..BOARD_HEIGHT)
            .map(|y| self.layer(y).chunks(BOARD_WIDTH).map(<[Cell]>::to_vec).collect())
            .collect()
    }

    /// Fill a whole layer with one color (test and tooling helper)
    pub fn fill_layer(&mut self, y: usize, cell: Cell) {
        if y >= BOARD_HEIGHT {
            return;
        }
        let start = y * LAYER_SIZE;
        for c in &mut self.cells[start..start + LAYER_SIZE] {
            *c = cell;
        }
    }

    /// Clear the entire volume
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = None;
        }
    }
}

impl Default for VolumeGrid {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    const RED: Cell = Some(Color(0xff0000));

    #[test]
    fn test_index_calculation() {
        assert_eq!(VolumeGrid::index(0, 0, 0), Some(0));
        assert_eq!(VolumeGrid::index(9, 0, 0), Some(9));
        assert_eq!(VolumeGrid::index(0, 0, 1), Some(10));
        assert_eq!(VolumeGrid::index(0, 1, 0), Some(100));
        assert_eq!(VolumeGrid::index(9, 19, 9), Some(1999));
        assert_eq!(VolumeGrid::index(-1, 0, 0), None);
        assert_eq!(VolumeGrid::index(0, 20, 0), None);
        assert_eq!(VolumeGrid::index(0, 0, 10), None);
    }

    #[test]
    fn test_layer_slices_are_contiguous() {
        let mut grid = VolumeGrid::new();
        grid.set(3, 2, 4, RED);
        assert_eq!(grid.layer(2)[4 * BOARD_WIDTH + 3], RED);
        assert!(grid.layer(1).iter().all(Option::is_none));
    }

    #[test]
    fn test_compact_keeps_source_untouched() {
        let mut grid = VolumeGrid::new();
        grid.fill_layer(0, RED);
        let before = grid.clone();
        let compacted = grid.compact(&[0]);
        assert_eq!(grid, before);
        assert!(compacted.is_layer_empty(0));
    }

    #[test]
    fn test_compact_ignores_out_of_range_indices() {
        let mut grid = VolumeGrid::new();
        grid.set(0, 1, 0, RED);
        let compacted = grid.compact(&[BOARD_HEIGHT + 3]);
        assert_eq!(compacted, grid);
    }

    #[test]
    fn test_column_height() {
        let mut grid = VolumeGrid::new();
        assert_eq!(grid.column_height(2, 2), 0);
        grid.set(2, 4, 2, RED);
        grid.set(2, 1, 2, RED);
        assert_eq!(grid.column_height(2, 2), 5);
        assert_eq!(grid.column_top(2, 2), Some((4, Color(0xff0000))));
    }

    #[test]
    fn test_to_layers_shape() {
        let layers = VolumeGrid::new().to_layers();
        assert_eq!(layers.len(), BOARD_HEIGHT);
        assert!(layers.iter().all(|l| l.len() == BOARD_DEPTH));
        assert!(layers.iter().flatten().all(|row| row.len() == BOARD_WIDTH));
    }
}
