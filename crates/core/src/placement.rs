//! Placement rules - the single collision gate
//!
//! Translation, rotation and gravity all ask [`can_place`] before touching
//! the active piece. The checks never mutate the grid or the piece.

use crate::grid::VolumeGrid;
use crate::pieces::Piece;
use crate::types::Vec3;

/// Whether a cell position lies inside the play volume
#[inline]
pub fn in_bounds(cell: Vec3) -> bool {
    VolumeGrid::in_bounds(cell.x, cell.y, cell.z)
}

/// True iff every cell of `piece`, moved by `offset`, is in bounds and empty
pub fn can_place(grid: &VolumeGrid, piece: &Piece, offset: Vec3) -> bool {
    piece.world_cells().all(|cell| {
        let cell = cell + offset;
        in_bounds(cell) && !grid.is_occupied(cell.x, cell.y, cell.z)
    })
}

/// How many layers the piece can fall before it rests
pub fn drop_distance(grid: &VolumeGrid, piece: &Piece) -> u32 {
    let mut distance: u32 = 0;
    while can_place(grid, piece, Vec3::new(0, -(distance as i32) - 1, 0)) {
        distance += 1;
    }
    distance
}
