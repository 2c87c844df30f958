//! Pieces module - shape catalog and 3D rotation
//!
//! A piece is a set of integer cell offsets around an anchor. There is no
//! orientation field: rotating a piece rewrites its offsets with an exact
//! integer quarter turn, so four turns about one axis always restore the
//! original offsets.
//!
//! Every template keeps its cells at or below the anchor's layer (`y <= 0`),
//! so a piece spawned at the top layer fits the volume.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::types::{
    Axis, Color, ShapeKind, Vec3, BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH, MAX_PIECE_CELLS,
};

/// Cell offsets of one piece
pub type PieceCells = ArrayVec<Vec3, MAX_PIECE_CELLS>;

/// Anchor assigned to every newly spawned or promoted piece
pub const SPAWN_ANCHOR: Vec3 = Vec3::new(
    (BOARD_WIDTH / 2) as i32,
    BOARD_HEIGHT as i32 - 1,
    (BOARD_DEPTH / 2) as i32,
);

const fn v(x: i32, y: i32, z: i32) -> Vec3 {
    Vec3::new(x, y, z)
}

const I_CELLS: [Vec3; 4] = [v(0, 0, 0), v(1, 0, 0), v(-1, 0, 0), v(-2, 0, 0)];
const L_CELLS: [Vec3; 4] = [v(0, 0, 0), v(1, 0, 0), v(0, -1, 0), v(0, 0, 1)];
const T_CELLS: [Vec3; 4] = [v(0, 0, 0), v(1, 0, 0), v(-1, 0, 0), v(0, 0, 1)];
const S_CELLS: [Vec3; 4] = [v(0, 0, 0), v(1, 0, 0), v(0, 0, 1), v(-1, 0, 1)];
const CUBE_CELLS: [Vec3; 8] = [
    v(0, 0, 0),
    v(1, 0, 0),
    v(0, 0, 1),
    v(1, 0, 1),
    v(0, -1, 0),
    v(1, -1, 0),
    v(0, -1, 1),
    v(1, -1, 1),
];

/// Template cell offsets for a shape
pub fn shape_cells(kind: ShapeKind) -> &'static [Vec3] {
    match kind {
        ShapeKind::I => &I_CELLS,
        ShapeKind::L => &L_CELLS,
        ShapeKind::T => &T_CELLS,
        ShapeKind::S => &S_CELLS,
        ShapeKind::Cube => &CUBE_CELLS,
    }
}

/// Material color for a shape
pub fn shape_color(kind: ShapeKind) -> Color {
    match kind {
        ShapeKind::I => Color(0x38bdf8),
        ShapeKind::L => Color(0xf472b6),
        ShapeKind::T => Color(0xc084fc),
        ShapeKind::S => Color(0x34d399),
        ShapeKind::Cube => Color(0xfacc15),
    }
}

/// Pick a catalog shape uniformly at random
pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> ShapeKind {
    ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())]
}

/// Quarter turn of a single offset about `axis`
#[inline]
pub fn rotate_cell(cell: Vec3, axis: Axis) -> Vec3 {
    let Vec3 { x, y, z } = cell;
    match axis {
        Axis::X => Vec3::new(x, -z, y),
        Axis::Y => Vec3::new(z, y, -x),
        Axis::Z => Vec3::new(-y, x, z),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub color: Color,
    /// Offsets relative to `anchor`
    pub cells: PieceCells,
    /// Absolute position in the volume
    pub anchor: Vec3,
}

impl Piece {
    /// Create a piece of the given shape at the spawn anchor
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            color: shape_color(kind),
            cells: shape_cells(kind).iter().copied().collect(),
            anchor: SPAWN_ANCHOR,
        }
    }

    /// Create a piece with explicit offsets.
    ///
    /// Offsets beyond `MAX_PIECE_CELLS` are dropped.
    pub fn with_cells(kind: ShapeKind, color: Color, cells: &[Vec3], anchor: Vec3) -> Self {
        Self {
            kind,
            color,
            cells: cells.iter().copied().take(MAX_PIECE_CELLS).collect(),
            anchor,
        }
    }

    /// Absolute positions of the piece's cells
    pub fn world_cells(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.cells.iter().map(move |&offset| self.anchor + offset)
    }

    /// Copy moved by `offset`
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            anchor: self.anchor + offset,
            ..self.clone()
        }
    }

    /// Copy turned a quarter about `axis`. The anchor does not move.
    pub fn rotated(&self, axis: Axis) -> Self {
        Self {
            cells: self.cells.iter().map(|&c| rotate_cell(c, axis)).collect(),
            ..self.clone()
        }
    }

    /// Copy moved back to the spawn anchor, keeping its current offsets
    pub fn respawned(&self) -> Self {
        Self {
            anchor: SPAWN_ANCHOR,
            ..self.clone()
        }
    }

    /// Whether `other` covers the same offsets, in any order
    pub fn same_shape_as(&self, other: &Piece) -> bool {
        let mut a = self.cells.clone();
        let mut b = other.cells.clone();
        a.sort();
        b.sort();
        a == b
    }
}

/// Spawn a piece of `kind`, or of a random catalog shape when `None`
pub fn spawn<R: Rng + ?Sized>(kind: Option<ShapeKind>, rng: &mut R) -> Piece {
    Piece::new(kind.unwrap_or_else(|| random_kind(rng)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_rotate_cell_mappings() {
        let c = Vec3::new(1, 2, 3);
        assert_eq!(rotate_cell(c, Axis::X), Vec3::new(1, -3, 2));
        assert_eq!(rotate_cell(c, Axis::Y), Vec3::new(3, 2, -1));
        assert_eq!(rotate_cell(c, Axis::Z), Vec3::new(-2, 1, 3));
    }

    #[test]
    fn test_templates_have_no_duplicates() {
        for kind in ShapeKind::ALL {
            let cells = shape_cells(kind);
            for (i, a) in cells.iter().enumerate() {
                assert!(
                    !cells[i + 1..].contains(a),
                    "{} repeats offset {a}",
                    kind.as_str()
                );
            }
        }
    }

    #[test]
    fn test_templates_stay_at_or_below_anchor() {
        for kind in ShapeKind::ALL {
            assert!(shape_cells(kind).iter().all(|c| c.y <= 0));
            assert!(shape_cells(kind).len() <= MAX_PIECE_CELLS);
        }
    }

    #[test]
    fn test_spawn_anchor_is_top_center() {
        assert_eq!(SPAWN_ANCHOR, Vec3::new(5, 19, 5));
        let mut rng = StdRng::seed_from_u64(7);
        let piece = spawn(None, &mut rng);
        assert_eq!(piece.anchor, SPAWN_ANCHOR);
        assert!(ShapeKind::ALL.contains(&piece.kind));
    }

    #[test]
    fn test_rotated_leaves_anchor_and_source() {
        let piece = Piece::new(ShapeKind::L).translated(Vec3::new(0, -5, 0));
        let turned = piece.rotated(Axis::Y);
        assert_eq!(turned.anchor, piece.anchor);
        assert_eq!(piece.cells.as_slice(), shape_cells(ShapeKind::L));
        assert_ne!(turned.cells, piece.cells);
    }

    #[test]
    fn test_cube_rotation_keeps_cell_count() {
        let cube = Piece::new(ShapeKind::Cube);
        for axis in Axis::ALL {
            assert_eq!(cube.rotated(axis).cells.len(), 8);
        }
    }
}
