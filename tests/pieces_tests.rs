//! Pieces module tests - catalog, rotation and placement

use rand::rngs::StdRng;
use rand::SeedableRng;

use voxtris::core::{
    can_place, drop_distance, in_bounds, rotate_cell, shape_cells, shape_color, spawn, Piece,
    VolumeGrid, SPAWN_ANCHOR,
};
use voxtris::types::{Axis, Color, ShapeKind, Vec3, BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH};

// ============== Catalog Tests ==============

#[test]
fn test_catalog_colors() {
    assert_eq!(shape_color(ShapeKind::I).to_string(), "#38bdf8");
    assert_eq!(shape_color(ShapeKind::L).to_string(), "#f472b6");
    assert_eq!(shape_color(ShapeKind::T).to_string(), "#c084fc");
    assert_eq!(shape_color(ShapeKind::S).to_string(), "#34d399");
    assert_eq!(shape_color(ShapeKind::Cube).to_string(), "#facc15");
}

#[test]
fn test_every_shape_fits_empty_volume_at_spawn() {
    let grid = VolumeGrid::empty();
    for kind in ShapeKind::ALL {
        let piece = Piece::new(kind);
        assert_eq!(piece.anchor, SPAWN_ANCHOR);
        assert!(can_place(&grid, &piece, Vec3::ZERO), "{:?}", kind);
    }
}

#[test]
fn test_spawn_picks_from_catalog() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let piece = spawn(None, &mut rng);
        assert!(ShapeKind::ALL.contains(&piece.kind));
        assert_eq!(piece.cells.as_slice(), shape_cells(piece.kind));
        assert_eq!(piece.color, shape_color(piece.kind));
    }

    let cube = spawn(Some(ShapeKind::Cube), &mut rng);
    assert_eq!(cube.kind, ShapeKind::Cube);
    assert_eq!(cube.cells.len(), 8);
}

// ============== Rotation Tests ==============

#[test]
fn test_rotation_formulas() {
    let c = Vec3::new(1, 2, 3);
    assert_eq!(rotate_cell(c, Axis::X), Vec3::new(1, -3, 2));
    assert_eq!(rotate_cell(c, Axis::Y), Vec3::new(3, 2, -1));
    assert_eq!(rotate_cell(c, Axis::Z), Vec3::new(-2, 1, 3));
}

#[test]
fn test_four_turns_restore_every_shape() {
    for kind in ShapeKind::ALL {
        for axis in Axis::ALL {
            let piece = Piece::new(kind);
            let turned = piece.rotated(axis).rotated(axis).rotated(axis).rotated(axis);
            assert_eq!(turned.cells, piece.cells, "{:?} about {:?}", kind, axis);
            assert_eq!(turned.anchor, piece.anchor);
        }
    }
}

#[test]
fn test_rotation_keeps_cell_count() {
    for kind in ShapeKind::ALL {
        let piece = Piece::new(kind);
        for axis in Axis::ALL {
            assert_eq!(piece.rotated(axis).cells.len(), piece.cells.len());
        }
    }
}

// ============== Placement Tests ==============

#[test]
fn test_in_bounds_edges() {
    assert!(in_bounds(Vec3::new(0, 0, 0)));
    assert!(in_bounds(Vec3::new(
        BOARD_WIDTH as i32 - 1,
        BOARD_HEIGHT as i32 - 1,
        BOARD_DEPTH as i32 - 1
    )));
    assert!(!in_bounds(Vec3::new(-1, 0, 0)));
    assert!(!in_bounds(Vec3::new(0, BOARD_HEIGHT as i32, 0)));
    assert!(!in_bounds(Vec3::new(0, 0, BOARD_DEPTH as i32)));
}

#[test]
fn test_can_place_rejects_walls_and_occupied_cells() {
    let mut grid = VolumeGrid::empty();
    let probe = Piece::with_cells(ShapeKind::I, Color(1), &[Vec3::ZERO], Vec3::new(0, 5, 0));

    assert!(!can_place(&grid, &probe, Vec3::new(-1, 0, 0)));
    assert!(!can_place(&grid, &probe, Vec3::new(0, 0, -1)));
    assert!(can_place(&grid, &probe, Vec3::new(1, 0, 1)));

    grid.set(1, 5, 1, Some(Color(2)));
    assert!(!can_place(&grid, &probe, Vec3::new(1, 0, 1)));
}

#[test]
fn test_drop_distance_stops_on_stack() {
    let mut grid = VolumeGrid::empty();
    let probe = Piece::with_cells(ShapeKind::I, Color(1), &[Vec3::ZERO], Vec3::new(3, 10, 3));
    assert_eq!(drop_distance(&grid, &probe), 10);

    grid.set(3, 4, 3, Some(Color(2)));
    assert_eq!(drop_distance(&grid, &probe), 5);
}
