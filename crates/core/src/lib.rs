//! Core game logic - pure, synchronous and testable
//!
//! This crate contains the rules of the 3D falling-block game and nothing
//! else: no terminal, no timers of its own, no I/O. Hosts drive it by calling
//! operations on a [`GameState`] one at a time.
//!
//! # Module Structure
//!
//! - [`grid`]: the 10x20x10 volume, layer scan and compaction
//! - [`pieces`]: shape catalog, spawning and quarter-turn rotation about x/y/z
//! - [`placement`]: bounds/collision gate shared by every move
//! - [`scoring`]: layer points, level formula and gravity speed
//! - [`game_state`]: the run state machine (gravity, lock, clear, pause, reset)
//! - [`snapshot`]: read-only frame data for hosts
//!
//! # Game Rules
//!
//! - A piece falls one layer per gravity tick; when it cannot fall it merges
//!   into the volume.
//! - A layer is cleared when all of its `x, z` cells are occupied. Everything
//!   above falls into the gap.
//! - Each cleared layer scores `100 x level`. Every 5 layers raise the level,
//!   which shortens the gravity interval (floor 250ms).
//! - If the next piece does not fit at the spawn anchor, the run is over.
//!
//! # Example
//!
//! ```
//! use voxtris_core::GameState;
//! use voxtris_types::{Axis, Vec3};
//!
//! let mut game = GameState::new();
//! game.translate(Vec3::new(-1, 0, 0));
//! game.rotate(Axis::Y);
//! game.hard_drop();
//!
//! assert_eq!(game.grid().occupied_count() > 0, true);
//! assert!(!game.game_over());
//! ```
//!
//! # Timing
//!
//! Hosts call [`GameState::advance`] every frame with the elapsed time. It
//! runs gravity at [`GameState::tick_interval_ms`] and expires the 400ms clear
//! highlight and 2000ms transient messages.

pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod placement;
pub mod scoring;
pub mod snapshot;

pub use voxtris_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameState, LockEvent, Message, MessageKind, RunPhase};
pub use grid::{LayerList, VolumeGrid};
pub use pieces::{rotate_cell, shape_cells, shape_color, spawn, Piece, SPAWN_ANCHOR};
pub use placement::{can_place, drop_distance, in_bounds};
pub use scoring::{layer_clear_score, level_for_layers, resolve_clear, tick_interval_ms, ScoreResult};
pub use snapshot::GameSnapshot;
