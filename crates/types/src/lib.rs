//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the game core, the session
//! runtime and the terminal host alike. Serde support is behind the `serde`
//! feature.
//!
//! # Play Volume
//!
//! The volume is addressed as `(x, y, z)`:
//!
//! - **x**: 0..10, left to right
//! - **y**: 0..20, layer index, 0 is the floor
//! - **z**: 0..10, front to back
//!
//! New pieces are anchored at the top-center: `(5, 19, 5)`.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Host frame interval (~60 FPS) |
//! | `BASE_TICK_MS` | 1200 | Gravity interval before the level term |
//! | `TICK_STEP_MS` | 90 | Gravity speed-up per level |
//! | `MIN_TICK_MS` | 250 | Gravity interval floor |
//! | `CLEAR_HIGHLIGHT_MS` | 400 | Cleared-layer highlight duration |
//! | `MESSAGE_MS` | 2000 | Transient message duration |
//!
//! # Examples
//!
//! ```
//! use voxtris_types::{Axis, Command, ShapeKind, BOARD_HEIGHT};
//!
//! assert_eq!(Command::from_str("rotateX"), Some(Command::RotateX));
//! assert_eq!(Command::RotateX.axis(), Some(Axis::X));
//! assert_eq!(ShapeKind::from_str("cube"), Some(ShapeKind::Cube));
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;
use std::ops::Add;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Play volume width in cells (x axis)
pub const BOARD_WIDTH: usize = 10;

/// Play volume height in layers (y axis)
pub const BOARD_HEIGHT: usize = 20;

/// Play volume depth in cells (z axis)
pub const BOARD_DEPTH: usize = 10;

/// Number of cells in one horizontal layer
pub const LAYER_SIZE: usize = BOARD_WIDTH * BOARD_DEPTH;

/// Number of cells in the whole volume
pub const BOARD_VOLUME: usize = LAYER_SIZE * BOARD_HEIGHT;

/// Largest number of cells in any catalog shape (the cube)
pub const MAX_PIECE_CELLS: usize = 8;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval before the per-level speed-up is applied
pub const BASE_TICK_MS: u32 = 1200;

/// Gravity speed-up per level
pub const TICK_STEP_MS: u32 = 90;

/// Gravity interval floor
pub const MIN_TICK_MS: u32 = 250;

/// How long cleared layers stay highlighted
pub const CLEAR_HIGHLIGHT_MS: u32 = 400;

/// How long transient messages (perfect clear, fresh run) stay up
pub const MESSAGE_MS: u32 = 2000;

/// Points per cleared layer, multiplied by the level
pub const LAYER_SCORE: u32 = 100;

/// Cleared layers needed per level
pub const LAYERS_PER_LEVEL: u32 = 5;

/// Layers cleared by a single lock that count as a full-volume clear
pub const FULL_VOLUME_CLEAR: usize = 5;

/// An integer position or offset in the play volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0, 0, 0);
    pub const DOWN: Vec3 = Vec3::new(0, -1, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Rotation axis for a 90° piece rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Material tag carried by occupied cells, as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// A cell of the play volume
///
/// - `None`: empty
/// - `Some(Color)`: occupied by a locked piece of that color
pub type Cell = Option<Color>;

/// The catalog shapes
///
/// - **I**: four in a row
/// - **L**: corner with one cell raised out of the floor plane
/// - **T**: three in a row with a stub
/// - **S**: staggered pair of pairs
/// - **Cube**: 2x2x2 block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeKind {
    I,
    L,
    T,
    S,
    Cube,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::I,
        ShapeKind::L,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Cube,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// ```
    /// use voxtris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("CUBE"), Some(ShapeKind::Cube));
    /// assert_eq!(ShapeKind::from_str("o"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "l" => Some(ShapeKind::L),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "cube" => Some(ShapeKind::Cube),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::L => "L",
            ShapeKind::T => "T",
            ShapeKind::S => "S",
            ShapeKind::Cube => "Cube",
        }
    }
}

/// Discrete, already-decoded player commands
///
/// Reset is deliberately not a command: it is a host-level operation that
/// stays available after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Command {
    /// x - 1
    MoveLeft,
    /// x + 1
    MoveRight,
    /// z - 1
    MoveForward,
    /// z + 1
    MoveBack,
    RotateX,
    RotateY,
    RotateZ,
    /// Drop to the resting position and lock immediately
    HardDrop,
    TogglePause,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::MoveForward,
        Command::MoveBack,
        Command::RotateX,
        Command::RotateY,
        Command::RotateZ,
        Command::HardDrop,
        Command::TogglePause,
    ];

    /// Parse command from string (case-insensitive)
    ///
    /// ```
    /// use voxtris_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("HARDDROP"), Some(Command::HardDrop));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "moveforward" => Some(Command::MoveForward),
            "moveback" => Some(Command::MoveBack),
            "rotatex" => Some(Command::RotateX),
            "rotatey" => Some(Command::RotateY),
            "rotatez" => Some(Command::RotateZ),
            "harddrop" => Some(Command::HardDrop),
            "togglepause" => Some(Command::TogglePause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveForward => "moveForward",
            Command::MoveBack => "moveBack",
            Command::RotateX => "rotateX",
            Command::RotateY => "rotateY",
            Command::RotateZ => "rotateZ",
            Command::HardDrop => "hardDrop",
            Command::TogglePause => "togglePause",
        }
    }

    /// Translation applied by movement commands
    pub fn offset(&self) -> Option<Vec3> {
        match self {
            Command::MoveLeft => Some(Vec3::new(-1, 0, 0)),
            Command::MoveRight => Some(Vec3::new(1, 0, 0)),
            Command::MoveForward => Some(Vec3::new(0, 0, -1)),
            Command::MoveBack => Some(Vec3::new(0, 0, 1)),
            _ => None,
        }
    }

    /// Axis used by rotation commands
    pub fn axis(&self) -> Option<Axis> {
        match self {
            Command::RotateX => Some(Axis::X),
            Command::RotateY => Some(Axis::Y),
            Command::RotateZ => Some(Axis::Z),
            _ => None,
        }
    }
}

/// Persisted run progress
///
/// Serialized as `{"level": .., "score": .., "linesCleared": ..}`. Missing
/// fields fall back to their defaults individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Progress {
    pub level: u32,
    pub score: u32,
    pub lines_cleared: u32,
}

impl Progress {
    /// Clamp values that cannot occur in a run (level is at least 1).
    pub fn sanitized(self) -> Self {
        Self {
            level: self.level.max(1),
            ..self
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            level: 1,
            score: 0,
            lines_cleared: 0,
        }
    }
}
