use crate::grid::{LayerList, VolumeGrid};
use crate::pieces::Piece;
use crate::types::{Progress, ShapeKind, BOARD_HEIGHT};

/// Read-only copy of everything a host needs to draw one frame.
///
/// The grid is a copy, so the host can hold a snapshot while the game moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub grid: VolumeGrid,
    pub active: Option<Piece>,
    pub next: Piece,
    /// Anchor layer where the active piece would come to rest
    pub landing_y: Option<i32>,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub paused: bool,
    pub game_over: bool,
    pub message: Option<&'static str>,
    pub clearing_layers: LayerList,
    pub tick_interval_ms: u32,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid.clear();
        self.active = None;
        self.next = Piece::new(ShapeKind::I);
        self.landing_y = None;
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.paused = false;
        self.game_over = false;
        self.message = None;
        self.clearing_layers.clear();
        self.tick_interval_ms = 0;
        self.episode_id = 0;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    pub fn progress(&self) -> Progress {
        Progress {
            level: self.level,
            score: self.score,
            lines_cleared: self.lines_cleared,
        }
    }

    /// Whether layer `y` is currently highlighted as cleared
    pub fn is_clearing(&self, y: usize) -> bool {
        y < BOARD_HEIGHT && self.clearing_layers.contains(&y)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: VolumeGrid::empty(),
            active: None,
            next: Piece::new(ShapeKind::I),
            landing_y: None,
            score: 0,
            level: 1,
            lines_cleared: 0,
            paused: false,
            game_over: false,
            message: None,
            clearing_layers: LayerList::new(),
            tick_interval_ms: 0,
            episode_id: 0,
        };
        s.clear();
        s
    }
}
