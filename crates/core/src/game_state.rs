//! Game state module - the run state machine
//!
//! Ties together the grid, pieces, placement rules and scoring. It handles
//! gravity, movement, rotation, locking, layer clears, leveling and the run
//! lifecycle (running, paused, game over, reset).
//!
//! Every mutation runs to completion on `&mut self`; hosts serialize calls
//! (see the engine crate's session). Timed side effects (clear highlight,
//! transient messages, gravity) are countdowns owned by the state and driven
//! by [`GameState::advance`]. Nothing here ever fails: a move that does not
//! fit is a no-op, and a blocked spawn is the modeled game-over state.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::grid::{LayerList, VolumeGrid};
use crate::pieces::{spawn, Piece};
use crate::placement::{can_place, drop_distance};
use crate::scoring::{resolve_clear, tick_interval_ms};
use crate::snapshot::GameSnapshot;
use crate::types::{Axis, Progress, Vec3, CLEAR_HIGHLIGHT_MS, MESSAGE_MS};

/// Which message the HUD is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Paused,
    GameOver,
    FreshRun,
    PerfectClear,
}

impl MessageKind {
    pub fn text(&self) -> &'static str {
        match self {
            MessageKind::Paused => "Game paused",
            MessageKind::GameOver => "Mission failed. Restart to try again.",
            MessageKind::FreshRun => "Fresh run engaged!",
            MessageKind::PerfectClear => "Perfect clear!",
        }
    }

    /// Display time for transient messages; `None` stays until replaced
    fn duration_ms(&self) -> Option<u32> {
        match self {
            MessageKind::Paused | MessageKind::GameOver => None,
            MessageKind::FreshRun | MessageKind::PerfectClear => Some(MESSAGE_MS),
        }
    }
}

/// A message together with its own expiry countdown.
///
/// Replacing the message replaces the countdown, so an expiry can only ever
/// clear the message it was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    remaining_ms: Option<u32>,
}

impl Message {
    fn new(kind: MessageKind) -> Self {
        Self {
            kind,
            remaining_ms: kind.duration_ms(),
        }
    }

    pub fn text(&self) -> &'static str {
        self.kind.text()
    }

    pub fn remaining_ms(&self) -> Option<u32> {
        self.remaining_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    Running,
    Paused,
    GameOver,
}

/// Emitted after a piece locks (consumed by observers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub cleared_layers: LayerList,
    pub points: u32,
    pub level: u32,
    pub leveled_up: bool,
    pub full_volume_clear: bool,
    pub game_over: bool,
}

/// Complete run state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: VolumeGrid,
    active: Option<Piece>,
    next: Piece,
    rng: StdRng,
    /// Monotonic run id (increments on reset).
    episode_id: u32,
    score: u32,
    level: u32,
    lines_cleared: u32,
    paused: bool,
    game_over: bool,
    message: Option<Message>,
    clearing_layers: LayerList,
    clearing_timer_ms: u32,
    drop_timer_ms: u32,
    last_event: Option<LockEvent>,
    progress_dirty: bool,
}

impl GameState {
    /// Start a fresh run with no prior progress
    pub fn new() -> Self {
        Self::from_progress(Progress::default())
    }

    /// Start a run from a previously persisted record
    pub fn from_progress(progress: Progress) -> Self {
        Self::with_rng(StdRng::from_os_rng(), progress)
    }

    /// Start a run with an explicit piece RNG
    pub fn with_rng(mut rng: StdRng, progress: Progress) -> Self {
        let progress = progress.sanitized();
        let active = spawn(None, &mut rng);
        let next = spawn(None, &mut rng);

        Self {
            grid: VolumeGrid::empty(),
            active: Some(active),
            next,
            rng,
            episode_id: 0,
            score: progress.score,
            level: progress.level,
            lines_cleared: progress.lines_cleared,
            paused: false,
            game_over: false,
            message: None,
            clearing_layers: LayerList::new(),
            clearing_timer_ms: 0,
            drop_timer_ms: 0,
            last_event: None,
            progress_dirty: false,
        }
    }

    pub fn grid(&self) -> &VolumeGrid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> RunPhase {
        if self.game_over {
            RunPhase::GameOver
        } else if self.paused {
            RunPhase::Paused
        } else {
            RunPhase::Running
        }
    }

    pub fn message(&self) -> Option<Message> {
        self.message
    }

    pub fn clearing_layers(&self) -> &[usize] {
        &self.clearing_layers
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Current gravity interval
    pub fn tick_interval_ms(&self) -> u32 {
        tick_interval_ms(self.level)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            level: self.level,
            score: self.score,
            lines_cleared: self.lines_cleared,
        }
    }

    /// The progress record, if it changed since the last call.
    pub fn take_progress_update(&mut self) -> Option<Progress> {
        if !self.progress_dirty {
            return None;
        }
        self.progress_dirty = false;
        Some(self.progress())
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Layer the active piece would come to rest on
    pub fn landing_y(&self) -> Option<i32> {
        let active = self.active.as_ref()?;
        Some(active.anchor.y - drop_distance(&self.grid, active) as i32)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid.clone_from(&self.grid);
        out.active.clone_from(&self.active);
        out.next.clone_from(&self.next);
        out.landing_y = self.landing_y();
        out.score = self.score;
        out.level = self.level;
        out.lines_cleared = self.lines_cleared;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.message = self.message.map(|m| m.text());
        out.clearing_layers.clone_from(&self.clearing_layers);
        out.tick_interval_ms = self.tick_interval_ms();
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Try to move the active piece by `offset`
    pub fn translate(&mut self, offset: Vec3) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        if !can_place(&self.grid, active, offset) {
            return false;
        }

        active.anchor = active.anchor + offset;
        true
    }

    /// Try to turn the active piece a quarter about `axis`
    pub fn rotate(&mut self, axis: Axis) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };

        let rotated = active.rotated(axis);
        if !can_place(&self.grid, &rotated, Vec3::ZERO) {
            return false;
        }

        self.active = Some(rotated);
        true
    }

    /// One gravity step.
    ///
    /// Moves the active piece down one layer, or locks it when it cannot fall.
    /// Returns true if anything changed.
    pub fn tick(&mut self) -> bool {
        if self.game_over || self.active.is_none() {
            return false;
        }

        if self.translate(Vec3::DOWN) {
            return true;
        }

        self.lock_active();
        true
    }

    /// Drop the active piece to its resting position and lock it
    pub fn hard_drop(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let distance = drop_distance(&self.grid, active);
        active.anchor.y -= distance as i32;

        self.lock_active();
        true
    }

    /// Merge the resting piece, clear full layers, score, and promote the next piece
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let merged = self.grid.merge(&active);
        let cleared = merged.scan_full_layers();

        if cleared.is_empty() {
            self.grid = merged;
        } else {
            self.grid = merged.compact(&cleared);
            self.clearing_layers = cleared.clone();
            self.clearing_timer_ms = CLEAR_HIGHLIGHT_MS;
            log::debug!("cleared layers {:?} at level {}", cleared, self.level);
        }

        let result = resolve_clear(cleared.len(), self.level, self.lines_cleared);
        if !cleared.is_empty() {
            self.score = self.score.saturating_add(result.points);
            self.lines_cleared = result.lines_total;
            self.level = result.level;
            self.progress_dirty = true;
        }

        if result.full_volume_clear {
            self.message = Some(Message::new(MessageKind::PerfectClear));
        }

        // Promote the queued piece and queue a fresh one.
        let fresh = spawn(None, &mut self.rng);
        let promoted = std::mem::replace(&mut self.next, fresh).respawned();

        if can_place(&self.grid, &promoted, Vec3::ZERO) {
            self.active = Some(promoted);
        } else {
            self.enter_game_over();
        }

        self.last_event = Some(LockEvent {
            cleared_layers: cleared,
            points: result.points,
            level: self.level,
            leveled_up: result.leveled_up,
            full_volume_clear: result.full_volume_clear,
            game_over: self.game_over,
        });
    }

    fn enter_game_over(&mut self) {
        self.game_over = true;
        self.paused = true;
        self.active = None;
        self.drop_timer_ms = 0;
        self.message = Some(Message::new(MessageKind::GameOver));
        log::info!(
            "run {} over: score {}, level {}, layers {}",
            self.episode_id,
            self.score,
            self.level,
            self.lines_cleared
        );
    }

    /// Flip the pause flag. No-op once the run is over.
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        self.paused = !self.paused;
        self.drop_timer_ms = 0;
        self.message = if self.paused {
            Some(Message::new(MessageKind::Paused))
        } else {
            None
        };
        true
    }

    /// Start a new run. Pending timers of the previous run are dropped.
    pub fn reset(&mut self) {
        let active = spawn(None, &mut self.rng);
        let next = spawn(None, &mut self.rng);

        self.grid = VolumeGrid::empty();
        self.active = Some(active);
        self.next = next;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.paused = false;
        self.game_over = false;
        self.clearing_layers.clear();
        self.clearing_timer_ms = 0;
        self.drop_timer_ms = 0;
        self.last_event = None;
        self.message = Some(Message::new(MessageKind::FreshRun));
        self.progress_dirty = true;

        log::info!("run {} started", self.episode_id);
    }

    /// Advance wall-clock time by `elapsed_ms`.
    ///
    /// Expires the clear highlight and transient messages, then runs one
    /// gravity step once the drop timer reaches the current interval. Gravity
    /// is suspended while paused or after game over. Returns true if anything
    /// visible changed.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = self.expire_effects(elapsed_ms);

        if self.paused || self.game_over {
            return changed;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms >= self.tick_interval_ms() {
            self.drop_timer_ms = 0;
            changed |= self.tick();
        }

        changed
    }

    fn expire_effects(&mut self, elapsed_ms: u32) -> bool {
        let mut changed = false;

        if !self.clearing_layers.is_empty() {
            self.clearing_timer_ms = self.clearing_timer_ms.saturating_sub(elapsed_ms);
            if self.clearing_timer_ms == 0 {
                self.clearing_layers.clear();
                changed = true;
            }
        }

        if let Some(message) = self.message.as_mut() {
            if let Some(remaining) = message.remaining_ms {
                let remaining = remaining.saturating_sub(elapsed_ms);
                if remaining == 0 {
                    self.message = None;
                    changed = true;
                } else {
                    message.remaining_ms = Some(remaining);
                }
            }
        }

        changed
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
