//! Scoring module - layer-clear points, leveling and gravity speed
//!
//! Rules:
//! - Each cleared layer is worth `LAYER_SCORE * level`, using the level in
//!   effect before the clear.
//! - The level is `max(1, total_layers / LAYERS_PER_LEVEL + 1)`.
//! - Gravity interval is `max(MIN_TICK_MS, BASE_TICK_MS - level * TICK_STEP_MS)`.

use crate::types::{
    BASE_TICK_MS, FULL_VOLUME_CLEAR, LAYERS_PER_LEVEL, LAYER_SCORE, MIN_TICK_MS, TICK_STEP_MS,
};

/// Result of resolving one lock's layer clears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points awarded for this lock
    pub points: u32,
    /// Cumulative cleared layers after this lock
    pub lines_total: u32,
    /// Level after this lock
    pub level: u32,
    pub leveled_up: bool,
    pub full_volume_clear: bool,
}

/// Points for clearing `layers` layers at `level`
pub fn layer_clear_score(layers: usize, level: u32) -> u32 {
    (layers as u32)
        .saturating_mul(LAYER_SCORE)
        .saturating_mul(level)
}

/// Level reached after `total_layers` cleared layers
pub fn level_for_layers(total_layers: u32) -> u32 {
    (total_layers / LAYERS_PER_LEVEL + 1).max(1)
}

/// Gravity interval in milliseconds for `level`
pub fn tick_interval_ms(level: u32) -> u32 {
    BASE_TICK_MS
        .saturating_sub(level.saturating_mul(TICK_STEP_MS))
        .max(MIN_TICK_MS)
}

pub fn is_full_volume_clear(layers: usize) -> bool {
    layers >= FULL_VOLUME_CLEAR
}

/// Score a lock that cleared `layers` layers.
///
/// Points use `level` as it was before the clear; the returned level is
/// recomputed from the new cumulative total.
pub fn resolve_clear(layers: usize, level: u32, lines_before: u32) -> ScoreResult {
    let points = layer_clear_score(layers, level);
    let lines_total = lines_before.saturating_add(layers as u32);
    let new_level = level_for_layers(lines_total);

    ScoreResult {
        points,
        lines_total,
        level: new_level,
        leveled_up: new_level > level,
        full_volume_clear: is_full_volume_clear(layers),
    }
}
