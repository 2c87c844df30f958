//! Integration tests for the run lifecycle through the public API

use rand::rngs::StdRng;
use rand::SeedableRng;

use voxtris::core::{GameState, RunPhase, SPAWN_ANCHOR};
use voxtris::engine::{dispatch, dispatch_all, DispatchOutcome};
use voxtris::types::{Command, Progress, Vec3, BASE_TICK_MS, BOARD_WIDTH};

fn seeded(seed: u64) -> GameState {
    GameState::with_rng(StdRng::seed_from_u64(seed), Progress::default())
}

/// Hard drop until the run ends; returns the number of pieces locked.
fn drop_until_game_over(state: &mut GameState) -> usize {
    let mut drops = 0;
    while !state.game_over() {
        assert_eq!(dispatch(state, Command::HardDrop), DispatchOutcome::Applied);
        drops += 1;
        assert!(drops < 500, "stack never reached the spawn anchor");
    }
    drops
}

#[test]
fn test_game_lifecycle() {
    let state = seeded(1);
    assert_eq!(state.phase(), RunPhase::Running);
    assert_eq!(state.active().map(|p| p.anchor), Some(SPAWN_ANCHOR));
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.episode_id(), 0);
    assert!(state.message().is_none());
}

#[test]
fn test_hard_drop_lands_on_floor() {
    let mut state = seeded(2);
    let cells = state.active().map(|p| p.cells.len()).unwrap_or(0);

    assert!(state.hard_drop());

    let grid = state.grid();
    assert_eq!(grid.occupied_count(), cells);
    assert!(!grid.is_layer_empty(0));

    let event = state.take_last_event().unwrap();
    assert!(event.cleared_layers.is_empty());
    assert_eq!(event.points, 0);
    assert!(!event.game_over);
    assert!(state.take_last_event().is_none());

    // The queued piece was promoted to the spawn anchor.
    assert_eq!(state.active().map(|p| p.anchor), Some(SPAWN_ANCHOR));
}

#[test]
fn test_walking_into_a_wall_is_absorbed() {
    let mut state = seeded(3);

    let moved = dispatch_all(&mut state, std::iter::repeat(Command::MoveLeft).take(BOARD_WIDTH));
    assert!(moved < BOARD_WIDTH);
    assert_eq!(dispatch(&mut state, Command::MoveLeft), DispatchOutcome::Rejected);

    let active = state.active().unwrap();
    assert_eq!(active.world_cells().map(|c| c.x).min(), Some(0));
    assert_eq!(state.phase(), RunPhase::Running);
}

#[test]
fn test_gravity_through_advance() {
    let mut state = seeded(4);
    let start_y = state.active().unwrap().anchor.y;
    let interval = state.tick_interval_ms();
    assert_eq!(interval, 1_110);

    assert!(!state.advance(interval - 1));
    assert_eq!(state.active().unwrap().anchor.y, start_y);

    assert!(state.advance(1));
    assert_eq!(state.active().unwrap().anchor.y, start_y - 1);
}

#[test]
fn test_pause_gates_gravity_not_commands() {
    let mut state = seeded(5);
    let anchor = state.active().unwrap().anchor;

    assert_eq!(dispatch(&mut state, Command::TogglePause), DispatchOutcome::Applied);
    assert_eq!(state.phase(), RunPhase::Paused);
    assert_eq!(state.snapshot().message, Some("Game paused"));

    state.advance(BASE_TICK_MS * 5);
    assert_eq!(state.active().unwrap().anchor, anchor);

    assert_eq!(dispatch(&mut state, Command::MoveBack), DispatchOutcome::Applied);
    assert_eq!(state.active().unwrap().anchor, anchor + Vec3::new(0, 0, 1));

    assert_eq!(dispatch(&mut state, Command::TogglePause), DispatchOutcome::Applied);
    assert_eq!(state.phase(), RunPhase::Running);
    assert!(state.snapshot().message.is_none());
}

#[test]
fn test_commands_ignored_after_game_over() {
    let mut state = seeded(6);
    let drops = drop_until_game_over(&mut state);
    assert!(drops > 1);

    assert_eq!(state.phase(), RunPhase::GameOver);
    assert!(state.active().is_none());
    assert_eq!(
        state.snapshot().message,
        Some("Mission failed. Restart to try again.")
    );

    let grid_before = state.grid().clone();
    for command in Command::ALL {
        assert_eq!(dispatch(&mut state, command), DispatchOutcome::Ignored);
    }
    assert_eq!(state.grid(), &grid_before);
    assert!(!state.advance(BASE_TICK_MS * 3));
}

#[test]
fn test_reset_after_game_over() {
    let mut state = seeded(7);
    drop_until_game_over(&mut state);

    state.reset();

    assert_eq!(state.phase(), RunPhase::Running);
    assert_eq!(state.episode_id(), 1);
    assert_eq!(state.grid().occupied_count(), 0);
    assert_eq!(state.progress(), Progress::default());
    assert_eq!(state.take_progress_update(), Some(Progress::default()));
    assert_eq!(state.snapshot().message, Some("Fresh run engaged!"));
    assert_eq!(dispatch(&mut state, Command::RotateY), DispatchOutcome::Applied);
}

#[test]
fn test_loaded_progress_is_visible_immediately() {
    let saved = Progress {
        level: 3,
        score: 2_400,
        lines_cleared: 11,
    };
    let state = GameState::with_rng(StdRng::seed_from_u64(8), saved);
    let snap = state.snapshot();

    assert_eq!(snap.progress(), saved);
    assert_eq!(snap.tick_interval_ms, 930);
    assert!(snap.playable());
}
