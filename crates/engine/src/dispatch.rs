use crate::core::GameState;
use crate::types::Command;

/// What happened to a dispatched command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The command changed the state
    Applied,
    /// The move did not fit and was absorbed
    Rejected,
    /// The run is over; commands are ignored until reset
    Ignored,
}

impl DispatchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchOutcome::Applied => "applied",
            DispatchOutcome::Rejected => "rejected",
            DispatchOutcome::Ignored => "ignored",
        }
    }

    pub fn applied(self) -> bool {
        self == DispatchOutcome::Applied
    }
}

/// Apply one command to the run.
///
/// Commands stay valid while paused; only game over disables them.
pub fn dispatch(state: &mut GameState, command: Command) -> DispatchOutcome {
    if state.game_over() {
        return DispatchOutcome::Ignored;
    }

    let applied = match command {
        Command::MoveLeft | Command::MoveRight | Command::MoveForward | Command::MoveBack => {
            command.offset().is_some_and(|offset| state.translate(offset))
        }
        Command::RotateX | Command::RotateY | Command::RotateZ => {
            command.axis().is_some_and(|axis| state.rotate(axis))
        }
        Command::HardDrop => state.hard_drop(),
        Command::TogglePause => state.toggle_pause(),
    };

    if applied {
        DispatchOutcome::Applied
    } else {
        DispatchOutcome::Rejected
    }
}

/// Apply a batch of commands in order, stopping early once the run ends
pub fn dispatch_all(
    state: &mut GameState,
    commands: impl IntoIterator<Item = Command>,
) -> usize {
    let mut applied = 0;
    for command in commands {
        match dispatch(state, command) {
            DispatchOutcome::Applied => applied += 1,
            DispatchOutcome::Rejected => {}
            DispatchOutcome::Ignored => break,
        }
    }
    applied
}
