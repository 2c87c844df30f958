//! Key mapping from terminal events to game commands.
//!
//! The arrows move the piece on the floor plane, `q`/`e` `a`/`d` `w`/`s` rotate
//! about X, Y and Z, space hard drops and `p` pauses. Letters are matched
//! case-insensitively.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One line per binding, for help overlays.
pub const KEY_HELP: &[(&str, &str)] = &[
    ("Left/Right", "move x"),
    ("Up/Down", "move z"),
    ("Q/E", "rotate x"),
    ("A/D", "rotate y"),
    ("W/S", "rotate z"),
    ("Space", "hard drop"),
    ("P", "pause"),
    ("R", "restart"),
    ("Esc", "quit"),
];

/// Map keyboard input to a game command.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Up => Some(Command::MoveForward),
        KeyCode::Down => Some(Command::MoveBack),

        KeyCode::Char(' ') => Some(Command::HardDrop),

        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' | 'e' => Some(Command::RotateX),
            'a' | 'd' => Some(Command::RotateY),
            'w' | 's' => Some(Command::RotateZ),
            'p' => Some(Command::TogglePause),
            _ => None,
        },

        _ => None,
    }
}

/// `r` starts a fresh run.
pub fn is_reset(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
        && !key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Check if key should quit the game.
///
/// `q` is a rotation key here, so quitting is Esc or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(Command::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(Command::MoveRight)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(Command::MoveForward)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(Command::MoveBack)
        );
    }

    #[test]
    fn test_rotation_keys() {
        for c in ['q', 'e', 'Q', 'E'] {
            assert_eq!(
                handle_key_event(KeyEvent::from(KeyCode::Char(c))),
                Some(Command::RotateX)
            );
        }
        for c in ['a', 'd', 'A', 'D'] {
            assert_eq!(
                handle_key_event(KeyEvent::from(KeyCode::Char(c))),
                Some(Command::RotateY)
            );
        }
        for c in ['w', 's', 'W', 'S'] {
            assert_eq!(
                handle_key_event(KeyEvent::from(KeyCode::Char(c))),
                Some(Command::RotateZ)
            );
        }
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(Command::HardDrop)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('P'))),
            Some(Command::TogglePause)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('r'))), None);
    }

    #[test]
    fn test_reset_and_quit_keys() {
        assert!(is_reset(KeyEvent::from(KeyCode::Char('r'))));
        assert!(is_reset(KeyEvent::from(KeyCode::Char('R'))));
        assert!(!is_reset(KeyEvent::from(KeyCode::Char('p'))));

        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
    }
}
