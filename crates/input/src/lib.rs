//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Command`] plus the two
//! host-level keys (reset and quit). Nothing here knows about rendering.

pub mod map;

pub use voxtris_types as types;

pub use map::{handle_key_event, is_reset, should_quit, KEY_HELP};
