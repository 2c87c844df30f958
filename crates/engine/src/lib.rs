//! Engine crate - everything between the game core and a host
//!
//! - [`dispatch`]: maps player [`Command`](crate::types::Command)s onto the
//!   run state machine, ignoring them once the run is over
//! - [`progress`]: loading and saving the `{level, score, linesCleared}` record
//! - [`config`]: host settings from environment variables
//! - [`session`]: a tokio task that owns the game and serializes the gravity
//!   timer with incoming commands
//!
//! # Environment Variables
//!
//! - `VOXTRIS_FRAME_MS`: session frame interval (default 16)
//! - `VOXTRIS_MAX_PENDING`: command queue capacity (default 32)
//! - `VOXTRIS_PROGRESS_PATH`: progress file location
//! - `VOXTRIS_NO_PERSIST`: set to "1" or "true" to disable saving progress
//! - `VOXTRIS_LOG_PATH` / `VOXTRIS_LOG_LEVEL`: file logging

pub mod config;
pub mod dispatch;
pub mod progress;
pub mod session;

pub use voxtris_core as core;
pub use voxtris_types as types;

pub use config::HostConfig;
pub use dispatch::{dispatch, dispatch_all, DispatchOutcome};
pub use progress::{
    decode_progress, encode_progress, FileProgressStore, MemoryProgressStore, ProgressStore,
};
pub use session::{
    run_session, spawn_session, SessionHandle, SessionInput, SessionRuntime, SpawnedSession,
};
