//! Voxtris (workspace facade crate).
//!
//! Re-exports the member crates as `voxtris::{core,engine,input,term,types}`
//! so the binary, tests and benches share one import path.

pub mod logging;

pub use voxtris_core as core;
pub use voxtris_engine as engine;
pub use voxtris_input as input;
pub use voxtris_term as term;
pub use voxtris_types as types;
