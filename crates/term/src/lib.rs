//! Terminal "game renderer" module.
//!
//! Renders [`core::GameSnapshot`]s into a plain framebuffer of styled
//! characters and flushes that framebuffer to the terminal with diffing.
//! The volume is shown as two projections: a front view (x across, y up)
//! and a top view (x across, z down) with column heights.

pub mod fb;
pub mod renderer;
pub mod view;

pub use voxtris_core as core;
pub use voxtris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{Viewport, VolumeView};
