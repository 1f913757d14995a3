//! Terminal rendering module.
//!
//! Renders a [`core::GameSnapshot`] into a plain framebuffer of styled cells and
//! flushes it to the terminal with crossterm, emitting only the cells that
//! changed since the previous frame.
//!
//! Grid cells are drawn 2 columns wide so blocks look roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, for_each_changed_run, TerminalRenderer};
