//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides a
//! DAS/ARR input handler suitable for terminal environments (including terminals
//! without key-release events). Nothing here touches the engine directly; the
//! game loop applies the returned actions.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{action_for_key, handle_key_event, should_quit};
