//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole game-state engine. It has **no dependencies**
//! on terminal I/O or timing sources, making it:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is a plain method on [`GameEngine`]
//! - **Portable**: any loop that can count milliseconds can drive it
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size playing field, row removal and the scoring sweep
//! - [`pieces`]: the seven piece templates and in-place quarter-turn rotation
//! - [`player`]: the active piece, its position, score, and the collide/merge primitives
//! - [`game_state`]: the engine (drop, move, rotate with kicks, spawn, topout, timer)
//! - [`rng`]: seeded uniform piece selection
//! - [`scoring`]: the doubling multi-row bonus
//! - [`snapshot`]: renderer-facing frame copy
//! - [`config`]: engine parameters and their validation
//!
//! # Game Rules
//!
//! - Pieces spawn on row 0, horizontally centered, chosen uniformly at random
//! - Gravity drops the piece one row whenever the drop counter exceeds the interval
//! - A piece that cannot move down is merged into the grid; full rows are removed
//! - Clearing `k` rows in one lock scores `10 * (2^k - 1)`
//! - If a new piece collides on spawn the grid and score are reset and the game
//!   enters [`Phase::GameOver`] until restarted
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, GameEngine, Phase};
//! use blockfall_types::GameAction;
//!
//! let mut game = GameEngine::new(EngineConfig::default().with_seed(12345)).unwrap();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::SoftDrop);
//!
//! // One second of frames: exactly one gravity drop.
//! for _ in 0..63 {
//!     game.tick(16);
//! }
//! assert_eq!(game.phase(), Phase::Playing);
//! assert_eq!(game.score(), 0);
//! ```

pub mod config;
pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use game_state::{GameEngine, GameEvent, Phase};
pub use grid::{Grid, SweepResult};
pub use pieces::{create_piece, PieceShape};
pub use player::{collide, merge, Player, Position};
pub use rng::SimpleRng;
pub use scoring::{row_clear_points, SweepScore};
pub use snapshot::GameSnapshot;
