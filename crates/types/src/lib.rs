//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no I/O, so they can be shared by the engine,
//! the terminal renderer and the input layer alike.
//!
//! # Grid Dimensions
//!
//! The default playfield is 12 columns by 20 rows. Both dimensions are chosen
//! at engine creation and never change afterwards.
//!
//! # Cell Values
//!
//! A grid cell is a [`Cell`] (`u8`): `0` is empty, `1..=7` is filled with the
//! color id of the piece that locked there.
//!
//! | Piece | Color id | Bounding box |
//! |-------|----------|--------------|
//! | T | 1 | 3x3 |
//! | O | 2 | 2x2 |
//! | L | 3 | 3x3 |
//! | J | 4 | 3x3 |
//! | I | 5 | 4x4 |
//! | S | 6 | 3x3 |
//! | Z | 7 | 3x3 |
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the real-time loop (~60 FPS) |
//! | `DEFAULT_DROP_INTERVAL_MS` | 1000 | Gravity interval |
//! | `DEFAULT_DAS_MS` | 150 | Delay before a held key auto-repeats |
//! | `DEFAULT_ARR_MS` | 50 | Interval between auto-repeats |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};
//!
//! let piece: PieceKind = "o".parse().unwrap();
//! assert_eq!(piece, PieceKind::O);
//! assert_eq!(piece.color_id(), 2);
//! assert!("x".parse::<PieceKind>().is_err());
//!
//! assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
//!
//! assert_eq!(DEFAULT_GRID_WIDTH, 12);
//! assert_eq!(DEFAULT_GRID_HEIGHT, 20);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Default grid width in cells (12 columns)
pub const DEFAULT_GRID_WIDTH: u8 = 12;

/// Default grid height in cells (20 rows)
pub const DEFAULT_GRID_HEIGHT: u8 = 20;

/// Smallest grid side that still fits the 4x4 I piece
pub const MIN_GRID_SIDE: u8 = 4;

/// Largest bounding box of any piece (the I piece, 4x4)
pub const MAX_PIECE_SIZE: usize = 4;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval (1000ms = 1 second per row)
pub const DEFAULT_DROP_INTERVAL_MS: u32 = 1000;

/// Points for the first row of a sweep; each further row in the same sweep doubles it.
pub const LINE_CLEAR_BASE_POINTS: u32 = 10;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop DAS in milliseconds (repeats start immediately).
pub const SOFT_DROP_DAS_MS: u32 = 0;

/// Soft drop ARR in milliseconds.
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// A cell on the grid: `0` is empty, `1..=7` is a piece color id.
pub type Cell = u8;

/// The empty cell value.
pub const EMPTY_CELL: Cell = 0;

/// Display colors indexed by color id. Index 0 is the empty cell and is never drawn.
pub const PALETTE: [(u8, u8, u8); 8] = [
    (0, 0, 0),
    (0xff, 0x0d, 0x72),
    (0x0d, 0xc2, 0xff),
    (0x0d, 0xff, 0x72),
    (0xf5, 0x38, 0xff),
    (0xff, 0x8e, 0x0d),
    (0xff, 0xe1, 0x38),
    (0x38, 0x77, 0xff),
];


/// The seven piece kinds
///
/// Each kind has a fixed template and a distinct color id (see [`PieceKind::color_id`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// Error returned when a string does not name one of the seven piece kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown piece type `{0}` (expected one of I, O, T, S, Z, J, L)")]
pub struct ParsePieceKindError(pub String);

impl PieceKind {
    /// Spawn table, indexed by the uniform random pick.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Color id written into grid cells by this piece.
    pub fn color_id(&self) -> Cell {
        match self {
            PieceKind::T => 1,
            PieceKind::O => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::I => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color_id`]; `None` for empty or unknown values.
    pub fn from_color_id(id: Cell) -> Option<Self> {
        match id {
            1 => Some(PieceKind::T),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::J),
            5 => Some(PieceKind::I),
            6 => Some(PieceKind::S),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Upper-case letter name
    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for PieceKind {
    type Err = ParsePieceKindError;

    /// Parse a single piece letter (case-insensitive, surrounding whitespace ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) => match c.to_ascii_uppercase() {
                'I' => Some(PieceKind::I),
                'O' => Some(PieceKind::O),
                'T' => Some(PieceKind::T),
                'S' => Some(PieceKind::S),
                'Z' => Some(PieceKind::Z),
                'J' => Some(PieceKind::J),
                'L' => Some(PieceKind::L),
                _ => None,
            },
            _ => None,
        };
        kind.ok_or_else(|| ParsePieceKindError(s.to_string()))
    }
}

/// Game actions that can be applied to the engine
///
/// The first five are the keyboard operations; `Restart` leaves the game-over phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one row (locks it if it cannot move)
    SoftDrop,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Start a new game after a topout
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("SOFTDROP"), Some(GameAction::SoftDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotateccw" => Some(GameAction::RotateCcw),
            "rotatecw" => Some(GameAction::RotateCw),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::RotateCw => "rotateCw",
            GameAction::Restart => "restart",
        }
    }
}
