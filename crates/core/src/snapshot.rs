use crate::game_state::Phase;
use crate::pieces::{create_piece, PieceShape};
use crate::player::Position;
use crate::types::{Cell, PieceKind};

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Grid cells, row-major
    pub grid: Vec<Cell>,
    pub active_kind: PieceKind,
    pub active: PieceShape,
    pub position: Position,
    pub score: u32,
    pub phase: Phase,
    pub last_final_score: Option<u32>,
}

impl GameSnapshot {
    /// Grid cell at (x, y), `None` out of bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.grid.get(y * self.width + x).copied()
    }

    /// Grid coordinates and values of the active piece's filled cells
    pub fn active_cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let Position { x: ox, y: oy } = self.position;
        self.active
            .filled_cells()
            .map(move |(x, y, v)| (ox + x as i32, oy + y as i32, v))
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            grid: Vec::new(),
            active_kind: PieceKind::I,
            active: create_piece(PieceKind::I),
            position: Position::default(),
            score: 0,
            phase: Phase::Playing,
            last_final_score: None,
        }
    }
}
