//! Player module - the active piece, its offset and the score
//!
//! Also holds the two grid/piece primitives every move is built on:
//! [`collide`] (the only placement-legality check) and [`merge`].

use crate::grid::Grid;
use crate::pieces::{create_piece, PieceShape};
use crate::types::PieceKind;

/// Top-left offset of the active piece's bounding box in grid coordinates.
///
/// May point outside the grid while a move is being probed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The currently controlled piece plus the player's score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub kind: PieceKind,
    pub matrix: PieceShape,
    pub position: Position,
    pub score: u32,
}

impl Player {
    /// A fresh piece at the origin with a zero score
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            matrix: create_piece(kind),
            position: Position::default(),
            score: 0,
        }
    }

    /// Replace the piece (keeping the score) and center it on row 0 of a grid `grid_width` wide.
    pub fn respawn(&mut self, kind: PieceKind, grid_width: usize) {
        self.kind = kind;
        self.matrix = create_piece(kind);
        self.position = Position::new(spawn_x(grid_width, self.matrix.size()), 0);
    }

    /// Grid coordinates of every filled cell, with its value.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        let Position { x: ox, y: oy } = self.position;
        self.matrix
            .filled_cells()
            .map(move |(x, y, v)| (ox + x as i32, oy + y as i32, v))
    }
}

/// Column that horizontally centers a box of `piece_size` on a grid `grid_width` wide.
pub fn spawn_x(grid_width: usize, piece_size: usize) -> i32 {
    (grid_width / 2) as i32 - (piece_size / 2) as i32
}

/// True if any filled cell of the piece lies outside the grid or on a filled grid cell.
pub fn collide(grid: &Grid, player: &Player) -> bool {
    player
        .cells()
        .any(|(x, y, _)| !matches!(grid.get(x, y), Some(0)))
}

/// Write the piece's filled cells into the grid at its current position.
///
/// Cells outside the grid are dropped.
pub fn merge(grid: &mut Grid, player: &Player) {
    for (x, y, value) in player.cells() {
        grid.set(x, y, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_x_centers() {
        assert_eq!(spawn_x(12, 2), 5);
        assert_eq!(spawn_x(12, 3), 5);
        assert_eq!(spawn_x(12, 4), 4);
        assert_eq!(spawn_x(10, 3), 4);
    }

    #[test]
    fn test_collide_empty_grid() {
        let grid = Grid::new(12, 20);
        let mut player = Player::new(PieceKind::T);
        player.respawn(PieceKind::T, 12);
        assert!(!collide(&grid, &player));
    }

    #[test]
    fn test_collide_walls_and_floor() {
        let grid = Grid::new(12, 20);
        let mut player = Player::new(PieceKind::O);

        player.position = Position::new(-1, 0);
        assert!(collide(&grid, &player));

        player.position = Position::new(11, 0);
        assert!(collide(&grid, &player));

        player.position = Position::new(10, 18);
        assert!(!collide(&grid, &player));

        player.position = Position::new(10, 19);
        assert!(collide(&grid, &player));
    }

    #[test]
    fn test_empty_padding_may_hang_outside() {
        // The I piece fills only column 1 of its 4x4 box.
        let grid = Grid::new(12, 20);
        let mut player = Player::new(PieceKind::I);
        player.position = Position::new(-1, 0);
        assert!(!collide(&grid, &player));
        player.position = Position::new(-2, 0);
        assert!(collide(&grid, &player));
    }

    #[test]
    fn test_merge_then_collide() {
        let mut grid = Grid::new(12, 20);
        let mut player = Player::new(PieceKind::Z);
        player.position = Position::new(3, 10);
        assert!(!collide(&grid, &player));

        merge(&mut grid, &player);
        assert!(collide(&grid, &player));
        assert_eq!(grid.get(3, 10), Some(7));
        assert_eq!(grid.get(4, 11), Some(7));
        assert_eq!(grid.get(5, 10), Some(0));
    }
}
