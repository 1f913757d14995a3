//! Pieces module - piece templates and in-place rotation
//!
//! Every piece is stored as a small square matrix of cells: zero for empty,
//! the piece's color id for filled. Rotation transposes the matrix and then
//! mirrors it, so it is only defined for square bounding boxes; every template
//! here is square by construction.

use crate::types::{Cell, PieceKind, EMPTY_CELL, MAX_PIECE_SIZE};

/// Square piece matrix with a fixed 4x4 capacity (no allocation).
///
/// Only the top-left `size x size` region is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    size: usize,
    cells: [[Cell; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
}

impl PieceShape {
    /// Build a shape from square rows.
    ///
    /// Returns `None` if the rows are not square or larger than 4x4.
    pub fn from_rows(rows: &[&[Cell]]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || size > MAX_PIECE_SIZE || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        let mut cells = [[EMPTY_CELL; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..size].copy_from_slice(row);
        }
        Some(Self { size, cells })
    }

    /// Side length of the bounding box
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at (x, y) inside the bounding box
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(self.cells[y][x])
    }

    /// Row `y` of the bounding box
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y][..self.size]
    }

    /// Iterate the filled cells as `(x, y, value)`, row by row.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.size).flat_map(move |y| {
            (0..self.size).filter_map(move |x| {
                let v = self.cells[y][x];
                (v != EMPTY_CELL).then_some((x, y, v))
            })
        })
    }

    /// Rotate in place by a quarter turn.
    ///
    /// `direction > 0` is clockwise, anything else counter-clockwise.
    pub fn rotate(&mut self, direction: i32) {
        let n = self.size;
        for y in 0..n {
            for x in 0..y {
                let tmp = self.cells[x][y];
                self.cells[x][y] = self.cells[y][x];
                self.cells[y][x] = tmp;
            }
        }

        if direction > 0 {
            for row in self.cells.iter_mut().take(n) {
                row[..n].reverse();
            }
        } else {
            self.cells[..n].reverse();
        }
    }
}

const fn template(size: usize, cells: [[Cell; MAX_PIECE_SIZE]; MAX_PIECE_SIZE]) -> PieceShape {
    PieceShape { size, cells }
}

const T_PIECE: PieceShape = template(3, [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0; 4]]);
const O_PIECE: PieceShape = template(2, [[2, 2, 0, 0], [2, 2, 0, 0], [0; 4], [0; 4]]);
const L_PIECE: PieceShape = template(3, [[0, 3, 0, 0], [0, 3, 0, 0], [0, 3, 3, 0], [0; 4]]);
const J_PIECE: PieceShape = template(3, [[0, 4, 0, 0], [0, 4, 0, 0], [4, 4, 0, 0], [0; 4]]);
const I_PIECE: PieceShape = template(4, [[0, 5, 0, 0], [0, 5, 0, 0], [0, 5, 0, 0], [0, 5, 0, 0]]);
const S_PIECE: PieceShape = template(3, [[0, 6, 6, 0], [6, 6, 0, 0], [0; 4], [0; 4]]);
const Z_PIECE: PieceShape = template(3, [[7, 7, 0, 0], [0, 7, 7, 0], [0; 4], [0; 4]]);

/// Template for a piece kind, in its spawn orientation.
pub fn create_piece(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::T => T_PIECE,
        PieceKind::O => O_PIECE,
        PieceKind::L => L_PIECE,
        PieceKind::J => J_PIECE,
        PieceKind::I => I_PIECE,
        PieceKind::S => S_PIECE,
        PieceKind::Z => Z_PIECE,
    }
}
