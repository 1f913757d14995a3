//! Grid module - the persistent playing field
//!
//! The grid is a fixed-size matrix of cells, stored as a flat row-major vector
//! for cache locality. Dimensions are chosen at creation and never change;
//! clearing the grid refills the same storage with zeros.
//! Coordinates: (x, y) where x grows to the right and y grows downward, (0, 0) is the top-left cell.

use crate::scoring::SweepScore;
use crate::types::{Cell, EMPTY_CELL};

/// Outcome of a single [`Grid::sweep`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of full rows removed
    pub rows_cleared: u32,
    /// Points awarded for those rows
    pub points: u32,
}

/// The playing field - `width` columns x `height` rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY_CELL; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY_CELL)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY_CELL)
    }

    /// Row `y` as a slice
    ///
    /// Panics if `y` is out of bounds.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Check whether every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == EMPTY_CELL)
    }

    /// Remove row `y`, shift all rows above down and insert an empty row at the top.
    /// Returns false if `y` is out of bounds.
    pub fn remove_row(&mut self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }

        let width = self.width;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        self.cells[..width].fill(EMPTY_CELL);
        true
    }

    /// Remove every full row, bottom to top, and score them.
    ///
    /// After a removal the same row index is examined again, since the row above
    /// has shifted into it. The first row cleared in a call is worth 10 points and
    /// each further row doubles the previous award.
    pub fn sweep(&mut self) -> SweepResult {
        let mut score = SweepScore::new();
        let mut y = self.height;

        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                score.record_row();
            } else {
                y -= 1;
            }
        }

        SweepResult {
            rows_cleared: score.rows(),
            points: score.points(),
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    /// Create from rows for testing
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        assert!(rows.iter().all(|row| row.len() == width));
        Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(grid: &mut Grid, y: i32, value: Cell) {
        for x in 0..grid.width() as i32 {
            grid.set(x, y, value);
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(12, 20);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(11, 0), Some(11));
        assert_eq!(grid.index(0, 1), Some(12));
        assert_eq!(grid.index(11, 19), Some(239));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(12, 0), None);
        assert_eq!(grid.index(0, 20), None);
        assert_eq!(grid.index(0, -1), None);
    }

    #[test]
    fn test_remove_row_shifts_down() {
        let mut grid = Grid::from_rows(vec![
            vec![1, 0, 0],
            vec![0, 2, 0],
            vec![3, 3, 3],
            vec![0, 0, 4],
        ]);
        assert!(grid.remove_row(2));
        assert_eq!(
            grid,
            Grid::from_rows(vec![
                vec![0, 0, 0],
                vec![1, 0, 0],
                vec![0, 2, 0],
                vec![0, 0, 4],
            ])
        );
        assert!(!grid.remove_row(4));
    }

    #[test]
    fn test_sweep_rescans_same_index() {
        // Two adjacent full rows: the second one shifts into the index of the first.
        let mut grid = Grid::new(4, 6);
        fill_row(&mut grid, 5, 1);
        fill_row(&mut grid, 4, 2);
        grid.set(0, 3, 7);

        let result = grid.sweep();
        assert_eq!(result.rows_cleared, 2);
        assert_eq!(result.points, 30);
        assert_eq!(grid.get(0, 5), Some(7));
        assert_eq!(grid.cells().iter().filter(|&&c| c != 0).count(), 1);
    }

    #[test]
    fn test_sweep_includes_top_row() {
        let mut grid = Grid::new(4, 4);
        fill_row(&mut grid, 0, 3);
        let result = grid.sweep();
        assert_eq!(result.rows_cleared, 1);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_clear_keeps_dimensions() {
        let mut grid = Grid::new(5, 7);
        fill_row(&mut grid, 6, 2);
        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 7);
        assert_eq!(grid.cells().len(), 35);
    }
}
