//! Scoring module - multi-row clear bonus
//!
//! A sweep awards 10 points for its first cleared row and doubles the award
//! for every further row cleared in the same sweep:
//!
//! | Rows | Awards | Total |
//! |------|--------|-------|
//! | 1 | 10 | 10 |
//! | 2 | 10 + 20 | 30 |
//! | 3 | 10 + 20 + 40 | 70 |
//! | 4 | 10 + 20 + 40 + 80 | 150 |
//!
//! so `k` rows are worth `10 * (2^k - 1)`. All arithmetic saturates at `u32::MAX`.

use crate::types::LINE_CLEAR_BASE_POINTS;

/// Running score of one sweep: the multiplier starts at 1 and doubles per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepScore {
    rows: u32,
    multiplier: u32,
    points: u32,
}

impl SweepScore {
    pub fn new() -> Self {
        Self {
            rows: 0,
            multiplier: 1,
            points: 0,
        }
    }

    /// Award the next cleared row and return the points it was worth.
    pub fn record_row(&mut self) -> u32 {
        let award = self.multiplier.saturating_mul(LINE_CLEAR_BASE_POINTS);
        self.points = self.points.saturating_add(award);
        self.multiplier = self.multiplier.saturating_mul(2);
        self.rows += 1;
        award
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn points(&self) -> u32 {
        self.points
    }
}

impl Default for SweepScore {
    fn default() -> Self {
        Self::new()
    }
}

/// Total points for clearing `rows` rows in a single sweep.
pub fn row_clear_points(rows: u32) -> u32 {
    let mut score = SweepScore::new();
    for _ in 0..rows {
        score.record_row();
    }
    score.points()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rows() {
        assert_eq!(row_clear_points(0), 0);
    }

    #[test]
    fn test_doubling_progression() {
        let mut score = SweepScore::new();
        assert_eq!(score.record_row(), 10);
        assert_eq!(score.record_row(), 20);
        assert_eq!(score.record_row(), 40);
        assert_eq!(score.record_row(), 80);
        assert_eq!(score.points(), 150);
        assert_eq!(score.rows(), 4);
    }

    #[test]
    fn test_closed_form() {
        for k in 0..10u32 {
            assert_eq!(row_clear_points(k), 10 * ((1u32 << k) - 1));
        }
    }

    #[test]
    fn test_saturates() {
        assert_eq!(row_clear_points(64), u32::MAX);
    }
}
