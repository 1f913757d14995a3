//! Engine configuration and its validation errors.

use thiserror::Error;

use crate::types::{
    DEFAULT_DROP_INTERVAL_MS, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, MIN_GRID_SIDE,
};

/// Parameters fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Grid columns
    pub width: u16,
    /// Grid rows
    pub height: u16,
    /// Gravity interval in milliseconds
    pub drop_interval_ms: u32,
    /// RNG seed for the piece sequence
    pub seed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid width {0} is out of range ({min}..={max})", min = MIN_GRID_SIDE, max = u8::MAX)]
    Width(u16),
    #[error("grid height {0} is out of range ({min}..={max})", min = MIN_GRID_SIDE, max = u8::MAX)]
    Height(u16),
    #[error("drop interval must be greater than zero")]
    DropInterval,
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Check that the grid can hold the largest piece and the timer can fire.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = MIN_GRID_SIDE as u16..=u8::MAX as u16;
        if !side.contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !side.contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::DropInterval);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH as u16,
            height: DEFAULT_GRID_HEIGHT as u16,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            seed: 1,
        }
    }
}
