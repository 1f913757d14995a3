//! Command-line arguments for the `blockfall` binary.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use crate::core::EngineConfig;
use crate::types::{DEFAULT_DROP_INTERVAL_MS, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

#[derive(Debug, Clone, Parser)]
#[command(name = "blockfall", version, about = "Falling-block puzzle game for the terminal")]
pub struct Args {
    /// Grid columns
    #[arg(long, env = "BLOCKFALL_WIDTH", default_value_t = DEFAULT_GRID_WIDTH as u16)]
    pub width: u16,

    /// Grid rows
    #[arg(long, env = "BLOCKFALL_HEIGHT", default_value_t = DEFAULT_GRID_HEIGHT as u16)]
    pub height: u16,

    /// Milliseconds between gravity drops
    #[arg(long, env = "BLOCKFALL_DROP_INTERVAL_MS", default_value_t = DEFAULT_DROP_INTERVAL_MS)]
    pub drop_interval_ms: u32,

    /// Seed for the piece sequence (defaults to the current time)
    #[arg(long, env = "BLOCKFALL_SEED")]
    pub seed: Option<u32>,

    /// Write logs to this file; logging is off without it
    #[arg(long, env = "BLOCKFALL_LOG_PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Build and validate the engine configuration.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let config = EngineConfig {
            width: self.width,
            height: self.height,
            drop_interval_ms: self.drop_interval_ms,
            seed: self.seed.unwrap_or_else(clock_seed),
        };
        config.validate().context("invalid game configuration")?;
        Ok(config)
    }
}

/// Seed derived from the system clock.
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
