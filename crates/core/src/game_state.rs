//! Game state module - the engine that owns the grid and the active piece
//!
//! Ties together grid, pieces, RNG and scoring. Every operation runs to
//! completion synchronously; the host loop feeds elapsed time through
//! [`GameEngine::tick`] and player input through [`GameEngine::apply_action`].

use log::{debug, info};

use crate::config::{ConfigError, EngineConfig};
use crate::grid::{Grid, SweepResult};
use crate::player::{collide, merge, Player};
use crate::rng::SimpleRng;
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, PieceKind};

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Playing,
    /// A freshly spawned piece overlapped the stack. The grid and score have
    /// already been reset; play resumes on [`GameEngine::restart`].
    GameOver,
}

/// Event emitted by the engine for collaborators (score display, logging, sound).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The active piece was merged into the grid.
    Locked { lines_cleared: u32, points: u32 },
    /// A spawn collided immediately.
    GameOver { final_score: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine {
    grid: Grid,
    player: Player,
    rng: SimpleRng,
    phase: Phase,
    drop_counter_ms: u32,
    drop_interval_ms: u32,
    /// Score at the moment of the most recent topout.
    last_final_score: Option<u32>,
    /// Last lock/topout event (consumed by observers).
    last_event: Option<GameEvent>,
}

impl GameEngine {
    /// Create a game and spawn its first piece
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = SimpleRng::new(config.seed);
        let first = rng.next_piece();
        let mut engine = Self {
            grid: Grid::new(config.width as usize, config.height as usize),
            player: Player::new(first),
            rng,
            phase: Phase::Playing,
            drop_counter_ms: 0,
            drop_interval_ms: config.drop_interval_ms,
            last_final_score: None,
            last_event: None,
        };
        engine.spawn(first);
        Ok(engine)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn last_final_score(&self) -> Option<u32> {
        self.last_final_score
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Take and clear the last lock/topout event.
    pub fn take_last_event(&mut self) -> Option<GameEvent> {
        self.last_event.take()
    }

    /// Does the active piece overlap the grid or stick out of it?
    pub fn collide(&self) -> bool {
        collide(&self.grid, &self.player)
    }

    /// Write the active piece into the grid.
    pub fn merge(&mut self) {
        merge(&mut self.grid, &self.player);
    }

    /// Remove full rows and add their points to the score.
    pub fn grid_sweep(&mut self) -> SweepResult {
        let result = self.grid.sweep();
        if result.rows_cleared > 0 {
            self.player.score = self.player.score.saturating_add(result.points);
            info!(
                "cleared {} row(s) for {} points, score {}",
                result.rows_cleared, result.points, self.player.score
            );
        }
        result
    }

    /// Spawn a uniformly random piece; a spawn that collides ends the game.
    pub fn player_reset(&mut self) {
        let kind = self.rng.next_piece();
        self.spawn(kind);
    }

    fn spawn(&mut self, kind: PieceKind) {
        self.player.respawn(kind, self.grid.width());
        debug!(
            "spawned {} at ({}, {})",
            kind, self.player.position.x, self.player.position.y
        );

        if self.collide() {
            let final_score = self.player.score;
            self.grid.clear();
            self.player.score = 0;
            self.phase = Phase::GameOver;
            self.last_final_score = Some(final_score);
            self.last_event = Some(GameEvent::GameOver { final_score });
            info!("game over with score {}", final_score);
        }
    }

    /// Move the piece down one row, locking it if it cannot move.
    ///
    /// Returns true if the piece moved. Gravity and soft drop both land here,
    /// and both restart the drop timer.
    ///
    /// A lock merges the piece, spawns the next one and then sweeps full rows.
    /// A spawn that tops out resets the score first, so rows completed by the
    /// final lock are not counted in the final score.
    pub fn player_drop(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        self.drop_counter_ms = 0;
        self.player.position.y += 1;
        if !self.collide() {
            return true;
        }

        self.player.position.y -= 1;
        self.merge();
        debug!(
            "locked {} at ({}, {})",
            self.player.kind, self.player.position.x, self.player.position.y
        );
        self.player_reset();
        let sweep = self.grid_sweep();

        // A topout event takes precedence over the lock.
        if self.phase == Phase::Playing {
            self.last_event = Some(GameEvent::Locked {
                lines_cleared: sweep.rows_cleared,
                points: sweep.points,
            });
        }
        false
    }

    /// Shift the piece one column (`direction` is -1 or +1); reverted if it collides.
    pub fn player_move(&mut self, direction: i32) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        self.player.position.x += direction;
        if self.collide() {
            self.player.position.x -= direction;
            return false;
        }
        true
    }

    /// Rotate the piece, trying horizontal kicks if the rotated piece collides.
    ///
    /// Kick offsets are applied cumulatively in the order 1, -2, 3, -4, ...
    /// (net columns +1, -1, +2, ...). After each shift the next offset is
    /// computed; once it exceeds the piece's box size the rotation is undone
    /// and false is returned without testing the position just reached. For
    /// 3- and 4-wide boxes that leaves exactly x+1, x-1 and x+2 as candidates.
    pub fn player_rotate(&mut self, direction: i32) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        let original_x = self.player.position.x;
        let limit = self.player.matrix.size() as i32;
        self.player.matrix.rotate(direction);

        let mut offset: i32 = 1;
        while self.collide() {
            self.player.position.x += offset;
            offset = -(offset + offset.signum());
            if offset > limit {
                self.player.matrix.rotate(-direction);
                self.player.position.x = original_x;
                debug!("rotation of {} blocked", self.player.kind);
                return false;
            }
        }

        if self.player.position.x != original_x {
            debug!(
                "rotation of {} kicked by {}",
                self.player.kind,
                self.player.position.x - original_x
            );
        }
        true
    }

    /// Advance the drop timer; drops one row once it exceeds the interval.
    ///
    /// Returns true if a drop happened this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.drop_interval_ms {
            self.player_drop();
            return true;
        }
        false
    }

    /// Leave the game-over phase and spawn a new piece on the cleared grid.
    ///
    /// Does nothing while playing.
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        self.phase = Phase::Playing;
        self.drop_counter_ms = 0;
        self.player.score = 0;
        self.grid.clear();
        info!("new game");
        self.player_reset();
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.player_move(-1),
            GameAction::MoveRight => self.player_move(1),
            GameAction::SoftDrop => {
                self.player_drop();
                true
            }
            GameAction::RotateCcw => self.player_rotate(-1),
            GameAction::RotateCw => self.player_rotate(1),
            GameAction::Restart => self.restart(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.grid.clear();
        out.grid.extend_from_slice(self.grid.cells());
        out.active_kind = self.player.kind;
        out.active = self.player.matrix;
        out.position = self.player.position;
        out.score = self.player.score;
        out.phase = self.phase;
        out.last_final_score = self.last_final_score;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
