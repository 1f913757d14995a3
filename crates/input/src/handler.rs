//! DAS/ARR input handler for terminal environments.
//!
//! Holding a move or soft-drop key repeats its action: once after the press,
//! then every ARR interval after the DAS delay. Terminals that never report key
//! releases are supported by treating a key as released once no press for it
//! has arrived within a short timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::action_for_key;
use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS};

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers DAS/ARR repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Repeats one held action on a DAS/ARR schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Repeater {
    held: Option<GameAction>,
    das_timer: u32,
    arr_accumulator: u32,
    das_delay: u32,
    arr_rate: u32,
}

impl Repeater {
    fn new(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            held: None,
            das_timer: 0,
            arr_accumulator: 0,
            das_delay,
            arr_rate: arr_rate.max(1),
        }
    }

    /// Start holding `action`; true if it was not already held.
    fn press(&mut self, action: GameAction) -> bool {
        if self.held == Some(action) {
            return false;
        }
        self.held = Some(action);
        self.das_timer = 0;
        self.arr_accumulator = 0;
        true
    }

    fn release(&mut self) {
        self.held = None;
        self.das_timer = 0;
        self.arr_accumulator = 0;
    }

    fn update(&mut self, elapsed_ms: u32, out: &mut ArrayVec<GameAction, 32>) {
        let Some(action) = self.held else {
            return;
        };

        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < self.das_delay {
            return;
        }

        let excess = if prev_das < self.das_delay {
            self.das_timer - self.das_delay
        } else {
            elapsed_ms
        };
        self.arr_accumulator = self.arr_accumulator.saturating_add(excess);

        while self.arr_accumulator >= self.arr_rate {
            if out.try_push(action).is_err() {
                // Full: drop the backlog instead of replaying it next frame.
                self.arr_accumulator %= self.arr_rate;
                break;
            }
            self.arr_accumulator -= self.arr_rate;
        }
    }
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Repeater,
    down: Repeater,
    last_key_time: Instant,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: Repeater::new(das_delay, arr_rate),
            down: Repeater::new(SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS),
            last_key_time: Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Translate a key press into the action to apply now, if any.
    ///
    /// A press of a move/drop key that is already held yields `None`; its
    /// repeats come from [`InputHandler::update`]. Rotation and restart map
    /// straight through on every press.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        let action = action_for_key(code)?;
        let repeater = match action {
            GameAction::MoveLeft | GameAction::MoveRight => &mut self.horizontal,
            GameAction::SoftDrop => &mut self.down,
            GameAction::RotateCcw | GameAction::RotateCw | GameAction::Restart => {
                return Some(action);
            }
        };

        self.last_key_time = Instant::now();
        repeater.press(action).then_some(action)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        match action_for_key(code) {
            Some(action @ (GameAction::MoveLeft | GameAction::MoveRight)) => {
                if self.horizontal.held == Some(action) {
                    self.horizontal.release();
                }
            }
            Some(GameAction::SoftDrop) => self.down.release(),
            _ => {}
        }
    }

    /// Advance the repeat timers and return the repeated actions for this frame.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        // Auto-release when terminal does not emit release events.
        let timeout = Duration::from_millis(self.key_release_timeout_ms as u64);
        if self.last_key_time.elapsed() > timeout {
            self.horizontal.release();
            self.down.release();
        }

        self.horizontal.update(elapsed_ms, &mut actions);
        self.down.update(elapsed_ms, &mut actions);
        actions
    }

    pub fn reset(&mut self) {
        self.horizontal.release();
        self.down.release();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));

        // Before DAS expires: no repeats.
        assert!(ih.update(99).is_empty());

        // Exactly at DAS: still no repeats (needs excess over DAS to accumulate ARR).
        assert!(ih.update(1).is_empty());

        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
    }

    #[test]
    fn test_held_key_press_is_swallowed() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(ih.handle_key_press(KeyCode::Right), None);

        // Switching direction is a fresh press.
        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
    }

    #[test]
    fn test_rotation_is_never_swallowed() {
        let mut ih = InputHandler::new();
        assert_eq!(ih.handle_key_press(KeyCode::Char('w')), Some(GameAction::RotateCw));
        assert_eq!(ih.handle_key_press(KeyCode::Char('w')), Some(GameAction::RotateCw));
        assert_eq!(ih.handle_key_press(KeyCode::Char('q')), Some(GameAction::RotateCcw));
        assert_eq!(ih.handle_key_press(KeyCode::Char('?')), None);
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(ih.horizontal.held, Some(GameAction::MoveLeft));

        // Simulate no key-release events by moving the last key time into the past.
        ih.last_key_time = Instant::now() - Duration::from_millis(51);

        assert!(ih.update(0).is_empty());
        assert_eq!(ih.horizontal.held, None);
    }

    #[test]
    fn test_rotation_does_not_extend_auto_release_timeout() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(50);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        ih.last_key_time = Instant::now() - Duration::from_millis(51);
        assert_eq!(ih.handle_key_press(KeyCode::Up), Some(GameAction::RotateCw));

        // The stale movement key should still auto-release.
        assert!(ih.update(0).is_empty());
        assert_eq!(ih.horizontal.held, None);
    }

    #[test]
    fn test_release_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Char('d'));
        ih.handle_key_release(KeyCode::Right);
        assert!(ih.update(500).is_empty());
    }

    #[test]
    fn test_soft_drop_repeats_use_zero_das_and_50ms_arr() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(GameAction::SoftDrop));

        assert!(ih.update(49).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[GameAction::SoftDrop]);
        assert_eq!(
            ih.update(100).as_slice(),
            &[GameAction::SoftDrop, GameAction::SoftDrop]
        );
    }

    #[test]
    fn test_long_frame_caps_repeats_without_backlog() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Left);

        let burst = ih.update(u32::MAX);
        assert_eq!(burst.len(), 32);
        assert!(burst.iter().all(|&a| a == GameAction::MoveLeft));

        // The overflow is discarded, not replayed on later frames.
        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(GameAction::MoveLeft));
        assert!(!ih.update(200).is_empty(), "expected repeats before reset");

        ih.reset();
        assert!(ih.update(200).is_empty(), "reset should stop repeats");
    }
}
