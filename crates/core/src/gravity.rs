//! Gravity module - fall timing and lock delay
//!
//! A pure state machine fed once per tick. While the piece is falling,
//! elapsed time accumulates into whole rows to drop and the remainder carries
//! over. Once the piece is grounded, the lock timer runs on two thresholds:
//! milliseconds (must be strictly exceeded) and grounded ticks (reached).
//! Whichever trips first locks the piece.

use serde::Serialize;

use crate::types::{DROP_INTERVALS, LOCK_DELAY_FRAMES, LOCK_DELAY_MS};

/// Timing parameters for the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpeedProfile {
    /// Milliseconds per row of natural fall
    pub gravity_ms: u32,
    pub lock_delay_ms: u32,
    pub lock_delay_frames: u32,
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self {
            gravity_ms: DROP_INTERVALS[0],
            lock_delay_ms: LOCK_DELAY_MS,
            lock_delay_frames: LOCK_DELAY_FRAMES,
        }
    }
}

/// Gravity and lock-delay counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GravityState {
    /// Time carried toward the next row; always below `gravity_ms`
    pub fall_elapsed_ms: u32,
    pub lock_elapsed_ms: u32,
    pub lock_frames: u32,
    pub is_locking: bool,
}

/// One tick of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityInput {
    pub elapsed_ms: u32,
    /// The piece cannot move down one row
    pub grounded: bool,
    /// A move or rotation succeeded since the last tick
    pub reset_lock: bool,
    pub profile: SpeedProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityStep {
    pub state: GravityState,
    /// Whole rows of fall earned this tick
    pub drop_rows: u32,
    pub should_lock: bool,
}

/// Advance the counters by one tick
pub fn step(state: &GravityState, input: GravityInput) -> GravityStep {
    let profile = input.profile;

    if !input.grounded {
        let gravity_ms = profile.gravity_ms.max(1);
        let total = state.fall_elapsed_ms.saturating_add(input.elapsed_ms);
        return GravityStep {
            state: GravityState {
                fall_elapsed_ms: total % gravity_ms,
                lock_elapsed_ms: 0,
                lock_frames: 0,
                is_locking: false,
            },
            drop_rows: total / gravity_ms,
            should_lock: false,
        };
    }

    if input.reset_lock {
        return GravityStep {
            state: GravityState {
                fall_elapsed_ms: 0,
                lock_elapsed_ms: 0,
                lock_frames: 0,
                is_locking: true,
            },
            drop_rows: 0,
            should_lock: false,
        };
    }

    let lock_elapsed_ms = state.lock_elapsed_ms.saturating_add(input.elapsed_ms);
    let lock_frames = state.lock_frames.saturating_add(1);
    GravityStep {
        state: GravityState {
            fall_elapsed_ms: 0,
            lock_elapsed_ms,
            lock_frames,
            is_locking: true,
        },
        drop_rows: 0,
        should_lock: lock_elapsed_ms > profile.lock_delay_ms
            || lock_frames >= profile.lock_delay_frames,
    }
}

impl GravityState {
    /// Counters for a piece that has just come to rest mid-tick
    pub fn landed() -> Self {
        Self {
            is_locking: true,
            ..Self::default()
        }
    }
}
