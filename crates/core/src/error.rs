//! Error types for contract violations
//!
//! Expected gameplay failures (blocked moves, failed rotations, collisions)
//! are plain values. These enums cover calls that break an operation's
//! preconditions.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HoldError {
    #[error("hold already used this turn")]
    AlreadyUsed,
    #[error("hold needs a queued piece but the queue is empty")]
    QueueEmpty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Hold(#[from] HoldError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must be at least 1x1, got {height}x{width}")]
    EmptyBoard { height: usize, width: usize },
    #[error("lock delay frames must be at least 1")]
    ZeroLockFrames,
}

impl HoldError {
    pub fn code(self) -> &'static str {
        match self {
            HoldError::AlreadyUsed => "hold_used",
            HoldError::QueueEmpty => "queue_empty",
        }
    }
}
