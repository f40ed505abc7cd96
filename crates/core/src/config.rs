//! Session configuration

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, LOCK_DELAY_FRAMES, LOCK_DELAY_MS};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Randomizer seed; the same seed replays the same pieces
    pub seed: String,
    pub board_height: usize,
    pub board_width: usize,
    pub lock_delay_ms: u32,
    pub lock_delay_frames: u32,
    /// Speed up gravity as the level rises; when off, level 0 speed is kept
    pub level_gravity: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: "stackfall".to_string(),
            board_height: DEFAULT_BOARD_HEIGHT,
            board_width: DEFAULT_BOARD_WIDTH,
            lock_delay_ms: LOCK_DELAY_MS,
            lock_delay_frames: LOCK_DELAY_FRAMES,
            level_gravity: true,
        }
    }
}

impl SessionConfig {
    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            ..Self::default()
        }
    }

    /// Create from environment variables
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("STACKFALL_SEED")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.seed);
        let board_height = lookup("STACKFALL_BOARD_HEIGHT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.board_height);
        let board_width = lookup("STACKFALL_BOARD_WIDTH")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.board_width);
        let lock_delay_ms = lookup("STACKFALL_LOCK_DELAY_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.lock_delay_ms);
        let lock_delay_frames = lookup("STACKFALL_LOCK_DELAY_FRAMES")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.lock_delay_frames);

        Self {
            seed,
            board_height,
            board_width,
            lock_delay_ms,
            lock_delay_frames,
            level_gravity: defaults.level_gravity,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_height == 0 || self.board_width == 0 {
            return Err(ConfigError::EmptyBoard {
                height: self.board_height,
                width: self.board_width,
            });
        }
        if self.lock_delay_frames == 0 {
            return Err(ConfigError::ZeroLockFrames);
        }
        Ok(())
    }
}
