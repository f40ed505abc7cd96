//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the rules: randomizer, rotation system, collision,
//! board compaction, gravity and lock delay, hold, ghost, scoring and the
//! session orchestrator. It performs no I/O, so the same seed and the same
//! inputs always produce the same session.
//!
//! # Module Structure
//!
//! - [`rng`]: seven-bag randomizer, each bag derived from `(seed, bag index)`
//! - [`pieces`]: rotation states, pivots, kick tables and `try_rotate`
//! - [`collision`]: bounds and overlap checks
//! - [`board`]: occupancy grid, piece stamping and row compaction
//! - [`gravity`]: fall timing and the dual-threshold lock delay
//! - [`queue`]: active piece plus a three-deep lookahead
//! - [`hold`]: once-per-turn hold slot
//! - [`ghost`]: landing preview
//! - [`scoring`]: line awards, drop points, level and speed curve
//! - [`phase`]: ready / playing / paused / game over transitions
//! - [`session`]: the orchestrator tying it all together
//! - [`snapshot`]: owned render view
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every aligned run of seven draws holds each kind once
//! - **Rotation**: per-kind pivots with a reduced wall-kick set (3 tests for
//!   J/L/S/T/Z, 5 for I, none for O)
//! - **Lock Delay**: 500ms strictly exceeded, or 15 grounded ticks
//! - **Hold**: once per piece, re-armed by the next lock
//! - **Scoring**: 100/300/500/800 x (level + 1), soft drop 1/cell, hard drop 2/cell
//!
//! # Example
//!
//! ```
//! use stackfall_core::{GameSession, SessionConfig};
//! use stackfall_types::{Input, Phase};
//!
//! let mut session = GameSession::new(SessionConfig::with_seed("docs")).unwrap();
//! session.start();
//!
//! session.apply_input(Input::from_str("right").unwrap()).unwrap();
//! session.apply_input(Input::from_str("cw").unwrap()).unwrap();
//! let state = session.apply_input(Input::HardDrop).unwrap();
//!
//! assert_eq!(state.phase, Phase::Playing);
//! assert!(state.stats.score > 0); // Hard drop awards points
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod error;
pub mod ghost;
pub mod gravity;
pub mod hold;
pub mod phase;
pub mod pieces;
pub mod queue;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use stackfall_types as types;

// Re-export commonly used types for convenience
pub use board::{lock_piece, Board, Cell, LockOutcome};
pub use collision::{can_place, check, CollisionReport};
pub use config::SessionConfig;
pub use error::{ConfigError, HoldError, SessionError};
pub use ghost::project_ghost;
pub use gravity::{GravityInput, GravityState, GravityStep, SpeedProfile};
pub use hold::{can_hold, perform_hold, reset_hold, HoldOutcome, HoldState};
pub use phase::{PhaseEvent, PhaseTransition};
pub use pieces::{get_shape, try_rotate, ActivePiece, Position, RotationResult, Shape};
pub use queue::LookaheadQueue;
pub use rng::{Draw, RandomState, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_line_score, gravity_interval_ms, GameStats};
pub use session::{GameSession, LockEvent, SessionState, SubscriptionId};
pub use snapshot::{ActiveSnapshot, SessionSnapshot};
