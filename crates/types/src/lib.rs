//! Core types module - shared data structures and rule constants
//!
//! This crate defines the fundamental types used throughout the engine.
//! Everything here is plain data, usable by the rules engine, the replay
//! driver, and any renderer or input decoder that sits outside the core.
//!
//! # Board Dimensions
//!
//! The default playfield is taller and wider than the classic 10x20 well:
//!
//! - **Height**: 40 rows (indexed 0-39, row 0 at the top)
//! - **Width**: 20 columns (indexed 0-19)
//! - Any positive height x width is accepted by the engine
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Nominal tick interval (~60 FPS) used by drivers |
//! | `LOCK_DELAY_MS` | 500 | Grounded time before a piece locks (strictly exceeded) |
//! | `LOCK_DELAY_FRAMES` | 15 | Grounded ticks before a piece locks |
//! | `LOOKAHEAD_DEPTH` | 3 | Pieces visible in the next queue |
//!
//! # Drop Intervals by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 800ms |
//! | 2 | 650ms |
//! | 3 | 500ms |
//! | 4 | 400ms |
//! | 5 | 320ms |
//! | 6 | 250ms |
//! | 7 | 200ms |
//! | 8 | 160ms |
//! | 9+ | 120ms |
//!
//! # Examples
//!
//! ```
//! use stackfall_types::{Input, PieceKind, Rotation, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
//!
//! assert_eq!(Input::from_str("hard"), Some(Input::HardDrop));
//!
//! assert_eq!(DEFAULT_BOARD_HEIGHT, 40);
//! assert_eq!(DEFAULT_BOARD_WIDTH, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Default board height in rows
pub const DEFAULT_BOARD_HEIGHT: usize = 40;

/// Default board width in columns
pub const DEFAULT_BOARD_WIDTH: usize = 20;

/// Nominal fixed timestep for drivers (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Lock delay in milliseconds. A grounded piece locks once its lock timer is
/// strictly greater than this value.
pub const LOCK_DELAY_MS: u32 = 500;

/// Lock delay in grounded ticks. A grounded piece locks once this many
/// grounded ticks have accumulated, even if the millisecond budget is not spent.
pub const LOCK_DELAY_FRAMES: u32 = 15;

/// Number of upcoming pieces kept in the lookahead queue
pub const LOOKAHEAD_DEPTH: usize = 3;

/// Number of pieces in one randomizer bag
pub const BAG_SIZE: usize = 7;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 0, Index 8 = Level 8
pub const DROP_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Drop interval used from level 9 onwards
pub const DROP_INTERVAL_FLOOR_MS: u32 = 120;

/// Line clear base award, indexed by number of lines cleared.
///
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// Awards are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per cell descended by soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell descended by hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// The seven tetromino piece kinds
///
/// The set is closed: every table in the engine is an exhaustive match over
/// these seven variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order (the order of an unshuffled bag)
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Compact cell code used by render grids (0 is reserved for empty)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }
}

/// Rotation states, indexed 0..=3
///
/// - **North** (0): spawn orientation
/// - **East** (1): rotated 90° clockwise
/// - **South** (2): rotated 180°
/// - **West** (3): rotated 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise (`+1 mod 4`)
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (`+3 mod 4`)
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Rotation index in 0..=3
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from any index, reduced mod 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Horizontal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Left,
    Right,
}

impl MoveDirection {
    /// Column delta for one step
    pub fn delta(&self) -> i32 {
        match self {
            MoveDirection::Left => -1,
            MoveDirection::Right => 1,
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Ready,
    Playing,
    Paused,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Abstract control events handed to the session by an input decoder
///
/// `repeat` flags are a throttling hint for the input layer; the engine
/// treats repeated and fresh presses identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Input {
    /// Shift the active piece one column
    Move {
        direction: MoveDirection,
        #[serde(default)]
        repeat: bool,
    },
    /// Drop the active piece one row (scored)
    SoftDrop {
        #[serde(default)]
        repeat: bool,
    },
    /// Drop to rest and lock immediately
    HardDrop,
    /// Rotate 90° with wall kicks
    Rotate { direction: RotateDirection },
    /// Bank or swap the active piece
    Hold,
    Pause,
    Resume,
}

impl Input {
    /// Parse an input token (for replay scripts)
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_types::{Input, RotateDirection};
    ///
    /// assert_eq!(
    ///     Input::from_str("cw"),
    ///     Some(Input::Rotate { direction: RotateDirection::Clockwise })
    /// );
    /// assert_eq!(Input::from_str("hold"), Some(Input::Hold));
    /// assert_eq!(Input::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Input::Move {
                direction: MoveDirection::Left,
                repeat: false,
            }),
            "right" => Some(Input::Move {
                direction: MoveDirection::Right,
                repeat: false,
            }),
            "soft" | "softdrop" => Some(Input::SoftDrop { repeat: false }),
            "hard" | "harddrop" => Some(Input::HardDrop),
            "cw" | "rotatecw" => Some(Input::Rotate {
                direction: RotateDirection::Clockwise,
            }),
            "ccw" | "rotateccw" => Some(Input::Rotate {
                direction: RotateDirection::CounterClockwise,
            }),
            "hold" => Some(Input::Hold),
            "pause" => Some(Input::Pause),
            "resume" => Some(Input::Resume),
            _ => None,
        }
    }

    /// Convert to the canonical replay token
    pub fn as_str(&self) -> &'static str {
        match self {
            Input::Move {
                direction: MoveDirection::Left,
                ..
            } => "left",
            Input::Move {
                direction: MoveDirection::Right,
                ..
            } => "right",
            Input::SoftDrop { .. } => "soft",
            Input::HardDrop => "hard",
            Input::Rotate {
                direction: RotateDirection::Clockwise,
            } => "cw",
            Input::Rotate {
                direction: RotateDirection::CounterClockwise,
            } => "ccw",
            Input::Hold => "hold",
            Input::Pause => "pause",
            Input::Resume => "resume",
        }
    }
}
