//! Scoring module - line clear awards, drop points and the level ladder
//!
//! Awards scale with `(level + 1)` using the level in effect before the
//! clear. Level is recomputed from total lines afterwards.

use serde::Serialize;

use crate::types::{
    DROP_INTERVALS, DROP_INTERVAL_FLOOR_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES,
    SOFT_DROP_POINTS,
};

/// Running totals for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GameStats {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Cells descended by soft drop
    pub drop_distance_soft: u32,
    /// Cells descended by hard drop
    pub drop_distance_hard: u32,
}

/// Calculate line clear score
/// lines: number of lines cleared (more than 4 is scored as 4)
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    let base_score = LINE_SCORES[lines.min(4)];
    base_score.saturating_mul(level.saturating_add(1))
}

/// Calculate drop score
/// Soft drop: 1 point per cell
/// Hard drop: 2 points per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Calculate level based on lines cleared
/// Level increases every 10 lines
pub fn calculate_level(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL
}

/// Get drop interval in milliseconds for a given level
pub fn gravity_interval_ms(level: u32) -> u32 {
    DROP_INTERVALS
        .get(level as usize)
        .copied()
        .unwrap_or(DROP_INTERVAL_FLOOR_MS)
}

/// Apply a line clear, returning the new totals and the points awarded
pub fn apply_line_clear(stats: &GameStats, lines: usize) -> (GameStats, u32) {
    if lines == 0 {
        return (*stats, 0);
    }
    let award = calculate_line_score(lines, stats.level);
    let total_lines = stats.lines.saturating_add(lines as u32);
    let next = GameStats {
        score: stats.score.saturating_add(award),
        lines: total_lines,
        level: calculate_level(total_lines),
        ..*stats
    };
    (next, award)
}

pub fn apply_soft_drop(stats: &GameStats, cells: u32) -> GameStats {
    GameStats {
        score: stats
            .score
            .saturating_add(calculate_drop_score(cells, false)),
        drop_distance_soft: stats.drop_distance_soft.saturating_add(cells),
        ..*stats
    }
}

pub fn apply_hard_drop(stats: &GameStats, cells: u32) -> GameStats {
    GameStats {
        score: stats.score.saturating_add(calculate_drop_score(cells, true)),
        drop_distance_hard: stats.drop_distance_hard.saturating_add(cells),
        ..*stats
    }
}
