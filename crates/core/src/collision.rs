//! Collision module - placement checks against the board
//!
//! A placement collides when its bounding box leaves the grid or any of its
//! cells lands on an occupied cell. The bounding box decides bounds, not the
//! individual cells.

use crate::board::Board;
use crate::pieces::{Position, Shape};

/// Why a placement was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    pub collides: bool,
    pub out_of_bounds: bool,
    pub overlaps: bool,
}

/// Check a shape at `position` against `board`
pub fn check(board: &Board, shape: &Shape, position: Position) -> CollisionReport {
    let bottom = position.row + shape.height;
    let right = position.col + shape.width;
    let out_of_bounds = position.row < 0
        || position.col < 0
        || bottom > board.height() as i32
        || right > board.width() as i32;

    let overlaps = shape
        .cells_at(position)
        .any(|(row, col)| board.is_occupied(row, col));

    CollisionReport {
        collides: out_of_bounds || overlaps,
        out_of_bounds,
        overlaps,
    }
}

/// True when the shape fits at `position`
pub fn can_place(board: &Board, shape: &Shape, position: Position) -> bool {
    !check(board, shape, position).collides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::pieces::get_shape;
    use crate::types::{PieceKind, Rotation};

    #[test]
    fn test_empty_board_in_bounds() {
        let board = Board::new(20, 10);
        let shape = get_shape(PieceKind::T, Rotation::North);
        let report = check(&board, shape, Position::new(0, 0));
        assert_eq!(report, CollisionReport::default());
        assert!(can_place(&board, shape, Position::new(18, 7)));
    }

    #[test]
    fn test_bounding_box_decides_bounds() {
        let board = Board::new(20, 10);
        let shape = get_shape(PieceKind::T, Rotation::North);

        let report = check(&board, shape, Position::new(0, 8));
        assert!(report.collides);
        assert!(report.out_of_bounds);
        assert!(!report.overlaps);

        assert!(!can_place(&board, shape, Position::new(19, 0)));
        assert!(!can_place(&board, shape, Position::new(-1, 0)));
        assert!(!can_place(&board, shape, Position::new(0, -1)));
    }

    #[test]
    fn test_overlap_detected() {
        let board = Board::new(20, 10).with_cell(1, 1, Cell::BLOCK);
        let shape = get_shape(PieceKind::T, Rotation::North);

        let report = check(&board, shape, Position::new(0, 0));
        assert!(report.collides);
        assert!(report.overlaps);
        assert!(!report.out_of_bounds);
    }

    #[test]
    fn test_empty_bounding_box_cell_does_not_overlap() {
        // (0, 0) is inside the T's box but not one of its cells
        let board = Board::new(20, 10).with_cell(0, 0, Cell::BLOCK);
        let shape = get_shape(PieceKind::T, Rotation::North);
        assert!(can_place(&board, shape, Position::new(0, 0)));
    }
}
