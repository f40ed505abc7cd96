//! Ghost module - landing position preview

use crate::board::Board;
use crate::collision::can_place;
use crate::pieces::{ActivePiece, Position};

/// Where `piece` would come to rest if dropped straight down.
///
/// `None` when the piece already collides where it is.
pub fn project_ghost(board: &Board, piece: &ActivePiece) -> Option<Position> {
    let shape = piece.shape();
    if !can_place(board, shape, piece.position) {
        return None;
    }

    let mut landing = piece.position;
    while can_place(board, shape, landing.offset(1, 0)) {
        landing = landing.offset(1, 0);
    }
    Some(landing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::types::{PieceKind, Rotation};

    fn piece(kind: PieceKind, row: i32, col: i32) -> ActivePiece {
        ActivePiece {
            kind,
            rotation: Rotation::North,
            position: Position::new(row, col),
        }
    }

    #[test]
    fn test_ghost_on_empty_board() {
        let board = Board::new(20, 10);
        assert_eq!(
            project_ghost(&board, &piece(PieceKind::T, 0, 3)),
            Some(Position::new(18, 3))
        );
        assert_eq!(
            project_ghost(&board, &piece(PieceKind::I, 0, 3)),
            Some(Position::new(19, 3))
        );
    }

    #[test]
    fn test_ghost_rests_on_stack() {
        let board = Board::new(20, 10).with_cell(10, 4, Cell::BLOCK);
        assert_eq!(
            project_ghost(&board, &piece(PieceKind::T, 0, 3)),
            Some(Position::new(8, 3))
        );
    }

    #[test]
    fn test_ghost_none_when_colliding() {
        let board = Board::new(20, 10).with_cell(1, 4, Cell::BLOCK);
        assert_eq!(project_ghost(&board, &piece(PieceKind::T, 0, 3)), None);
    }

    #[test]
    fn test_ghost_idempotent() {
        let board = Board::new(20, 10);
        let start = piece(PieceKind::S, 2, 5);
        let landing = project_ghost(&board, &start).unwrap();
        let again = project_ghost(
            &board,
            &ActivePiece {
                position: landing,
                ..start
            },
        );
        assert_eq!(again, Some(landing));
    }
}
