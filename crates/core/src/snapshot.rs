//! Read-only render view of a session
//!
//! Everything a renderer or persistence layer needs, flattened into owned
//! plain data. Board cells are [`PieceKind::code`] values, 0 for empty.

use serde::Serialize;

use crate::pieces::{ActivePiece, Position};
use crate::scoring::GameStats;
use crate::session::SessionState;
use crate::types::{Phase, PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i32,
    pub col: i32,
    /// Board coordinates `(row, col)` of the four cells
    pub cells: [(i32, i32); 4],
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            row: value.position.row,
            col: value.position.col,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Row-major grid, top row first
    pub board: Vec<Vec<u8>>,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<Position>,
    pub next: Vec<PieceKind>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub stats: GameStats,
    pub phase: Phase,
    pub seed: String,
    pub episode_id: u32,
    pub piece_id: u32,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }
}

impl From<&SessionState> for SessionSnapshot {
    fn from(state: &SessionState) -> Self {
        let board = state
            .board
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match (cell.occupied, cell.kind) {
                        (false, _) => 0,
                        (true, Some(kind)) => kind.code(),
                        // Anonymous blocks get a code outside the piece range
                        (true, None) => 8,
                    })
                    .collect()
            })
            .collect();

        Self {
            board,
            active: state.active.map(ActiveSnapshot::from),
            ghost: state.ghost,
            next: state.queue.queue().to_vec(),
            hold: state.hold.slot,
            can_hold: state.can_hold(),
            stats: state.stats,
            phase: state.phase,
            seed: state.seed.clone(),
            episode_id: state.episode_id,
            piece_id: state.piece_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SessionConfig;
    use crate::session::GameSession;
    use crate::types::{Input, Phase};

    #[test]
    fn test_snapshot_reflects_session() {
        let mut session = GameSession::new(SessionConfig::with_seed("snap")).unwrap();
        session.start();
        session.apply_input(Input::HardDrop).unwrap();
        let state = session.state();
        let snap = session.snapshot();

        assert_eq!(snap.board.len(), 40);
        assert!(snap.board.iter().all(|row| row.len() == 20));
        let filled: usize = snap
            .board
            .iter()
            .map(|row| row.iter().filter(|&&c| c != 0).count())
            .sum();
        assert_eq!(filled, 4);

        let active = snap.active.unwrap();
        assert_eq!(active.kind, state.active.unwrap().kind);
        assert_eq!(snap.next, state.queue.queue().to_vec());
        assert_eq!(snap.phase, Phase::Playing);
        assert!(snap.playable());
        assert_eq!(snap.stats, state.stats);
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = GameSession::new(SessionConfig::with_seed("json")).unwrap();
        let value = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(value["phase"], "ready");
        assert_eq!(value["seed"], "json");
        assert!(value["active"].is_null());
        assert_eq!(value["next"].as_array().map(|a| a.len()), Some(3));
    }
}
