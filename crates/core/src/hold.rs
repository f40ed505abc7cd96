//! Hold module - the once-per-turn hold slot

use serde::Serialize;

use crate::error::HoldError;
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HoldState {
    pub slot: Option<PieceKind>,
    /// Set by a hold, cleared by the next lock
    pub used_this_turn: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldOutcome {
    pub state: HoldState,
    /// Kind to spawn in place of the held one
    pub active: PieceKind,
    /// The lookahead front was taken and the queue must advance
    pub consumes_queue: bool,
}

/// Bank or swap `active`.
///
/// With an empty slot the replacement comes from `next_queue_piece`; with an
/// occupied slot the two kinds trade places and the queue is left alone.
pub fn perform_hold(
    state: &HoldState,
    active: PieceKind,
    next_queue_piece: Option<PieceKind>,
) -> Result<HoldOutcome, HoldError> {
    if state.used_this_turn {
        return Err(HoldError::AlreadyUsed);
    }

    match state.slot {
        Some(held) => Ok(HoldOutcome {
            state: HoldState {
                slot: Some(active),
                used_this_turn: true,
            },
            active: held,
            consumes_queue: false,
        }),
        None => {
            let next = next_queue_piece.ok_or(HoldError::QueueEmpty)?;
            Ok(HoldOutcome {
                state: HoldState {
                    slot: Some(active),
                    used_this_turn: true,
                },
                active: next,
                consumes_queue: true,
            })
        }
    }
}

/// Re-arm the slot after a lock; the held kind stays
pub fn reset_hold(state: &HoldState) -> HoldState {
    HoldState {
        slot: state.slot,
        used_this_turn: false,
    }
}

pub fn can_hold(state: &HoldState) -> bool {
    !state.used_this_turn
}
