//! Queue module - the active piece plus a fixed-depth lookahead
//!
//! The queue owns the randomizer, so every kind it has shown came from the
//! same draw sequence. It always holds exactly [`LOOKAHEAD_DEPTH`] kinds.

use arrayvec::ArrayVec;

use crate::rng::RandomState;
use crate::types::{PieceKind, LOOKAHEAD_DEPTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookaheadQueue {
    active: PieceKind,
    queue: ArrayVec<PieceKind, LOOKAHEAD_DEPTH>,
    rng: RandomState,
}

impl LookaheadQueue {
    /// Draw one active kind and fill the lookahead
    pub fn new(rng: RandomState) -> Self {
        let first = rng.draw();
        Self::filled(first.piece, ArrayVec::new(), first.next)
    }

    fn filled(
        active: PieceKind,
        mut queue: ArrayVec<PieceKind, LOOKAHEAD_DEPTH>,
        mut rng: RandomState,
    ) -> Self {
        while !queue.is_full() {
            let draw = rng.draw();
            queue.push(draw.piece);
            rng = draw.next;
        }
        Self { active, queue, rng }
    }

    /// Promote the front of the queue to active and refill
    pub fn advance(&self) -> Self {
        let mut queue = self.queue.clone();
        let mut rng = self.rng.clone();
        let active = if queue.is_empty() {
            let draw = rng.draw();
            rng = draw.next;
            draw.piece
        } else {
            queue.remove(0)
        };
        Self::filled(active, queue, rng)
    }

    pub fn active(&self) -> PieceKind {
        self.active
    }

    /// Upcoming kinds, nearest first
    pub fn queue(&self) -> &[PieceKind] {
        &self.queue
    }

    pub fn front(&self) -> Option<PieceKind> {
        self.queue.first().copied()
    }

    pub fn rng(&self) -> &RandomState {
        &self.rng
    }
}
