//! Phase module - lifecycle transitions for a session
//!
//! | From | Event | To |
//! |------|-------|----|
//! | Ready | Start | Playing |
//! | Playing | Pause | Paused |
//! | Paused | Resume | Playing |
//! | Playing | TopOut | GameOver |
//! | any | Reset | Ready |
//! | any | ForceGameOver | GameOver |
//!
//! Every other pair is rejected.

use crate::types::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseEvent {
    Start,
    Pause,
    Resume,
    /// A spawn collided
    TopOut,
    Reset,
    /// Debug harness
    ForceGameOver,
}

/// Transition table for [`Phase`]
pub trait PhaseTransition: Sized {
    /// Target phase, or `None` if the event is not valid here
    fn next(self, event: PhaseEvent) -> Option<Self>;
}

impl PhaseTransition for Phase {
    fn next(self, event: PhaseEvent) -> Option<Phase> {
        match (self, event) {
            (_, PhaseEvent::Reset) => Some(Phase::Ready),
            (_, PhaseEvent::ForceGameOver) => Some(Phase::GameOver),
            (Phase::Ready, PhaseEvent::Start) => Some(Phase::Playing),
            (Phase::Playing, PhaseEvent::Pause) => Some(Phase::Paused),
            (Phase::Paused, PhaseEvent::Resume) => Some(Phase::Playing),
            (Phase::Playing, PhaseEvent::TopOut) => Some(Phase::GameOver),
            _ => None,
        }
    }
}
