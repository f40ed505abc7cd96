//! Session module - the orchestrator
//!
//! Ties together board, pieces, randomizer, gravity, hold and scoring into
//! one authoritative [`SessionState`]. Every operation builds the next state
//! from a copy of the current one and swaps it in whole; subscribers are
//! notified only when the state actually changed.
//!
//! Lock-delay resets from moves and rotations are not applied immediately.
//! They are recorded and handed to the gravity machine on the next tick.

use tracing::{debug, info, trace};

use crate::board::{lock_piece, Board};
use crate::collision::can_place;
use crate::config::SessionConfig;
use crate::error::{ConfigError, SessionError};
use crate::ghost::project_ghost;
use crate::gravity::{self, GravityInput, GravityState, SpeedProfile};
use crate::hold::{can_hold, perform_hold, reset_hold, HoldState};
use crate::phase::{PhaseEvent, PhaseTransition};
use crate::pieces::{try_rotate, ActivePiece, Position};
use crate::queue::LookaheadQueue;
use crate::rng::RandomState;
use crate::scoring::{apply_hard_drop, apply_line_clear, apply_soft_drop, gravity_interval_ms, GameStats};
use crate::snapshot::SessionSnapshot;
use crate::types::{Input, Phase, PieceKind};

/// The most recent lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Rows cleared, top to bottom, in pre-clear indices
    pub cleared_rows: Vec<usize>,
    pub lines_cleared: u32,
    pub line_clear_award: u32,
}

/// Complete observable session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub board: Board,
    pub active: Option<ActivePiece>,
    pub hold: HoldState,
    /// Lookahead; owns the randomizer
    pub queue: LookaheadQueue,
    pub stats: GameStats,
    pub speed: SpeedProfile,
    pub lock: GravityState,
    pub phase: Phase,
    pub ghost: Option<Position>,
    pub seed: String,
    /// Monotonic count of successful spawns
    pub piece_id: u32,
    /// Monotonic episode id (increments on restart)
    pub episode_id: u32,
    pub last_lock: Option<LockEvent>,
}

impl SessionState {
    fn initial(config: &SessionConfig, episode_id: u32) -> Self {
        Self {
            board: Board::new(config.board_height, config.board_width),
            active: None,
            hold: HoldState::default(),
            queue: LookaheadQueue::new(RandomState::new(config.seed.clone())),
            stats: GameStats::default(),
            speed: speed_for_level(config, 0),
            lock: GravityState::default(),
            phase: Phase::Ready,
            ghost: None,
            seed: config.seed.clone(),
            piece_id: 0,
            episode_id,
            last_lock: None,
        }
    }

    /// The active piece can move down one row
    pub fn is_grounded(&self) -> bool {
        match self.active {
            Some(piece) => !can_place(&self.board, piece.shape(), piece.position.offset(1, 0)),
            None => false,
        }
    }

    pub fn can_hold(&self) -> bool {
        can_hold(&self.hold)
    }
}

/// Handle returned by [`GameSession::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&SessionState)>;

/// A single game, driven by ticks and inputs
pub struct GameSession {
    config: SessionConfig,
    state: SessionState,
    /// Set by a successful move/rotate/soft drop, consumed by the next tick
    pending_lock_reset: bool,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

fn speed_for_level(config: &SessionConfig, level: u32) -> SpeedProfile {
    let level = if config.level_gravity { level } else { 0 };
    SpeedProfile {
        gravity_ms: gravity_interval_ms(level),
        lock_delay_ms: config.lock_delay_ms,
        lock_delay_frames: config.lock_delay_frames,
    }
}

impl GameSession {
    /// Create a session in the `Ready` phase
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = SessionState::initial(&config, 0);
        Ok(Self {
            config,
            state,
            pending_lock_reset: false,
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Owned copy of the current state
    pub fn state(&self) -> SessionState {
        self.state.clone()
    }

    /// Render view of the current state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(&self.state)
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Register a callback run after every state change
    pub fn subscribe(&mut self, subscriber: impl FnMut(&SessionState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// `Ready -> Playing`: spawn the first piece
    pub fn start(&mut self) -> SessionState {
        let Some(phase) = self.state.phase.next(PhaseEvent::Start) else {
            return self.state();
        };
        let mut next = self.state.clone();
        next.phase = phase;
        debug!(seed = %next.seed, episode = next.episode_id, "session started");
        let kind = next.queue.active();
        self.spawn(&mut next, kind);
        self.commit(next)
    }

    /// Back to `Ready` with a fresh board, queue, hold and stats
    pub fn stop(&mut self) -> SessionState {
        let next = SessionState::initial(&self.config, self.state.episode_id);
        self.pending_lock_reset = false;
        debug!(episode = next.episode_id, "session stopped");
        self.commit(next)
    }

    /// Stop and start again as a new episode
    pub fn restart(&mut self) -> SessionState {
        let episode_id = self.state.episode_id.wrapping_add(1);
        let next = SessionState::initial(&self.config, episode_id);
        self.pending_lock_reset = false;
        self.commit(next);
        self.start()
    }

    /// Debug harness: fill the board and end the game now
    pub fn force_game_over(&mut self) -> SessionState {
        let mut next = self.state.clone();
        next.board = Board::filled(next.board.height(), next.board.width());
        next.phase = next
            .phase
            .next(PhaseEvent::ForceGameOver)
            .unwrap_or(Phase::GameOver);
        next.active = None;
        next.ghost = None;
        info!(score = next.stats.score, lines = next.stats.lines, "game over (forced)");
        self.commit(next)
    }

    /// Advance time by `elapsed_ms`
    pub fn tick(&mut self, elapsed_ms: u32) -> SessionState {
        if self.state.phase != Phase::Playing {
            return self.state();
        }

        let reset_lock = std::mem::take(&mut self.pending_lock_reset);
        let mut next = self.state.clone();
        let Some(active) = next.active else {
            return self.commit(next);
        };

        let step = gravity::step(
            &next.lock,
            GravityInput {
                elapsed_ms,
                grounded: next.is_grounded(),
                reset_lock,
                profile: next.speed,
            },
        );
        trace!(
            elapsed_ms,
            drop_rows = step.drop_rows,
            lock_ms = step.state.lock_elapsed_ms,
            lock_frames = step.state.lock_frames,
            "gravity step"
        );
        next.lock = step.state;

        if step.should_lock {
            self.lock_active(&mut next);
        } else {
            let mut piece = active;
            for _ in 0..step.drop_rows {
                let below = piece.shifted(1, 0);
                if !can_place(&next.board, below.shape(), below.position) {
                    next.lock = GravityState::landed();
                    break;
                }
                piece = below;
            }
            next.active = Some(piece);
        }

        next.ghost = ghost_of(&next);
        self.commit(next)
    }

    /// Apply one input
    ///
    /// Only `Resume` is accepted while paused; everything is ignored in
    /// `Ready` and `GameOver`. A blocked move or rotation is not an error.
    pub fn apply_input(&mut self, input: Input) -> Result<SessionState, SessionError> {
        match (self.state.phase, input) {
            (Phase::Playing, _) => {}
            (Phase::Paused, Input::Resume) => {
                let mut next = self.state.clone();
                next.phase = next.phase.next(PhaseEvent::Resume).unwrap_or(Phase::Playing);
                debug!("resumed");
                return Ok(self.commit(next));
            }
            _ => return Ok(self.state()),
        }

        let mut next = self.state.clone();
        let Some(active) = next.active else {
            return Ok(self.state());
        };

        match input {
            Input::Move { direction, .. } => {
                let moved = active.shifted(0, direction.delta());
                if can_place(&next.board, moved.shape(), moved.position) {
                    next.active = Some(moved);
                    self.pending_lock_reset = true;
                }
            }
            Input::Rotate { direction } => {
                let result = try_rotate(&active, direction, |shape, position| {
                    can_place(&next.board, shape, position)
                });
                if result.success {
                    next.active = Some(result.piece);
                    self.pending_lock_reset = true;
                }
            }
            Input::SoftDrop { .. } => {
                let moved = active.shifted(1, 0);
                if can_place(&next.board, moved.shape(), moved.position) {
                    next.active = Some(moved);
                    next.stats = apply_soft_drop(&next.stats, 1);
                }
                self.pending_lock_reset = true;
            }
            Input::HardDrop => {
                let landing = project_ghost(&next.board, &active).unwrap_or(active.position);
                let distance = (landing.row - active.position.row).max(0) as u32;
                next.stats = apply_hard_drop(&next.stats, distance);
                next.active = Some(ActivePiece {
                    position: landing,
                    ..active
                });
                self.lock_active(&mut next);
            }
            Input::Hold => {
                let outcome = perform_hold(&next.hold, active.kind, next.queue.front())?;
                if outcome.consumes_queue {
                    next.queue = next.queue.advance();
                }
                next.hold = outcome.state;
                next.lock = GravityState::default();
                debug!(held = ?active.kind, active = ?outcome.active, "hold");
                self.spawn(&mut next, outcome.active);
            }
            Input::Pause => {
                if let Some(phase) = next.phase.next(PhaseEvent::Pause) {
                    next.phase = phase;
                    debug!("paused");
                }
            }
            Input::Resume => {}
        }

        next.ghost = ghost_of(&next);
        Ok(self.commit(next))
    }

    /// Stamp the active piece, score, advance the queue and spawn the next one
    fn lock_active(&mut self, next: &mut SessionState) {
        let Some(active) = next.active.take() else {
            return;
        };

        let outcome = lock_piece(&next.board, active.shape(), active.position, active.kind);
        let lines = outcome.cleared_rows.len();
        let (stats, award) = apply_line_clear(&next.stats, lines);

        next.board = outcome.board;
        next.stats = stats;
        next.speed = speed_for_level(&self.config, stats.level);
        next.last_lock = Some(LockEvent {
            kind: active.kind,
            cleared_rows: outcome.cleared_rows,
            lines_cleared: lines as u32,
            line_clear_award: award,
        });
        next.queue = next.queue.advance();
        next.hold = reset_hold(&next.hold);
        next.lock = GravityState::default();

        debug!(
            kind = active.kind.as_str(),
            lines,
            score = stats.score,
            level = stats.level,
            "piece locked"
        );

        let kind = next.queue.active();
        self.spawn(next, kind);
    }

    /// Place `kind` at the spawn point, or end the game if it does not fit
    fn spawn(&mut self, next: &mut SessionState, kind: PieceKind) {
        self.pending_lock_reset = false;
        let piece = ActivePiece::spawn(kind, next.board.width());
        if can_place(&next.board, piece.shape(), piece.position) {
            next.active = Some(piece);
            next.piece_id = next.piece_id.wrapping_add(1);
            next.ghost = ghost_of(next);
            debug!(kind = kind.as_str(), piece_id = next.piece_id, "spawned");
        } else {
            next.active = None;
            next.ghost = None;
            next.phase = next.phase.next(PhaseEvent::TopOut).unwrap_or(Phase::GameOver);
            info!(
                kind = kind.as_str(),
                score = next.stats.score,
                lines = next.stats.lines,
                "game over"
            );
        }
    }

    /// Swap in `next` and notify if anything changed
    fn commit(&mut self, next: SessionState) -> SessionState {
        if next != self.state {
            self.state = next;
            for (_, subscriber) in self.subscribers.iter_mut() {
                subscriber(&self.state);
            }
        }
        self.state()
    }
}

fn ghost_of(state: &SessionState) -> Option<Position> {
    state
        .active
        .and_then(|piece| project_ghost(&state.board, &piece))
}
