//! Seed replay
//!
//! A replay script is a whitespace separated list of steps. Each step is
//! either an input token (`left`, `right`, `cw`, `ccw`, `soft`, `hard`,
//! `hold`, `pause`, `resume`) or a tick: `tick:<ms>`, or a bare `tick` for one
//! nominal frame. `#` starts a comment that runs to the end of the line.
//!
//! ```text
//! # open with a T-slot setup
//! left left cw hard
//! tick:16 tick:16
//! hold hard
//! ```

use std::cell::Cell;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, info};

use stackfall_core::{ConfigError, GameSession, SessionConfig, SessionError, SessionSnapshot, SessionState};
use stackfall_types::{Input, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStep {
    Input(Input),
    Tick(u32),
}

impl ReplayStep {
    /// Parse one token
    pub fn from_str(token: &str) -> Option<Self> {
        let lower = token.to_lowercase();
        if lower == "tick" {
            return Some(ReplayStep::Tick(TICK_MS));
        }
        if let Some(ms) = lower.strip_prefix("tick:") {
            return ms.parse().ok().map(ReplayStep::Tick);
        }
        Input::from_str(&lower).map(ReplayStep::Input)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplayScript {
    steps: Vec<ReplayStep>,
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("line {line}: unknown token `{token}`")]
    UnknownToken { line: usize, token: String },
    #[error("line {line}: invalid tick `{token}`")]
    InvalidTick { line: usize, token: String },
    #[error("invalid session config: {0}")]
    Config(#[from] ConfigError),
    #[error("step {step}: {source}")]
    Session {
        step: usize,
        #[source]
        source: SessionError,
    },
}

impl ReplayError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ReplayError::UnknownToken { .. } => "unknown_token",
            ReplayError::InvalidTick { .. } => "invalid_tick",
            ReplayError::Config(_) => "invalid_config",
            ReplayError::Session { .. } => "session_error",
        }
    }
}

impl ReplayScript {
    pub fn new(steps: Vec<ReplayStep>) -> Self {
        Self { steps }
    }

    pub fn parse(text: &str) -> Result<Self, ReplayError> {
        let mut steps = Vec::new();
        for (index, raw_line) in text.lines().enumerate() {
            let line = raw_line.split('#').next().unwrap_or("");
            for token in line.split_whitespace() {
                match ReplayStep::from_str(token) {
                    Some(step) => steps.push(step),
                    None if token.to_lowercase().starts_with("tick") => {
                        return Err(ReplayError::InvalidTick {
                            line: index + 1,
                            token: token.to_string(),
                        })
                    }
                    None => {
                        return Err(ReplayError::UnknownToken {
                            line: index + 1,
                            token: token.to_string(),
                        })
                    }
                }
            }
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ReplayStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Outcome of a replay run
#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub state: SessionState,
    pub snapshot: SessionSnapshot,
    pub inputs_applied: usize,
    pub ticks: usize,
    pub elapsed_ms: u64,
    /// State changes seen by a subscriber, including the start
    pub notifications: usize,
}

/// Start a session from `config` and play `script` through it
pub fn run_replay(config: SessionConfig, script: &ReplayScript) -> Result<ReplayReport, ReplayError> {
    let mut session = GameSession::new(config)?;

    let notifications = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&notifications);
    let subscription = session.subscribe(move |_| counter.set(counter.get() + 1));

    session.start();
    info!(seed = %session.config().seed, steps = script.len(), "replay started");

    let mut inputs_applied = 0usize;
    let mut ticks = 0usize;
    let mut elapsed_ms = 0u64;

    for (step, item) in script.steps().iter().enumerate() {
        match *item {
            ReplayStep::Tick(ms) => {
                session.tick(ms);
                ticks += 1;
                elapsed_ms += u64::from(ms);
            }
            ReplayStep::Input(input) => {
                session
                    .apply_input(input)
                    .map_err(|source| ReplayError::Session { step, source })?;
                inputs_applied += 1;
                debug!(step, input = input.as_str(), "input applied");
            }
        }
    }

    session.unsubscribe(subscription);
    let state = session.state();
    info!(
        phase = state.phase.as_str(),
        score = state.stats.score,
        lines = state.stats.lines,
        "replay finished"
    );

    Ok(ReplayReport {
        snapshot: session.snapshot(),
        state,
        inputs_applied,
        ticks,
        elapsed_ms,
        notifications: notifications.get(),
    })
}
