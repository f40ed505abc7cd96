//! Replay tests - scripted runs through the engine

use stackfall::core::SessionConfig;
use stackfall::engine::{run_replay, ReplayError, ReplayScript, ReplayStep};
use stackfall::types::{Input, Phase, TICK_MS};

#[test]
fn test_replay_matches_manual_session() {
    let text = "left cw hard\ntick tick:100\nright right hard";
    let script = ReplayScript::parse(text).unwrap();
    let report = run_replay(SessionConfig::with_seed("manual"), &script).unwrap();

    let mut session = stackfall::core::GameSession::new(SessionConfig::with_seed("manual")).unwrap();
    session.start();
    for step in script.steps() {
        match *step {
            ReplayStep::Input(input) => {
                session.apply_input(input).unwrap();
            }
            ReplayStep::Tick(ms) => {
                session.tick(ms);
            }
        }
    }

    assert_eq!(report.state, session.state());
    assert_eq!(report.snapshot, session.snapshot());
    assert_eq!(report.inputs_applied, 6);
    assert_eq!(report.ticks, 2);
    assert_eq!(report.elapsed_ms, u64::from(TICK_MS) + 100);
}

#[test]
fn test_seed_changes_outcome() {
    let script = ReplayScript::parse("hard hard hard").unwrap();
    let a = run_replay(SessionConfig::with_seed("one"), &script).unwrap();
    let b = run_replay(SessionConfig::with_seed("one"), &script).unwrap();
    assert_eq!(a.snapshot, b.snapshot);
    assert_eq!(a.state.piece_id, 4);
    assert_eq!(a.state.board.occupied_count(), 12);
}

#[test]
fn test_script_from_steps() {
    let script = ReplayScript::new(vec![
        ReplayStep::Input(Input::Pause),
        ReplayStep::Tick(5000),
        ReplayStep::Input(Input::Resume),
    ]);
    let report = run_replay(SessionConfig::with_seed("steps"), &script).unwrap();
    assert_eq!(report.state.phase, Phase::Playing);
    assert_eq!(report.state.active.unwrap().position.row, 0);
    assert_eq!(report.notifications, 3);
}

#[test]
fn test_errors_are_coded() {
    let err = ReplayScript::parse("left\n\nspin").unwrap_err();
    assert!(matches!(err, ReplayError::UnknownToken { line: 3, .. }));

    let err = ReplayScript::parse("tick:-5").unwrap_err();
    assert_eq!(err.code(), "invalid_tick");
    assert_eq!(err.to_string(), "line 1: invalid tick `tick:-5`");
}
