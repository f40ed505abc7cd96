//! Session tests - end-to-end behaviour through the public API

use std::cell::RefCell;
use std::rc::Rc;

use stackfall::core::{GameSession, HoldError, SessionConfig, SessionError, SessionSnapshot};
use stackfall::types::{Input, MoveDirection, Phase, RotateDirection};

fn started(config: SessionConfig) -> GameSession {
    let mut session = GameSession::new(config).unwrap();
    session.start();
    session
}

fn play(session: &mut GameSession, tokens: &str) {
    for token in tokens.split_whitespace() {
        session.apply_input(Input::from_str(token).unwrap()).unwrap();
    }
}

#[test]
fn test_hard_drop_always_locks() {
    for seed in ["a", "b", "c", "seed-42", "stackfall"] {
        let mut session = started(SessionConfig::with_seed(seed));
        let before = session.state();
        let state = session.apply_input(Input::HardDrop).unwrap();

        assert_eq!(state.piece_id, before.piece_id + 1, "seed {}", seed);
        assert_eq!(state.board.occupied_count(), 4);
        assert_eq!(state.last_lock.as_ref().map(|e| e.lines_cleared), Some(0));
        assert!(state.can_hold());
    }
}

#[test]
fn test_grounded_ticks_lock_after_fifteen() {
    let mut session = started(SessionConfig::with_seed("frames"));
    let resting = session.state().ghost.unwrap();
    while session.state().active.unwrap().position != resting {
        session.apply_input(Input::SoftDrop { repeat: true }).unwrap();
    }

    // The first tick only consumes the soft drop's lock reset
    let after_reset = session.tick(10);
    assert!(after_reset.lock.is_locking);
    assert_eq!(after_reset.lock.lock_frames, 0);

    let piece_id = after_reset.piece_id;
    for _ in 0..14 {
        assert_eq!(session.tick(10).piece_id, piece_id);
    }
    let state = session.tick(10);
    assert_eq!(state.piece_id, piece_id + 1);
    assert_eq!(state.board.occupied_count(), 4);
}

#[test]
fn test_lock_delay_milliseconds_strictly_exceeded() {
    let config = SessionConfig {
        lock_delay_frames: 1000,
        ..SessionConfig::with_seed("millis")
    };
    let mut session = started(config);
    let resting = session.state().ghost.unwrap();
    while session.state().active.unwrap().position != resting {
        session.apply_input(Input::SoftDrop { repeat: false }).unwrap();
    }
    session.tick(1);

    let piece_id = session.state().piece_id;
    assert_eq!(session.tick(250).piece_id, piece_id);
    assert_eq!(session.tick(250).piece_id, piece_id, "500ms is not enough");
    assert_eq!(session.tick(1).piece_id, piece_id + 1);
}

#[test]
fn test_move_resets_lock_timer() {
    let config = SessionConfig {
        lock_delay_frames: 1000,
        ..SessionConfig::with_seed("reset")
    };
    let mut session = started(config);
    let resting = session.state().ghost.unwrap();
    while session.state().active.unwrap().position != resting {
        session.apply_input(Input::SoftDrop { repeat: false }).unwrap();
    }
    session.tick(1);
    session.tick(400);
    assert_eq!(session.state().lock.lock_elapsed_ms, 400);

    let moved = session
        .apply_input(Input::Move {
            direction: MoveDirection::Left,
            repeat: false,
        })
        .unwrap();
    // Counters are untouched until the next tick picks up the reset
    assert_eq!(moved.lock.lock_elapsed_ms, 400);
    let state = session.tick(400);
    assert_eq!(state.lock.lock_elapsed_ms, 0);
    assert_eq!(state.piece_id, moved.piece_id);
}

#[test]
fn test_hold_twice_fails_until_lock() {
    let mut session = started(SessionConfig::with_seed("hold"));
    let first = session.state().active.unwrap().kind;

    let held = session.apply_input(Input::Hold).unwrap();
    assert_eq!(held.hold.slot, Some(first));

    let err = session.apply_input(Input::Hold).unwrap_err();
    assert_eq!(err, SessionError::Hold(HoldError::AlreadyUsed));
    assert_eq!(err.to_string(), HoldError::AlreadyUsed.to_string());
    assert_eq!(session.state(), held);

    session.apply_input(Input::HardDrop).unwrap();
    let swapped = session.apply_input(Input::Hold).unwrap();
    assert_eq!(swapped.active.unwrap().kind, first);
    assert_eq!(swapped.active.unwrap().position.row, 0);
}

#[test]
fn test_pause_preserves_position() {
    let mut session = started(SessionConfig::with_seed("pause"));
    play(&mut session, "left left cw soft soft");
    let before = session.state().active;

    session.apply_input(Input::Pause).unwrap();
    session.tick(10_000);
    play(&mut session, "right hard hold");
    assert_eq!(session.phase(), Phase::Paused);
    assert_eq!(session.state().active, before);

    session.apply_input(Input::Resume).unwrap();
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.state().active, before);
}

#[test]
fn test_same_seed_same_game() {
    let script = "left cw hard right right hard ccw hard hold hard soft soft hard";
    let run = |seed: &str| {
        let mut session = started(SessionConfig::with_seed(seed));
        for token in script.split_whitespace() {
            session.apply_input(Input::from_str(token).unwrap()).unwrap();
            session.tick(16);
        }
        session.state()
    };
    assert_eq!(run("twin"), run("twin"));
    assert_ne!(run("twin").board, run("other").board);
}

#[test]
fn test_stacking_tops_out() {
    let config = SessionConfig {
        board_height: 6,
        board_width: 10,
        ..SessionConfig::with_seed("tower")
    };
    let mut session = started(config);
    for _ in 0..20 {
        if session.phase() == Phase::GameOver {
            break;
        }
        session.apply_input(Input::HardDrop).unwrap();
    }

    let over = session.state();
    assert_eq!(over.phase, Phase::GameOver);
    assert!(over.active.is_none());
    assert!(over.ghost.is_none());

    // Nothing moves once the game is over
    assert_eq!(session.tick(1000), over);
    assert_eq!(session.apply_input(Input::HardDrop).unwrap(), over);

    let fresh = session.restart();
    assert_eq!(fresh.phase, Phase::Playing);
    assert_eq!(fresh.episode_id, over.episode_id + 1);
    assert_eq!(fresh.board.occupied_count(), 0);
}

#[test]
fn test_rotation_input_blocked_is_not_error() {
    let config = SessionConfig {
        board_height: 2,
        board_width: 4,
        ..SessionConfig::with_seed("tight")
    };
    let mut session = started(config);
    let before = session.state();
    let after = session
        .apply_input(Input::Rotate {
            direction: RotateDirection::Clockwise,
        })
        .unwrap();
    assert_eq!(after.phase, Phase::Playing);
    if after.active == before.active {
        assert_eq!(after, before);
    }
}

#[test]
fn test_subscriber_sees_every_change() {
    let mut session = GameSession::new(SessionConfig::with_seed("watch")).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    session.subscribe(move |state| sink.borrow_mut().push(state.piece_id));

    session.start();
    play(&mut session, "hard hard");
    session.tick(0);

    assert_eq!(*seen.borrow(), vec![1, 2, 3]);
}

#[test]
fn test_snapshot_serializes() {
    let mut session = started(SessionConfig::with_seed("snap"));
    session.apply_input(Input::HardDrop).unwrap();
    let snapshot: SessionSnapshot = session.snapshot();

    assert_eq!(snapshot.board.len(), 40);
    assert!(snapshot.board.iter().all(|row| row.len() == 20));
    let filled = snapshot.board.iter().flatten().filter(|&&c| c != 0).count();
    assert_eq!(filled, 4);
    assert_eq!(snapshot.next.len(), 3);
    assert!(snapshot.playable());

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["seed"], "snap");
    assert_eq!(json["phase"], "playing");
    assert_eq!(json["piece_id"], 2);
}

#[test]
fn test_forced_game_over_fills_board() {
    let config = SessionConfig {
        board_height: 10,
        board_width: 6,
        ..SessionConfig::with_seed("forced")
    };
    let mut session = started(config);
    let state = session.force_game_over();

    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(state.board.occupied_count(), 10 * 6);
    let snapshot = session.snapshot();
    assert!(snapshot.board.iter().flatten().all(|&code| code != 0));
    assert!(!snapshot.playable());
}
