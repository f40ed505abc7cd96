use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stackfall::core::board::{lock_piece, Board, Cell};
use stackfall::core::collision::can_place;
use stackfall::core::pieces::{get_shape, try_rotate, ActivePiece, Position};
use stackfall::core::rng::RandomState;
use stackfall::core::{GameSession, SessionConfig};
use stackfall::types::{PieceKind, RotateDirection, Rotation};

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::new(SessionConfig::with_seed("bench")).unwrap();
    session.start();

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            if session.state().active.is_none() {
                session.restart();
            }
            session.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    // Bottom 4 rows full except the right column
    let mut board = Board::new(40, 20);
    for row in 36..40 {
        for col in 0..19 {
            board.set(row, col, Cell::filled(PieceKind::I));
        }
    }
    let shape = get_shape(PieceKind::I, Rotation::East);

    c.bench_function("clear_4_lines", |b| {
        b.iter(|| lock_piece(black_box(&board), shape, Position::new(36, 19), PieceKind::I))
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let board = Board::new(40, 20);
    let piece = ActivePiece::spawn(PieceKind::T, 20);

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            try_rotate(black_box(&piece), RotateDirection::Clockwise, |shape, position| {
                can_place(&board, shape, position)
            })
        })
    });
}

fn bench_draws(c: &mut Criterion) {
    let rng = RandomState::new("bench");

    c.bench_function("draw_70_pieces", |b| b.iter(|| black_box(&rng).draw_many(70)));
}

criterion_group!(benches, bench_tick, bench_line_clear, bench_try_rotate, bench_draws);
criterion_main!(benches);
