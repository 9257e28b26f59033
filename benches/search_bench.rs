use criterion::{black_box, criterion_group, criterion_main, Criterion};

use othello_engine::{choose_move, Board, CancelToken, Side};

/// A reproducible midgame position: both sides play their first legal
/// move for a dozen plies.
fn midgame_board() -> (Board, Side) {
    let mut board = Board::new();
    let mut side = Side::Black;
    for _ in 0..12 {
        let moves = board.moves_for(side);
        if let Some(mv) = moves.first() {
            board.apply(mv, side);
        }
        side = side.opponent();
    }
    (board, side)
}

fn bench_choose_move(c: &mut Criterion) {
    let (board, side) = midgame_board();
    let cancel = CancelToken::new();

    c.bench_function("minimax_material_depth3", |b| {
        b.iter(|| choose_move(black_box(&board), side, 3, &cancel))
    });

    c.bench_function("minimax_positional_depth6", |b| {
        b.iter(|| choose_move(black_box(&board), side, 101, &cancel))
    });
}

criterion_group!(benches, bench_choose_move);
criterion_main!(benches);
