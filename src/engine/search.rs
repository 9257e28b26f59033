// Iterative deepening driver.
//
// Runs fixed-depth searches at depth 1, 2, 3, ... until the wall-clock
// budget elapses. The budget is only checked between depth iterations, so
// each iteration runs to completion and the returned move is always the
// best of the deepest fully completed depth. Cancellation is different:
// it aborts the whole call with no result.

use std::time::{Duration, Instant};

use log::debug;

use crate::board::{Board, Move, Side};

use super::minimax::{minimax, INF, NEG_INF};
use super::profile::Profile;
use super::transposition::TranspositionTable;
use super::CancelToken;

pub(crate) fn best_move_iterative(
    board: &mut Board,
    side: Side,
    time_limit: Duration,
    profile: &Profile,
    cancel: &CancelToken,
) -> Option<Move> {
    let start = Instant::now();
    let moves = board.moves_for(side);
    if moves.is_empty() {
        return None;
    }

    // One cache for the whole call; entries are depth-keyed, so iterations
    // never answer for each other.
    let mut tt = TranspositionTable::new();
    let mut best: Option<Move> = None;
    let mut depth: u8 = 1;

    while start.elapsed() < time_limit {
        let mut depth_best: Option<Move> = None;
        let mut depth_score = NEG_INF;

        for mv in &moves {
            if cancel.is_cancelled() {
                return None;
            }

            let undo = board.apply(mv, side);
            let score = minimax(
                board,
                side.opponent(),
                depth - 1,
                NEG_INF,
                INF,
                false,
                side,
                profile,
                &mut tt,
            );
            board.undo(undo);

            if score > depth_score {
                depth_score = score;
                depth_best = Some(mv.clone());
            }
        }

        debug!(
            "iterative depth {} score {} elapsed {:?}",
            depth,
            depth_score,
            start.elapsed()
        );

        best = depth_best;
        depth = depth.saturating_add(1);
    }

    best
}
