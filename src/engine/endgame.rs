// Exact endgame solver.
//
// Once few empty cells remain, the game tree is small enough to search to
// the end. The solver is a negamax over the remaining moves whose leaf
// values are final stone differentials, so its results are game-theoretic
// values, not heuristic estimates. It keeps its own cache: every stored
// entry is an exact differential, never a depth-bounded guess.

use log::debug;

use crate::board::{Board, Move, Side};

use super::evaluation::evaluate;
use super::profile::Profile;
use super::transposition::{position_hash, EndgameTable};
use super::CancelToken;

/// One more than the largest reachable stone differential.
const SCORE_INF: i32 = 65;

/// A line that wins every stone cannot be improved on.
const MAX_DIFFERENTIAL: i32 = 64;

/// Best move for `side` under perfect play to the end of the game, or
/// `None` when there is no legal move or cancellation was observed.
pub(crate) fn best_move_exact(
    board: &mut Board,
    side: Side,
    profile: &Profile,
    cancel: &CancelToken,
) -> Option<Move> {
    let moves = board.moves_for(side);
    if moves.is_empty() {
        return None;
    }

    let use_pruning = profile.endgame.map(|e| e.use_pruning).unwrap_or(true);
    let mut table = EndgameTable::new();
    let mut best: Option<Move> = None;
    let mut best_score = -SCORE_INF;

    for mv in order_moves(board, moves, side, profile) {
        if cancel.is_cancelled() {
            return None;
        }

        let undo = board.apply(&mv, side);
        let score = -negamax(
            board,
            side.opponent(),
            -SCORE_INF,
            SCORE_INF,
            profile,
            &mut table,
        );
        board.undo(undo);

        if score > best_score {
            best_score = score;
            best = Some(mv);
        }
        if use_pruning && best_score >= MAX_DIFFERENTIAL {
            break;
        }
    }

    debug!(
        "endgame solved: differential {} with {} cached positions",
        best_score,
        table.len()
    );
    best
}

/// Exact stone differential for `side` under optimal play from here to
/// the end of the game.
///
/// When `side` cannot move the turn passes by negation; when neither side
/// can, the position is terminal and scores itself. Bounds follow the
/// negamax convention: recursive calls see them negated and swapped.
pub(crate) fn negamax(
    board: &mut Board,
    side: Side,
    mut alpha: i32,
    beta: i32,
    profile: &Profile,
    table: &mut EndgameTable,
) -> i32 {
    let hash = position_hash(board, side);
    if let Some(score) = table.probe(hash) {
        return score;
    }

    let alpha_in = alpha;
    let moves = board.moves_for(side);

    if moves.is_empty() {
        if !board.has_any_move(side.opponent()) {
            let score = board.differential(side);
            table.store(hash, score);
            return score;
        }
        let score = -negamax(board, side.opponent(), -beta, -alpha, profile, table);
        if score > alpha_in && score < beta {
            table.store(hash, score);
        }
        return score;
    }

    let use_pruning = profile.endgame.map(|e| e.use_pruning).unwrap_or(true);
    let mut best = -SCORE_INF;

    for mv in order_moves(board, moves, side, profile) {
        let undo = board.apply(&mv, side);
        let score = -negamax(board, side.opponent(), -beta, -alpha, profile, table);
        board.undo(undo);

        best = best.max(score);
        alpha = alpha.max(score);
        if use_pruning && best >= MAX_DIFFERENTIAL {
            break;
        }
        if alpha >= beta {
            break;
        }
    }

    // Cutoff values are bounds, not exact differentials; keep them out of
    // the cache.
    if best > alpha_in && best < beta {
        table.store(hash, best);
    }
    best
}

/// Order candidates by a one-ply evaluation, best first. Ordering only
/// affects how quickly branches prune, never the solved value.
fn order_moves(board: &mut Board, moves: Vec<Move>, side: Side, profile: &Profile) -> Vec<Move> {
    let mut scored: Vec<(i32, Move)> = moves
        .into_iter()
        .map(|mv| {
            let undo = board.apply(&mv, side);
            let score = evaluate(board, side, profile);
            board.undo(undo);
            (score, mv)
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, mv)| mv).collect()
}
