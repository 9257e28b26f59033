// Depth-limited minimax with alpha-beta pruning.
//
// The root iterates legal moves in scan order and searches each child
// with the full window, keeping the first strictly-better score. All
// evaluation happens from the root player's perspective; the recursion
// alternates between maximizing and minimizing levels.

use log::{debug, trace};

use crate::board::{Board, Move, Side};

use super::evaluation::evaluate;
use super::profile::{DepthEntry, Profile};
use super::transposition::{position_hash, TranspositionTable};
use super::CancelToken;

pub(crate) const INF: i32 = i32::MAX;
pub(crate) const NEG_INF: i32 = i32::MIN + 1;

/// Depth used when a dynamic table has no matching entry.
pub(crate) const FALLBACK_DEPTH: u8 = 2;

/// Resolve a depth from an empty-count-indexed table: first entry with
/// `empty <= max_empty` wins. A table that matches nothing (including an
/// empty one) falls back to a shallow default rather than failing.
pub(crate) fn dynamic_depth(empty: u32, table: &[DepthEntry]) -> u8 {
    for entry in table {
        if empty <= entry.max_empty as u32 {
            return entry.depth;
        }
    }
    FALLBACK_DEPTH
}

/// Best move for `side` from a fixed-depth alpha-beta search, or `None`
/// when there is no legal move or cancellation was observed.
pub(crate) fn best_move_fixed_depth(
    board: &mut Board,
    side: Side,
    depth: u8,
    profile: &Profile,
    cancel: &CancelToken,
) -> Option<Move> {
    let moves = board.moves_for(side);
    if moves.is_empty() {
        return None;
    }

    let mut tt = TranspositionTable::new();
    let mut best: Option<Move> = None;
    let mut best_score = NEG_INF;

    for mv in moves {
        if cancel.is_cancelled() {
            return None;
        }

        let undo = board.apply(&mv, side);
        let score = minimax(
            board,
            side.opponent(),
            depth.saturating_sub(1),
            NEG_INF,
            INF,
            false,
            side,
            profile,
            &mut tt,
        );
        board.undo(undo);

        if score > best_score {
            best_score = score;
            best = Some(mv);
        }
    }

    debug!(
        "minimax depth {} score {} cached {} ({} hits)",
        depth,
        best_score,
        tt.len(),
        tt.hits
    );
    best
}

/// Recursive alpha-beta search. `root` is the perspective every
/// evaluation is taken from; `maximizing` says whose turn the current
/// level optimizes for.
#[allow(clippy::too_many_arguments)]
pub(crate) fn minimax(
    board: &mut Board,
    to_move: Side,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    root: Side,
    profile: &Profile,
    tt: &mut TranspositionTable,
) -> i32 {
    let hash = position_hash(board, to_move);
    if let Some(score) = tt.probe(hash, depth) {
        trace!("tt hit at depth {}", depth);
        return score;
    }

    let moves = board.moves_for(to_move);
    if depth == 0 || moves.is_empty() {
        let score = evaluate(board, root, profile);
        tt.store(hash, depth, score);
        return score;
    }

    let ordered = order_moves(board, moves, to_move, root, profile, maximizing);
    let (alpha_in, beta_in) = (alpha, beta);

    let value = if maximizing {
        let mut value = NEG_INF;
        for mv in &ordered {
            let undo = board.apply(mv, to_move);
            let score = minimax(
                board,
                to_move.opponent(),
                depth - 1,
                alpha,
                beta,
                false,
                root,
                profile,
                tt,
            );
            board.undo(undo);

            value = value.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        value
    } else {
        let mut value = INF;
        for mv in &ordered {
            let undo = board.apply(mv, to_move);
            let score = minimax(
                board,
                to_move.opponent(),
                depth - 1,
                alpha,
                beta,
                true,
                root,
                profile,
                tt,
            );
            board.undo(undo);

            value = value.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        value
    };

    // A value clipped by the window is only a bound; caching it would
    // poison later probes under wider windows. Exact values only.
    if value > alpha_in && value < beta_in {
        tt.store(hash, depth, value);
    }
    value
}

/// Pre-score each candidate with a one-ply evaluation and sort:
/// descending when the current level maximizes, ascending when it
/// minimizes. The sort is stable, so ties keep scan order.
fn order_moves(
    board: &mut Board,
    moves: Vec<Move>,
    to_move: Side,
    root: Side,
    profile: &Profile,
    maximizing: bool,
) -> Vec<Move> {
    let mut scored: Vec<(i32, Move)> = moves
        .into_iter()
        .map(|mv| {
            let undo = board.apply(&mv, to_move);
            let score = evaluate(board, root, profile);
            board.undo(undo);
            (score, mv)
        })
        .collect();

    if maximizing {
        scored.sort_by(|a, b| b.0.cmp(&a.0));
    } else {
        scored.sort_by(|a, b| a.0.cmp(&b.0));
    }

    scored.into_iter().map(|(_, mv)| mv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::engine::profile::profile_for;

    /// Un-pruned, un-cached reference minimax for equivalence checks.
    fn plain_minimax(
        board: &mut Board,
        to_move: Side,
        depth: u8,
        maximizing: bool,
        root: Side,
        profile: &Profile,
    ) -> i32 {
        let moves = board.moves_for(to_move);
        if depth == 0 || moves.is_empty() {
            return evaluate(board, root, profile);
        }

        let mut value = if maximizing { NEG_INF } else { INF };
        for mv in moves {
            let undo = board.apply(&mv, to_move);
            let score = plain_minimax(board, to_move.opponent(), depth - 1, !maximizing, root, profile);
            board.undo(undo);
            value = if maximizing {
                value.max(score)
            } else {
                value.min(score)
            };
        }
        value
    }

    fn plain_best_move(board: &Board, side: Side, depth: u8, profile: &Profile) -> (Option<Move>, i32) {
        let mut scratch = board.clone();
        let mut best = None;
        let mut best_score = NEG_INF;
        for mv in scratch.moves_for(side) {
            let undo = scratch.apply(&mv, side);
            let score = plain_minimax(
                &mut scratch,
                side.opponent(),
                depth - 1,
                false,
                side,
                profile,
            );
            scratch.undo(undo);
            if score > best_score {
                best_score = score;
                best = Some(mv);
            }
        }
        (best, best_score)
    }

    fn midgame_board() -> Board {
        let mut board = Board::new();
        let mut side = Side::Black;
        for _ in 0..8 {
            let moves = board.moves_for(side);
            if let Some(mv) = moves.first() {
                board.apply(mv, side);
            }
            side = side.opponent();
        }
        board
    }

    #[test]
    fn dynamic_depth_scans_in_order() {
        let table = [
            DepthEntry { max_empty: 20, depth: 7 },
            DepthEntry { max_empty: 40, depth: 5 },
            DepthEntry { max_empty: 64, depth: 4 },
        ];
        assert_eq!(dynamic_depth(12, &table), 7);
        assert_eq!(dynamic_depth(20, &table), 7);
        assert_eq!(dynamic_depth(21, &table), 5);
        assert_eq!(dynamic_depth(60, &table), 4);
    }

    #[test]
    fn dynamic_depth_falls_back_when_nothing_matches() {
        assert_eq!(dynamic_depth(30, &[]), FALLBACK_DEPTH);

        let short = [DepthEntry { max_empty: 10, depth: 9 }];
        assert_eq!(dynamic_depth(30, &short), FALLBACK_DEPTH);
    }

    #[test]
    fn pruning_never_changes_the_result() {
        let cancel = CancelToken::new();
        for &(level, depth) in &[(1u16, 3u8), (101, 3)] {
            let profile = profile_for(level);
            let board = midgame_board();

            let (expected_move, expected_score) =
                plain_best_move(&board, Side::Black, depth, profile);

            let mut scratch = board.clone();
            let chosen =
                best_move_fixed_depth(&mut scratch, Side::Black, depth, profile, &cancel);

            assert_eq!(chosen, expected_move, "level {level}");

            // The pruned root sees the same score for the chosen move.
            let mut tt = TranspositionTable::new();
            let mut scratch = board.clone();
            let undo = scratch.apply(chosen.as_ref().unwrap(), Side::Black);
            let score = minimax(
                &mut scratch,
                Side::White,
                depth - 1,
                NEG_INF,
                INF,
                false,
                Side::Black,
                profile,
                &mut tt,
            );
            scratch.undo(undo);
            assert_eq!(score, expected_score, "level {level}");
        }
    }

    #[test]
    fn depth_one_takes_the_biggest_capture() {
        // Black to move; (3,0) flips two stones, (4,0) flips one.
        // Material evaluation at depth 1 must pick the double flip.
        let mut board = Board::empty();
        board.set(0, 0, Cell::Black);
        board.set(1, 0, Cell::White);
        board.set(2, 0, Cell::White);
        board.set(5, 0, Cell::White);
        board.set(6, 0, Cell::Black);

        let profile = profile_for(1);
        let cancel = CancelToken::new();
        let mv = best_move_fixed_depth(&mut board, Side::Black, 1, profile, &cancel).unwrap();
        assert_eq!((mv.x, mv.y), (3, 0));
        assert_eq!(mv.flips.len(), 2);
    }

    #[test]
    fn search_leaves_the_board_untouched() {
        let board = midgame_board();
        let mut scratch = board.clone();
        let cancel = CancelToken::new();

        best_move_fixed_depth(&mut scratch, Side::Black, 4, profile_for(101), &cancel);
        assert_eq!(scratch, board);
    }

    #[test]
    fn cancellation_yields_no_move() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let mut board = Board::new();
        let chosen = best_move_fixed_depth(&mut board, Side::Black, 3, profile_for(3), &cancel);
        assert!(chosen.is_none());
    }
}
