// Strategy selection and the engine entry point.
//
// A search call is a pure, synchronous computation: it owns its scratch
// board, caches and (for MCTS) tree, shares nothing, and polls a
// cancellation flag at safe points. Hosts run it off their interaction
// thread and treat an aborted call as "no move decided".

pub mod evaluation;
pub mod profile;
pub mod transposition;

mod endgame;
mod mcts;
mod minimax;
mod search;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::debug;

use crate::board::{Board, Move, Side};

use profile::{DepthPolicy, Strategy};

/// Cloneable cooperative cancellation flag.
///
/// Searches poll it at the top of each root-move iteration, between
/// deepening iterations and between simulations; once set, the running
/// call returns `None` promptly. Cancelling is idempotent and the token
/// can be shared freely across threads.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Pick a move for `side` at the given difficulty level.
///
/// Returns `None` when `side` has no legal move or when cancellation was
/// observed; distinguishing the two (and passing the turn, or declaring
/// the game over when both sides are blocked) is the caller's job. The
/// engine never passes turns itself.
pub fn choose_move(board: &Board, side: Side, level: u16, cancel: &CancelToken) -> Option<Move> {
    let profile = profile::profile_for(level);
    if cancel.is_cancelled() {
        return None;
    }

    let moves = board.moves_for(side);
    if moves.is_empty() {
        return None;
    }

    // A move that wipes out every opposing stone ends the game on the
    // spot; no profile plays anything else.
    let count = board.count_stones();
    let opponent_stones = match side {
        Side::Black => count.white,
        Side::White => count.black,
    };
    if let Some(mv) = moves
        .iter()
        .find(|mv| mv.flips.len() as u32 == opponent_stones)
    {
        debug!("level {}: elimination move at ({}, {})", level, mv.x, mv.y);
        return Some(mv.clone());
    }

    let empty = board.empty_count();
    let mut scratch = board.clone();

    if let Some(endgame) = profile.endgame {
        if empty <= endgame.max_empty {
            debug!("level {}: exact solve with {} empties", level, empty);
            return endgame::best_move_exact(&mut scratch, side, profile, cancel);
        }
    }

    match profile.strategy {
        Strategy::Minimax { depth } => {
            let depth = match depth {
                DepthPolicy::Fixed(depth) => depth,
                DepthPolicy::ByEmptyCount(table) => minimax::dynamic_depth(empty, table),
            };
            debug!("level {}: minimax to depth {}", level, depth);
            minimax::best_move_fixed_depth(&mut scratch, side, depth, profile, cancel)
        }
        Strategy::Iterative { time_limit } => {
            debug!("level {}: iterative deepening for {:?}", level, time_limit);
            search::best_move_iterative(&mut scratch, side, time_limit, profile, cancel)
        }
        Strategy::Mcts {
            simulations,
            time_limit,
            exploration,
        } => {
            debug!(
                "level {}: mcts ({} sims, {:?})",
                level, simulations, time_limit
            );
            mcts::best_move_mcts(board, side, simulations, time_limit, exploration, cancel)
        }
    }
}
