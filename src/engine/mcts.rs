// Monte Carlo tree search with UCT selection and random playouts.
//
// The tree lives in an arena: nodes are addressed by index, a parent
// owns its children's indices and a child keeps a non-owning index back
// to its parent for backpropagation. The whole arena is dropped when the
// move decision returns.

use std::time::{Duration, Instant};

use log::debug;
use rand::Rng;

use crate::board::{Board, Move, Side};

use super::CancelToken;

struct Node {
    /// Snapshot of the position this node represents.
    board: Board,
    /// Whose turn it is at this node.
    to_move: Side,
    /// The move that produced this node; `None` only at the root.
    mov: Option<Move>,
    parent: Option<usize>,
    children: Vec<usize>,
    untried: Vec<Move>,
    visits: u32,
    /// Accumulated reward from the root side's perspective.
    reward: f64,
}

/// Best move for `side` after running simulations until either the time
/// budget or the simulation budget is exhausted, whichever comes first.
/// The final pick is the most visited root child, not the best win rate.
pub(crate) fn best_move_mcts(
    board: &Board,
    side: Side,
    simulations: u32,
    time_limit: Duration,
    exploration: f64,
    cancel: &CancelToken,
) -> Option<Move> {
    let untried = board.moves_for(side);
    if untried.is_empty() {
        return None;
    }

    let mut rng = rand::thread_rng();
    let mut nodes = vec![Node {
        board: board.clone(),
        to_move: side,
        mov: None,
        parent: None,
        children: Vec::new(),
        untried,
        visits: 0,
        reward: 0.0,
    }];

    let start = Instant::now();
    let mut iterations = 0u32;

    while start.elapsed() < time_limit && iterations < simulations {
        if cancel.is_cancelled() {
            return None;
        }

        // Selection: descend through fully expanded nodes by UCT score.
        let mut idx = 0;
        while nodes[idx].untried.is_empty() && !nodes[idx].children.is_empty() {
            idx = select_child(&nodes, idx, exploration);
        }

        // Expansion: materialize one random untried move.
        if !nodes[idx].untried.is_empty() {
            let pick = rng.gen_range(0..nodes[idx].untried.len());
            let mv = nodes[idx].untried.swap_remove(pick);

            let mover = nodes[idx].to_move;
            let mut child_board = nodes[idx].board.clone();
            child_board.apply(&mv, mover);
            let child_to_move = mover.opponent();
            let child_untried = child_board.moves_for(child_to_move);

            nodes.push(Node {
                board: child_board,
                to_move: child_to_move,
                mov: Some(mv),
                parent: Some(idx),
                children: Vec::new(),
                untried: child_untried,
                visits: 0,
                reward: 0.0,
            });
            let child_idx = nodes.len() - 1;
            nodes[idx].children.push(child_idx);
            idx = child_idx;
        }

        // Simulation: random playout from the selected node.
        let reward = rollout(&nodes[idx].board, nodes[idx].to_move, side, &mut rng);

        // Backpropagation: walk the parent indices up to the root.
        let mut cursor = Some(idx);
        while let Some(node_idx) = cursor {
            nodes[node_idx].visits += 1;
            nodes[node_idx].reward += reward;
            cursor = nodes[node_idx].parent;
        }

        iterations += 1;
    }

    debug!(
        "mcts ran {} simulations over {} nodes in {:?}",
        iterations,
        nodes.len(),
        start.elapsed()
    );

    nodes[0]
        .children
        .iter()
        .max_by_key(|&&child| nodes[child].visits)
        .and_then(|&child| nodes[child].mov.clone())
}

/// UCT: exploitation plus `c * sqrt(ln(parent visits) / child visits)`.
/// Unvisited children take absolute priority.
fn select_child(nodes: &[Node], parent: usize, exploration: f64) -> usize {
    let parent_visits = nodes[parent].visits as f64;
    let mut best = nodes[parent].children[0];
    let mut best_score = f64::NEG_INFINITY;

    for &child in &nodes[parent].children {
        let node = &nodes[child];
        let uct = if node.visits == 0 {
            f64::INFINITY
        } else {
            let visits = node.visits as f64;
            node.reward / visits + exploration * (parent_visits.ln() / visits).sqrt()
        };
        if uct > best_score {
            best_score = uct;
            best = child;
        }
    }
    best
}

/// Play uniformly random legal moves, passing when a side is blocked,
/// until neither side can move. Scores the final position relative to the
/// root side: win 1, draw 0.5, loss 0.
fn rollout(start: &Board, to_move: Side, root_side: Side, rng: &mut impl Rng) -> f64 {
    let mut board = start.clone();
    let mut side = to_move;

    loop {
        let moves = board.moves_for(side);
        if moves.is_empty() {
            if !board.has_any_move(side.opponent()) {
                break;
            }
            side = side.opponent();
            continue;
        }
        let mv = &moves[rng.gen_range(0..moves.len())];
        board.apply(mv, side);
        side = side.opponent();
    }

    match board.differential(root_side).signum() {
        1 => 1.0,
        0 => 0.5,
        _ => 0.0,
    }
}
