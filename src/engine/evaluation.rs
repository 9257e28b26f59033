// Board evaluation.
//
// Scores are signed: positive favors the perspective side. The positional
// evaluator is a weight-matrix sum with independently flagged bonus terms;
// which terms run, and at what magnitude, is profile data.

use crate::board::{Board, Cell, Side, SIZE};

use super::profile::{EvalConfig, EvalKind, Profile};

/// Parity only matters once the endgame is near.
const PARITY_EMPTY_THRESHOLD: u32 = 16;

/// Cells diagonally adjacent to a corner. Occupying one usually hands the
/// corner to the opponent.
const X_SQUARES: [(u8, u8); 4] = [(1, 1), (6, 1), (1, 6), (6, 6)];

/// The wider ring of corner-adjacent cells, penalized symmetrically.
const TRAP_SQUARES: [(u8, u8); 12] = [
    (0, 1),
    (1, 0),
    (1, 1),
    (0, 6),
    (1, 7),
    (1, 6),
    (6, 0),
    (6, 1),
    (7, 1),
    (6, 6),
    (6, 7),
    (7, 6),
];

const RAYS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Score `board` from `perspective`'s point of view under the profile's
/// evaluator.
pub fn evaluate(board: &Board, perspective: Side, profile: &Profile) -> i32 {
    match profile.eval.kind {
        EvalKind::Material => material(board, perspective),
        EvalKind::Positional => positional(board, perspective, &profile.eval),
    }
}

/// Plain stone-count differential: +1 per own stone, -1 per opponent
/// stone.
pub fn material(board: &Board, perspective: Side) -> i32 {
    board.differential(perspective)
}

fn positional(board: &Board, perspective: Side, cfg: &EvalConfig) -> i32 {
    let own = perspective.cell();
    let opp = perspective.opponent().cell();
    let mut score = 0;

    if cfg.use_weights {
        for y in 0..SIZE {
            for x in 0..SIZE {
                let cell = board.get(x, y);
                if cell == own {
                    score += cfg.weights[y as usize][x as usize];
                } else if cell == opp {
                    score -= cfg.weights[y as usize][x as usize];
                }
            }
        }
    }

    if cfg.stable_stones {
        for y in 0..SIZE {
            for x in 0..SIZE {
                let cell = board.get(x, y);
                if cell == Cell::Empty || !is_stable(board, x, y, cell) {
                    continue;
                }
                if cell == own {
                    score += cfg.stable_bonus;
                } else {
                    score -= cfg.stable_bonus;
                }
            }
        }
    }

    if cfg.parity && board.empty_count() <= PARITY_EMPTY_THRESHOLD {
        score += cfg.parity_weight * board.differential(perspective).signum();
    }

    if cfg.x_square {
        for (x, y) in X_SQUARES {
            let cell = board.get(x, y);
            if cell == own {
                score -= cfg.x_penalty;
            } else if cell == opp {
                score += cfg.x_penalty;
            }
        }
    }

    if cfg.corner_trap {
        for (x, y) in TRAP_SQUARES {
            let cell = board.get(x, y);
            if cell == own {
                score -= cfg.trap_penalty;
            } else if cell == opp {
                score += cfg.trap_penalty;
            }
        }
    }

    score
}

/// Conservative stability check: a stone counts as stable when every ray
/// from it runs same-colored all the way to the board edge. Rays that
/// leave the board immediately pass vacuously. This deliberately
/// under-approximates true stability.
fn is_stable(board: &Board, x: u8, y: u8, cell: Cell) -> bool {
    for (dx, dy) in RAYS {
        let mut cx = x as i8 + dx;
        let mut cy = y as i8 + dy;
        while cx >= 0 && cx < SIZE as i8 && cy >= 0 && cy < SIZE as i8 {
            if board.get(cx as u8, cy as u8) != cell {
                return false;
            }
            cx += dx;
            cy += dy;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::profile::{profile_for, DEFAULT_WEIGHTS};

    fn positional_cfg() -> EvalConfig {
        profile_for(101).eval
    }

    #[test]
    fn material_is_symmetric() {
        let board = Board::new();
        assert_eq!(material(&board, Side::Black), 0);
        assert_eq!(
            material(&board, Side::Black),
            -material(&board, Side::White)
        );

        let mut board = Board::new();
        let mv = board.moves_for(Side::Black).remove(0);
        board.apply(&mv, Side::Black);
        // Placement plus one flip: 4 black vs 1 white.
        assert_eq!(material(&board, Side::Black), 3);
        assert_eq!(material(&board, Side::White), -3);
    }

    #[test]
    fn corner_is_worth_its_weight() {
        let mut cfg = positional_cfg();
        cfg.stable_stones = false;
        cfg.parity = false;
        cfg.x_square = false;
        cfg.corner_trap = false;

        let mut board = Board::empty();
        board.set(0, 0, Cell::Black);

        let mut profile = *profile_for(101);
        profile.eval = cfg;
        assert_eq!(
            evaluate(&board, Side::Black, &profile),
            DEFAULT_WEIGHTS[0][0]
        );
        assert_eq!(
            evaluate(&board, Side::White, &profile),
            -DEFAULT_WEIGHTS[0][0]
        );
    }

    #[test]
    fn lone_corner_stone_is_not_stable() {
        // The rays toward the far edges cross empty cells.
        let mut board = Board::empty();
        board.set(0, 0, Cell::Black);
        assert!(!is_stable(&board, 0, 0, Cell::Black));
    }

    #[test]
    fn full_single_color_board_is_entirely_stable() {
        let board = Board::from_cells([Cell::Black; 64]);
        for y in 0..SIZE {
            for x in 0..SIZE {
                assert!(is_stable(&board, x, y, Cell::Black));
            }
        }
    }

    #[test]
    fn filled_edge_corner_is_stable() {
        // Row 0 and column 0 fully black: every ray from (0,0) that stays
        // on the board is uniformly black only along the edge rays, so
        // fill the diagonal too.
        let mut board = Board::from_cells([Cell::Black; 64]);
        board.set(5, 6, Cell::White);
        // (0,0)'s rays: along row 0, column 0, and the main diagonal.
        // The white stone at (5,6) is on none of them.
        assert!(is_stable(&board, 0, 0, Cell::Black));
        // But it does break stability for stones whose rays cross it.
        assert!(!is_stable(&board, 5, 5, Cell::Black));
    }

    #[test]
    fn x_square_occupancy_is_penalized() {
        let mut cfg = positional_cfg();
        cfg.use_weights = false;
        cfg.stable_stones = false;
        cfg.parity = false;
        cfg.corner_trap = false;

        let mut profile = *profile_for(101);
        profile.eval = cfg;

        let mut board = Board::empty();
        board.set(1, 1, Cell::Black);
        assert_eq!(evaluate(&board, Side::Black, &profile), -cfg.x_penalty);
        assert_eq!(evaluate(&board, Side::White, &profile), cfg.x_penalty);
    }

    #[test]
    fn corner_trap_occupancy_is_penalized() {
        let mut cfg = positional_cfg();
        cfg.use_weights = false;
        cfg.stable_stones = false;
        cfg.parity = false;
        cfg.x_square = false;

        let mut profile = *profile_for(101);
        profile.eval = cfg;

        let mut board = Board::empty();
        board.set(0, 1, Cell::Black);
        assert_eq!(evaluate(&board, Side::Black, &profile), -cfg.trap_penalty);
    }

    #[test]
    fn parity_only_counts_late() {
        let mut cfg = positional_cfg();
        cfg.use_weights = false;
        cfg.stable_stones = false;
        cfg.x_square = false;
        cfg.corner_trap = false;

        let mut profile = *profile_for(101);
        profile.eval = cfg;

        // 4 stones on the board: 60 empties, parity silent.
        let board = Board::new();
        assert_eq!(evaluate(&board, Side::Black, &profile), 0);

        // Fill most of the board so fewer than 16 empties remain, with
        // black ahead.
        let mut cells = [Cell::Black; 64];
        for idx in 0..20 {
            cells[idx] = Cell::White;
        }
        for idx in 20..30 {
            cells[idx] = Cell::Empty;
        }
        let board = Board::from_cells(cells);
        assert_eq!(board.empty_count(), 10);
        assert_eq!(evaluate(&board, Side::Black, &profile), cfg.parity_weight);
        assert_eq!(evaluate(&board, Side::White, &profile), -cfg.parity_weight);
    }
}
