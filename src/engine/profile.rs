// Difficulty profiles.
//
// A profile is an immutable, compiled-in bundle of search strategy and
// evaluation parameters keyed by an integer level. The table below is the
// whole configuration surface of the engine; nothing here is mutated at
// runtime.

use std::time::Duration;

/// Positional weight matrix, indexed `[y][x]`.
pub type Weights = [[i32; 8]; 8];

/// Standard weight matrix: corners dominate, the diagonal X-squares and
/// the adjacent C-squares are strongly negative.
pub const DEFAULT_WEIGHTS: Weights = [
    [100, -25, 10, 5, 5, 10, -25, 100],
    [-25, -50, 1, 1, 1, 1, -50, -25],
    [10, 1, 3, 2, 2, 3, 1, 10],
    [5, 1, 2, 1, 1, 2, 1, 5],
    [5, 1, 2, 1, 1, 2, 1, 5],
    [10, 1, 3, 2, 2, 3, 1, 10],
    [-25, -50, 1, 1, 1, 1, -50, -25],
    [100, -25, 10, 5, 5, 10, -25, 100],
];

/// Sharper matrix used by the strongest profiles: corner-adjacent squares
/// are punished roughly twice as hard.
pub const SHARP_WEIGHTS: Weights = [
    [100, -40, 20, 5, 5, 20, -40, 100],
    [-40, -80, -1, -1, -1, -1, -80, -40],
    [20, -1, 5, 1, 1, 5, -1, 20],
    [5, -1, 1, 0, 0, 1, -1, 5],
    [5, -1, 1, 0, 0, 1, -1, 5],
    [20, -1, 5, 1, 1, 5, -1, 20],
    [-40, -80, -1, -1, -1, -1, -80, -40],
    [100, -40, 20, 5, 5, 20, -40, 100],
];

/// One row of an empty-count-indexed depth table.
#[derive(Clone, Copy, Debug)]
pub struct DepthEntry {
    pub max_empty: u8,
    pub depth: u8,
}

/// How a minimax profile picks its search depth.
#[derive(Clone, Copy, Debug)]
pub enum DepthPolicy {
    Fixed(u8),
    /// First entry with `empty <= max_empty` wins; scanned in order.
    ByEmptyCount(&'static [DepthEntry]),
}

/// Which engine a profile dispatches to.
#[derive(Clone, Copy, Debug)]
pub enum Strategy {
    Minimax {
        depth: DepthPolicy,
    },
    Iterative {
        time_limit: Duration,
    },
    Mcts {
        simulations: u32,
        time_limit: Duration,
        exploration: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalKind {
    /// Plain stone-count differential.
    Material,
    /// Weight matrix plus feature-flagged bonuses.
    Positional,
}

/// Fully resolved evaluator configuration. Magnitudes are baked in per
/// profile; flags gate each term independently.
#[derive(Clone, Copy, Debug)]
pub struct EvalConfig {
    pub kind: EvalKind,
    pub use_weights: bool,
    pub weights: &'static Weights,
    pub stable_stones: bool,
    pub parity: bool,
    pub x_square: bool,
    pub corner_trap: bool,
    pub stable_bonus: i32,
    pub parity_weight: i32,
    pub x_penalty: i32,
    pub trap_penalty: i32,
}

/// Exact-solver trigger settings.
#[derive(Clone, Copy, Debug)]
pub struct EndgameConfig {
    pub max_empty: u32,
    /// Enables the stop-early check once a line already wins every stone.
    pub use_pruning: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct Profile {
    pub level: u16,
    /// Whether a level picker should list this profile.
    pub visible: bool,
    pub name: &'static str,
    pub description: &'static str,
    pub strategy: Strategy,
    pub eval: EvalConfig,
    pub endgame: Option<EndgameConfig>,
}

const MATERIAL_EVAL: EvalConfig = EvalConfig {
    kind: EvalKind::Material,
    use_weights: false,
    weights: &DEFAULT_WEIGHTS,
    stable_stones: false,
    parity: false,
    x_square: false,
    corner_trap: false,
    stable_bonus: 20,
    parity_weight: 40,
    x_penalty: 30,
    trap_penalty: 30,
};

/// Positional evaluation with every bonus enabled at standard magnitudes.
const POSITIONAL_EVAL: EvalConfig = EvalConfig {
    kind: EvalKind::Positional,
    use_weights: true,
    weights: &DEFAULT_WEIGHTS,
    stable_stones: true,
    parity: true,
    x_square: true,
    corner_trap: true,
    stable_bonus: 20,
    parity_weight: 40,
    x_penalty: 30,
    trap_penalty: 30,
};

const MID_DEPTH_TABLE: &[DepthEntry] = &[
    DepthEntry { max_empty: 20, depth: 7 },
    DepthEntry { max_empty: 40, depth: 5 },
    DepthEntry { max_empty: 64, depth: 4 },
];

const DEEP_DEPTH_TABLE: &[DepthEntry] = &[
    DepthEntry { max_empty: 20, depth: 8 },
    DepthEntry { max_empty: 40, depth: 6 },
    DepthEntry { max_empty: 64, depth: 5 },
];

const ENDGAME_AT_TWELVE: EndgameConfig = EndgameConfig {
    max_empty: 12,
    use_pruning: true,
};

/// The profile table. The first entry is the weakest profile and doubles
/// as the fallback for unknown levels.
pub const PROFILES: &[Profile] = &[
    Profile {
        level: 1,
        visible: true,
        name: "Easy",
        description: "Shallow search with a simple stone-count evaluation",
        strategy: Strategy::Minimax {
            depth: DepthPolicy::Fixed(1),
        },
        eval: MATERIAL_EVAL,
        endgame: None,
    },
    Profile {
        level: 2,
        visible: true,
        name: "Normal",
        description: "Standard-depth minimax search",
        strategy: Strategy::Minimax {
            depth: DepthPolicy::Fixed(2),
        },
        eval: MATERIAL_EVAL,
        endgame: None,
    },
    Profile {
        level: 3,
        visible: true,
        name: "Hard",
        description: "Deeper minimax for steadier play",
        strategy: Strategy::Minimax {
            depth: DepthPolicy::Fixed(3),
        },
        eval: MATERIAL_EVAL,
        endgame: None,
    },
    Profile {
        level: 4,
        visible: true,
        name: "Expert",
        description: "Depth-6 minimax that avoids the corner-adjacent traps",
        strategy: Strategy::Minimax {
            depth: DepthPolicy::Fixed(6),
        },
        eval: EvalConfig {
            use_weights: false,
            stable_stones: false,
            parity: false,
            ..POSITIONAL_EVAL
        },
        endgame: None,
    },
    Profile {
        level: 101,
        visible: true,
        name: "Test 1",
        description: "Positional evaluation with every feature bonus enabled",
        strategy: Strategy::Minimax {
            depth: DepthPolicy::Fixed(6),
        },
        eval: POSITIONAL_EVAL,
        endgame: None,
    },
    Profile {
        level: 102,
        visible: true,
        name: "Test 2",
        description: "Search depth scales with the number of empty cells",
        strategy: Strategy::Minimax {
            depth: DepthPolicy::ByEmptyCount(MID_DEPTH_TABLE),
        },
        eval: POSITIONAL_EVAL,
        endgame: None,
    },
    Profile {
        level: 103,
        visible: true,
        name: "Test 3",
        description: "Iterative deepening under a time budget",
        strategy: Strategy::Iterative {
            time_limit: Duration::from_millis(800),
        },
        eval: POSITIONAL_EVAL,
        endgame: None,
    },
    Profile {
        level: 104,
        visible: true,
        name: "Test 4",
        description: "Monte Carlo tree search with random playouts",
        strategy: Strategy::Mcts {
            simulations: 1000,
            time_limit: Duration::from_millis(800),
            exploration: 1.1,
        },
        eval: EvalConfig {
            stable_bonus: 30,
            parity_weight: 50,
            x_penalty: 60,
            ..POSITIONAL_EVAL
        },
        endgame: None,
    },
    Profile {
        level: 105,
        visible: false,
        name: "Test 5",
        description: "Sharper weight matrix and an exact endgame finish",
        strategy: Strategy::Minimax {
            depth: DepthPolicy::ByEmptyCount(DEEP_DEPTH_TABLE),
        },
        eval: EvalConfig {
            weights: &SHARP_WEIGHTS,
            x_penalty: 50,
            ..POSITIONAL_EVAL
        },
        endgame: Some(ENDGAME_AT_TWELVE),
    },
    Profile {
        level: 106,
        visible: true,
        name: "Test 6",
        description: "Switches to a perfect endgame solver at 12 empty cells",
        strategy: Strategy::Minimax {
            depth: DepthPolicy::ByEmptyCount(DEEP_DEPTH_TABLE),
        },
        eval: POSITIONAL_EVAL,
        endgame: Some(ENDGAME_AT_TWELVE),
    },
    Profile {
        level: 999,
        visible: true,
        name: "Noob",
        description: "Deepest search with every strategic feature enabled",
        strategy: Strategy::Minimax {
            depth: DepthPolicy::ByEmptyCount(DEEP_DEPTH_TABLE),
        },
        eval: EvalConfig {
            weights: &SHARP_WEIGHTS,
            stable_bonus: 30,
            parity_weight: 60,
            x_penalty: 60,
            trap_penalty: 40,
            ..POSITIONAL_EVAL
        },
        endgame: Some(ENDGAME_AT_TWELVE),
    },
];

/// Look up the profile for a level, falling back to the weakest profile
/// when the level is unknown.
pub fn profile_for(level: u16) -> &'static Profile {
    PROFILES
        .iter()
        .find(|p| p.level == level)
        .unwrap_or(&PROFILES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_resolve() {
        assert_eq!(profile_for(1).name, "Easy");
        assert_eq!(profile_for(999).name, "Noob");
        assert_eq!(profile_for(106).endgame.unwrap().max_empty, 12);
    }

    #[test]
    fn unknown_level_falls_back_to_weakest() {
        let fallback = profile_for(7777);
        assert_eq!(fallback.level, 1);
    }

    #[test]
    fn hidden_profile_still_resolves() {
        let p = profile_for(105);
        assert!(!p.visible);
        assert_eq!(p.level, 105);
    }

    #[test]
    fn expert_uses_penalties_without_weights() {
        let p = profile_for(4);
        assert!(!p.eval.use_weights);
        assert!(p.eval.x_square);
        assert!(p.eval.corner_trap);
        assert!(!p.eval.stable_stones);
    }
}
