// Zobrist hashing and the per-search transposition caches.
//
// Both caches are constructed at the top of a search call and dropped
// with it; nothing survives between calls. Only exact scores are ever
// stored (see the store sites in the search modules), so a probe hit can
// be returned under any alpha-beta window.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Cell, Side, CELLS};

/// Random 64-bit keys for each (color, square) pair plus a side-to-move
/// toggle. Seeded so hashes are reproducible across runs.
struct ZobristKeys {
    black: [u64; CELLS],
    white: [u64; CELLS],
    white_to_move: u64,
}

impl ZobristKeys {
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(0x9e3779b97f4a7c15);

        let mut black = [0u64; CELLS];
        let mut white = [0u64; CELLS];
        for key in black.iter_mut() {
            *key = rng.gen();
        }
        for key in white.iter_mut() {
            *key = rng.gen();
        }

        ZobristKeys {
            black,
            white,
            white_to_move: rng.gen(),
        }
    }
}

static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::generate);

/// Hash of the full board contents and the side to move.
pub fn position_hash(board: &Board, to_move: Side) -> u64 {
    let mut hash = 0u64;
    for (idx, &cell) in board.cells().iter().enumerate() {
        match cell {
            Cell::Black => hash ^= ZOBRIST.black[idx],
            Cell::White => hash ^= ZOBRIST.white[idx],
            Cell::Empty => {}
        }
    }
    if to_move == Side::White {
        hash ^= ZOBRIST.white_to_move;
    }
    hash
}

/// Heuristic score cache keyed by (position hash, remaining depth).
///
/// The side to move is folded into the hash; the depth stays an explicit
/// key component because a score searched to a shallower depth must never
/// answer for a deeper one.
pub struct TranspositionTable {
    table: HashMap<(u64, u8), i32>,
    pub hits: u64,
    pub misses: u64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        TranspositionTable {
            table: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn probe(&mut self, hash: u64, depth: u8) -> Option<i32> {
        match self.table.get(&(hash, depth)) {
            Some(&score) => {
                self.hits += 1;
                Some(score)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn store(&mut self, hash: u64, depth: u8, score: i32) {
        self.table.insert((hash, depth), score);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Exact-value cache for the endgame solver. No depth component: every
/// stored score is the true final stone differential for the hashed
/// position, valid for the rest of the search.
pub struct EndgameTable {
    table: HashMap<u64, i32>,
    pub hits: u64,
}

impl EndgameTable {
    pub fn new() -> Self {
        EndgameTable {
            table: HashMap::new(),
            hits: 0,
        }
    }

    pub fn probe(&mut self, hash: u64) -> Option<i32> {
        let hit = self.table.get(&hash).copied();
        if hit.is_some() {
            self.hits += 1;
        }
        hit
    }

    pub fn store(&mut self, hash: u64, score: i32) {
        self.table.insert(hash, score);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for EndgameTable {
    fn default() -> Self {
        Self::new()
    }
}
