pub mod board;
pub mod engine;

pub use board::{Board, Cell, Move, Side, StoneCount};
pub use engine::profile::{profile_for, Profile, Strategy};
pub use engine::{choose_move, CancelToken};
