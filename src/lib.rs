//! # Fifteen Solver Library
//!
//! This library solves the 4x4 sliding-tile puzzle with A* search, where a
//! single move may slide a run of one, two or three tiles into the blank.
//!
//! It is used by two binaries:
//! - `solve_board`: Reads a board file and prints an optimal move sequence.
//! - `heuristic_evaluator`: Solves seeded random boards with each heuristic
//!   and compares how much work the search does.
//!
//! ## Modules
//! - `engine`: The immutable `Board`, `Direction` and `Move` types, move
//!   application, successor generation and the parity test.
//! - `heuristics`: The goal lookup table and the admissible estimators.
//! - `solver`: The A* search with its outcome, statistics and configuration.
//! - `utils`: Parsing and rendering of boards and move labels.
//! - `error`: Error types for malformed boards and illegal moves.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use engine::{Board, Direction, Move};
pub use error::{Error, IllegalMoveError, InvalidBoardError};
pub use solver::{solve, SearchOutcome};
pub use utils::{format_move, parse_board};
