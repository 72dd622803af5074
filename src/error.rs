//! Error types shared by the board, the parser and the file loader.
//!
//! Search outcomes such as an unsolvable instance are not errors; they are
//! reported through `solver::SearchOutcome`.

use crate::engine::{Direction, Move};
use std::io;

/// The input does not describe a permutation of `0..16`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidBoardError {
    #[error("expected 16 tiles, found {found}")]
    WrongTileCount { found: usize },
    #[error("token '{token}' is not an integer")]
    NotAnInteger { token: String },
    #[error("tile {value} is outside 0..=15")]
    TileOutOfRange { value: i64 },
    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u8 },
}

/// A move that cannot be applied to a particular board.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IllegalMoveError {
    #[error("move {mv} does not pass through the blank (blank at row {row}, col {col})")]
    OffAxis { mv: Move, row: usize, col: usize },
    #[error("move {mv} slides {} tiles {direction:?} but only {available} can move that way", .mv.run)]
    PastEdge {
        mv: Move,
        direction: Direction,
        available: usize,
    },
    #[error("run length {run} is outside 1..=3")]
    BadRunLength { run: u8 },
}

/// A move label that is not `<L|R|U|D><run><axis>`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse move '{label}': {reason}")]
pub struct ParseMoveError {
    pub label: String,
    pub reason: &'static str,
}

/// Crate-level error for callers that load boards from disk.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] InvalidBoardError),
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMoveError),
    #[error(transparent)]
    ParseMove(#[from] ParseMoveError),
}
