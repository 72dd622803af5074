use crate::engine::{Board, Direction, Move, SIDE, TILE_COUNT};
use crate::error::{Error, InvalidBoardError, ParseMoveError};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Parses a board from whitespace-separated integers.
///
/// The 16 labels are read row-major. Line breaks carry no meaning beyond
/// separating tokens, so a board may be written on four lines or one.
///
/// # Errors
/// - `InvalidBoardError::NotAnInteger` for a token that is not an integer.
/// - `InvalidBoardError::TileOutOfRange` for an integer outside `0..=15`.
/// - `InvalidBoardError::WrongTileCount` unless exactly 16 tokens are present.
/// - `InvalidBoardError::DuplicateTile` when a label repeats.
///
/// # Examples
/// ```
/// use fifteen_solver::utils::parse_board;
///
/// let board = parse_board("1 2 3 4\n5 6 7 8\n9 10 11 12\n13 14 0 15\n").unwrap();
/// assert_eq!(board.blank_position(), (3, 2));
///
/// assert!(parse_board("1 2 3").is_err());
/// assert!(parse_board("1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 x").is_err());
/// ```
pub fn parse_board(text: &str) -> Result<Board, InvalidBoardError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != TILE_COUNT {
        return Err(InvalidBoardError::WrongTileCount {
            found: tokens.len(),
        });
    }

    let mut cells = [0u8; TILE_COUNT];
    for (cell, token) in cells.iter_mut().zip(&tokens) {
        let value: i64 = token
            .parse()
            .map_err(|_| InvalidBoardError::NotAnInteger {
                token: token.to_string(),
            })?;
        *cell = u8::try_from(value)
            .ok()
            .filter(|&v| usize::from(v) < TILE_COUNT)
            .ok_or(InvalidBoardError::TileOutOfRange { value })?;
    }

    Board::from_cells(cells)
}

/// Renders a board as four lines that `parse_board` reads back.
pub fn render_board(board: &Board) -> String {
    board.to_string()
}

/// Reads and parses a board file.
pub fn read_board_file(path: &Path) -> Result<Board, Error> {
    let content = fs::read_to_string(path)?;
    Ok(parse_board(&content)?)
}

/// Renders a move as `<direction letter><run><axis>`.
///
/// ```
/// use fifteen_solver::engine::{Direction, Move};
/// use fifteen_solver::utils::format_move;
///
/// assert_eq!(format_move(&Move::new(Direction::Left, 2, 3)), "L23");
/// ```
pub fn format_move(mv: &Move) -> String {
    mv.to_string()
}

/// Space-separated move labels, the form the solver prints.
pub fn format_path(path: &[Move]) -> String {
    path.iter().map(format_move).collect::<Vec<_>>().join(" ")
}

/// Parses a label produced by `format_move`.
pub fn parse_move(label: &str) -> Result<Move, ParseMoveError> {
    let fail = |reason| ParseMoveError {
        label: label.to_string(),
        reason,
    };

    let mut chars = label.chars();
    let direction = chars
        .next()
        .and_then(Direction::from_char)
        .ok_or_else(|| fail("expected one of L, R, U, D"))?;
    let run = chars
        .next()
        .and_then(|c| c.to_digit(10))
        .filter(|run| (1..=3).contains(run))
        .ok_or_else(|| fail("run length must be 1, 2 or 3"))?;
    let axis = chars
        .next()
        .and_then(|c| c.to_digit(10))
        .filter(|axis| (1..=SIDE as u32).contains(axis))
        .ok_or_else(|| fail("axis must be 1 to 4"))?;
    if chars.next().is_some() {
        return Err(fail("trailing characters"));
    }

    Ok(Move::new(direction, run as u8, axis as u8))
}

/// Parses a space-separated path such as `"L13 U21"`.
pub fn parse_path(text: &str) -> Result<Vec<Move>, ParseMoveError> {
    text.split_whitespace().map(parse_move).collect()
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}
