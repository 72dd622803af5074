//! Board model for the 4x4 sliding-tile puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Direction` and `Move`: a slide of one to three tiles into the blank.
//! - `Board`: an immutable arrangement of the tiles `0..16` (0 is the blank),
//!   with move application, successor generation and the parity test used to
//!   reject unsolvable instances.
//!
//! Direction names describe where the *tiles* travel, which is opposite to the
//! blank's motion. `Move { direction: Left, run: 2, axis: 3 }` takes the two
//! tiles to the right of the blank in row 3 and slides them left by one cell;
//! the blank ends up two cells further right. This matches the textual move
//! format (`L23`).
use crate::error::{IllegalMoveError, InvalidBoardError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Width and height of the board.
pub const SIDE: usize = 4;

/// Number of cells on the board, blank included.
pub const TILE_COUNT: usize = SIDE * SIDE;

/// Longest run of tiles a single move may slide.
pub const MAX_RUN: u8 = 3;

/// Label used for the blank cell.
pub const BLANK: u8 = 0;

const GOAL_CELLS: [u8; TILE_COUNT] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0];

/// The direction in which the tiles of a move slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Tiles right of the blank slide left.
    Left,
    /// Tiles left of the blank slide right.
    Right,
    /// Tiles below the blank slide up.
    Up,
    /// Tiles above the blank slide down.
    Down,
}

impl Direction {
    /// All directions in successor-generation order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Converts the direction to the letter used in move labels.
    ///
    /// ```
    /// use fifteen_solver::engine::Direction;
    /// assert_eq!(Direction::Left.to_char(), 'L');
    /// assert_eq!(Direction::Down.to_char(), 'D');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
            Direction::Up => 'U',
            Direction::Down => 'D',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// `true` for moves that keep the blank in its row.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Offset from the blank to the tile that slides into it.
    fn source_offset(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, 1),
            Direction::Right => (0, -1),
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
        }
    }
}

/// One move: `run` contiguous tiles sliding in `direction` along the row or
/// column `axis`.
///
/// `axis` is 1-based: the row number for horizontal moves, the column number
/// for vertical ones. Every move costs one unit regardless of `run`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub direction: Direction,
    pub run: u8,
    pub axis: u8,
}

impl Move {
    pub fn new(direction: Direction, run: u8, axis: u8) -> Self {
        Move {
            direction,
            run,
            axis,
        }
    }

    /// The move that undoes this one.
    ///
    /// After sliding `run` tiles left along a row, the same tiles sit
    /// immediately left of the blank, so sliding them right restores the board.
    ///
    /// ```
    /// use fifteen_solver::engine::{Board, Direction, Move};
    /// let board = Board::goal();
    /// let mv = Move::new(Direction::Right, 2, 4);
    /// let moved = board.apply_move(&mv).unwrap();
    /// assert_eq!(moved.apply_move(&mv.inverse()).unwrap(), board);
    /// ```
    pub fn inverse(self) -> Self {
        Move {
            direction: self.direction.opposite(),
            ..self
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.direction.to_char(), self.run, self.axis)
    }
}

/// An immutable 4x4 arrangement of the tiles `0..16`.
///
/// Cells are stored row-major. Every label appears exactly once; the
/// constructors reject anything else, so methods may rely on there being a
/// single blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; TILE_COUNT],
}

impl Board {
    /// The solved arrangement `1..=15` followed by the blank.
    pub fn goal() -> Self {
        Board { cells: GOAL_CELLS }
    }

    /// Creates a board from row-major cells.
    ///
    /// # Errors
    /// `InvalidBoardError::TileOutOfRange` for labels above 15 and
    /// `InvalidBoardError::DuplicateTile` when a label repeats (which also
    /// means another one is missing).
    pub fn from_cells(cells: [u8; TILE_COUNT]) -> Result<Self, InvalidBoardError> {
        let mut seen = [false; TILE_COUNT];
        for &value in &cells {
            let slot = seen
                .get_mut(value as usize)
                .ok_or(InvalidBoardError::TileOutOfRange {
                    value: i64::from(value),
                })?;
            if *slot {
                return Err(InvalidBoardError::DuplicateTile { value });
            }
            *slot = true;
        }
        Ok(Board { cells })
    }

    /// Creates a board from a grid of rows.
    ///
    /// ```
    /// use fifteen_solver::engine::Board;
    /// let board = Board::from_grid([
    ///     [1, 2, 3, 4],
    ///     [5, 6, 7, 8],
    ///     [9, 10, 11, 12],
    ///     [13, 14, 15, 0],
    /// ])
    /// .unwrap();
    /// assert!(board.is_goal());
    /// ```
    pub fn from_grid(grid: [[u8; SIDE]; SIDE]) -> Result<Self, InvalidBoardError> {
        let mut cells = [BLANK; TILE_COUNT];
        for (r, row) in grid.iter().enumerate() {
            cells[r * SIDE..(r + 1) * SIDE].copy_from_slice(row);
        }
        Board::from_cells(cells)
    }

    /// Generates a solvable board by walking `moves` random steps away from
    /// the goal.
    ///
    /// The walk never immediately undoes its previous step. The same seed
    /// always produces the same board, and its optimal solution is at most
    /// `moves` long.
    pub fn scrambled_with_seed(seed: u64, moves: usize) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::goal();
        let mut last: Option<Move> = None;

        for _ in 0..moves {
            let candidates: Vec<(Board, Move)> = board
                .successors()
                .into_iter()
                .filter(|(_, mv)| last.map_or(true, |prev| *mv != prev.inverse()))
                .collect();
            let (next, mv) = candidates[rng.gen_range(0..candidates.len())];
            board = next;
            last = Some(mv);
        }
        board
    }

    /// Row-major view of the cells.
    pub fn cells(&self) -> &[u8; TILE_COUNT] {
        &self.cells
    }

    /// Returns the tile at `(row, col)`, both 0-based.
    ///
    /// # Panics
    /// Panics if `row` or `col` is 4 or more.
    pub fn tile_at(&self, row: usize, col: usize) -> u8 {
        assert!(row < SIDE && col < SIDE, "({row}, {col}) is off the board");
        self.cells[row * SIDE + col]
    }

    /// 0-based `(row, col)` of the blank.
    pub fn blank_position(&self) -> (usize, usize) {
        let index = self
            .cells
            .iter()
            .position(|&v| v == BLANK)
            .unwrap_or_else(|| unreachable!("constructors guarantee a blank"));
        (index / SIDE, index % SIDE)
    }

    /// Packs the board into one nibble per cell. Two boards have the same key
    /// exactly when they are equal.
    pub fn key(&self) -> u64 {
        self.cells
            .iter()
            .fold(0u64, |acc, &v| (acc << 4) | u64::from(v))
    }

    pub fn is_goal(&self) -> bool {
        self.cells == GOAL_CELLS
    }

    /// How many tiles can slide in `direction` given the blank's position.
    pub fn max_run(&self, direction: Direction) -> usize {
        let (row, col) = self.blank_position();
        match direction {
            Direction::Left => SIDE - 1 - col,
            Direction::Right => col,
            Direction::Up => SIDE - 1 - row,
            Direction::Down => row,
        }
    }

    /// Applies `mv`, returning a new board. `self` is left untouched.
    ///
    /// # Errors
    /// - `IllegalMoveError::BadRunLength` if `mv.run` is not 1, 2 or 3.
    /// - `IllegalMoveError::OffAxis` if `mv.axis` is not the blank's row (for
    ///   horizontal moves) or column (for vertical moves).
    /// - `IllegalMoveError::PastEdge` if fewer than `mv.run` tiles lie between
    ///   the blank and the edge on the side the tiles come from.
    pub fn apply_move(&self, mv: &Move) -> Result<Board, IllegalMoveError> {
        if mv.run == 0 || mv.run > MAX_RUN {
            return Err(IllegalMoveError::BadRunLength { run: mv.run });
        }

        let (row, col) = self.blank_position();
        let blank_axis = if mv.direction.is_horizontal() { row } else { col };
        if usize::from(mv.axis) != blank_axis + 1 {
            return Err(IllegalMoveError::OffAxis { mv: *mv, row, col });
        }

        let available = self.max_run(mv.direction);
        if usize::from(mv.run) > available {
            return Err(IllegalMoveError::PastEdge {
                mv: *mv,
                direction: mv.direction,
                available,
            });
        }

        let mut next = *self;
        let mut blank = (row, col);
        for _ in 0..mv.run {
            next.slide_one(&mut blank, mv.direction);
        }
        Ok(next)
    }

    /// Enumerates every board reachable in one move, paired with its label.
    ///
    /// Directions are visited in `Direction::ALL` order and run lengths in
    /// increasing order, so the output is deterministic. Each direction is a
    /// single pass: one more tile slides per step and the board is captured
    /// after every step. Infeasible run lengths are simply absent; on a 4x4
    /// board that always leaves three successors per axis, six in total.
    pub fn successors(&self) -> Vec<(Board, Move)> {
        let (row, col) = self.blank_position();
        let mut out = Vec::with_capacity(4 * MAX_RUN as usize);

        for direction in Direction::ALL {
            let axis = if direction.is_horizontal() { row } else { col };
            let mut next = *self;
            let mut blank = (row, col);
            for run in 1..=self.max_run(direction) {
                next.slide_one(&mut blank, direction);
                out.push((next, Move::new(direction, run as u8, axis as u8 + 1)));
            }
        }

        out
    }

    /// Replays `path` from this board and returns where it ends.
    pub fn replay(&self, path: &[Move]) -> Result<Board, IllegalMoveError> {
        path.iter().try_fold(*self, |board, mv| board.apply_move(mv))
    }

    /// Number of pairs of non-blank tiles that appear in the wrong relative
    /// order when the board is read row by row.
    pub fn count_inversions(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != BLANK)
            .map(|(i, &val)| {
                self.cells[i + 1..]
                    .iter()
                    .filter(|&&next| next != BLANK && next < val)
                    .count()
            })
            .sum()
    }

    /// Parity test for reachability of the goal.
    ///
    /// The board is solvable when the inversion count plus the blank's 1-based
    /// row is even. A slide of `k` tiles is the same permutation as `k`
    /// single-tile slides, so the classic 15-puzzle invariant holds unchanged
    /// for run moves.
    pub fn is_solvable(&self) -> bool {
        let (row, _) = self.blank_position();
        (self.count_inversions() + row + 1) % 2 == 0
    }

    /// Moves the tile next to the blank (on the side `direction` slides from)
    /// into the blank and updates `blank` to the vacated cell.
    fn slide_one(&mut self, blank: &mut (usize, usize), direction: Direction) {
        let (dr, dc) = direction.source_offset();
        let from = (
            blank.0.wrapping_add_signed(dr),
            blank.1.wrapping_add_signed(dc),
        );
        let to_index = blank.0 * SIDE + blank.1;
        let from_index = from.0 * SIDE + from.1;
        self.cells.swap(to_index, from_index);
        *blank = from;
    }
}

impl fmt::Display for Board {
    /// Four lines of right-aligned labels separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.chunks(SIDE).enumerate() {
            let line: Vec<String> = row.iter().map(|v| format!("{v:>2}")).collect();
            write!(f, "{}", line.join(" "))?;
            if r < SIDE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_off_goal() -> Board {
        Board::from_grid([
            [1, 2, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 14, 0, 15],
        ])
        .unwrap()
    }

    #[test]
    fn test_goal_board() {
        let goal = Board::goal();
        assert!(goal.is_goal());
        assert_eq!(goal.blank_position(), (3, 3));
        assert_eq!(goal.tile_at(0, 0), 1);
        assert_eq!(goal.tile_at(3, 2), 15);
    }

    #[test]
    fn test_from_cells_rejects_duplicate() {
        let mut cells = GOAL_CELLS;
        cells[1] = 1;
        assert_eq!(
            Board::from_cells(cells),
            Err(InvalidBoardError::DuplicateTile { value: 1 })
        );
    }

    #[test]
    fn test_from_cells_rejects_out_of_range() {
        let mut cells = GOAL_CELLS;
        cells[15] = 16;
        assert_eq!(
            Board::from_cells(cells),
            Err(InvalidBoardError::TileOutOfRange { value: 16 })
        );
    }

    #[test]
    fn test_key_distinguishes_boards() {
        let goal = Board::goal();
        let other = one_off_goal();
        assert_ne!(goal.key(), other.key());
        assert_eq!(goal.key(), Board::goal().key());
        // The blank sits in the last nibble of the goal.
        assert_eq!(goal.key() & 0xF, 0);
    }

    #[test]
    fn test_apply_move_slides_single_tile_left() {
        let board = one_off_goal();
        let mv = Move::new(Direction::Left, 1, 4);
        let next = board.apply_move(&mv).unwrap();
        assert!(next.is_goal());
        // Receiver unchanged.
        assert_eq!(board.tile_at(3, 2), 0);
    }

    #[test]
    fn test_apply_move_slides_three_tiles_down() {
        let board = Board::goal();
        // Blank at (3, 3); tiles 4, 8, 12 above it slide down.
        let next = board.apply_move(&Move::new(Direction::Down, 3, 4)).unwrap();
        assert_eq!(next.blank_position(), (0, 3));
        assert_eq!(next.tile_at(1, 3), 4);
        assert_eq!(next.tile_at(2, 3), 8);
        assert_eq!(next.tile_at(3, 3), 12);
    }

    #[test]
    fn test_apply_move_past_edge() {
        let board = Board::goal();
        let result = board.apply_move(&Move::new(Direction::Left, 1, 4));
        assert_eq!(
            result,
            Err(IllegalMoveError::PastEdge {
                mv: Move::new(Direction::Left, 1, 4),
                direction: Direction::Left,
                available: 0,
            })
        );
    }

    #[test]
    fn test_apply_move_off_axis() {
        let board = Board::goal();
        let result = board.apply_move(&Move::new(Direction::Right, 1, 2));
        assert!(matches!(result, Err(IllegalMoveError::OffAxis { .. })));
    }

    #[test]
    fn test_apply_move_bad_run_length() {
        let board = Board::goal();
        for run in [0, 4] {
            let result = board.apply_move(&Move::new(Direction::Right, run, 4));
            assert_eq!(result, Err(IllegalMoveError::BadRunLength { run }));
        }
    }

    #[test]
    fn test_every_successor_is_undone_by_inverse() {
        let board = Board::scrambled_with_seed(7, 20);
        for (next, mv) in board.successors() {
            assert_eq!(next.apply_move(&mv.inverse()).unwrap(), board, "{mv}");
        }
    }

    #[test]
    fn test_successors_match_apply_move() {
        let board = Board::scrambled_with_seed(3, 15);
        for (next, mv) in board.successors() {
            assert_eq!(board.apply_move(&mv).unwrap(), next);
        }
    }

    #[test]
    fn test_successors_from_corner() {
        let moves: Vec<String> = Board::goal()
            .successors()
            .into_iter()
            .map(|(_, mv)| mv.to_string())
            .collect();
        assert_eq!(moves, vec!["R14", "R24", "R34", "D14", "D24", "D34"]);
    }

    #[test]
    fn test_successors_from_inner_cell() {
        let board = Board::from_grid([
            [1, 2, 3, 4],
            [5, 0, 7, 8],
            [9, 10, 11, 12],
            [13, 14, 15, 6],
        ])
        .unwrap();
        let moves: Vec<String> = board
            .successors()
            .into_iter()
            .map(|(_, mv)| mv.to_string())
            .collect();
        assert_eq!(moves, vec!["L12", "L22", "R12", "U12", "U22", "D12"]);
    }

    #[test]
    fn test_successor_count_bounds() {
        for seed in 0..50 {
            let board = Board::scrambled_with_seed(seed, 10);
            let count = board.successors().len();
            assert!(count > 0 && count <= 12, "seed {seed}: {count}");
        }
    }

    #[test]
    fn test_replay_reports_first_illegal_move() {
        let board = Board::goal();
        let path = [
            Move::new(Direction::Right, 1, 4),
            Move::new(Direction::Right, 3, 4),
        ];
        assert!(matches!(
            board.replay(&path),
            Err(IllegalMoveError::PastEdge { available: 2, .. })
        ));
    }

    #[test]
    fn test_count_inversions() {
        assert_eq!(Board::goal().count_inversions(), 0);
        let swapped = Board::from_grid([
            [2, 1, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 14, 15, 0],
        ])
        .unwrap();
        assert_eq!(swapped.count_inversions(), 1);
    }

    #[test]
    fn test_parity_rejects_swapped_pair() {
        assert!(Board::goal().is_solvable());
        assert!(one_off_goal().is_solvable());
        let swapped = Board::from_grid([
            [1, 2, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 15, 14, 0],
        ])
        .unwrap();
        assert!(!swapped.is_solvable());
    }

    #[test]
    fn test_run_moves_preserve_parity() {
        // Every board reachable with run moves must pass the parity check.
        for seed in 0..100 {
            let board = Board::scrambled_with_seed(seed, 30);
            assert!(board.is_solvable(), "seed {seed}:\n{board}");
            for (next, mv) in board.successors() {
                assert!(next.is_solvable(), "seed {seed}, move {mv}");
            }
        }
    }

    #[test]
    fn test_scramble_is_deterministic() {
        assert_eq!(
            Board::scrambled_with_seed(42, 25),
            Board::scrambled_with_seed(42, 25)
        );
        assert_eq!(Board::scrambled_with_seed(42, 0), Board::goal());
    }

    #[test]
    fn test_display_board() {
        let expected = " 1  2  3  4\n 5  6  7  8\n 9 10 11 12\n13 14 15  0";
        assert_eq!(Board::goal().to_string(), expected);
    }
}
