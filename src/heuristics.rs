//! Lower bounds on the number of moves left to reach the goal.
//!
//! A single move slides at most three tiles by one cell each, so any per-tile
//! measure that a one-cell step changes by at most one can be divided by
//! three and stay admissible. Both estimators here use integer division,
//! which also keeps them consistent: if a move changes the raw sum from `a`
//! to `b` with `a <= b + 3`, then `a / 3 <= 1 + b / 3`.
use crate::engine::{Board, BLANK, MAX_RUN, SIDE, TILE_COUNT};

/// Maps each tile label to its `(row, col)` in the goal arrangement.
///
/// Build it once and pass it by reference to every evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalIndex {
    positions: [(u8, u8); TILE_COUNT],
}

impl GoalIndex {
    pub fn new(goal: &Board) -> Self {
        let mut positions = [(0, 0); TILE_COUNT];
        for (index, &tile) in goal.cells().iter().enumerate() {
            positions[tile as usize] = ((index / SIDE) as u8, (index % SIDE) as u8);
        }
        GoalIndex { positions }
    }

    /// Goal `(row, col)` of `tile`.
    pub fn position_of(&self, tile: u8) -> (usize, usize) {
        let (r, c) = self.positions[tile as usize];
        (r as usize, c as usize)
    }
}

impl Default for GoalIndex {
    fn default() -> Self {
        GoalIndex::new(&Board::goal())
    }
}

/// An admissible, consistent estimate of the remaining moves.
pub trait Heuristic {
    fn estimate(&self, board: &Board) -> u32;
}

/// Sum of Manhattan distances of the non-blank tiles, divided by three.
#[derive(Clone, Debug, Default)]
pub struct ManhattanRelaxed {
    goal: GoalIndex,
}

impl ManhattanRelaxed {
    pub fn new(goal: GoalIndex) -> Self {
        ManhattanRelaxed { goal }
    }

    /// The undivided Manhattan sum.
    pub fn manhattan_distance(&self, board: &Board) -> u32 {
        board
            .cells()
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != BLANK)
            .map(|(index, &tile)| {
                let (goal_r, goal_c) = self.goal.position_of(tile);
                ((index / SIDE).abs_diff(goal_r) + (index % SIDE).abs_diff(goal_c)) as u32
            })
            .sum()
    }
}

impl Heuristic for ManhattanRelaxed {
    fn estimate(&self, board: &Board) -> u32 {
        self.manhattan_distance(board) / u32::from(MAX_RUN)
    }
}

/// Number of misplaced non-blank tiles, divided by three.
///
/// Weaker than `ManhattanRelaxed` on every board; kept for comparison runs.
#[derive(Clone, Debug, Default)]
pub struct MisplacedRelaxed {
    goal: GoalIndex,
}

impl MisplacedRelaxed {
    pub fn new(goal: GoalIndex) -> Self {
        MisplacedRelaxed { goal }
    }

    pub fn misplaced_tiles(&self, board: &Board) -> u32 {
        board
            .cells()
            .iter()
            .enumerate()
            .filter(|&(index, &tile)| {
                tile != BLANK && self.goal.position_of(tile) != (index / SIDE, index % SIDE)
            })
            .count() as u32
    }
}

impl Heuristic for MisplacedRelaxed {
    fn estimate(&self, board: &Board) -> u32 {
        self.misplaced_tiles(board) / u32::from(MAX_RUN)
    }
}

/// Selects one of the built-in estimators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum HeuristicKind {
    #[default]
    Manhattan,
    Misplaced,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 2] = [HeuristicKind::Manhattan, HeuristicKind::Misplaced];

    /// Builds the estimator over a shared goal index.
    pub fn build(self, goal: GoalIndex) -> Box<dyn Heuristic> {
        match self {
            HeuristicKind::Manhattan => Box::new(ManhattanRelaxed::new(goal)),
            HeuristicKind::Misplaced => Box::new(MisplacedRelaxed::new(goal)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::Misplaced => "misplaced",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};

    /// True optimal cost of every board within `depth` moves of the goal.
    fn exact_costs(depth: u32) -> HashMap<Board, u32> {
        let mut costs = HashMap::new();
        let mut queue = VecDeque::new();
        costs.insert(Board::goal(), 0);
        queue.push_back(Board::goal());

        while let Some(board) = queue.pop_front() {
            let cost = costs[&board];
            if cost == depth {
                continue;
            }
            for (next, _) in board.successors() {
                if !costs.contains_key(&next) {
                    costs.insert(next, cost + 1);
                    queue.push_back(next);
                }
            }
        }
        costs
    }

    #[test]
    fn test_goal_index_positions() {
        let index = GoalIndex::default();
        assert_eq!(index.position_of(1), (0, 0));
        assert_eq!(index.position_of(8), (1, 3));
        assert_eq!(index.position_of(15), (3, 2));
        assert_eq!(index.position_of(BLANK), (3, 3));
    }

    #[test]
    fn test_goal_estimates_zero() {
        let goal = Board::goal();
        for kind in HeuristicKind::ALL {
            assert_eq!(kind.build(GoalIndex::default()).estimate(&goal), 0);
        }
    }

    #[test]
    fn test_manhattan_distance_values() {
        let h = ManhattanRelaxed::default();
        let board = Board::goal()
            .replay(&["D34".parse().unwrap(), "R31".parse().unwrap()])
            .unwrap();
        // 4, 8, 12 each one row down; 1, 2, 3 each one column right.
        assert_eq!(h.manhattan_distance(&board), 6);
        assert_eq!(h.estimate(&board), 2);
    }

    #[test]
    fn test_misplaced_tiles_values() {
        let h = MisplacedRelaxed::default();
        let board = Board::goal().apply_move(&"R24".parse().unwrap()).unwrap();
        assert_eq!(h.misplaced_tiles(&board), 2);
        assert_eq!(h.estimate(&board), 0);
    }

    #[test]
    fn test_admissible_against_exhaustive_search() {
        let index = GoalIndex::default();
        let heuristics: Vec<Box<dyn Heuristic>> = HeuristicKind::ALL
            .iter()
            .map(|kind| kind.build(index.clone()))
            .collect();

        for (board, cost) in exact_costs(4) {
            for h in &heuristics {
                assert!(h.estimate(&board) <= cost, "overestimate on\n{board}");
            }
        }
    }

    #[test]
    fn test_consistent_along_every_edge() {
        let index = GoalIndex::default();
        for kind in HeuristicKind::ALL {
            let h = kind.build(index.clone());
            for seed in 0..40 {
                let board = Board::scrambled_with_seed(seed, 25);
                let here = h.estimate(&board);
                for (next, mv) in board.successors() {
                    assert!(
                        here <= 1 + h.estimate(&next),
                        "{} inconsistent across {mv}",
                        kind.name()
                    );
                }
            }
        }
    }

    #[test]
    fn test_manhattan_dominates_misplaced() {
        let manhattan = ManhattanRelaxed::default();
        let misplaced = MisplacedRelaxed::default();
        for seed in 0..40 {
            let board = Board::scrambled_with_seed(seed, 30);
            assert!(manhattan.estimate(&board) >= misplaced.estimate(&board));
        }
    }
}
