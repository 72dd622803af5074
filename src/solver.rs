use crate::engine::{Board, Move};
use crate::heuristics::{GoalIndex, Heuristic, HeuristicKind};
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;

/// How often (in expansions) the search reports progress at trace level.
const PROGRESS_INTERVAL: usize = 100_000;

/// Result of one call to `solve`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A minimal-length sequence of moves from the initial board to the goal.
    Solved { path: Vec<Move> },
    /// The fringe emptied without reaching the goal.
    NoSolutionFound,
    /// The parity test rejected the board; no search was run.
    Unsolvable,
    /// The configured expansion budget ran out first.
    LimitReached { expanded: usize },
}

/// Counters collected during a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Boards taken off the fringe and expanded.
    pub expanded: usize,
    /// Nodes pushed onto the fringe, the initial one included.
    pub generated: usize,
    /// Fringe entries discarded because their board was already expanded.
    pub duplicates: usize,
    /// Largest fringe size observed.
    pub max_fringe: usize,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expanded: {}, generated: {}, duplicates: {}, max fringe: {}",
            self.expanded, self.generated, self.duplicates, self.max_fringe
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

/// Knobs for `solve_with_config`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverConfig {
    pub heuristic: HeuristicKind,
    /// Stop after this many expansions. `None` searches until the fringe is
    /// empty, with memory growing alongside the visited set.
    pub max_expansions: Option<usize>,
}

/// Solves `initial` with the default configuration.
///
/// # Examples
/// ```
/// use fifteen_solver::solver::{solve, SearchOutcome};
/// use fifteen_solver::utils::{format_path, parse_board};
///
/// let board = parse_board("1 2 3 4 5 6 7 8 9 10 11 12 13 14 0 15").unwrap();
/// match solve(&board) {
///     SearchOutcome::Solved { path } => assert_eq!(format_path(&path), "L14"),
///     other => panic!("unexpected outcome {other:?}"),
/// }
/// ```
pub fn solve(initial: &Board) -> SearchOutcome {
    solve_with_config(initial, &SolverConfig::default()).outcome
}

/// Checks parity, then runs A* with the configured heuristic.
pub fn solve_with_config(initial: &Board, config: &SolverConfig) -> SearchReport {
    if !initial.is_solvable() {
        debug!("Board has odd parity, skipping search:\n{initial}");
        return SearchReport {
            outcome: SearchOutcome::Unsolvable,
            stats: SearchStats::default(),
        };
    }

    let heuristic = config.heuristic.build(GoalIndex::default());
    search(initial, heuristic.as_ref(), config.max_expansions)
}

/// One node of the search tree. The path is recovered through `parent`.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    board: Board,
    g: u32,
    h: u32,
    parent: Option<usize>,
    mv: Option<Move>,
}

impl SearchNode {
    fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Fringe entry ordered so that `BinaryHeap` pops the lowest `f` first and,
/// among equal `f`, the earliest pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FringeEntry {
    f: u32,
    seq: u64,
    node: usize,
}

impl Ord for FringeEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FringeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first search from `initial` without the parity pre-check.
///
/// A board is marked visited when it is first expanded, never when it is
/// generated. With a consistent heuristic that first expansion carries the
/// optimal `g`, so later fringe entries for the same board are dropped and no
/// decrease-key is needed.
pub fn search(
    initial: &Board,
    heuristic: &dyn Heuristic,
    max_expansions: Option<usize>,
) -> SearchReport {
    let mut stats = SearchStats::default();
    let mut nodes: Vec<SearchNode> = Vec::new();
    let mut fringe = BinaryHeap::new();
    let mut visited: HashSet<u64> = HashSet::new();
    let mut seq: u64 = 0;

    let start = SearchNode {
        board: *initial,
        g: 0,
        h: heuristic.estimate(initial),
        parent: None,
        mv: None,
    };
    debug!("Search started, h = {}", start.h);
    fringe.push(FringeEntry {
        f: start.f(),
        seq,
        node: 0,
    });
    nodes.push(start);
    stats.generated = 1;
    stats.max_fringe = 1;

    while let Some(entry) = fringe.pop() {
        let current = nodes[entry.node];

        if current.board.is_goal() {
            let path = reconstruct_path(&nodes, entry.node);
            debug!("Solved in {} moves ({stats})", path.len());
            return SearchReport {
                outcome: SearchOutcome::Solved { path },
                stats,
            };
        }

        if !visited.insert(current.board.key()) {
            stats.duplicates += 1;
            continue;
        }

        if max_expansions.is_some_and(|limit| stats.expanded >= limit) {
            debug!("Expansion limit reached ({stats})");
            return SearchReport {
                outcome: SearchOutcome::LimitReached {
                    expanded: stats.expanded,
                },
                stats,
            };
        }

        stats.expanded += 1;
        if stats.expanded % PROGRESS_INTERVAL == 0 {
            trace!("f = {}, g = {}, {stats}", entry.f, current.g);
        }

        for (next, mv) in current.board.successors() {
            if visited.contains(&next.key()) {
                continue;
            }
            let child = SearchNode {
                board: next,
                g: current.g + 1,
                h: heuristic.estimate(&next),
                parent: Some(entry.node),
                mv: Some(mv),
            };
            seq += 1;
            fringe.push(FringeEntry {
                f: child.f(),
                seq,
                node: nodes.len(),
            });
            nodes.push(child);
            stats.generated += 1;
        }
        stats.max_fringe = stats.max_fringe.max(fringe.len());
    }

    debug!("Fringe exhausted ({stats})");
    SearchReport {
        outcome: SearchOutcome::NoSolutionFound,
        stats,
    }
}

fn reconstruct_path(nodes: &[SearchNode], mut index: usize) -> Vec<Move> {
    let mut path = Vec::new();
    while let (Some(mv), Some(parent)) = (nodes[index].mv, nodes[index].parent) {
        path.push(mv);
        index = parent;
    }
    path.reverse();
    path
}
