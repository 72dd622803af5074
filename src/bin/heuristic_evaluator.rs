use clap::Parser;
use fifteen_solver::engine::Board;
use fifteen_solver::heuristics::HeuristicKind;
use fifteen_solver::solver::{solve_with_config, SearchOutcome, SolverConfig};
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare heuristics on seeded random boards", long_about = None)]
struct Args {
    /// Number of boards to evaluate
    #[clap(long, default_value_t = 20)]
    boards: usize,

    /// Random moves applied to the goal to build each board
    #[clap(long, default_value_t = 10)]
    scramble: usize,

    /// Seed of the first board; later boards use consecutive seeds
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Per-board expansion budget
    #[clap(long, default_value_t = 2_000_000)]
    max_expansions: usize,
}

#[derive(Default)]
struct Totals {
    solved: usize,
    expanded: usize,
    moves: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut totals: HashMap<HeuristicKind, Totals> = HashMap::new();

    println!(
        "Starting heuristic evaluation for {} boards ({} scramble moves)...",
        args.boards, args.scramble
    );

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let board = Board::scrambled_with_seed(current_seed, args.scramble);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, current_seed);

        for heuristic in HeuristicKind::ALL {
            let config = SolverConfig {
                heuristic,
                max_expansions: Some(args.max_expansions),
            };
            let report = solve_with_config(&board, &config);
            let entry = totals.entry(heuristic).or_default();

            match report.outcome {
                SearchOutcome::Solved { path } => {
                    println!(
                        "  Heuristic: {:<10}, Moves: {:<3}, Expanded: {}",
                        heuristic.name(),
                        path.len(),
                        report.stats.expanded
                    );
                    entry.solved += 1;
                    entry.expanded += report.stats.expanded;
                    entry.moves += path.len();
                }
                other => {
                    eprintln!(
                        "Warning: heuristic {} gave {:?} on board {} (Seed: {})",
                        heuristic.name(),
                        other,
                        board_idx,
                        current_seed
                    );
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages over solved boards ---");

    for heuristic in HeuristicKind::ALL {
        let Some(t) = totals.get(&heuristic).filter(|t| t.solved > 0) else {
            println!("Heuristic {}: nothing solved.", heuristic.name());
            continue;
        };
        println!(
            "Heuristic {:<10}: Solved = {}, Avg Moves = {:.2}, Avg Expanded = {:.1}",
            heuristic.name(),
            t.solved,
            t.moves as f64 / t.solved as f64,
            t.expanded as f64 / t.solved as f64
        );
    }
}
