use clap::Parser;
use fifteen_solver::heuristics::HeuristicKind;
use fifteen_solver::solver::{solve_with_config, SearchOutcome, SolverConfig};
use fifteen_solver::utils::{format_path, read_board_file};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Heuristic guiding the search
    #[clap(long, value_enum, default_value_t = HeuristicKind::Manhattan)]
    heuristic: HeuristicKind,

    /// Give up after expanding this many boards
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Replay the solution against the input board before printing it
    #[clap(long)]
    verify: bool,

    /// Path to the board file (16 whitespace-separated tiles, 0 for the blank)
    board_file: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let board = match read_board_file(&args.board_file) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Failed to read board from {}: {}", args.board_file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    println!("Loaded board from {}\n", args.board_file.display());
    println!("Initial board state:\n{}\n", board);

    let config = SolverConfig {
        heuristic: args.heuristic,
        max_expansions: args.max_expansions,
    };
    let report = solve_with_config(&board, &config);
    log::info!("{}", report.stats);

    match report.outcome {
        SearchOutcome::Solved { path } => {
            if args.verify {
                match board.replay(&path) {
                    Ok(end) if end.is_goal() => {}
                    Ok(end) => {
                        eprintln!("Solution does not reach the goal, it ends at:\n{}", end);
                        return ExitCode::FAILURE;
                    }
                    Err(e) => {
                        eprintln!("Solution contains an illegal move: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            }
            println!("Solution Found ({} moves)", path.len());
            println!("{}", format_path(&path));
        }
        SearchOutcome::Unsolvable => {
            println!("Given board has odd parity, hence it cannot be solved.");
        }
        SearchOutcome::NoSolutionFound => {
            println!("No Solution");
        }
        SearchOutcome::LimitReached { expanded } => {
            println!("No solution within {} expansions", expanded);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
