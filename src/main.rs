//! Mailbox Chess - command-line driver
//!
//! Asks the engine for a move from the starting position.
//!
//! Usage:
//!     mailbox_chess [--depth N] [--threads N] [--no-prune] [--player two] [-v...]

use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};

use mailbox_chess::{Board, ParallelSearch, Player, SearchConfig, SearchEngine, SearchOutcome};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    One,
    Two,
}

#[derive(Parser, Debug)]
#[command(version, about = "Pick a move from the starting position")]
struct Args {
    /// Plies to search
    #[arg(short, long, default_value_t = SearchConfig::default().depth)]
    depth: u32,

    /// Worker threads, 0 for one per core
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Search the full tree without alpha-beta pruning
    #[arg(long)]
    no_prune: bool,

    /// Side to move
    #[arg(short, long, value_enum, default_value_t = Side::One)]
    player: Side,

    /// Log more; repeat for debug and trace output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbosity: u8) -> Result<(), fern::InitError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = setup_logging(args.verbose) {
        eprintln!("failed to set up logging: {err}");
    }

    let config = SearchConfig { depth: args.depth, alpha_beta: !args.no_prune, threads: args.threads };
    let player = match args.player {
        Side::One => Player::One,
        Side::Two => Player::Two,
    };

    let mut board = Board::new();
    board.turn = player;
    info!("searching {config:?} for {player:?}");

    let (outcome, nodes) = if config.threads == 1 {
        let mut engine = SearchEngine::new(config);
        let outcome = engine.select_move(&mut board, player);
        (outcome, engine.nodes_searched)
    } else {
        let mut search = ParallelSearch::new(config);
        let outcome = search.select_move(&board, player);
        (outcome, search.nodes_searched)
    };

    match outcome {
        SearchOutcome::BestMove { mv, score } => println!("bestmove {mv} score {score} nodes {nodes}"),
        other => println!("no move: {other:?}"),
    }
}
