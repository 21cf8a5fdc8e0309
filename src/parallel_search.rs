//! Mailbox Chess - Parallel Search Module
//!
//! This module splits the root moves across worker threads. Every worker
//! searches its share on its own copy of the board with a full window, so
//! each root move gets its exact minimax value. The values are combined in
//! generation order, which yields the same move as the single-threaded
//! search.

use std::thread;

use log::debug;

use crate::board::{Board, Move};
use crate::move_generator::MoveGenerator;
use crate::search::{root_moves, SearchConfig, SearchEngine, SearchOutcome};
use crate::types::*;

pub struct ParallelSearch {
    config: SearchConfig,
    num_threads: usize,
    pub nodes_searched: u64,
}

impl ParallelSearch {
    pub fn new(config: SearchConfig) -> Self {
        let mut search = ParallelSearch { config, num_threads: 1, nodes_searched: 0 };
        search.set_threads(config.threads);
        search
    }

    /// Set the worker count; 0 means one per core
    pub fn set_threads(&mut self, threads: usize) {
        self.num_threads = if threads == 0 { num_cpus::get() } else { threads };
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Pick the best move for `player`. The board is only read.
    pub fn select_move(&mut self, board: &Board, player: Player) -> SearchOutcome {
        self.nodes_searched = 0;

        let moves = match root_moves(&MoveGenerator::new(), board, player) {
            Ok(moves) => moves,
            Err(outcome) => return outcome,
        };

        let workers = self.num_threads.min(moves.len()).max(1);
        let config = self.config;
        let mut scores: Vec<Option<i32>> = vec![None; moves.len()];

        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    let moves = &moves;
                    scope.spawn(move || search_share(board, moves, player, config, worker, workers))
                })
                .collect();

            for handle in handles {
                let (scored, nodes) = handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
                for (index, score) in scored {
                    scores[index] = Some(score);
                }
                self.nodes_searched += nodes;
            }
        });

        let mut best: Option<(Move, i32)> = None;
        for (mv, score) in moves.iter().zip(scores) {
            let Some(score) = score else { continue };
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((*mv, score));
            }
        }

        match best {
            Some((mv, score)) => {
                debug!(
                    "{workers} workers best {mv} score {score} nodes {}",
                    self.nodes_searched
                );
                SearchOutcome::BestMove { mv, score }
            }
            None => SearchOutcome::Stalemate,
        }
    }
}

impl Default for ParallelSearch {
    fn default() -> Self {
        ParallelSearch::new(SearchConfig { threads: 0, ..SearchConfig::default() })
    }
}

/// Score every `workers`-th root move starting at `worker` on a private
/// board copy. Returns (root index, score) pairs and the node count.
fn search_share(
    board: &Board,
    moves: &[Move],
    player: Player,
    config: SearchConfig,
    worker: usize,
    workers: usize,
) -> (Vec<(usize, i32)>, u64) {
    let mut engine = SearchEngine::new(config);
    let mut board = board.clone();

    let scored = moves
        .iter()
        .enumerate()
        .skip(worker)
        .step_by(workers)
        .filter_map(|(index, mv)| {
            engine
                .search_root_move(&mut board, mv, player)
                .map(|score| (index, score))
        })
        .collect();

    (scored, engine.nodes_searched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(depth: u32, threads: usize) -> SearchConfig {
        SearchConfig { depth, alpha_beta: true, threads }
    }

    #[test]
    fn agrees_with_the_sequential_engine() {
        let positions = [
            Board::new(),
            Board::from_layout(
                [
                    "R...K..R",
                    "PPP..PPP",
                    "..N..N..",
                    "...pP...",
                    "..b.....",
                    "..n..q..",
                    "ppp..ppp",
                    "r...k..r",
                ],
                Player::Two,
            )
            .unwrap(),
        ];

        for board in positions {
            for player in [Player::One, Player::Two] {
                let mut sequential = SearchEngine::new(config(2, 1));
                let expected = sequential.select_move(&mut board.clone(), player);

                for threads in [1, 3, 8] {
                    let mut parallel = ParallelSearch::new(config(2, threads));
                    assert_eq!(parallel.select_move(&board, player), expected, "{threads} threads");
                }
            }
        }
    }

    #[test]
    fn zero_threads_means_every_core() {
        let search = ParallelSearch::new(config(1, 0));
        assert_eq!(search.num_threads(), num_cpus::get());
        assert!(ParallelSearch::default().num_threads() >= 1);
    }

    #[test]
    fn terminal_positions_pass_through() {
        let mut board = Board::new();
        board.remove(7, 4);

        let mut search = ParallelSearch::new(config(2, 2));
        assert_eq!(search.select_move(&board, Player::Two), SearchOutcome::KingCaptured);
        assert_eq!(search.nodes_searched, 0);
    }

    #[test]
    fn caller_board_is_untouched() {
        let board = Board::new();
        let mut search = ParallelSearch::new(config(2, 4));

        search.select_move(&board, Player::One);
        assert_eq!(board, Board::new());
        assert!(search.nodes_searched > 20);
    }
}
