//! Mailbox Chess - Search Engine Module
//!
//! This module implements the move selection:
//! - Fixed-depth minimax over every move of the side to move
//! - Optional alpha-beta pruning that leaves the chosen move unchanged
//! - Zobrist keys to confirm the board is restored after a search
//!
//! The board is searched in place with make/undo; the caller's board is the
//! same when `select_move` returns.

use log::{debug, trace};
use rand::prelude::*;

use crate::board::{Board, Move};
use crate::evaluation::evaluate_board;
use crate::move_generator::MoveGenerator;
use crate::types::*;

// Constants for search
pub const INFINITY: i32 = 100000;
pub const MATE_SCORE: i32 = 50000;

// ============================================================================
// ZOBRIST HASHING
// ============================================================================

pub struct ZobristHash {
    piece_keys: [[u64; 64]; 12],
    side_key: u64,
}

impl ZobristHash {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(12345);

        let mut piece_keys = [[0u64; 64]; 12];
        for keys in piece_keys.iter_mut() {
            for key in keys.iter_mut() {
                *key = rng.gen();
            }
        }

        let side_key = rng.gen();

        ZobristHash { piece_keys, side_key }
    }

    pub fn hash_position(&self, board: &Board) -> u64 {
        let mut h = 0u64;

        for piece in board.occupied() {
            let index = piece.player.index() * 6 + piece.kind.index();
            h ^= self.piece_keys[index][square_index(piece.row, piece.col)];
        }

        if board.turn == Player::Two {
            h ^= self.side_key;
        }

        h
    }
}

impl Default for ZobristHash {
    fn default() -> Self {
        ZobristHash::new()
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Search settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to look ahead; values below 1 are treated as 1
    pub depth: u32,
    /// Prune with alpha-beta bounds
    pub alpha_beta: bool,
    /// Worker threads for the parallel search, 0 for one per core
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { depth: 3, alpha_beta: true, threads: 1 }
    }
}

// ============================================================================
// SEARCH ENGINE
// ============================================================================

/// Result of asking for a move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Best move with its score from the mover's perspective
    BestMove { mv: Move, score: i32 },
    /// No moves and the king is attacked
    Checkmate,
    /// No moves and the king is not attacked
    Stalemate,
    /// The mover's king is no longer on the board
    KingCaptured,
}

pub struct SearchEngine {
    move_generator: MoveGenerator,
    zobrist: ZobristHash,
    config: SearchConfig,
    pub nodes_searched: u64,
}

impl SearchEngine {
    pub fn new(config: SearchConfig) -> Self {
        SearchEngine {
            move_generator: MoveGenerator::new(),
            zobrist: ZobristHash::new(),
            config,
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Pick the best move for `player`. Equal scores keep the move generated
    /// first.
    pub fn select_move(&mut self, board: &mut Board, player: Player) -> SearchOutcome {
        self.nodes_searched = 0;
        let position_key = self.zobrist.hash_position(board);

        let moves = match root_moves(&self.move_generator, board, player) {
            Ok(moves) => moves,
            Err(outcome) => {
                debug!("no move for {player:?}: {outcome:?}");
                return outcome;
            }
        };

        let mut best: Option<(Move, i32)> = None;
        let mut alpha = -INFINITY;

        for mv in moves {
            let Some(score) = self.score_root_move(board, &mv, player, alpha) else {
                continue;
            };
            trace!("root {mv} scored {score}");

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            if self.config.alpha_beta {
                alpha = alpha.max(score);
            }
        }

        debug_assert_eq!(position_key, self.zobrist.hash_position(board), "search left the board changed");

        match best {
            Some((mv, score)) => {
                debug!(
                    "depth {} best {mv} score {score} nodes {}",
                    self.depth(),
                    self.nodes_searched
                );
                SearchOutcome::BestMove { mv, score }
            }
            None => SearchOutcome::Stalemate,
        }
    }

    /// Exact minimax value of one root move, searched with a full window.
    /// `None` if the move cannot be made on this board.
    pub fn search_root_move(&mut self, board: &mut Board, mv: &Move, player: Player) -> Option<i32> {
        self.score_root_move(board, mv, player, -INFINITY)
    }

    fn score_root_move(&mut self, board: &mut Board, mv: &Move, player: Player, alpha: i32) -> Option<i32> {
        let undo = board.make_move(mv)?;
        let score = self.minimax(board, self.depth() - 1, alpha, INFINITY, player.opponent(), player, 1);
        board.undo_move(&undo);
        Some(score)
    }

    fn depth(&self) -> u32 {
        self.config.depth.max(1)
    }

    /// Value of the position for `perspective`, with `to_move` on turn.
    /// `perspective` maximizes, its opponent minimizes.
    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        to_move: Player,
        perspective: Player,
        ply: i32,
    ) -> i32 {
        self.nodes_searched += 1;

        // Depth limit or decided game
        if depth == 0 || board.find_king(to_move).is_none() {
            return evaluate_board(board, perspective);
        }

        let moves = self.move_generator.generate_moves(board, to_move);

        // Checkmate / Stalemate
        if moves.is_empty() {
            if !self.move_generator.is_in_check(board, to_move) {
                return 0;
            }
            return if to_move == perspective { -MATE_SCORE + ply } else { MATE_SCORE - ply };
        }

        let maximizing = to_move == perspective;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for mv in moves {
            let Some(undo) = board.make_move(&mv) else {
                continue;
            };
            let score = self.minimax(board, depth - 1, alpha, beta, to_move.opponent(), perspective, ply + 1);
            board.undo_move(&undo);

            if maximizing {
                best_score = best_score.max(score);
                alpha = alpha.max(best_score);
            } else {
                best_score = best_score.min(score);
                beta = beta.min(best_score);
            }

            if self.config.alpha_beta && alpha >= beta {
                break;
            }
        }

        best_score
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new(SearchConfig::default())
    }
}

/// Moves for the root, or the outcome to report when there are none
pub(crate) fn root_moves(
    move_generator: &MoveGenerator,
    board: &Board,
    player: Player,
) -> Result<Vec<Move>, SearchOutcome> {
    if board.find_king(player).is_none() {
        return Err(SearchOutcome::KingCaptured);
    }

    let moves = move_generator.generate_moves(board, player);
    if !moves.is_empty() {
        return Ok(moves);
    }

    if move_generator.is_in_check(board, player) {
        Err(SearchOutcome::Checkmate)
    } else {
        Err(SearchOutcome::Stalemate)
    }
}
