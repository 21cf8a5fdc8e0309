//! Mailbox Chess - Move Generator Module
//!
//! Side-level move enumeration built on the per-piece generators, plus
//! attack detection and terminal-state classification.

use crate::board::{Board, Move};
use crate::types::*;

/// State of the game from the point of view of the side to move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// No moves and the king is attacked
    Checkmate,
    /// No moves and the king is not attacked
    Stalemate,
    /// The side's king has already been taken
    KingCaptured,
}

/// Move generator for chess positions
pub struct MoveGenerator;

impl MoveGenerator {
    /// Create a new move generator
    pub fn new() -> Self {
        MoveGenerator
    }

    /// Every move of the player: pieces in row-major order, each piece's
    /// destinations in its own generation order.
    pub fn generate_moves(&self, board: &Board, player: Player) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for piece in board.pieces(player) {
            let from = piece.coord();
            moves.extend(
                piece
                    .get_valid_piece_moves(board)
                    .into_iter()
                    .map(|to| Move::new(from, to)),
            );
        }

        moves
    }

    /// Check whether any piece of `by` can take on the occupied square
    pub fn is_square_attacked(&self, board: &Board, square: Coord, by: Player) -> bool {
        board
            .pieces(by)
            .iter()
            .any(|piece| piece.get_valid_piece_takes(board).contains(&square))
    }

    /// Check if the player's king is attacked
    pub fn is_in_check(&self, board: &Board, player: Player) -> bool {
        match board.find_king(player) {
            Some(king) => self.is_square_attacked(board, king.coord(), player.opponent()),
            None => false,
        }
    }

    /// Classify the position for the player about to move
    pub fn game_status(&self, board: &Board, player: Player) -> GameStatus {
        if board.find_king(player).is_none() {
            return GameStatus::KingCaptured;
        }
        if !self.generate_moves(board, player).is_empty() {
            return GameStatus::Ongoing;
        }
        if self.is_in_check(board, player) {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        MoveGenerator::new()
    }
}
