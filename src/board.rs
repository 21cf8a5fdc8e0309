//! Mailbox Chess - Board Representation Module
//!
//! This module provides the 8x8 mailbox board, the `Position` query trait
//! that move generation and evaluation read through, and move execution
//! with undo information.

use std::fmt;

use log::trace;
use thiserror::Error;

use crate::piece::Piece;
use crate::types::*;

/// Back-rank arrangement, column 0 to 7
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Point queries over a position.
///
/// Off-board coordinates are never an error: `get_piece` answers `None`
/// and `is_valid_piece` answers `false`.
pub trait Position {
    /// Occupant of the square, `None` when empty or off the board
    fn get_piece(&self, row: i8, col: i8) -> Option<Piece>;

    /// True iff the square is on the board and holds a piece
    fn is_valid_piece(&self, row: i8, col: i8) -> bool {
        on_board(row, col) && self.get_piece(row, col).is_some()
    }
}

/// A piece relocation from one square to another
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})->({},{})", self.from.0, self.from.1, self.to.0, self.to.1)
    }
}

/// Information needed to undo a move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndoInfo {
    pub mv: Move,
    /// The moved piece with its coordinates before the move
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,
    pub turn: Player,
}

/// Reasons a requested move is refused. The board is untouched when any of
/// these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("square {0:?} is off the board")]
    OffBoard(Coord),
    #[error("no piece at {0:?}")]
    NoPiece(Coord),
    #[error("piece at {at:?} belongs to {owner:?} but {turn:?} is to move")]
    NotYourTurn { at: Coord, owner: Player, turn: Player },
    #[error("destination {0:?} is held by the moving player")]
    OwnPiece(Coord),
    #[error("{kind:?} cannot reach {mv}")]
    Unreachable { kind: PieceKind, mv: Move },
}

/// Malformed text layouts
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("row {row} has {len} squares, expected 8")]
    RowLength { row: usize, len: usize },
    #[error("unknown piece character '{symbol}' at ({row}, {col})")]
    UnknownPiece { symbol: char, row: usize, col: usize },
}

/// Chess board: one occupant slot per square plus the side to move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// `squares[row][col]`
    squares: [[Option<Piece>; 8]; 8],
    /// Side to move
    pub turn: Player,
}

impl Board {
    /// Create a board with the starting position, player one to move
    pub fn new() -> Self {
        let mut board = Board::empty(Player::One);

        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as i8;
            board.place(Piece::new(Player::One, kind, 0, col));
            board.place(Piece::new(Player::One, PieceKind::Pawn, 1, col));
            board.place(Piece::new(Player::Two, PieceKind::Pawn, 6, col));
            board.place(Piece::new(Player::Two, kind, 7, col));
        }

        board
    }

    /// Create a board with no pieces
    pub fn empty(turn: Player) -> Self {
        Board { squares: [[None; 8]; 8], turn }
    }

    /// Create a board from eight text rows, row 0 first. `.` marks an empty
    /// square, upper-case letters are player one and lower-case player two.
    pub fn from_layout(rows: [&str; 8], turn: Player) -> Result<Self, LayoutError> {
        let mut board = Board::empty(turn);

        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != 8 {
                return Err(LayoutError::RowLength { row, len });
            }

            for (col, symbol) in line.chars().enumerate() {
                if symbol == '.' {
                    continue;
                }
                let kind = PieceKind::from_name(symbol)
                    .ok_or(LayoutError::UnknownPiece { symbol, row, col })?;
                let player = if symbol.is_ascii_uppercase() { Player::One } else { Player::Two };
                board.place(Piece::new(player, kind, row as i8, col as i8));
            }
        }

        Ok(board)
    }

    /// Put a piece on the square named by its own coordinates, returning the
    /// previous occupant. Off-board pieces are ignored.
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        if !on_board(piece.row, piece.col) {
            return None;
        }
        self.squares[piece.row as usize][piece.col as usize].replace(piece)
    }

    /// Clear a square, returning what was on it
    pub fn remove(&mut self, row: i8, col: i8) -> Option<Piece> {
        if !on_board(row, col) {
            return None;
        }
        self.squares[row as usize][col as usize].take()
    }

    /// All pieces in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().filter_map(|&square| square)
    }

    /// A player's pieces in row-major order
    pub fn pieces(&self, player: Player) -> Vec<Piece> {
        self.occupied().filter(|piece| piece.is_player(player)).collect()
    }

    /// Find the king of the specified player
    pub fn find_king(&self, player: Player) -> Option<Piece> {
        self.occupied()
            .find(|piece| piece.is_player(player) && piece.kind == PieceKind::King)
    }

    /// Execute a move without checking it against the rules. Returns `None`
    /// and leaves the board alone when the origin square is empty or the
    /// move goes nowhere.
    pub fn make_move(&mut self, mv: &Move) -> Option<UndoInfo> {
        let (from_row, from_col) = mv.from;
        let (to_row, to_col) = mv.to;
        if mv.from == mv.to || !on_board(from_row, from_col) || !on_board(to_row, to_col) {
            return None;
        }

        let moved_piece = self.squares[from_row as usize][from_col as usize].take()?;
        let relocated = Piece { row: to_row, col: to_col, ..moved_piece };
        let captured_piece = self.squares[to_row as usize][to_col as usize].replace(relocated);

        let undo = UndoInfo { mv: *mv, moved_piece, captured_piece, turn: self.turn };
        self.turn = moved_piece.player.opponent();

        Some(undo)
    }

    /// Execute a move after checking that the side to move can play it.
    pub fn apply_move(&mut self, mv: &Move) -> Result<UndoInfo, MoveError> {
        for square in [mv.from, mv.to] {
            if !on_board(square.0, square.1) {
                return Err(MoveError::OffBoard(square));
            }
        }

        let piece = self.get_piece(mv.from.0, mv.from.1).ok_or(MoveError::NoPiece(mv.from))?;
        if !piece.is_player(self.turn) {
            return Err(MoveError::NotYourTurn { at: mv.from, owner: piece.player, turn: self.turn });
        }

        if let Some(target) = self.get_piece(mv.to.0, mv.to.1) {
            if target.is_player(piece.player) {
                return Err(MoveError::OwnPiece(mv.to));
            }
        }

        if !piece.get_valid_piece_moves(&*self).contains(&mv.to) {
            return Err(MoveError::Unreachable { kind: piece.kind, mv: *mv });
        }

        trace!("applying {mv} for {:?}", piece.player);
        self.make_move(mv).ok_or(MoveError::NoPiece(mv.from))
    }

    /// Undo a move using saved UndoInfo
    pub fn undo_move(&mut self, undo: &UndoInfo) {
        let (from_row, from_col) = undo.mv.from;
        let (to_row, to_col) = undo.mv.to;

        self.squares[from_row as usize][from_col as usize] = Some(undo.moved_piece);
        self.squares[to_row as usize][to_col as usize] = undo.captured_piece;
        self.turn = undo.turn;
    }
}

impl Position for Board {
    fn get_piece(&self, row: i8, col: i8) -> Option<Piece> {
        if !on_board(row, col) {
            return None;
        }
        self.squares[row as usize][col as usize]
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares {
            let line: String = row
                .iter()
                .map(|square| square.map_or('.', |piece| piece.symbol()))
                .collect();
            writeln!(f, "{line}")?;
        }
        write!(f, "{:?} to move", self.turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENING: [&str; 8] = [
        "RNBQKBNR",
        "PPPPPPPP",
        "........",
        "........",
        "........",
        "........",
        "pppppppp",
        "rnbqkbnr",
    ];

    #[test]
    fn starting_position_matches_layout() {
        let board = Board::new();
        assert_eq!(board, Board::from_layout(OPENING, Player::One).unwrap());
        assert_eq!(board.pieces(Player::One).len(), 16);
        assert_eq!(board.pieces(Player::Two).len(), 16);
        assert_eq!(board.find_king(Player::Two).map(|k| k.coord()), Some((7, 4)));
    }

    #[test]
    fn off_board_queries_are_empty() {
        let board = Board::new();
        for (row, col) in [(-1, 0), (0, -1), (8, 3), (3, 8), (i8::MIN, i8::MAX)] {
            assert_eq!(board.get_piece(row, col), None);
            assert!(!board.is_valid_piece(row, col));
        }
        assert!(board.is_valid_piece(0, 0));
        assert!(!board.is_valid_piece(3, 3));
    }

    #[test]
    fn layout_errors_are_reported() {
        let mut rows = OPENING;
        rows[2] = "...";
        assert_eq!(
            Board::from_layout(rows, Player::One),
            Err(LayoutError::RowLength { row: 2, len: 3 })
        );

        rows[2] = "...x....";
        assert_eq!(
            Board::from_layout(rows, Player::One),
            Err(LayoutError::UnknownPiece { symbol: 'x', row: 2, col: 3 })
        );
    }

    #[test]
    fn make_and_undo_restore_the_board() {
        let mut board = Board::from_layout(
            [
                "....K...",
                "........",
                "........",
                "...n....",
                "........",
                "..B.....",
                "........",
                "....k...",
            ],
            Player::One,
        )
        .unwrap();
        let before = board.clone();

        let undo = board.make_move(&Move::new((5, 2), (3, 3))).unwrap();
        assert_eq!(undo.captured_piece.map(|p| p.kind), Some(PieceKind::Knight));
        assert_eq!(board.get_piece(3, 3), Some(Piece::new(Player::One, PieceKind::Bishop, 3, 3)));
        assert_eq!(board.get_piece(5, 2), None);
        assert_eq!(board.turn, Player::Two);

        board.undo_move(&undo);
        assert_eq!(board, before);
    }

    #[test]
    fn make_move_from_empty_square_does_nothing() {
        let mut board = Board::new();
        assert_eq!(board.make_move(&Move::new((3, 3), (4, 4))), None);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn apply_move_accepts_reachable_destination() {
        let mut board = Board::new();
        let undo = board.apply_move(&Move::new((0, 1), (2, 2))).unwrap();

        assert_eq!(board.get_piece(2, 2).map(|p| p.kind), Some(PieceKind::Knight));
        assert_eq!(board.turn, Player::Two);
        board.undo_move(&undo);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn apply_move_rejections_leave_board_untouched() {
        let mut board = Board::new();
        let cases = [
            (Move::new((0, 1), (-1, 3)), MoveError::OffBoard((-1, 3))),
            (Move::new((3, 3), (4, 3)), MoveError::NoPiece((3, 3))),
            (
                Move::new((6, 0), (5, 0)),
                MoveError::NotYourTurn { at: (6, 0), owner: Player::Two, turn: Player::One },
            ),
            (Move::new((0, 0), (1, 0)), MoveError::OwnPiece((1, 0))),
            (
                Move::new((0, 2), (4, 6)),
                MoveError::Unreachable { kind: PieceKind::Bishop, mv: Move::new((0, 2), (4, 6)) },
            ),
        ];

        for (mv, expected) in cases {
            assert_eq!(board.apply_move(&mv), Err(expected));
            assert_eq!(board, Board::new());
        }
    }

    #[test]
    fn display_prints_rows_top_down() {
        let text = Board::new().to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("RNBQKBNR"));
        assert_eq!(lines.last(), Some("One to move"));
    }
}
