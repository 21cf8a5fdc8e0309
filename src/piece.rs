//! Mailbox Chess - Piece Module
//!
//! Each piece generates its own destinations from the geometry of its kind.
//! Destinations split into two categories:
//! - peaceful moves: reachable squares that are empty
//! - takes: reachable squares holding an opposing piece
//!
//! Offset and direction tables are ordered; every generator walks them in
//! table order so results are reproducible.

use crate::board::Position;
use crate::types::*;

/// Knight jumps, in enumeration order
const KNIGHT_OFFSETS: [Coord; 8] = [
    (-1, -2), (-1, 2),
    (-2, -1), (-2, 1),
    (2, -1), (2, 1),
    (1, -2), (1, 2),
];

/// King steps, row-major around the king
const KING_OFFSETS: [Coord; 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Direction vectors for sliding pieces
const ROOK_DIRECTIONS: [Coord; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRECTIONS: [Coord; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const QUEEN_DIRECTIONS: [Coord; 8] = [
    (-1, 0), (1, 0), (0, -1), (0, 1),
    (-1, -1), (-1, 1), (1, -1), (1, 1),
];

/// A piece on the board. The variant never changes; the coordinates follow
/// the piece as moves are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub player: Player,
    pub kind: PieceKind,
    pub row: i8,
    pub col: i8,
}

impl Piece {
    pub fn new(player: Player, kind: PieceKind, row: i8, col: i8) -> Self {
        Piece { player, kind, row, col }
    }

    pub fn coord(&self) -> Coord {
        (self.row, self.col)
    }

    pub fn is_player(&self, player: Player) -> bool {
        self.player == player
    }

    /// Letter for the piece, upper-case for player one
    pub fn symbol(&self) -> char {
        match self.player {
            Player::One => self.kind.name().to_ascii_uppercase(),
            Player::Two => self.kind.name(),
        }
    }

    /// Empty destinations reachable by this piece's geometry.
    pub fn get_valid_peaceful_moves<P: Position + ?Sized>(&self, board: &P) -> Vec<Coord> {
        match self.kind {
            PieceKind::Pawn => self.pawn_advances(board),
            PieceKind::Knight => self.empty_steps(board, &KNIGHT_OFFSETS),
            PieceKind::King => self.empty_steps(board, &KING_OFFSETS),
            PieceKind::Bishop => self.empty_rays(board, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.empty_rays(board, &ROOK_DIRECTIONS),
            PieceKind::Queen => self.empty_rays(board, &QUEEN_DIRECTIONS),
        }
    }

    /// Destinations holding an opposing piece reachable by this piece's geometry.
    pub fn get_valid_piece_takes<P: Position + ?Sized>(&self, board: &P) -> Vec<Coord> {
        match self.kind {
            PieceKind::Pawn => {
                let forward = self.player.forward();
                self.taking_steps(board, &[(forward, -1), (forward, 1)])
            }
            PieceKind::Knight => self.taking_steps(board, &KNIGHT_OFFSETS),
            PieceKind::King => self.taking_steps(board, &KING_OFFSETS),
            PieceKind::Bishop => self.taking_rays(board, &BISHOP_DIRECTIONS),
            PieceKind::Rook => self.taking_rays(board, &ROOK_DIRECTIONS),
            PieceKind::Queen => self.taking_rays(board, &QUEEN_DIRECTIONS),
        }
    }

    /// Peaceful moves followed by takes, without duplicates.
    pub fn get_valid_piece_moves<P: Position + ?Sized>(&self, board: &P) -> Vec<Coord> {
        let mut seen = [false; 64];
        let mut moves = Vec::with_capacity(28);

        for (row, col) in self
            .get_valid_peaceful_moves(board)
            .into_iter()
            .chain(self.get_valid_piece_takes(board))
        {
            let index = square_index(row, col);
            if !seen[index] {
                seen[index] = true;
                moves.push((row, col));
            }
        }

        moves
    }

    /// Whether the square holds a piece this one may take
    fn can_take<P: Position + ?Sized>(&self, board: &P, row: i8, col: i8) -> bool {
        if !board.is_valid_piece(row, col) {
            return false;
        }
        match board.get_piece(row, col) {
            Some(target) => !target.is_player(self.player),
            None => false,
        }
    }

    /// In-board squares at the given offsets
    fn steps<'a>(&self, offsets: &'a [Coord]) -> impl Iterator<Item = Coord> + 'a {
        let from = self.coord();
        offsets.iter().filter_map(move |&offset| shifted(from, offset))
    }

    fn empty_steps<P: Position + ?Sized>(&self, board: &P, offsets: &[Coord]) -> Vec<Coord> {
        self.steps(offsets)
            .filter(|&(r, c)| board.get_piece(r, c).is_none())
            .collect()
    }

    fn taking_steps<P: Position + ?Sized>(&self, board: &P, offsets: &[Coord]) -> Vec<Coord> {
        self.steps(offsets)
            .filter(|&(r, c)| self.can_take(board, r, c))
            .collect()
    }

    /// Empty squares along each ray, up to the first occupied square
    fn empty_rays<P: Position + ?Sized>(&self, board: &P, directions: &[Coord]) -> Vec<Coord> {
        let mut moves = Vec::new();

        for &direction in directions {
            let mut next = shifted(self.coord(), direction);
            while let Some((row, col)) = next {
                if board.get_piece(row, col).is_some() {
                    break;
                }
                moves.push((row, col));
                next = shifted((row, col), direction);
            }
        }

        moves
    }

    /// The first occupied square along each ray, if it can be taken
    fn taking_rays<P: Position + ?Sized>(&self, board: &P, directions: &[Coord]) -> Vec<Coord> {
        let mut takes = Vec::new();

        for &direction in directions {
            let mut next = shifted(self.coord(), direction);
            while let Some((row, col)) = next {
                if board.get_piece(row, col).is_some() {
                    if self.can_take(board, row, col) {
                        takes.push((row, col));
                    }
                    break;
                }
                next = shifted((row, col), direction);
            }
        }

        takes
    }

    /// Single advance, plus the double advance from the home row
    fn pawn_advances<P: Position + ?Sized>(&self, board: &P) -> Vec<Coord> {
        let mut moves = Vec::with_capacity(2);
        let forward = self.player.forward();

        let Some(one) = shifted(self.coord(), (forward, 0)) else {
            return moves;
        };
        if board.get_piece(one.0, one.1).is_some() {
            return moves;
        }
        moves.push(one);

        if self.row == self.player.pawn_row() {
            if let Some(two) = shifted(one, (forward, 0)) {
                if board.get_piece(two.0, two.1).is_none() {
                    moves.push(two);
                }
            }
        }

        moves
    }
}

/// The on-board square at `offset` from `from`, if any
fn shifted((row, col): Coord, (dr, dc): Coord) -> Option<Coord> {
    let row = row.checked_add(dr)?;
    let col = col.checked_add(dc)?;
    on_board(row, col).then_some((row, col))
}
