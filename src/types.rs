//! Mailbox Chess - Type definitions and constants
//!
//! This module provides the core type definitions for players, piece kinds
//! and board coordinates.

/// Board edge length
pub const BOARD_SIZE: i8 = 8;

/// A (row, column) pair. Signed so offsets may step off the board.
pub type Coord = (i8, i8);

/// One of the two sides. An empty square is `None`, never a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Row delta of a forward pawn step
    pub fn forward(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    /// Row the player's pawns start on
    pub fn pawn_row(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => 6,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lower-case letter for the kind
    pub fn name(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_name(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Check that a coordinate lies within the 8x8 board
#[inline]
pub fn on_board(row: i8, col: i8) -> bool {
    (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col)
}

/// Row-major square index (0-63) of an on-board coordinate
#[inline]
pub fn square_index(row: i8, col: i8) -> usize {
    (row as usize) * 8 + col as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent().opponent(), Player::Two);
    }

    #[test]
    fn on_board_rejects_edges_outside_range() {
        assert!(on_board(0, 0));
        assert!(on_board(7, 7));
        assert!(!on_board(-1, 3));
        assert!(!on_board(3, 8));
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_name(kind.name()), Some(kind));
            assert_eq!(PieceKind::from_name(kind.name().to_ascii_uppercase()), Some(kind));
        }
        assert_eq!(PieceKind::from_name('x'), None);
    }
}
