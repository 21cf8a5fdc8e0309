//! Mailbox Chess - Position Evaluation Module
//!
//! Static evaluation from one player's perspective: material plus
//! piece-square tables. Own pieces add, opposing pieces subtract.

use crate::board::Position;
use crate::piece::Piece;
use crate::types::*;

// ============================================================================
// PIECE VALUES
// ============================================================================

/// Material by `PieceKind::index`
pub const PIECE_VALUES: [i32; 6] = [
    100,    // PAWN
    320,    // KNIGHT
    330,    // BISHOP
    500,    // ROOK
    900,    // QUEEN
    20000,  // KING
];

/// Non-king material at or below which a side counts as being in the endgame
const ENDGAME_MATERIAL: i32 = 1300;

// ============================================================================
// PIECE-SQUARE TABLES
// ============================================================================
// Indexed row * 8 + col from player one's side; player two reads them
// mirrored across the middle rows.

// Pawn PST - encourages central control and advancement
const PAWN_PST: [i32; 64] = [
    0,   0,   0,   0,   0,   0,   0,   0,   // Rank 1
    5,  10,  10, -20, -20,  10,  10,   5,   // Rank 2
    5,  -5, -10,   0,   0, -10,  -5,   5,   // Rank 3
    0,   0,   0,  20,  20,   0,   0,   0,   // Rank 4
    5,   5,  10,  25,  25,  10,   5,   5,   // Rank 5
   10,  10,  20,  30,  30,  20,  10,  10,   // Rank 6
   50,  50,  50,  50,  50,  50,  50,  50,   // Rank 7
    0,   0,   0,   0,   0,   0,   0,   0,   // Rank 8
];

// Knight PST - encourages central positioning
const KNIGHT_PST: [i32; 64] = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

// Bishop PST
const BISHOP_PST: [i32; 64] = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

// Rook PST
const ROOK_PST: [i32; 64] = [
    0,   0,   0,   5,   5,   0,   0,   0,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
    5,  10,  10,  10,  10,  10,  10,   5,
    0,   0,   0,   0,   0,   0,   0,   0,
];

// Queen PST
const QUEEN_PST: [i32; 64] = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   5,   0,   0,   0,   0, -10,
   -10,   5,   5,   5,   5,   5,   0, -10,
     0,   0,   5,   5,   5,   5,   0,  -5,
    -5,   0,   5,   5,   5,   5,   0,  -5,
   -10,   0,   5,   5,   5,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

// King middlegame PST
const KING_MIDDLEGAME_PST: [i32; 64] = [
    20,  30,  10,   0,   0,  10,  30,  20,
    20,  20,   0,   0,   0,   0,  20,  20,
   -10, -20, -20, -20, -20, -20, -20, -10,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
];

// King endgame PST
const KING_ENDGAME_PST: [i32; 64] = [
   -50, -30, -30, -30, -30, -30, -30, -50,
   -30, -30,   0,   0,   0,   0, -30, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -20, -10,   0,   0, -10, -20, -30,
   -50, -40, -30, -20, -20, -30, -40, -50,
];

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.index()]
}

/// Get piece-square table value for a piece standing on (row, col)
fn pst_value(piece: &Piece, row: i8, col: i8, endgame: bool) -> i32 {
    let table = match piece.kind {
        PieceKind::Pawn => &PAWN_PST,
        PieceKind::Knight => &KNIGHT_PST,
        PieceKind::Bishop => &BISHOP_PST,
        PieceKind::Rook => &ROOK_PST,
        PieceKind::Queen => &QUEEN_PST,
        PieceKind::King => if endgame { &KING_ENDGAME_PST } else { &KING_MIDDLEGAME_PST },
    };

    let row = match piece.player {
        Player::One => row,
        Player::Two => 7 - row,
    };

    table[square_index(row, col)]
}

/// Non-king material per player, indexed by `Player::index`
fn count_material(pieces: &[Piece]) -> [i32; 2] {
    let mut material = [0; 2];

    for piece in pieces {
        if piece.kind != PieceKind::King {
            material[piece.player.index()] += piece_value(piece.kind);
        }
    }

    material
}

/// Determine if the pieces make up an endgame
pub fn is_endgame(pieces: &[Piece]) -> bool {
    count_material(pieces).iter().all(|&side| side <= ENDGAME_MATERIAL)
}

// ============================================================================
// MAIN EVALUATION FUNCTION
// ============================================================================

/// Evaluate the position from `perspective` (positive = perspective is better).
///
/// Squares are visited row-major; a square contributes only when
/// `is_valid_piece` accepts it and `get_piece` then yields a piece. The
/// position is only read.
pub fn evaluate_board<P: Position + ?Sized>(position: &P, perspective: Player) -> i32 {
    let mut pieces = Vec::with_capacity(32);

    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            if !position.is_valid_piece(row, col) {
                continue;
            }
            if let Some(piece) = position.get_piece(row, col) {
                pieces.push((piece, row, col));
            }
        }
    }

    let found: Vec<Piece> = pieces.iter().map(|&(piece, _, _)| piece).collect();
    let endgame = is_endgame(&found);

    pieces
        .iter()
        .map(|(piece, row, col)| {
            let value = piece_value(piece.kind) + pst_value(piece, *row, *col, endgame);
            if piece.is_player(perspective) { value } else { -value }
        })
        .sum()
}
