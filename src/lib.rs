//! Mailbox Chess - Chess Engine Core
//!
//! A two-player chess engine library with:
//! - 8x8 mailbox board with make/undo move execution
//! - Per-piece move generation split into peaceful moves and takes
//! - Material and piece-square table evaluation
//! - Minimax search with optional alpha-beta pruning
//! - Root-split parallel search over board copies

pub mod types;
pub mod piece;
pub mod board;
pub mod move_generator;
pub mod evaluation;
pub mod search;
pub mod parallel_search;

pub use board::{Board, LayoutError, Move, MoveError, Position, UndoInfo};
pub use evaluation::evaluate_board;
pub use move_generator::{GameStatus, MoveGenerator};
pub use parallel_search::ParallelSearch;
pub use piece::Piece;
pub use search::{SearchConfig, SearchEngine, SearchOutcome};
pub use types::{Coord, PieceKind, Player};
