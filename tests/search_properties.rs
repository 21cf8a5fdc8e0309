use rand::prelude::*;

use mailbox_chess::search::MATE_SCORE;
use mailbox_chess::{
    evaluate_board, Board, GameStatus, Move, MoveGenerator, Player, Position, SearchConfig, SearchEngine,
    SearchOutcome,
};

/// Positions reached by random play from the opening
fn random_positions(seed: u64, games: usize, plies: usize) -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(seed);
    let generator = MoveGenerator::new();
    let mut positions = Vec::new();

    for _ in 0..games {
        let mut board = Board::new();
        for _ in 0..plies {
            if generator.game_status(&board, board.turn) != GameStatus::Ongoing {
                break;
            }
            let moves = generator.generate_moves(&board, board.turn);
            let mv = moves[rng.gen_range(0..moves.len())];
            board.apply_move(&mv).expect("generated moves are playable");
            positions.push(board.clone());
        }
    }

    positions
}

#[test]
fn piece_moves_are_the_deduplicated_union_of_both_categories() {
    for board in random_positions(7, 12, 40) {
        for piece in board.occupied() {
            let peaceful = piece.get_valid_peaceful_moves(&board);
            let takes = piece.get_valid_piece_takes(&board);
            let moves = piece.get_valid_piece_moves(&board);

            for (i, square) in moves.iter().enumerate() {
                assert!(!moves[i + 1..].contains(square), "{piece:?} repeats {square:?}");
                assert!(peaceful.contains(square) || takes.contains(square));
            }
            assert!(peaceful.iter().chain(&takes).all(|square| moves.contains(square)));

            for &(row, col) in &peaceful {
                assert_eq!(board.get_piece(row, col), None);
            }
            for &(row, col) in &takes {
                assert!(board.is_valid_piece(row, col));
                assert_eq!(board.get_piece(row, col).map(|p| p.player), Some(piece.player.opponent()));
            }
        }
    }
}

#[test]
fn every_generated_move_applies_and_undoes_cleanly() {
    let generator = MoveGenerator::new();

    for mut board in random_positions(11, 6, 30) {
        let before = board.clone();
        for mv in generator.generate_moves(&board, board.turn) {
            let undo = board.apply_move(&mv).expect("generated move rejected");
            assert_eq!(board.get_piece(mv.to.0, mv.to.1).map(|p| p.coord()), Some(mv.to));
            board.undo_move(&undo);
            assert_eq!(board, before);
        }
    }
}

#[test]
fn search_leaves_the_board_as_it_found_it() {
    let mut engine = SearchEngine::new(SearchConfig { depth: 2, ..SearchConfig::default() });

    for mut board in random_positions(23, 4, 24) {
        let before = board.clone();
        let player = board.turn;
        let first = engine.select_move(&mut board, player);
        assert_eq!(board, before);
        assert_eq!(engine.select_move(&mut board, player), first);
    }
}

#[test]
fn no_move_is_reported_exactly_when_the_side_has_no_moves() {
    let generator = MoveGenerator::new();
    let mut engine = SearchEngine::new(SearchConfig { depth: 1, ..SearchConfig::default() });

    for mut board in random_positions(31, 8, 60) {
        let player = board.turn;
        let has_moves = !generator.generate_moves(&board, player).is_empty();
        let has_king = board.find_king(player).is_some();

        match engine.select_move(&mut board, player) {
            SearchOutcome::BestMove { .. } => assert!(has_moves && has_king),
            SearchOutcome::KingCaptured => assert!(!has_king),
            SearchOutcome::Checkmate | SearchOutcome::Stalemate => assert!(!has_moves),
        }
    }
}

#[test]
fn evaluation_is_repeatable_on_played_positions() {
    for board in random_positions(41, 4, 30) {
        let before = board.clone();
        for player in [Player::One, Player::Two] {
            assert_eq!(evaluate_board(&board, player), evaluate_board(&board, player));
            assert_eq!(evaluate_board(&board, player), -evaluate_board(&board, player.opponent()));
        }
        assert_eq!(board, before);
    }
}

#[test]
fn search_prefers_taking_the_king_over_material() {
    let mut board = Board::from_layout(
        [
            "....K...",
            "........",
            "........",
            "........",
            "Q......r",
            "........",
            "........",
            "k.......",
        ],
        Player::One,
    )
    .unwrap();

    let outcome = SearchEngine::new(SearchConfig { depth: 3, ..SearchConfig::default() })
        .select_move(&mut board, Player::One);
    match outcome {
        SearchOutcome::BestMove { mv, score } => {
            assert_eq!(mv, Move::new((4, 0), (7, 0)));
            assert!(score > 10000 && score < MATE_SCORE);
        }
        other => panic!("expected a move, got {other:?}"),
    }
}
