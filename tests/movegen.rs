use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use torre::core::attack::{is_king_in_check, is_square_attacked};
use torre::engine::{perft, perft_parallel};
use torre::moves::{all_moves, legal_moves, moves_into_check, pseudo_moves};
use torre::search::{Engine, NoDeadline, NoopRecorder, SearchConfig};
use torre::*;

/// Joga lances legais aleatórios a partir da posição inicial e devolve as posições visitadas.
fn random_positions(seed: u64, games: usize, plies: usize) -> Vec<(Board, Color)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions = Vec::new();
    for _ in 0..games {
        let mut board = Board::new();
        let mut color = Color::White;
        for _ in 0..plies {
            positions.push((board, color));
            let moves = legal_moves(&mut board, color).unwrap();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.gen_range(0..moves.len())];
            board.apply_move(mv);
            color = !color;
        }
    }
    positions
}

#[test]
fn moves_into_check_agrees_with_full_clone() {
    for (board, color) in random_positions(11, 8, 60) {
        let mut work = board;
        for mv in all_moves(&mut work, color).unwrap() {
            let mut reference = board;
            reference.apply_move(mv);
            let expected = is_king_in_check(&reference, color).unwrap();

            assert_eq!(moves_into_check(&mut work, &mv).unwrap(), expected, "move {} in {}", mv, board.to_fen(color));
            assert_eq!(work, board, "board not restored after {}", mv);
        }
    }
}

#[test]
fn king_moves_never_land_on_attacked_squares() {
    for (board, color) in random_positions(23, 8, 60) {
        let mut work = board;
        let Some(king) = board.find_king(color) else { panic!("king missing") };
        for mv in pseudo_moves(&mut work, color, king).unwrap() {
            let mut after = board;
            after.apply_move(mv);
            assert!(!is_square_attacked(&after, mv.to, !color), "king walks into {} in {}", mv, board.to_fen(color));
        }
    }
}

#[test]
fn generated_moves_stay_on_board_and_move_something() {
    for (board, color) in random_positions(5, 6, 80) {
        let mut work = board;
        for mv in legal_moves(&mut work, color).unwrap() {
            assert!(mv.from.file() < 8 && mv.from.rank() < 8);
            assert!(mv.to.file() < 8 && mv.to.rank() < 8);
            assert_ne!(mv.from, mv.to);
            assert_eq!(board.get(mv.from).map(|p| p.color), Some(color));
            assert_ne!(board.get(mv.to).map(|p| p.color), Some(color));
        }
    }
}

#[test]
fn terminal_positions_are_flagged_by_check_status() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..40 {
        let mut board = Board::new();
        let mut color = Color::White;
        for _ in 0..300 {
            let moves = legal_moves(&mut board, color).unwrap();
            if moves.is_empty() {
                let in_check = is_king_in_check(&board, color).unwrap();
                let mut engine = Engine::new(SearchConfig { max_depth: 1, move_time: None, seed: Some(1) });
                let result = engine.next_move(&board, color, &NoDeadline, &mut NoopRecorder).unwrap();
                assert!(result.best_move.is_null());
                let expected = if in_check { MoveFlag::Checkmate } else { MoveFlag::Stalemate };
                assert_eq!(result.best_move.flag, expected);
                break;
            }
            board.apply_move(moves[rng.gen_range(0..moves.len())]);
            color = !color;
        }
    }
}

#[test]
fn scoped_moves_match_persistent_application() {
    let mut rng = StdRng::seed_from_u64(3);
    let start = Board::new();

    // Escolhe uma sequência legal de 6 meios-lances.
    let mut line = Vec::new();
    let mut probe = start;
    let mut color = Color::White;
    for _ in 0..6 {
        let moves = legal_moves(&mut probe, color).unwrap();
        let mv = moves[rng.gen_range(0..moves.len())];
        probe.apply_move(mv);
        line.push(mv);
        color = !color;
    }

    fn nested(board: &mut Board, line: &[Move], expected: &Board) {
        match line.split_first() {
            None => assert_eq!(board, expected),
            Some((mv, rest)) => {
                let mut child = board.scoped_move(*mv);
                nested(&mut child, rest, expected);
            }
        }
    }

    let mut original = start;
    nested(&mut original, &line, &probe);
    assert_eq!(original, start);
}

#[test]
fn perft_matches_known_counts() {
    let mut board = Board::new();
    assert_eq!(perft(&mut board, Color::White, 1).unwrap(), 20);
    assert_eq!(perft(&mut board, Color::White, 2).unwrap(), 400);
    assert_eq!(perft(&mut board, Color::White, 3).unwrap(), 8902);
    assert_eq!(perft_parallel(&board, Color::White, 3).unwrap(), 8902);
}
