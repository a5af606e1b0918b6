// Ficheiro: src/moves/pawn.rs
// Descrição: Lógica para gerar e validar os lances dos peões.

use crate::core::{Board, Color, Move, Square};

/// Gera os lances pseudo-legais de um peão: avanço simples, avanço duplo
/// a partir da rank inicial e as duas capturas diagonais.
/// Sem en passant; a promoção (só a Dama) acontece em `Board::apply_move`.
pub fn generate(board: &Board, color: Color, from: Square, moves: &mut Vec<Move>) {
    let dir = color.pawn_direction();

    if let Some(one) = from.offset(0, dir) {
        if board.is_empty(one) {
            moves.push(Move::new(from, one));

            if from.rank() == color.pawn_home_rank() {
                if let Some(two) = from.offset(0, 2 * dir) {
                    if board.is_empty(two) {
                        moves.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(target) = from.offset(df, dir) {
            if matches!(board.get(target), Some(p) if p.color != color) {
                moves.push(Move::new(from, target));
            }
        }
    }
}

/// Verifica a geometria de um lance de peão sem enumerar.
pub fn can_move(board: &Board, color: Color, mv: &Move) -> bool {
    let dir = color.pawn_direction();
    let df = mv.to.file() as i8 - mv.from.file() as i8;
    let dr = mv.to.rank() as i8 - mv.from.rank() as i8;
    let target = board.get(mv.to);

    match (df.abs(), dr) {
        (0, r) if r == dir => target.is_none(),
        (0, r) if r == 2 * dir => {
            mv.from.rank() == color.pawn_home_rank()
                && target.is_none()
                && mv.from.offset(0, dir).is_some_and(|mid| board.is_empty(mid))
        }
        (1, r) if r == dir => matches!(target, Some(p) if p.color != color),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn targets(board: &Board, color: Color, from: &str) -> Vec<String> {
        let mut moves = Vec::new();
        generate(board, color, sq(from), &mut moves);
        moves.iter().map(|m| m.to.to_string()).collect()
    }

    #[test]
    fn test_pawn_pushes_from_home_rank() {
        let board = Board::new();
        assert_eq!(targets(&board, Color::White, "e2"), vec!["e3", "e4"]);
        assert_eq!(targets(&board, Color::Black, "d7"), vec!["d6", "d5"]);
    }

    #[test]
    fn test_pawn_blocked_and_captures() {
        let (board, _) = Board::from_fen("4k3/8/8/8/8/3n1p2/4P3/4K3 w").unwrap();
        // e3 livre, e4 livre; capturas em d3 e f3
        assert_eq!(targets(&board, Color::White, "e2"), vec!["e3", "e4", "d3", "f3"]);

        let (board, _) = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w").unwrap();
        assert!(targets(&board, Color::White, "e2").is_empty());
    }

    #[test]
    fn test_pawn_on_last_rank_has_no_moves() {
        let (board, _) = Board::from_fen("P3k3/8/8/8/8/8/8/4K2p w").unwrap();
        assert!(targets(&board, Color::White, "a8").is_empty());
        assert!(targets(&board, Color::Black, "h1").is_empty());
    }

    #[test]
    fn test_can_move_matches_generation() {
        let (board, _) = Board::from_fen("4k3/8/8/8/8/3n1p2/4P3/4K3 w").unwrap();
        let ok = |text: &str| can_move(&board, Color::White, &Move::parse(text).unwrap());
        assert!(ok("e2e3"));
        assert!(ok("e2e4"));
        assert!(ok("e2d3"));
        assert!(ok("e2f3"));
        assert!(!ok("e2e5"));
        assert!(!ok("e2d2"));
        assert!(!ok("e2e1"));

        let (blocked, _) = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w").unwrap();
        assert!(!can_move(&blocked, Color::White, &Move::parse("e2e4").unwrap()));
    }
}
