// Ficheiro: src/core/attack.rs
// Descrição: Deteção de ataques e de xeque por varrimento de raios e saltos fixos.

use super::board::Board;
use super::types::*;
use crate::error::{EngineError, EngineResult};

pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2),
    (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1), (1, 1), (1, 0), (1, -1),
    (0, -1), (-1, -1), (-1, 0), (-1, 1),
];

/// Verifica se uma casa é atacada por peças da cor especificada.
pub fn is_square_attacked(board: &Board, square: Square, by: Color) -> bool {
    diagonal_attack(board, square, by)
        || orthogonal_attack(board, square, by)
        || knight_attack(board, square, by)
}

/// Verifica se o rei da cor indicada está em xeque.
/// Falha com `KingNotFound` se esse rei não estiver no tabuleiro.
pub fn is_king_in_check(board: &Board, color: Color) -> EngineResult<bool> {
    let king = board.find_king(color).ok_or(EngineError::KingNotFound(color))?;
    Ok(is_square_attacked(board, king, !color))
}

fn is_enemy(piece: Piece, by: Color, kinds: &[PieceKind]) -> bool {
    piece.color == by && kinds.contains(&piece.kind)
}

/// Peões adjacentes primeiro, depois bispos, damas e rei ao longo das diagonais.
pub fn diagonal_attack(board: &Board, square: Square, by: Color) -> bool {
    // Um peão atacante está uma rank "atrás" da casa, do ponto de vista dele.
    let behind = -by.pawn_direction();
    for df in [-1, 1] {
        if let Some(p) = square.offset(df, behind).and_then(|sq| board.get(sq)) {
            if is_enemy(p, by, &[PieceKind::Pawn]) {
                return true;
            }
        }
    }

    for &(df, dr) in DIAGONALS.iter() {
        if ray_attack(board, square, by, df, dr, &[PieceKind::Bishop, PieceKind::Queen]) {
            return true;
        }
    }
    false
}

/// Torres, damas e rei ao longo de ranks e colunas.
pub fn orthogonal_attack(board: &Board, square: Square, by: Color) -> bool {
    ORTHOGONALS
        .iter()
        .any(|&(df, dr)| ray_attack(board, square, by, df, dr, &[PieceKind::Rook, PieceKind::Queen]))
}

pub fn knight_attack(board: &Board, square: Square, by: Color) -> bool {
    KNIGHT_OFFSETS.iter().any(|&(df, dr)| {
        matches!(
            square.offset(df, dr).and_then(|sq| board.get(sq)),
            Some(p) if is_enemy(p, by, &[PieceKind::Knight])
        )
    })
}

// A primeira peça encontrada decide: atacante do tipo certo, rei à distância 1, ou bloqueio.
fn ray_attack(board: &Board, square: Square, by: Color, df: i8, dr: i8, sliders: &[PieceKind]) -> bool {
    let mut current = square;
    let mut distance = 0;
    while let Some(next) = current.offset(df, dr) {
        current = next;
        distance += 1;
        if let Some(p) = board.get(current) {
            return is_enemy(p, by, sliders) || (distance == 1 && is_enemy(p, by, &[PieceKind::King]));
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap().0
    }

    #[test]
    fn test_rook_check_and_block() {
        let mut b = board("4r2k/8/8/8/8/8/3B4/4K3 w");
        assert!(is_king_in_check(&b, Color::White).unwrap());
        b.apply_move(Move::new(sq("d2"), sq("e3")));
        assert!(!is_king_in_check(&b, Color::White).unwrap());
    }

    #[test]
    fn test_pawn_attacks_follow_capture_direction() {
        let b = board("7k/8/8/3p4/8/8/8/K7 w");
        // O peão preto em d5 ataca c4 e e4, não c6 nem e6.
        assert!(is_square_attacked(&b, sq("c4"), Color::Black));
        assert!(is_square_attacked(&b, sq("e4"), Color::Black));
        assert!(!is_square_attacked(&b, sq("c6"), Color::Black));
        assert!(!is_square_attacked(&b, sq("d4"), Color::Black));

        let b = board("7k/8/8/8/3P4/8/8/K7 w");
        assert!(is_square_attacked(&b, sq("e5"), Color::White));
        assert!(!is_square_attacked(&b, sq("e3"), Color::White));
    }

    #[test]
    fn test_king_attacks_only_adjacent() {
        let b = board("8/8/8/3k4/8/8/8/K7 w");
        assert!(is_square_attacked(&b, sq("e4"), Color::Black));
        assert!(is_square_attacked(&b, sq("d6"), Color::Black));
        assert!(!is_square_attacked(&b, sq("d3"), Color::Black));
        assert!(!is_square_attacked(&b, sq("f7"), Color::Black));
    }

    #[test]
    fn test_blockers_stop_rays() {
        let b = board("7k/8/8/q2P3K/8/8/8/8 w");
        assert!(!is_king_in_check(&b, Color::White).unwrap());
        let b = board("7k/6p1/8/8/8/2B5/8/K7 b");
        assert!(!is_king_in_check(&b, Color::Black).unwrap());
        let b = board("7k/8/8/8/8/2B5/8/K7 b");
        assert!(is_king_in_check(&b, Color::Black).unwrap());
    }

    #[test]
    fn test_knight_attack_on_edge() {
        let b = board("k7/8/1N6/8/8/8/8/7K b");
        assert!(knight_attack(&b, sq("a8"), Color::White));
        assert!(!knight_attack(&b, sq("h8"), Color::White));
    }

    #[test]
    fn test_missing_king_is_an_error() {
        let b = board("8/8/8/8/8/8/8/K7 w");
        assert_eq!(is_king_in_check(&b, Color::Black), Err(EngineError::KingNotFound(Color::Black)));
    }
}
