// Ficheiro: src/moves/mod.rs
// Descrição: Declara os submódulos de cada peça e o filtro de legalidade.

pub mod pawn;
pub mod knight;
pub mod sliding;
pub mod queen;
pub mod king;

use crate::core::{attack::is_king_in_check, Board, Color, Move, MoveFlag, PieceKind, Square};
use crate::error::{EngineError, EngineResult};

/// Tabela de despacho: geração pseudo-legal por tipo de peça.
/// Só o rei sai já filtrado.
pub fn generate_for(
    kind: PieceKind,
    board: &mut Board,
    color: Color,
    from: Square,
    moves: &mut Vec<Move>,
) -> EngineResult<()> {
    match kind {
        PieceKind::Pawn => pawn::generate(board, color, from, moves),
        PieceKind::Knight => knight::generate(board, color, from, moves),
        PieceKind::Bishop => sliding::generate_bishop(board, color, from, moves),
        PieceKind::Rook => sliding::generate_rook(board, color, from, moves),
        PieceKind::Queen => queen::generate(board, color, from, moves),
        PieceKind::King => king::generate(board, color, from, moves)?,
    }
    Ok(())
}

/// Tabela de despacho: predicado de movimento por tipo de peça.
pub fn can_move(kind: PieceKind, board: &Board, color: Color, mv: &Move) -> bool {
    match kind {
        PieceKind::Pawn => pawn::can_move(board, color, mv),
        PieceKind::Knight => knight::can_move(board, color, mv),
        PieceKind::Bishop => sliding::can_move_bishop(board, color, mv),
        PieceKind::Rook => sliding::can_move_rook(board, color, mv),
        PieceKind::Queen => queen::can_move(board, color, mv),
        PieceKind::King => king::can_move(board, color, mv),
    }
}

/// Lances pseudo-legais da peça da cor indicada numa casa.
/// Casa vazia ou peça adversária dão uma lista vazia.
pub fn pseudo_moves(board: &mut Board, color: Color, square: Square) -> EngineResult<Vec<Move>> {
    let mut moves = Vec::with_capacity(28);
    if let Some(p) = board.get(square) {
        if p.color == color {
            generate_for(p.kind, board, color, square, &mut moves)?;
        }
    }
    Ok(moves)
}

/// Gera todos os lances pseudo-legais de uma cor, casa a casa (a1, b1, ..., h8).
pub fn all_moves(board: &mut Board, color: Color) -> EngineResult<Vec<Move>> {
    // Pre-aloca com capacidade estimada para reduzir realocações
    let mut moves = Vec::with_capacity(64);
    for square in Square::all() {
        match board.get(square) {
            Some(p) if p.color == color => generate_for(p.kind, board, color, square, &mut moves)?,
            _ => {}
        }
    }
    Ok(moves)
}

/// Simula o lance só nas duas casas tocadas e diz se o rei de quem move fica em xeque.
pub fn moves_into_check(board: &mut Board, mv: &Move) -> EngineResult<bool> {
    let mover = board.get(mv.from).ok_or(EngineError::EmptySquare(mv.from))?.color;
    let probe = board.scoped_move(*mv);
    is_king_in_check(&probe, mover)
}

/// Gera apenas lances legais, na mesma ordem de `all_moves`.
pub fn legal_moves(board: &mut Board, color: Color) -> EngineResult<Vec<Move>> {
    let mut legal = Vec::with_capacity(64);
    let mut buffer = Vec::with_capacity(28);
    for square in Square::all() {
        let Some(p) = board.get(square) else { continue };
        if p.color != color {
            continue;
        }

        buffer.clear();
        generate_for(p.kind, board, color, square, &mut buffer)?;
        if p.kind == PieceKind::King {
            legal.extend_from_slice(&buffer);
            continue;
        }
        for mv in &buffer {
            if !moves_into_check(board, mv)? {
                legal.push(*mv);
            }
        }
    }
    Ok(legal)
}

/// Verifica se existe pelo menos um lance legal, parando no primeiro.
pub fn has_legal_move(board: &mut Board, color: Color) -> EngineResult<bool> {
    let mut buffer = Vec::with_capacity(28);
    for square in Square::all() {
        let Some(p) = board.get(square) else { continue };
        if p.color != color {
            continue;
        }

        buffer.clear();
        generate_for(p.kind, board, color, square, &mut buffer)?;
        if p.kind == PieceKind::King {
            if !buffer.is_empty() {
                return Ok(true);
            }
            continue;
        }
        for mv in &buffer {
            if !moves_into_check(board, mv)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Simula o lance e calcula a marca que ele merece: mate se o adversário
/// fica em xeque sem respostas, xeque se só fica em xeque.
pub fn move_flag(board: &mut Board, mv: &Move, color: Color) -> EngineResult<MoveFlag> {
    let mut after = board.scoped_move(*mv);
    if !is_king_in_check(&after, !color)? {
        return Ok(MoveFlag::None);
    }
    if has_legal_move(&mut after, !color)? {
        Ok(MoveFlag::Check)
    } else {
        Ok(MoveFlag::Checkmate)
    }
}

/// A casa de destino está ocupada (lances legais nunca capturam peça amiga).
#[inline]
pub fn is_capture(board: &Board, mv: &Move) -> bool {
    !board.is_empty(mv.to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> (Board, Color) {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn test_start_position_has_twenty_moves() {
        let mut b = Board::new();
        let moves = legal_moves(&mut b, Color::White).unwrap();
        assert_eq!(moves.len(), 20);
        assert_eq!(legal_moves(&mut b, Color::Black).unwrap().len(), 20);
        // Ordem rank-major: o primeiro lance vem do cavalo em b1.
        assert_eq!(moves[0].to_string(), "b1c3");
        assert_eq!(b, Board::new());
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // O bispo em e2 está cravado pela torre em e8.
        let (mut b, color) = board("4r2k/8/8/8/8/8/4B3/4K3 w");
        let moves = legal_moves(&mut b, color).unwrap();
        assert!(moves.iter().all(|m| m.from != Square::from_algebraic("e2").unwrap()));
        assert!(!moves.is_empty());
    }

    #[test]
    fn test_moves_into_check_requires_a_piece() {
        let mut b = Board::new();
        let mv = Move::parse("e4e5").unwrap();
        assert!(matches!(moves_into_check(&mut b, &mv), Err(EngineError::EmptySquare(_))));
    }

    #[test]
    fn test_move_flags() {
        // Mate da escada: a torre em a1 vai para a8.
        let (mut b, color) = board("6k1/5ppp/8/8/8/8/8/R5K1 w");
        assert_eq!(move_flag(&mut b, &Move::parse("a1a8").unwrap(), color).unwrap(), MoveFlag::Checkmate);
        assert_eq!(move_flag(&mut b, &Move::parse("a1a2").unwrap(), color).unwrap(), MoveFlag::None);

        let (mut b, color) = board("6k1/5pp1/8/8/8/8/8/R5K1 w");
        assert_eq!(move_flag(&mut b, &Move::parse("a1a8").unwrap(), color).unwrap(), MoveFlag::Check);
    }

    #[test]
    fn test_no_legal_moves_in_checkmate_and_stalemate() {
        let (mut mate, _) = board("R5k1/5ppp/8/8/8/8/8/6K1 b");
        assert!(!has_legal_move(&mut mate, Color::Black).unwrap());
        assert!(legal_moves(&mut mate, Color::Black).unwrap().is_empty());

        let (mut stale, _) = board("7k/5Q2/6K1/8/8/8/8/8 b");
        assert!(!has_legal_move(&mut stale, Color::Black).unwrap());
        assert!(has_legal_move(&mut stale, Color::White).unwrap());
    }
}
