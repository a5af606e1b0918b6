// Ficheiro: src/validation.rs
// Descrição: Validação de lances propostos de fora do motor.

use crate::core::attack::is_king_in_check;
use crate::core::*;
use crate::error::{EngineError, EngineResult};
use crate::moves::{can_move, has_legal_move, move_flag, moves_into_check};
use log::debug;

/// Verifica se `color` pode jogar `mv` em `board_before`, incluindo a marca.
///
/// A marca tem de coincidir com a realidade recalculada: um lance que dá
/// mate marcado como xeque (ou sem marca) é rejeitado, não corrigido.
/// Um lance nulo só é aceite marcado com mate ou afogamento e quando
/// `color` realmente não tem lances.
///
/// Devolve erro apenas quando a casa de origem está vazia ou quando
/// falta um rei no tabuleiro.
pub fn is_legal(board_before: &Board, mv: &Move, color: Color) -> EngineResult<bool> {
    let mut board = *board_before;

    if mv.is_null() {
        return validate_null_move(&mut board, mv, color);
    }
    if mv.from == mv.to {
        debug!("Invalid move {}: source and target are the same square", mv);
        return Ok(false);
    }

    let piece = board.get(mv.from).ok_or(EngineError::EmptySquare(mv.from))?;
    if piece.color != color {
        debug!("Invalid move {}: piece at {} belongs to {:?}", mv, mv.from, piece.color);
        return Ok(false);
    }

    if !can_move(piece.kind, &board, color, mv) {
        debug!("Invalid move {}: not a {:?} move", mv, piece.kind);
        return Ok(false);
    }

    if moves_into_check(&mut board, mv)? {
        debug!("Invalid move {}: {:?} moved into check", mv, color);
        return Ok(false);
    }

    let expected = move_flag(&mut board, mv, color)?;
    if mv.flag != expected {
        debug!("Invalid flag on {}: claimed {:?}, actual {:?}", mv, mv.flag, expected);
        return Ok(false);
    }
    Ok(true)
}

fn validate_null_move(board: &mut Board, mv: &Move, color: Color) -> EngineResult<bool> {
    if has_legal_move(board, color)? {
        debug!("Invalid null move: {:?} still has legal moves", color);
        return Ok(false);
    }
    let expected = if is_king_in_check(board, color)? { MoveFlag::Checkmate } else { MoveFlag::Stalemate };
    if mv.flag != expected {
        debug!("Invalid null move: claimed {:?}, actual {:?}", mv.flag, expected);
        return Ok(false);
    }
    Ok(true)
}
