// Ficheiro: src/moves/king.rs
// Descrição: Lógica para gerar os lances do rei. Sem roque.

use super::moves_into_check;
use crate::core::{attack::KING_OFFSETS, Board, Color, Move, Square};
use crate::error::EngineResult;

/// Gera os lances do rei já filtrados: cada candidato é simulado e
/// descartado se deixar o próprio rei atacado.
pub fn generate(board: &mut Board, color: Color, from: Square, moves: &mut Vec<Move>) -> EngineResult<()> {
    for &(df, dr) in KING_OFFSETS.iter() {
        let Some(to) = from.offset(df, dr) else { continue };
        if matches!(board.get(to), Some(p) if p.color == color) {
            continue;
        }
        let mv = Move::new(from, to);
        if !moves_into_check(board, &mv)? {
            moves.push(mv);
        }
    }
    Ok(())
}

pub fn can_move(board: &Board, color: Color, mv: &Move) -> bool {
    let df = (mv.to.file() as i8 - mv.from.file() as i8).abs();
    let dr = (mv.to.rank() as i8 - mv.from.rank() as i8).abs();
    df <= 1 && dr <= 1 && (df, dr) != (0, 0) && !matches!(board.get(mv.to), Some(p) if p.color == color)
}
