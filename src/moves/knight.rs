// Ficheiro: src/moves/knight.rs
// Descrição: Lógica para gerar os lances dos cavalos.

use crate::core::{attack::KNIGHT_OFFSETS, Board, Color, Move, Square};

/// Gera os lances pseudo-legais de um cavalo (os 8 saltos fixos).
pub fn generate(board: &Board, color: Color, from: Square, moves: &mut Vec<Move>) {
    for &(df, dr) in KNIGHT_OFFSETS.iter() {
        if let Some(to) = from.offset(df, dr) {
            match board.get(to) {
                Some(p) if p.color == color => {}
                _ => moves.push(Move::new(from, to)),
            }
        }
    }
}

pub fn can_move(board: &Board, color: Color, mv: &Move) -> bool {
    let df = (mv.to.file() as i8 - mv.from.file() as i8).abs();
    let dr = (mv.to.rank() as i8 - mv.from.rank() as i8).abs();
    matches!((df, dr), (1, 2) | (2, 1)) && !matches!(board.get(mv.to), Some(p) if p.color == color)
}
