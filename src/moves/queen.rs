// Ficheiro: src/moves/queen.rs
// Descrição: Lógica para gerar os lances da Dama (torre + bispo).

use super::sliding;
use crate::core::{Board, Color, Move, Square};

/// Lances de torre primeiro, depois os de bispo.
pub fn generate(board: &Board, color: Color, from: Square, moves: &mut Vec<Move>) {
    sliding::generate_rook(board, color, from, moves);
    sliding::generate_bishop(board, color, from, moves);
}

pub fn can_move(board: &Board, color: Color, mv: &Move) -> bool {
    sliding::can_move_bishop(board, color, mv) || sliding::can_move_rook(board, color, mv)
}
