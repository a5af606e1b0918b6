// Ficheiro: src/moves/sliding.rs
// Descrição: Lógica para gerar os lances de peças deslizantes (Torres e Bispos).

use crate::core::{
    attack::{DIAGONALS, ORTHOGONALS},
    Board, Color, Move, Square,
};

/// Função genérica para raios: casas vazias entram, a primeira peça inimiga
/// entra e pára o raio, uma peça amiga pára o raio antes.
pub fn generate_rays(board: &Board, color: Color, from: Square, dirs: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(df, dr) in dirs {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match board.get(to) {
                None => moves.push(Move::new(from, to)),
                Some(p) => {
                    if p.color != color {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

pub fn generate_bishop(board: &Board, color: Color, from: Square, moves: &mut Vec<Move>) {
    generate_rays(board, color, from, &DIAGONALS, moves);
}

pub fn generate_rook(board: &Board, color: Color, from: Square, moves: &mut Vec<Move>) {
    generate_rays(board, color, from, &ORTHOGONALS, moves);
}

/// O lance segue uma das direções, com o caminho livre e sem capturar peça amiga.
pub fn can_slide(board: &Board, color: Color, mv: &Move, dirs: &[(i8, i8)]) -> bool {
    let df = mv.to.file() as i8 - mv.from.file() as i8;
    let dr = mv.to.rank() as i8 - mv.from.rank() as i8;
    if df == 0 && dr == 0 {
        return false;
    }
    if df != 0 && dr != 0 && df.abs() != dr.abs() {
        return false;
    }

    let step = (df.signum(), dr.signum());
    if !dirs.contains(&step) {
        return false;
    }

    let mut current = mv.from;
    while let Some(next) = current.offset(step.0, step.1) {
        if next == mv.to {
            return !matches!(board.get(next), Some(p) if p.color == color);
        }
        if !board.is_empty(next) {
            return false;
        }
        current = next;
    }
    false
}

pub fn can_move_bishop(board: &Board, color: Color, mv: &Move) -> bool {
    can_slide(board, color, mv, &DIAGONALS)
}

pub fn can_move_rook(board: &Board, color: Color, mv: &Move) -> bool {
    can_slide(board, color, mv, &ORTHOGONALS)
}
