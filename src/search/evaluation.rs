use crate::core::*;

const CENTRAL_PAWN_AT_HOME: i32 = -5;
const DEFENDED_PAWN: i32 = 10;
const KNIGHT_ON_RIM: i32 = -2;
const DEVELOPED_BISHOP: i32 = 3;

/// Avaliação material + posicional, positiva quando é boa para `perspective`.
/// Não depende de haver reis no tabuleiro, por isso pode ser chamada em qualquer nó.
pub fn score(board: &Board, perspective: Color) -> i32 {
    let mut white_score = 0;
    for square in Square::all() {
        if let Some(piece) = board.get(square) {
            white_score += piece_score(board, square, piece) * piece.color.sign() as i32;
        }
    }
    white_score * perspective.sign() as i32
}

// Contribuição de uma peça do ponto de vista da sua própria cor.
fn piece_score(board: &Board, square: Square, piece: Piece) -> i32 {
    let mut value = piece.kind.value();
    let relative_rank = match piece.color {
        Color::White => square.rank(),
        Color::Black => 7 - square.rank(),
    };

    match piece.kind {
        PieceKind::Pawn => {
            // Peões de d/e que ainda não passaram da terceira rank
            if (square.file() == 3 || square.file() == 4) && relative_rank <= 2 {
                value += CENTRAL_PAWN_AT_HOME;
            }
            if is_defended_by_pawn(board, square, piece.color) {
                value += DEFENDED_PAWN;
            }
        }
        PieceKind::Knight => {
            let (f, r) = (square.file(), square.rank());
            if f <= 1 || f >= 6 || r <= 1 || r >= 6 {
                value += KNIGHT_ON_RIM;
            }
        }
        PieceKind::Bishop => {
            if relative_rank != 0 {
                value += DEVELOPED_BISHOP;
            }
        }
        _ => {}
    }
    value
}

fn is_defended_by_pawn(board: &Board, square: Square, color: Color) -> bool {
    let behind = -color.pawn_direction();
    [-1, 1].iter().any(|&df| {
        matches!(
            square.offset(df, behind).and_then(|sq| board.get(sq)),
            Some(p) if p.color == color && p.kind == PieceKind::Pawn
        )
    })
}
