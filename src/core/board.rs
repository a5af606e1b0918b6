// Ficheiro: src/core/board.rs
// Descrição: Módulo que contém a struct Board e os seus métodos principais.

use super::types::*;
use crate::error::{EngineError, EngineResult};
use std::fmt;
use std::ops::{Deref, DerefMut};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

// Tabuleiro 8x8. Índice = rank * 8 + file, a1 = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Tabuleiro com a posição inicial padrão.
    pub fn new() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop, PieceKind::Queen,
            PieceKind::King, PieceKind::Bishop, PieceKind::Knight, PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            board.squares[file] = Some(Piece::new(kind, Color::White));
            board.squares[8 + file] = Some(Piece::new(PieceKind::Pawn, Color::White));
            board.squares[48 + file] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.squares[56 + file] = Some(Piece::new(kind, Color::Black));
        }
        board
    }

    pub fn empty() -> Self {
        Board { squares: [None; 64] }
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Executa um lance sem validar: move a peça de `from` para `to`,
    /// substituindo o que lá estiver. Um peão que chega à última rank vira Dama.
    pub fn apply_move(&mut self, mv: Move) {
        let piece = self.squares[mv.from.index()].take().map(|p| {
            if p.kind == PieceKind::Pawn && mv.to.rank() == p.color.last_rank() {
                Piece::new(PieceKind::Queen, p.color)
            } else {
                p
            }
        });
        self.squares[mv.to.index()] = piece;
    }

    /// Aplica o lance e devolve um guard que repõe as duas casas ao sair de escopo.
    pub fn scoped_move(&mut self, mv: Move) -> ScopedMove<'_> {
        let saved_from = self.get(mv.from);
        let saved_to = self.get(mv.to);
        self.apply_move(mv);
        ScopedMove { board: self, mv, saved_from, saved_to }
    }

    /// Peças de uma cor, em ordem rank-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.get(sq) {
            Some(p) if p.color == color => Some((sq, p)),
            _ => None,
        })
    }

    /// Encontra o rei de uma cor.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Cria o tabuleiro a partir de códigos com sinal, indexados `[rank][file]`.
    pub fn from_codes(codes: [[i8; 8]; 8]) -> EngineResult<Self> {
        let mut board = Board::empty();
        for (rank, row) in codes.iter().enumerate() {
            for (file, &code) in row.iter().enumerate() {
                board.squares[rank * 8 + file] = Piece::from_code(code)?;
            }
        }
        Ok(board)
    }

    pub fn to_codes(&self) -> [[i8; 8]; 8] {
        let mut codes = [[0i8; 8]; 8];
        for sq in Square::all() {
            codes[sq.rank() as usize][sq.file() as usize] = self.get(sq).map_or(0, |p| p.code());
        }
        codes
    }

    /// Cria um novo tabuleiro a partir de uma string FEN.
    /// Só a disposição e o lado a jogar são usados; roque e en passant não existem neste motor.
    pub fn from_fen(fen: &str) -> EngineResult<(Self, Color)> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(EngineError::InvalidFen("empty string".to_string()));
        }

        let rows: Vec<&str> = parts[0].split('/').collect();
        if rows.len() != 8 {
            return Err(EngineError::InvalidFen(format!("expected 8 rows, got {}", rows.len())));
        }

        let mut board = Board::empty();
        for (i, row) in rows.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for ch in row.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    if !(1..=8).contains(&skip) || file as u32 + skip > 8 {
                        return Err(EngineError::InvalidFen(format!("row {} is too long", i + 1)));
                    }
                    file += skip as u8;
                } else {
                    let piece = Piece::from_char(ch)
                        .ok_or_else(|| EngineError::InvalidFen(format!("invalid piece '{}'", ch)))?;
                    let sq = Square::new(file, rank)
                        .ok_or_else(|| EngineError::InvalidFen(format!("row {} is too long", i + 1)))?;
                    board.set(sq, Some(piece));
                    file += 1;
                }
            }
            if file != 8 {
                return Err(EngineError::InvalidFen(format!("row {} has {} files", i + 1, file)));
            }
        }

        let to_move = match parts.get(1).copied().unwrap_or("w") {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(EngineError::InvalidFen(format!("invalid side to move '{}'", other))),
        };

        Ok((board, to_move))
    }

    pub fn to_fen(&self, to_move: Color) -> String {
        let mut fen = String::with_capacity(72);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match Square::new(file, rank).and_then(|sq| self.get(sq)) {
                    Some(p) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(p.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen.push_str(if to_move == Color::White { " w" } else { " b" });
        fen.push_str(" - - 0 1");
        fen
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = Square::new(file, rank).and_then(|sq| self.get(sq)).map_or('.', |p| p.to_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

/// Mutação com escopo: guarda as duas casas tocadas por um lance e
/// repõe-nas no `drop`, incluindo saídas antecipadas e `?`.
pub struct ScopedMove<'a> {
    board: &'a mut Board,
    mv: Move,
    saved_from: Option<Piece>,
    saved_to: Option<Piece>,
}

impl ScopedMove<'_> {
    pub fn applied(&self) -> Move {
        self.mv
    }
}

impl Deref for ScopedMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        // A ordem importa se from == to.
        self.board.set(self.mv.to, self.saved_to);
        self.board.set(self.mv.from, self.saved_from);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn test_start_position() {
        let board = Board::new();
        assert_eq!(board.get(sq("e1")), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.get(sq("d8")), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(board.pieces(Color::White).count(), 16);
        assert_eq!(board.pieces(Color::Black).count(), 16);
        assert_eq!(board.find_king(Color::Black), Some(sq("e8")));
    }

    #[test]
    fn test_fen_round_trip_of_start_position() {
        let (board, color) = Board::from_fen(START_FEN).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(color, Color::White);
        assert_eq!(board.to_fen(Color::White), START_FEN);
    }

    #[test]
    fn test_fen_errors() {
        assert!(Board::from_fen("").is_err());
        assert!(Board::from_fen("8/8/8 w").is_err());
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w").is_err());
        assert!(Board::from_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/8 x").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/08 w").is_err());
        assert!(Board::from_fen("44/8/8/8/8/8/8/8 w").is_ok());

        // Dígitos em excesso não podem transbordar o contador de colunas.
        let long_row = format!("{}/8/8/8/8/8/8/8 w", "9".repeat(30));
        assert!(matches!(Board::from_fen(&long_row), Err(EngineError::InvalidFen(_))));
        let many_eights = format!("{}/8/8/8/8/8/8/8 w", "8".repeat(40));
        assert!(matches!(Board::from_fen(&many_eights), Err(EngineError::InvalidFen(_))));
    }

    #[test]
    fn test_codes_round_trip() {
        let board = Board::new();
        let codes = board.to_codes();
        assert_eq!(codes[0], [4, 2, 3, 5, 6, 3, 2, 4]);
        assert_eq!(codes[6], [-1; 8]);
        assert_eq!(Board::from_codes(codes).unwrap(), board);

        let mut bad = codes;
        bad[3][3] = 12;
        assert_eq!(Board::from_codes(bad), Err(EngineError::InvalidPieceCode(12)));
    }

    #[test]
    fn test_apply_move_captures_and_promotes() {
        let (mut board, _) = Board::from_fen("4k3/P7/8/8/8/8/8/r3K3 w").unwrap();
        board.apply_move(Move::new(sq("a7"), sq("a8")));
        assert_eq!(board.get(sq("a8")), Some(Piece::new(PieceKind::Queen, Color::White)));
        assert!(board.is_empty(sq("a7")));

        board.apply_move(Move::new(sq("e1"), sq("a1")));
        assert_eq!(board.get(sq("a1")), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.pieces(Color::Black).count(), 1);
    }

    #[test]
    fn test_scoped_move_restores_on_drop() {
        let mut board = Board::new();
        let before = board;
        {
            let mut guard = board.scoped_move(Move::new(sq("e2"), sq("e4")));
            assert!(guard.is_empty(sq("e2")));
            {
                let inner = guard.scoped_move(Move::new(sq("d7"), sq("d5")));
                assert!(inner.get(sq("d5")).is_some());
                assert_eq!(inner.applied().to_string(), "d7d5");
            }
            assert!(guard.is_empty(sq("d5")));
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_scoped_move_restores_on_early_return() {
        fn probe(board: &mut Board) -> Result<(), ()> {
            let guard = board.scoped_move(Move::new(sq("g1"), sq("f3")));
            if guard.get(sq("f3")).is_some() {
                return Err(());
            }
            Ok(())
        }

        let mut board = Board::new();
        assert!(probe(&mut board).is_err());
        assert_eq!(board, Board::new());
    }
}
