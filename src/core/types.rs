// Ficheiro: src/core/types.rs
// Descrição: Módulo para as definições de tipos de dados fundamentais do jogo.

use crate::error::{EngineError, EngineResult};
use std::fmt;

// Enum para representar a cor de uma peça ou de um jogador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Sinal usado nos códigos de peça: +1 para as brancas, -1 para as pretas.
    pub fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Direção de avanço dos peões desta cor (em ranks).
    pub fn pawn_direction(self) -> i8 {
        self.sign()
    }

    /// Rank inicial dos peões desta cor.
    pub fn pawn_home_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Última rank para os peões desta cor (onde promovem).
    pub fn last_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

// Enum para representar o tipo de uma peça de xadrez.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Valor material usado pelo avaliador.
    pub fn value(&self) -> i32 {
        match self {
            PieceKind::Pawn   => 1000,
            PieceKind::Knight => 3000,
            PieceKind::Bishop => 3000,
            PieceKind::Rook   => 5000,
            PieceKind::Queen  => 9000,
            PieceKind::King   => 99999, // Valor alto para dominar estados próximos do mate
        }
    }

    /// Magnitude do código com sinal (1 = peão ... 6 = rei).
    pub fn code(&self) -> i8 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 2,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 4,
            PieceKind::Queen => 5,
            PieceKind::King => 6,
        }
    }

    fn from_magnitude(magnitude: i8) -> Option<PieceKind> {
        match magnitude {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

// Struct para representar uma peça no tabuleiro, combinando o tipo e a cor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }

    /// Código com sinal: positivo para as brancas, negativo para as pretas.
    pub fn code(&self) -> i8 {
        self.kind.code() * self.color.sign()
    }

    /// Converte um código com sinal. Zero é uma casa vazia.
    pub fn from_code(code: i8) -> EngineResult<Option<Piece>> {
        if code == 0 {
            return Ok(None);
        }
        let color = if code > 0 { Color::White } else { Color::Black };
        let kind = PieceKind::from_magnitude(code.saturating_abs())
            .ok_or(EngineError::InvalidPieceCode(code))?;
        Ok(Some(Piece { kind, color }))
    }

    /// Letra FEN da peça (maiúscula para as brancas).
    pub fn to_char(&self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece { kind, color })
    }
}

/// Casa do tabuleiro. `file` e `rank` estão sempre em 0..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub const A1: Square = Square { file: 0, rank: 0 };

    /// Cria uma casa; devolve `None` fora do tabuleiro.
    pub fn new(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Índice 0..64, a1 = 0, h8 = 63.
    pub fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    pub fn from_index(index: usize) -> Option<Square> {
        if index < 64 {
            Some(Square { file: (index % 8) as u8, rank: (index / 8) as u8 })
        } else {
            None
        }
    }

    /// Desloca a casa; deslocamentos que saem do tabuleiro dão `None`.
    #[inline]
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square { file: file as u8, rank: rank as u8 })
        } else {
            None
        }
    }

    /// Todas as casas em ordem rank-major (a1, b1, ..., h8).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }

    pub fn from_algebraic(text: &str) -> EngineResult<Square> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return Err(EngineError::InvalidSquare(text.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).ok_or_else(|| EngineError::InvalidSquare(text.to_string()))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, (b'1' + self.rank) as char)
    }
}

/// Marca anexada a um lance depois de simulado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoveFlag {
    #[default]
    None,
    Check,
    Checkmate,
    Stalemate,
}

impl std::str::FromStr for MoveFlag {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "noflag" => Ok(MoveFlag::None),
            "check" => Ok(MoveFlag::Check),
            "checkmate" | "mate" => Ok(MoveFlag::Checkmate),
            "stalemate" => Ok(MoveFlag::Stalemate),
            _ => Err(EngineError::InvalidMove(format!("unknown flag '{}'", s))),
        }
    }
}

// Struct para representar um lance no jogo.
// Valor imutável: flag e valor são anexados uma vez, com os builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub flag: MoveFlag,
    pub value: i32,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to, flag: MoveFlag::None, value: 0 }
    }

    /// Lance nulo devolvido quando o lado a jogar não tem lances.
    pub fn null(flag: MoveFlag) -> Self {
        Move { from: Square::A1, to: Square::A1, flag, value: 0 }
    }

    /// Só o sentinela de `Move::null` (a1a1) é nulo; outros lances de uma casa para ela própria não.
    pub fn is_null(&self) -> bool {
        self.from == Square::A1 && self.to == Square::A1
    }

    pub fn with_flag(self, flag: MoveFlag) -> Self {
        Move { flag, ..self }
    }

    pub fn with_value(self, value: i32) -> Self {
        Move { value, ..self }
    }

    /// Mesmas casas de origem e destino, ignorando flag e valor.
    pub fn same_squares(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to
    }

    /// Lê a notação longa UCI ("e2e4"; um sufixo de promoção é ignorado).
    pub fn parse(text: &str) -> EngineResult<Move> {
        if text == "0000" {
            return Ok(Move::null(MoveFlag::None));
        }
        if text.len() < 4 || !text.is_ascii() {
            return Err(EngineError::InvalidMove(text.to_string()));
        }
        let from = Square::from_algebraic(&text[0..2])?;
        let to = Square::from_algebraic(&text[2..4])?;
        Ok(Move::new(from, to))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "0000")
        } else {
            write!(f, "{}{}", self.from, self.to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_codes() {
        for kind in PieceKind::ALL {
            for color in [Color::White, Color::Black] {
                let piece = Piece::new(kind, color);
                assert_eq!(Piece::from_code(piece.code()).unwrap(), Some(piece));
            }
        }
        assert_eq!(Piece::new(PieceKind::King, Color::Black).code(), -6);
        assert_eq!(Piece::from_code(0).unwrap(), None);
        assert!(matches!(Piece::from_code(7), Err(EngineError::InvalidPieceCode(7))));
        assert!(Piece::from_code(-9).is_err());
    }

    #[test]
    fn test_square_offset_stays_on_board() {
        let h8 = Square::new(7, 7).unwrap();
        assert_eq!(h8.offset(1, 0), None);
        assert_eq!(h8.offset(0, 1), None);
        assert_eq!(h8.offset(-1, -2), Square::new(6, 5));
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn test_move_notation() {
        let mv = Move::parse("e2e4").unwrap();
        assert_eq!(mv.from, Square::from_algebraic("e2").unwrap());
        assert_eq!(mv.to.to_string(), "e4");
        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(Move::null(MoveFlag::Stalemate).to_string(), "0000");
        assert!(Move::parse("z9a1").is_err());
        assert!(Move::parse("e2").is_err());
        assert!(Move::parse("0000").unwrap().is_null());
        assert!(!Move::parse("h8h8").unwrap().is_null());
    }

    #[test]
    fn test_move_builders_do_not_alias() {
        let base = Move::parse("g1f3").unwrap();
        let flagged = base.with_flag(MoveFlag::Check).with_value(42);
        assert_eq!(base.flag, MoveFlag::None);
        assert_eq!(base.value, 0);
        assert_eq!(flagged.flag, MoveFlag::Check);
        assert_eq!(flagged.value, 42);
        assert!(base.same_squares(&flagged));
    }
}
