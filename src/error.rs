//! Tipos de erro do motor.
//!
//! Só os estados inválidos do tabuleiro são erros. Falta de lances e
//! fim de tempo são resultados normais da busca.

use crate::core::{Color, Square};
use thiserror::Error;

/// Erros que podem ocorrer no motor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// O rei desta cor não está no tabuleiro
    #[error("King not found for {0:?}")]
    KingNotFound(Color),

    /// Casa de origem vazia onde era esperada uma peça
    #[error("No piece at square {0}")]
    EmptySquare(Square),

    /// Código de peça fora de -6..=6
    #[error("Invalid piece code: {0}")]
    InvalidPieceCode(i8),

    #[error("Invalid square: '{0}'")]
    InvalidSquare(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Invalid FEN: {0}")]
    InvalidFen(String),
}

/// Alias de resultado para as operações do motor
pub type EngineResult<T> = Result<T, EngineError>;
