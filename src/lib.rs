// Torre - Motor de xadrez minimax com poda alfa-beta

pub mod core;
pub mod engine;
pub mod error;
pub mod moves;
pub mod search;
pub mod validation;

pub use self::core::*;
pub use error::*;
