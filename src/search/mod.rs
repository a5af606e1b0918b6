pub mod alphabeta;
pub mod clock;
pub mod evaluation;
pub mod recorder;

pub use alphabeta::*;
pub use clock::*;
pub use recorder::*;
