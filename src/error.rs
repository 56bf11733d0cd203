//! Typed core errors
//!
//! Every error here is a local, recoverable condition: invalid moves are
//! rejected and reported with a reason, and nothing in the core aborts the
//! process. `GenerationExhausted` is the only kind expected to fire in
//! practice (degenerate configs with very few kinds and large blockouts);
//! generation catches it, accepts the candidate, and logs a warning.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    #[error("coordinate ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i16, y: i16 },

    #[error("cell ({x}, {y}) lies in a blockout area")]
    BlockedCell { x: u8, y: u8 },

    #[error("cell ({x}, {y}) holds no token")]
    EmptyCellMove { x: u8, y: u8 },

    #[error("a resolution pass is already in progress")]
    ReentrantResolution,

    #[error("initial generation exhausted {attempts} redraws at ({x}, {y})")]
    GenerationExhausted { x: u8, y: u8, attempts: u32 },
}
