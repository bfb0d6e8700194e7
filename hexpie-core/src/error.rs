//! Engine error types

use crate::board::Coord;

/// Errors raised by the game engine
#[derive(Debug, thiserror::Error)]
pub enum HexError {
    /// The requested cell is not in the current legal-move set
    #[error("illegal move {mv}")]
    IllegalMove { mv: Coord },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
