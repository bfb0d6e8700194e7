//! Match and tournament errors

use hexpie_core::HexError;

/// Errors that end a game or a tournament
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("agent {agent} selected an illegal move: {source}")]
    IllegalMove { agent: String, source: HexError },

    #[error("agent {agent} returned no move")]
    NoMove { agent: String },

    #[error("no legal moves left and no winner")]
    NoLegalMoves,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Core(#[from] HexError),
}
