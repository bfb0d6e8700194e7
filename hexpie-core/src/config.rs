//! Board configuration

use serde::{Deserialize, Serialize};

use crate::board::MAX_BOARD_SIZE;
use crate::error::HexError;

/// Which record decides whether a neighboring cell extends a chain
///
/// The two differ only after a pie-rule swap: the swap move is logged in the
/// history under the swapping player but never written to the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjacency {
    /// Cell contents of the board (physical stone colors)
    #[default]
    Board,
    /// `(cell, player)` pairs in the move history
    History,
}

/// Board configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Side length of the board
    pub size: u8,
    /// Whether the second move may swap (pie rule)
    pub swap_allowed: bool,
    /// Connectivity oracle
    pub adjacency: Adjacency,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: 6,
            swap_allowed: true,
            adjacency: Adjacency::Board,
        }
    }
}

impl BoardConfig {
    /// Create config for a board of the given size
    pub fn new(size: u8) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Enable or disable the pie rule
    pub fn with_swap(mut self, swap_allowed: bool) -> Self {
        self.swap_allowed = swap_allowed;
        self
    }

    /// Set the connectivity oracle
    pub fn with_adjacency(mut self, adjacency: Adjacency) -> Self {
        self.adjacency = adjacency;
        self
    }

    pub fn validate(&self) -> Result<(), HexError> {
        if self.size == 0 {
            return Err(HexError::InvalidConfiguration(
                "board size must be positive".to_string(),
            ));
        }
        if self.size > MAX_BOARD_SIZE {
            return Err(HexError::InvalidConfiguration(format!(
                "board size {} exceeds maximum {}",
                self.size, MAX_BOARD_SIZE
            )));
        }
        Ok(())
    }
}
