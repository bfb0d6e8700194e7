//! Board and tournament settings from flags or a JSON file

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use hexpie_core::{Adjacency, BoardConfig};
use hexpie_tournament::TournamentConfig;

/// Connectivity oracle, as a flag value
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum AdjacencyArg {
    /// Physical stone colors on the board
    Board,
    /// (cell, player) pairs in the move history
    History,
}

impl From<AdjacencyArg> for Adjacency {
    fn from(arg: AdjacencyArg) -> Self {
        match arg {
            AdjacencyArg::Board => Adjacency::Board,
            AdjacencyArg::History => Adjacency::History,
        }
    }
}

/// Board flags shared by every command
#[derive(Args, Clone, Debug)]
pub struct BoardArgs {
    /// Board side length
    #[arg(long, default_value = "6")]
    pub size: u8,

    /// Disable the pie-rule swap
    #[arg(long)]
    pub no_swap: bool,

    /// Which record decides chain adjacency
    #[arg(long, value_enum, default_value = "board")]
    pub adjacency: AdjacencyArg,
}

impl BoardArgs {
    pub fn to_config(&self) -> BoardConfig {
        BoardConfig::new(self.size)
            .with_swap(!self.no_swap)
            .with_adjacency(self.adjacency.into())
    }
}

/// Everything a tournament run needs, as stored on disk
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub board: BoardConfig,
    pub tournament: TournamentConfig,
}

impl RunConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_args_to_config() {
        let args = BoardArgs {
            size: 4,
            no_swap: true,
            adjacency: AdjacencyArg::History,
        };
        let config = args.to_config();
        assert_eq!(config.size, 4);
        assert!(!config.swap_allowed);
        assert_eq!(config.adjacency, Adjacency::History);
    }

    #[test]
    fn test_run_config_partial_json() {
        let config: RunConfig = serde_json::from_str(
            r#"{"board": {"size": 5}, "tournament": {"games_per_pairing": 8}}"#,
        )
        .unwrap();
        assert_eq!(config.board.size, 5);
        assert!(config.board.swap_allowed);
        assert_eq!(config.tournament.games_per_pairing, 8);
        assert_eq!(config.tournament.temperature, 1.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = RunConfig::load(Path::new("/nonexistent/hexpie.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
