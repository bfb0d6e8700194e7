//! Configuration types for tournament play
//!
//! Level 4 - Utilities and configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MatchError;

/// Settings for a single game
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    /// Forwarded to both agents before the game starts
    pub temperature: f32,
    /// Pause after each rendered frame
    pub display_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            display_delay: Duration::from_millis(200),
        }
    }
}

/// Tournament configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Games per pairing (should be even for first-move alternation)
    pub games_per_pairing: usize,
    /// Agent temperature for every game
    pub temperature: f32,
    /// Render the last game of every pairing
    pub display_last_game: bool,
    /// Pause between rendered moves, in milliseconds
    pub display_delay_ms: u64,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            games_per_pairing: 25,
            temperature: 1.0,
            display_last_game: false,
            display_delay_ms: 200,
            seed: None,
        }
    }
}

impl TournamentConfig {
    /// Create config with the given number of games per pairing
    pub fn new(games_per_pairing: usize) -> Self {
        Self {
            games_per_pairing,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set agent temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Render the last game of each pairing
    pub fn with_display(mut self, delay_ms: u64) -> Self {
        self.display_last_game = true;
        self.display_delay_ms = delay_ms;
        self
    }

    /// Per-game settings derived from this config
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            temperature: self.temperature,
            display_delay: Duration::from_millis(self.display_delay_ms),
        }
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.games_per_pairing == 0 {
            return Err(MatchError::InvalidConfiguration(
                "games_per_pairing must be positive".to_string(),
            ));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(MatchError::InvalidConfiguration(format!(
                "temperature must be a non-negative number, got {}",
                self.temperature
            )));
        }
        if self.games_per_pairing % 2 == 1 {
            tracing::warn!(
                games = self.games_per_pairing,
                "odd games per pairing: first-move advantage does not cancel"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tournament_config_defaults() {
        let config = TournamentConfig::default();
        assert_eq!(config.games_per_pairing, 25);
        assert_eq!(config.temperature, 1.0);
        assert!(!config.display_last_game);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_tournament_config_builders() {
        let config = TournamentConfig::new(4)
            .with_seed(9)
            .with_temperature(0.5)
            .with_display(0);
        assert_eq!(config.games_per_pairing, 4);
        assert_eq!(config.seed, Some(9));
        assert!(config.display_last_game);

        let game = config.game_config();
        assert_eq!(game.temperature, 0.5);
        assert_eq!(game.display_delay, Duration::ZERO);
    }

    #[test]
    fn test_validate() {
        assert!(TournamentConfig::new(2).validate().is_ok());
        assert!(TournamentConfig::new(3).validate().is_ok());
        assert!(TournamentConfig::new(0).validate().is_err());
        assert!(TournamentConfig::new(2)
            .with_temperature(f32::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: TournamentConfig =
            serde_json::from_str(r#"{"games_per_pairing": 6, "seed": 1}"#).unwrap();
        assert_eq!(config.games_per_pairing, 6);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.display_delay_ms, 200);
    }
}
