//! HEXPIE Tournament - Match orchestration between move-selection agents
//!
//! This crate provides tournament infrastructure:
//! - The agent and display capabilities consumed by the orchestrator
//! - Single games with a random opening and pie-rule-aware turn order
//! - Round-robin tournaments with seat alternation and win tallies
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_tournament (orchestration)
//! - Level 2: play_pairing, compute_standings (phases)
//! - Level 3: run_game (steps)
//! - Level 4: utilities, configuration

mod agent;
mod config;
mod display;
mod error;
mod game_runner;
mod tournament;

pub use agent::{Agent, OrderedAgent, RandomAgent};
pub use config::{GameConfig, TournamentConfig};
pub use display::{Frame, GameDisplay, NullDisplay, TextDisplay};
pub use error::MatchError;
pub use game_runner::{is_agent1_turn, run_game, GameOutcome};
pub use tournament::{run_tournament, PairingResult, Standing, TournamentResult};
