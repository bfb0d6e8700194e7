//! Round-robin tournament execution
//!
//! Level 1 - Orchestration and Level 2 - Phases

use hexpie_core::HexState;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::agent::Agent;
use crate::config::{GameConfig, TournamentConfig};
use crate::display::GameDisplay;
use crate::error::MatchError;
use crate::game_runner::run_game;

/// Win split for one pairing
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PairingResult {
    /// Roster index of the first agent
    pub first: usize,
    /// Roster index of the second agent
    pub second: usize,
    pub first_name: String,
    pub second_name: String,
    pub first_wins: u32,
    pub second_wins: u32,
}

impl PairingResult {
    pub fn games_played(&self) -> u32 {
        self.first_wins + self.second_wins
    }
}

/// Standing of an agent across the whole tournament
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Standing {
    /// Index of the agent in the roster
    pub index: usize,
    pub name: String,
    pub wins: u32,
    /// Share of all tournament games won by this agent
    pub win_fraction: f32,
}

/// Result of a tournament
#[derive(Clone, Debug, Serialize)]
pub struct TournamentResult {
    /// One entry per unordered pair, in roster order
    pub pairings: Vec<PairingResult>,
    /// One entry per agent, in roster order
    pub standings: Vec<Standing>,
    pub total_games: u32,
}

impl TournamentResult {
    /// Agent with the most wins (earliest in the roster on ties)
    pub fn leader(&self) -> Option<&Standing> {
        self.standings
            .iter()
            .rev()
            .max_by_key(|s| s.wins)
    }

    /// Get standing for a specific roster index
    pub fn standing_for(&self, index: usize) -> Option<&Standing> {
        self.standings.iter().find(|s| s.index == index)
    }
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a round-robin tournament (Level 1 orchestration)
///
/// Every unordered pair of agents plays `games_per_pairing` games. The agents
/// trade the agent1 seat every other game, and every game starts from a fresh
/// clone of `template`.
pub fn run_tournament(
    agents: &mut [Box<dyn Agent>],
    template: &HexState,
    display: &mut dyn GameDisplay,
    config: &TournamentConfig,
) -> Result<TournamentResult, MatchError> {
    config.validate()?;
    if agents.len() < 2 {
        return Err(MatchError::InvalidConfiguration(format!(
            "a tournament needs at least two agents, got {}",
            agents.len()
        )));
    }

    let mut rng = create_rng(config.seed);
    let game_config = config.game_config();
    let pairings = generate_round_robin_pairings(agents.len());

    let mut results = Vec::with_capacity(pairings.len());
    for (i, j) in pairings {
        let result = play_pairing(agents, i, j, template, display, config, &game_config, &mut rng)?;

        tracing::info!(
            "{} vs {}: {} - {}",
            result.first_name,
            result.second_name,
            result.first_wins,
            result.second_wins
        );
        results.push(result);
    }

    let standings = compute_standings(agents, &results);
    let total_games = results.iter().map(PairingResult::games_played).sum();

    for s in &standings {
        tracing::info!("{}: {} wins ({:.1}%)", s.name, s.wins, s.win_fraction * 100.0);
    }

    Ok(TournamentResult {
        pairings: results,
        standings,
        total_games,
    })
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

/// Play every game of one pairing
#[allow(clippy::too_many_arguments)]
fn play_pairing(
    agents: &mut [Box<dyn Agent>],
    i: usize,
    j: usize,
    template: &HexState,
    display: &mut dyn GameDisplay,
    config: &TournamentConfig,
    game_config: &GameConfig,
    rng: &mut ChaCha8Rng,
) -> Result<PairingResult, MatchError> {
    let (first, second) = pair_mut(agents, i, j);
    let mut first_wins = 0;
    let mut second_wins = 0;

    for game in 0..config.games_per_pairing {
        let shown: Option<&mut dyn GameDisplay> =
            if config.display_last_game && game + 1 == config.games_per_pairing {
                Some(&mut *display)
            } else {
                None
            };

        // Alternate seats so the first-move advantage cancels out
        let first_is_agent1 = game % 2 == 0;
        let outcome = if first_is_agent1 {
            run_game(first.as_mut(), second.as_mut(), template.clone(), shown, game_config, rng)?
        } else {
            run_game(second.as_mut(), first.as_mut(), template.clone(), shown, game_config, rng)?
        };

        if outcome.agent1_won() == first_is_agent1 {
            first_wins += 1;
        } else {
            second_wins += 1;
        }
    }

    Ok(PairingResult {
        first: i,
        second: j,
        first_name: first.name().to_string(),
        second_name: second.name().to_string(),
        first_wins,
        second_wins,
    })
}

/// Total wins and win fraction per agent
fn compute_standings(agents: &[Box<dyn Agent>], results: &[PairingResult]) -> Vec<Standing> {
    let mut wins = vec![0u32; agents.len()];
    for r in results {
        wins[r.first] += r.first_wins;
        wins[r.second] += r.second_wins;
    }

    let total: u32 = wins.iter().sum();
    agents
        .iter()
        .enumerate()
        .map(|(index, agent)| Standing {
            index,
            name: agent.name().to_string(),
            wins: wins[index],
            win_fraction: if total == 0 {
                0.0
            } else {
                wins[index] as f32 / total as f32
            },
        })
        .collect()
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Generate all pairings for round-robin
fn generate_round_robin_pairings(n: usize) -> Vec<(usize, usize)> {
    let mut pairings = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            pairings.push((i, j));
        }
    }
    pairings
}

/// Two distinct mutable elements, `i < j`
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    let (left, right) = items.split_at_mut(j);
    (&mut left[i], &mut right[0])
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
