//! Tournament command - round-robin between a roster of agents
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_settings(), run_tournament(), report_results()
//! - Level 3: print_text_results(), print_json_results()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexpie_core::HexState;
use hexpie_tournament::{run_tournament, NullDisplay, TextDisplay, TournamentResult};

use crate::agents::{build_roster, AgentSpec};
use crate::settings::{BoardArgs, RunConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct TournamentArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Comma-separated roster, each `random` or `ordered`, optionally `kind:name`
    #[arg(long, value_delimiter = ',', default_value = "random,ordered")]
    pub agents: Vec<AgentSpec>,

    /// Games per pairing (even numbers alternate the first seat fairly)
    #[arg(long, default_value = "25")]
    pub games: usize,

    /// Temperature forwarded to every agent
    #[arg(long, default_value = "1.0")]
    pub temperature: f32,

    /// Render the last game of every pairing
    #[arg(long)]
    pub display: bool,

    /// Pause between rendered moves, in milliseconds
    #[arg(long, default_value = "200")]
    pub delay_ms: u64,

    /// JSON file with board and tournament settings (overrides the flags above)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run tournament command
///
/// 1. Resolve settings (flags or file)
/// 2. Build the roster and play every pairing
/// 3. Report results
pub fn run(args: TournamentArgs, seed: Option<u64>) -> Result<()> {
    let mut settings = load_settings(&args)?;
    let seed = resolve_seed(seed.or(settings.tournament.seed));
    settings.tournament.seed = Some(seed);

    let template = HexState::new(settings.board.clone())?;
    let mut roster = build_roster(&args.agents, seed);

    tracing::info!(
        "Starting tournament: {} agents, {} games per pairing, {}x{} board, seed={}",
        roster.len(),
        settings.tournament.games_per_pairing,
        settings.board.size,
        settings.board.size,
        seed
    );

    let result = if settings.tournament.display_last_game {
        let mut display = TextDisplay::stdout();
        run_tournament(&mut roster, &template, &mut display, &settings.tournament)?
    } else {
        run_tournament(&mut roster, &template, &mut NullDisplay, &settings.tournament)?
    };

    report_results(&result, &settings, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Settings from the config file if given, else from flags
fn load_settings(args: &TournamentArgs) -> Result<RunConfig> {
    if let Some(path) = &args.config {
        return RunConfig::load(path);
    }

    let mut settings = RunConfig {
        board: args.board.to_config(),
        ..Default::default()
    };
    settings.tournament.games_per_pairing = args.games;
    settings.tournament.temperature = args.temperature;
    settings.tournament.display_last_game = args.display;
    settings.tournament.display_delay_ms = args.delay_ms;
    Ok(settings)
}

/// Report tournament results
fn report_results(result: &TournamentResult, settings: &RunConfig, json: bool) -> Result<()> {
    if json {
        print_json_results(result, settings)
    } else {
        print_text_results(result, settings);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Print results as JSON
fn print_json_results(result: &TournamentResult, settings: &RunConfig) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        settings: &'a RunConfig,
        result: &'a TournamentResult,
    }

    let json = serde_json::to_string_pretty(&JsonOutput { settings, result })?;
    println!("{}", json);
    Ok(())
}

/// Print results as text
fn print_text_results(result: &TournamentResult, settings: &RunConfig) {
    let size = settings.board.size;

    println!("\n=== Tournament {}x{} ===", size, size);
    for p in &result.pairings {
        println!(
            "{} vs {}: {} - {}",
            p.first_name, p.second_name, p.first_wins, p.second_wins
        );
    }

    println!("\nWin percentages ({} games):", result.total_games);
    let width = result
        .standings
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0);
    for s in &result.standings {
        println!(
            "  {:<width$}  {:>5.1}%  {}",
            s.name,
            s.win_fraction * 100.0,
            percentage_bar(s.win_fraction),
            width = width
        );
    }

    if let Some(leader) = result.leader() {
        println!("\nLeader: {} ({} wins)", leader.name, leader.wins);
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// One `#` per 2.5%
fn percentage_bar(fraction: f32) -> String {
    let cells = (fraction.clamp(0.0, 1.0) * 40.0).round() as usize;
    "#".repeat(cells)
}

/// Use the given seed, or draw one so the run can be reproduced from the log
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Create RNG from seed
pub fn create_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> TournamentArgs {
        TournamentArgs {
            board: BoardArgs {
                size: 4,
                no_swap: false,
                adjacency: crate::settings::AdjacencyArg::Board,
            },
            agents: vec!["random".parse().unwrap(), "ordered".parse().unwrap()],
            games: 6,
            temperature: 0.5,
            display: false,
            delay_ms: 0,
            config: None,
            json: false,
        }
    }

    #[test]
    fn test_load_settings_from_flags() {
        let settings = load_settings(&args()).unwrap();
        assert_eq!(settings.board.size, 4);
        assert_eq!(settings.tournament.games_per_pairing, 6);
        assert_eq!(settings.tournament.temperature, 0.5);
        assert!(!settings.tournament.display_last_game);
    }

    #[test]
    fn test_percentage_bar() {
        assert_eq!(percentage_bar(0.0), "");
        assert_eq!(percentage_bar(0.5).len(), 20);
        assert_eq!(percentage_bar(2.0).len(), 40);
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);

        use rand::Rng;
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }

    #[test]
    fn test_resolve_seed_keeps_given() {
        assert_eq!(resolve_seed(Some(7)), 7);
    }
}
