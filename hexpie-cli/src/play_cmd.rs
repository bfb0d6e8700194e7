//! Play command - a single rendered game between two agents

use anyhow::Result;
use clap::Args;

use hexpie_core::HexState;
use hexpie_tournament::{run_game, GameConfig, GameDisplay, GameOutcome, TextDisplay};

use crate::agents::{build_roster, AgentSpec};
use crate::settings::BoardArgs;
use crate::tournament_cmd::{create_rng, resolve_seed};

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// First agent, `random` or `ordered`, optionally `kind:name`
    #[arg(long, default_value = "random")]
    pub agent1: AgentSpec,

    /// Second agent
    #[arg(long, default_value = "ordered")]
    pub agent2: AgentSpec,

    /// Pause between rendered moves, in milliseconds
    #[arg(long, default_value = "200")]
    pub delay_ms: u64,

    /// Only print the result
    #[arg(long)]
    pub quiet: bool,
}

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let seed = resolve_seed(seed);
    let state = HexState::new(args.board.to_config())?;
    let mut roster = build_roster(&[args.agent1.clone(), args.agent2.clone()], seed);
    let mut rng = create_rng(seed);

    let config = GameConfig {
        display_delay: std::time::Duration::from_millis(args.delay_ms),
        ..Default::default()
    };

    tracing::info!(seed, size = state.size(), "starting game");

    let mut display = TextDisplay::stdout();
    let shown: Option<&mut dyn GameDisplay> = if args.quiet { None } else { Some(&mut display) };

    let (first, rest) = roster.split_at_mut(1);
    let (agent1, agent2) = (first[0].as_mut(), rest[0].as_mut());
    let outcome = run_game(agent1, agent2, state, shown, &config, &mut rng)?;

    println!("{}", describe_outcome(&outcome, agent1.name(), agent2.name()));
    Ok(())
}

fn describe_outcome(outcome: &GameOutcome, agent1: &str, agent2: &str) -> String {
    let winner = if outcome.agent1_won() { agent1 } else { agent2 };
    format!(
        "Winner: {} after {} moves{}",
        winner,
        outcome.moves.len(),
        if outcome.switched { " (swap taken)" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexpie_core::{Coord, Player};

    #[test]
    fn test_describe_outcome() {
        let outcome = GameOutcome {
            winner: Player::Two,
            physical_winner: Player::One,
            switched: true,
            moves: vec![Coord::new(0, 0); 7],
        };
        assert_eq!(
            describe_outcome(&outcome, "a", "b"),
            "Winner: b after 7 moves (swap taken)"
        );
    }
}
