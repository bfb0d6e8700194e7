//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use hexpie_core::{Coord, HexState, Player};
use rand::Rng;

use crate::agent::Agent;
use crate::config::GameConfig;
use crate::display::{Frame, GameDisplay};
use crate::error::MatchError;

/// Outcome of a single game
#[derive(Clone, Debug)]
pub struct GameOutcome {
    /// Logical winner: `One` means agent1 won, `Two` means agent2 won
    pub winner: Player,
    /// Color that connected its edges on the board
    pub physical_winner: Player,
    /// Whether the pie-rule swap was taken
    pub switched: bool,
    /// Every move in order, the swap included
    pub moves: Vec<Coord>,
}

impl GameOutcome {
    pub fn agent1_won(&self) -> bool {
        self.winner == Player::One
    }

    pub fn agent2_won(&self) -> bool {
        self.winner == Player::Two
    }
}

/// Does agent1 control `player` given the swap state?
pub fn is_agent1_turn(player: Player, switched: bool) -> bool {
    matches!(
        (player, switched),
        (Player::One, false) | (Player::Two, true)
    )
}

/// Play one game to completion
///
/// The opening move is random; every later move comes from whichever agent
/// controls the player to move. Illegal moves end the game with an error.
pub fn run_game<R: Rng + ?Sized>(
    agent1: &mut dyn Agent,
    agent2: &mut dyn Agent,
    initial_state: HexState,
    mut display: Option<&mut dyn GameDisplay>,
    config: &GameConfig,
    rng: &mut R,
) -> Result<GameOutcome, MatchError> {
    agent1.set_temperature(config.temperature);
    agent2.set_temperature(config.temperature);

    let mut state = initial_state;
    let mut moves = Vec::new();

    let physical_winner = loop {
        let mv = if moves.is_empty() {
            let mv = state.make_random_move(rng).ok_or(MatchError::NoLegalMoves)?;
            tracing::debug!(%mv, "random opening move");
            mv
        } else {
            play_agent_move(&mut state, agent1, agent2)?
        };
        moves.push(mv);

        let winner = state.winner();

        if let Some(display) = display.as_mut() {
            display.display_board(&Frame {
                state: &state,
                newest_move: mv,
                winner,
                agent1: agent1.name(),
                agent2: agent2.name(),
                delay: config.display_delay,
            });
        }

        if let Some(winner) = winner {
            break winner;
        }
    };

    let winner = state.eval(physical_winner);
    tracing::debug!(
        ?winner,
        ?physical_winner,
        switched = state.switched(),
        moves = moves.len(),
        "game finished"
    );

    Ok(GameOutcome {
        winner,
        physical_winner,
        switched: state.switched(),
        moves,
    })
}

/// Ask the controlling agent for a move and apply it
fn play_agent_move(
    state: &mut HexState,
    agent1: &mut dyn Agent,
    agent2: &mut dyn Agent,
) -> Result<Coord, MatchError> {
    if state.legal_moves().is_empty() {
        return Err(MatchError::NoLegalMoves);
    }

    let player = state.current_player();
    let agent: &mut dyn Agent = if is_agent1_turn(player, state.switched()) {
        agent1
    } else {
        agent2
    };

    let mv = agent
        .predict_best_move(state.board(), player, state.legal_moves())
        .ok_or_else(|| MatchError::NoMove {
            agent: agent.name().to_string(),
        })?;

    state.make_move(mv).map_err(|source| MatchError::IllegalMove {
        agent: agent.name().to_string(),
        source,
    })
}
