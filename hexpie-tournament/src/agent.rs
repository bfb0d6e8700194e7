//! Move-selection agents

use hexpie_core::{Board, Coord, Player};
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashSet;

/// Anything that can pick a move. The orchestrator only borrows agents.
pub trait Agent {
    /// Display name, also the key for tournament standings
    fn name(&self) -> &str;

    /// Pick a move for `player` from `legal_moves`
    fn predict_best_move(
        &mut self,
        board: &Board,
        player: Player,
        legal_moves: &FxHashSet<Coord>,
    ) -> Option<Coord>;

    /// Called before every game with the configured temperature
    fn set_temperature(&mut self, _temperature: f32) {}
}

/// Uniformly random over legal moves
pub struct RandomAgent {
    name: String,
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_best_move(
        &mut self,
        _board: &Board,
        _player: Player,
        legal_moves: &FxHashSet<Coord>,
    ) -> Option<Coord> {
        legal_moves.iter().copied().choose(&mut self.rng)
    }
}

/// Deterministic: the first legal cell in row-major order
pub struct OrderedAgent {
    name: String,
}

impl OrderedAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Agent for OrderedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_best_move(
        &mut self,
        _board: &Board,
        _player: Player,
        legal_moves: &FxHashSet<Coord>,
    ) -> Option<Coord> {
        legal_moves.iter().min().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexpie_core::{BoardConfig, HexState};

    #[test]
    fn test_random_agent_selects_legal_move() {
        let mut agent = RandomAgent::new("random", 5);
        let mut state = HexState::new(BoardConfig::new(4)).unwrap();
        state.make_move(Coord::new(1, 1)).unwrap();
        state.make_move(Coord::new(2, 2)).unwrap();

        for _ in 0..100 {
            let mv = agent
                .predict_best_move(state.board(), state.current_player(), state.legal_moves())
                .unwrap();
            assert!(state.legal_moves().contains(&mv));
        }
    }

    #[test]
    fn test_random_agent_empty_legal_set() {
        let mut agent = RandomAgent::new("random", 5);
        let board = Board::new(2);
        assert_eq!(
            agent.predict_best_move(&board, Player::One, &FxHashSet::default()),
            None
        );
    }

    #[test]
    fn test_ordered_agent_picks_lowest() {
        let mut agent = OrderedAgent::new("ordered");
        let legal: FxHashSet<Coord> =
            [Coord::new(2, 0), Coord::new(1, 2), Coord::new(1, 1)].into_iter().collect();
        let board = Board::new(3);
        assert_eq!(
            agent.predict_best_move(&board, Player::Two, &legal),
            Some(Coord::new(1, 1))
        );
        assert_eq!(agent.name(), "ordered");
    }
}
