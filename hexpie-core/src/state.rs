//! Game state, legal-move bookkeeping and the pie rule

use rand::seq::IteratorRandom;
use rand::Rng;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord};
use crate::config::{Adjacency, BoardConfig};
use crate::connectivity::has_connection;
use crate::error::HexError;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player identity. One connects top to bottom, Two connects left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Signed encoding: +1 for One, -1 for Two
    pub fn sign(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    pub fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Player::One),
            -1 => Some(Player::Two),
            _ => None,
        }
    }
}

/// A successor state reachable by one legal move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildState {
    pub board: Board,
    pub next_player: Player,
    pub mv: Coord,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Authoritative Hex game state (clone for an independent copy)
#[derive(Clone, Debug)]
pub struct HexState {
    config: BoardConfig,

    /// Physical stone colors
    board: Board,

    /// Cells still available for play
    legal_moves: FxHashSet<Coord>,

    /// Every cell ever played, including a swap
    moves_made: FxHashSet<Coord>,

    /// Ordered `(move, player)` log, including a swap
    history: Vec<(Coord, Player)>,

    /// Same pairs as `history`, for constant-time adjacency lookups
    history_index: FxHashSet<(Coord, Player)>,

    current_player: Player,

    /// Set once the pie-rule swap has been taken
    switched: bool,
}

impl HexState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create an empty game
    pub fn new(config: BoardConfig) -> Result<Self, HexError> {
        config.validate()?;
        let size = config.size;
        Ok(Self {
            board: Board::new(size),
            legal_moves: all_cells(size),
            moves_made: FxHashSet::default(),
            history: Vec::new(),
            history_index: FxHashSet::default(),
            current_player: Player::One,
            switched: false,
            config,
        })
    }

    /// Reinitialize to an empty board of the same size and rules
    pub fn reset(&mut self) {
        let size = self.config.size;
        self.board = Board::new(size);
        self.legal_moves = all_cells(size);
        self.moves_made.clear();
        self.history.clear();
        self.history_index.clear();
        self.current_player = Player::One;
        self.switched = false;
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn size(&self) -> u8 {
        self.config.size
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn legal_moves(&self) -> &FxHashSet<Coord> {
        &self.legal_moves
    }

    pub fn moves_made(&self) -> &FxHashSet<Coord> {
        &self.moves_made
    }

    pub fn history(&self) -> &[(Coord, Player)] {
        &self.history
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn switched(&self) -> bool {
        self.switched
    }

    /// True while the second player may still answer with a swap
    pub fn swap_available(&self) -> bool {
        self.config.swap_allowed && self.history.len() == 1
    }

    /// Shape of a move distribution over this board
    pub fn distribution_shape(&self) -> (usize, usize) {
        let n = self.config.size as usize;
        (n, n)
    }

    /// All-zero distribution, row-major (see [`Coord::index`])
    pub fn empty_distribution(&self) -> Vec<f32> {
        let (rows, cols) = self.distribution_shape();
        vec![0.0; rows * cols]
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Play `mv` for the player to move
    pub fn make_move(&mut self, mv: Coord) -> Result<Coord, HexError> {
        self.make_move_as(mv, self.current_player)
    }

    /// Play `mv` for `player`
    pub fn make_move_as(&mut self, mv: Coord, player: Player) -> Result<Coord, HexError> {
        if !self.legal_moves.contains(&mv) {
            return Err(HexError::IllegalMove { mv });
        }
        self.apply_legal(mv, player);
        Ok(mv)
    }

    /// Play a uniformly chosen legal move for the player to move
    pub fn make_random_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Coord> {
        self.make_random_move_as(self.current_player, rng)
    }

    /// Play a uniformly chosen legal move for `player`; `None` when the board is full
    pub fn make_random_move_as<R: Rng + ?Sized>(
        &mut self,
        player: Player,
        rng: &mut R,
    ) -> Option<Coord> {
        let mv = self.legal_moves.iter().copied().choose(rng)?;
        self.apply_legal(mv, player);
        Some(mv)
    }

    /// `mv` must already be in the legal-move set
    fn apply_legal(&mut self, mv: Coord, player: Player) {
        let is_swap = match self.history.len() {
            0 => {
                // With the pie rule on, the opening cell stays selectable for the swap
                if !self.config.swap_allowed {
                    self.legal_moves.remove(&mv);
                }
                false
            }
            1 if self.config.swap_allowed => {
                if self.moves_made.contains(&mv) {
                    self.legal_moves.remove(&mv);
                    true
                } else {
                    // Swap declined: the opening cell is no longer selectable
                    for made in &self.moves_made {
                        self.legal_moves.remove(made);
                    }
                    self.legal_moves.remove(&mv);
                    false
                }
            }
            _ => {
                self.legal_moves.remove(&mv);
                false
            }
        };

        self.moves_made.insert(mv);
        self.history.push((mv, player));
        self.history_index.insert((mv, player));

        if is_swap {
            // Board and turn stay as they were after the opening move
            self.switched = true;
            tracing::debug!(?player, %mv, "pie-rule swap taken");
        } else {
            self.board.set(mv, player);
            self.current_player = player.opponent();
        }
    }

    // ========================================================================
    // CHILD STATES
    // ========================================================================

    /// Successors for the player to move, one per legal move
    pub fn child_states(&self) -> impl Iterator<Item = ChildState> + '_ {
        self.child_states_as(self.current_player)
    }

    /// Successors for `player`. The original state is never mutated.
    pub fn child_states_as(&self, player: Player) -> impl Iterator<Item = ChildState> + '_ {
        self.legal_moves
            .iter()
            .map(move |&mv| self.child(mv, player))
    }

    /// Same as [`HexState::child_states`], expanded on the rayon pool
    pub fn par_child_states(&self) -> Vec<ChildState> {
        let player = self.current_player;
        let moves: Vec<Coord> = self.legal_moves.iter().copied().collect();
        moves
            .into_par_iter()
            .map(|mv| self.child(mv, player))
            .collect()
    }

    fn child(&self, mv: Coord, player: Player) -> ChildState {
        let mut next = self.clone();
        next.apply_legal(mv, player);
        ChildState {
            board: next.board,
            next_player: next.current_player,
            mv,
        }
    }

    // ========================================================================
    // TERMINAL DETECTION
    // ========================================================================

    /// Has `player` connected their two edges?
    pub fn is_won_by(&self, player: Player) -> bool {
        has_connection(self, player)
    }

    /// Has either player connected their edges?
    pub fn is_terminal(&self) -> bool {
        self.is_won_by(Player::One) || self.is_won_by(Player::Two)
    }

    /// Physical winner, if any. One is checked first.
    pub fn winner(&self) -> Option<Player> {
        [Player::One, Player::Two]
            .into_iter()
            .find(|&p| self.is_won_by(p))
    }

    /// Legal moves that win on the spot for the player to move
    pub fn winning_moves(&self) -> Option<FxHashSet<Coord>> {
        self.winning_moves_as(self.current_player)
    }

    /// Legal moves that win on the spot for `player`; `None` if there are none
    pub fn winning_moves_as(&self, player: Player) -> Option<FxHashSet<Coord>> {
        let winners: FxHashSet<Coord> = self
            .legal_moves
            .iter()
            .copied()
            .filter(|&mv| {
                let mut next = self.clone();
                next.apply_legal(mv, player);
                next.is_won_by(player)
            })
            .collect();

        if winners.is_empty() {
            None
        } else {
            Some(winners)
        }
    }

    /// Map a physical winner to the logical one: inverted after a swap
    pub fn eval(&self, winner: Player) -> Player {
        if self.switched {
            winner.opponent()
        } else {
            winner
        }
    }

    /// Does `coord` extend a chain for `player` under the configured oracle?
    pub(crate) fn links(&self, coord: Coord, player: Player) -> bool {
        match self.config.adjacency {
            Adjacency::Board => self.board.get(coord) == Some(player),
            Adjacency::History => self.history_index.contains(&(coord, player)),
        }
    }
}

fn all_cells(size: u8) -> FxHashSet<Coord> {
    let n = size as i8;
    (0..n)
        .flat_map(|row| (0..n).map(move |col| Coord::new(row, col)))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn game(size: u8, swap_allowed: bool) -> HexState {
        HexState::new(BoardConfig::new(size).with_swap(swap_allowed)).unwrap()
    }

    fn disjoint(state: &HexState) -> bool {
        state.legal_moves().is_disjoint(state.moves_made())
    }

    #[test]
    fn test_game_creation() {
        let state = game(3, true);
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.legal_moves().len(), 9);
        assert!(state.moves_made().is_empty());
        assert!(state.history().is_empty());
        assert!(!state.switched());
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_invalid_size() {
        let err = HexState::new(BoardConfig::new(0)).unwrap_err();
        assert!(matches!(err, HexError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_make_move_flips_player() {
        let mut state = game(3, false);
        let mv = state.make_move(Coord::new(1, 1)).unwrap();
        assert_eq!(mv, Coord::new(1, 1));
        assert_eq!(state.board().get(mv), Some(Player::One));
        assert_eq!(state.current_player(), Player::Two);
        assert_eq!(state.history(), &[(mv, Player::One)]);
        assert!(!state.legal_moves().contains(&mv));
    }

    #[test]
    fn test_repeat_move_without_swap_is_illegal() {
        let mut state = game(3, false);
        state.make_move(Coord::new(1, 1)).unwrap();
        let err = state.make_move(Coord::new(1, 1)).unwrap_err();
        assert!(matches!(err, HexError::IllegalMove { mv } if mv == Coord::new(1, 1)));
    }

    #[test]
    fn test_illegal_move_leaves_state_unchanged() {
        let mut state = game(3, true);
        state.make_move(Coord::new(0, 1)).unwrap();
        state.make_move(Coord::new(2, 2)).unwrap();
        let before = state.clone();

        assert!(state.make_move(Coord::new(2, 2)).is_err());
        assert!(state.make_move(Coord::new(5, 5)).is_err());

        assert_eq!(state.board(), before.board());
        assert_eq!(state.legal_moves(), before.legal_moves());
        assert_eq!(state.history(), before.history());
        assert_eq!(state.current_player(), before.current_player());
    }

    #[test]
    fn test_swap_keeps_board_and_turn() {
        let mut state = game(3, true);
        state.make_move(Coord::new(0, 0)).unwrap();
        let board_after_first = state.board().clone();
        let player_after_first = state.current_player();
        assert!(state.swap_available());
        assert!(state.legal_moves().contains(&Coord::new(0, 0)));

        state.make_move(Coord::new(0, 0)).unwrap();

        assert!(state.switched());
        assert_eq!(state.board(), &board_after_first);
        assert_eq!(state.board().get(Coord::new(0, 0)), Some(Player::One));
        assert_eq!(state.current_player(), player_after_first);
        assert!(!state.legal_moves().contains(&Coord::new(0, 0)));
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.history()[1], (Coord::new(0, 0), Player::Two));
        assert!(disjoint(&state));
    }

    #[test]
    fn test_declined_swap_removes_opening_cell() {
        let mut state = game(3, true);
        state.make_move(Coord::new(0, 0)).unwrap();
        state.make_move(Coord::new(2, 2)).unwrap();

        assert!(!state.switched());
        assert!(!state.swap_available());
        assert!(!state.legal_moves().contains(&Coord::new(0, 0)));
        assert!(!state.legal_moves().contains(&Coord::new(2, 2)));
        assert_eq!(state.legal_moves().len(), 7);
        assert!(disjoint(&state));
        assert!(state.make_move(Coord::new(0, 0)).is_err());
    }

    #[test]
    fn test_legal_and_made_stay_disjoint() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for size in 2..=6u8 {
            for swap in [false, true] {
                let mut state = game(size, swap);
                while state.make_random_move(&mut rng).is_some() {
                    if !state.swap_available() {
                        assert!(disjoint(&state));
                    }
                    let covered = state.legal_moves().len() + state.moves_made().len();
                    if !state.swap_available() && !state.switched() {
                        assert_eq!(covered, size as usize * size as usize);
                    }
                }
                assert!(state.legal_moves().is_empty());
            }
        }
    }

    #[test]
    fn test_copy_is_independent() {
        let mut original = game(4, true);
        original.make_move(Coord::new(1, 1)).unwrap();
        let snapshot = original.clone();

        let mut copy = original.clone();
        copy.make_move(Coord::new(2, 2)).unwrap();
        copy.make_move(Coord::new(3, 3)).unwrap();

        assert_eq!(original.board(), snapshot.board());
        assert_eq!(original.history(), snapshot.history());
        assert_eq!(original.legal_moves(), snapshot.legal_moves());
        assert_ne!(copy.board(), original.board());
    }

    #[test]
    fn test_random_move_on_full_board() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut state = game(2, false);
        for _ in 0..4 {
            assert!(state.make_random_move(&mut rng).is_some());
        }
        assert_eq!(state.make_random_move(&mut rng), None);
    }

    #[test]
    fn test_random_move_is_legal_and_seeded() {
        let mut a = game(5, true);
        let mut b = game(5, true);
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10 {
            let legal = a.legal_moves().clone();
            let mv = a.make_random_move(&mut rng_a).unwrap();
            assert!(legal.contains(&mv));
            assert_eq!(b.make_random_move(&mut rng_b), Some(mv));
        }
    }

    #[test]
    fn test_child_states_do_not_mutate() {
        let mut state = game(3, true);
        state.make_move(Coord::new(1, 1)).unwrap();
        let before = state.clone();

        let children: Vec<_> = state.child_states().collect();
        assert_eq!(children.len(), state.legal_moves().len());
        assert_eq!(state.board(), before.board());
        assert_eq!(state.history(), before.history());

        // The swap child keeps the opening board and the mover
        let swap = children.iter().find(|c| c.mv == Coord::new(1, 1)).unwrap();
        assert_eq!(&swap.board, state.board());
        assert_eq!(swap.next_player, Player::Two);

        let other = children.iter().find(|c| c.mv == Coord::new(0, 0)).unwrap();
        assert_eq!(other.board.get(Coord::new(0, 0)), Some(Player::Two));
        assert_eq!(other.next_player, Player::One);

        // Restartable
        assert_eq!(state.child_states().count(), children.len());
    }

    #[test]
    fn test_par_child_states_match_sequential() {
        let mut state = game(4, false);
        state.make_move(Coord::new(0, 3)).unwrap();
        let mut seq: Vec<_> = state.child_states().map(|c| c.mv).collect();
        let mut par: Vec<_> = state.par_child_states().into_iter().map(|c| c.mv).collect();
        seq.sort();
        par.sort();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_winning_moves() {
        let mut state = game(3, false);
        assert_eq!(state.winning_moves(), None);

        state.make_move_as(Coord::new(0, 0), Player::One).unwrap();
        state.make_move_as(Coord::new(1, 0), Player::One).unwrap();

        // (1,0) touches row 2 only at (2,0); its down-left neighbor is off board
        let wins = state.winning_moves_as(Player::One).unwrap();
        assert_eq!(wins.len(), 1);
        assert!(wins.contains(&Coord::new(2, 0)));
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_eval() {
        let mut state = game(3, true);
        assert_eq!(state.eval(Player::One), Player::One);
        assert_eq!(state.eval(Player::Two), Player::Two);

        state.make_move(Coord::new(2, 1)).unwrap();
        state.make_move(Coord::new(2, 1)).unwrap();
        assert!(state.switched());
        assert_eq!(state.eval(Player::One), Player::Two);
        assert_eq!(state.eval(Player::Two), Player::One);
    }

    #[test]
    fn test_reset() {
        let mut state = game(3, true);
        state.make_move(Coord::new(0, 0)).unwrap();
        state.make_move(Coord::new(0, 0)).unwrap();
        state.reset();

        assert_eq!(state.size(), 3);
        assert!(!state.switched());
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.legal_moves().len(), 9);
        assert!(state.history().is_empty());
        assert_eq!(state.board(), &Board::new(3));
    }

    #[test]
    fn test_player_signs() {
        assert_eq!(Player::One.sign(), 1);
        assert_eq!(Player::Two.sign(), -1);
        assert_eq!(Player::from_sign(-1), Some(Player::Two));
        assert_eq!(Player::from_sign(0), None);
        assert_eq!(Player::One.opponent(), Player::Two);
    }

    #[test]
    fn test_empty_distribution() {
        let state = game(4, true);
        assert_eq!(state.distribution_shape(), (4, 4));
        assert_eq!(state.empty_distribution().len(), 16);
    }
}
