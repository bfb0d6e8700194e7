//! Bounded FIFO store of training cases with uniform minibatch sampling

use std::collections::VecDeque;

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::state::{HexState, Player};

/// One training sample: a position and its targets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingCase {
    pub board: Board,
    pub player: Player,
    /// Target move distribution, row-major over the board
    pub distribution: Vec<f32>,
    /// Target value from the logical (post-swap) perspective
    pub value: f32,
}

impl TrainingCase {
    pub fn from_state(state: &HexState, distribution: Vec<f32>, value: f32) -> Self {
        Self {
            board: state.board().clone(),
            player: state.current_player(),
            distribution,
            value,
        }
    }
}

/// Fixed-capacity buffer. Pushing into a full buffer evicts the oldest case.
#[derive(Clone, Debug)]
pub struct ReplayBuffer<T> {
    cases: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> ReplayBuffer<T> {
    /// A zero capacity is bumped to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            cases: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, case: T) {
        if self.cases.len() == self.capacity {
            self.cases.pop_front();
        }
        self.cases.push_back(case);
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.cases.len() == self.capacity
    }

    pub fn clear(&mut self) {
        self.cases.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cases.iter()
    }

    /// Uniform sample without replacement; every case when `batch_size >= len`
    pub fn sample<R: Rng + ?Sized>(&self, batch_size: usize, rng: &mut R) -> Vec<T> {
        if batch_size >= self.cases.len() {
            return self.cases.iter().cloned().collect();
        }
        index::sample(rng, self.cases.len(), batch_size)
            .iter()
            .map(|i| self.cases[i].clone())
            .collect()
    }
}
