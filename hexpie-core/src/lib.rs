//! HEXPIE Core - Hex game engine
//!
//! This crate provides the core game logic for HEXPIE:
//! - Board geometry (N×N rhombus, six-neighbor adjacency)
//! - Game state with legal-move bookkeeping and the pie rule
//! - Edge-to-edge connectivity (win detection)
//! - Child-state enumeration for external search or training
//! - Bounded replay buffer for training samples

pub mod board;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod replay;
pub mod state;

// Re-exports for convenient access
pub use board::{Board, Coord, MAX_BOARD_SIZE, NEIGHBOR_OFFSETS};
pub use config::{Adjacency, BoardConfig};
pub use connectivity::has_connection;
pub use error::HexError;
pub use replay::{ReplayBuffer, TrainingCase};
pub use state::{ChildState, HexState, Player};
