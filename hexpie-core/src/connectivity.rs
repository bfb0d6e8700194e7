//! Edge-to-edge connectivity (win detection)
//!
//! Breadth-first search seeded from every stone the player has on their
//! starting edge. Seeds always come from the board; whether a neighbor extends
//! the chain is decided by the state's [`Adjacency`](crate::Adjacency) oracle.

use std::collections::VecDeque;

use crate::board::Coord;
use crate::state::{HexState, Player};

/// Has `player` connected their two target edges?
pub fn has_connection(state: &HexState, player: Player) -> bool {
    let size = state.size();
    let n = size as i8;
    let board = state.board();

    let mut visited = vec![false; size as usize * size as usize];
    let mut frontier = VecDeque::new();

    for i in 0..n {
        let start = start_cell(player, i);
        if board.get(start) == Some(player) {
            visited[start.index(size)] = true;
            frontier.push_back(start);
        }
    }

    while let Some(cell) = frontier.pop_front() {
        if on_target_edge(cell, player, n) {
            return true;
        }

        for next in cell.neighbors(size) {
            let idx = next.index(size);
            if !visited[idx] && state.links(next, player) {
                visited[idx] = true;
                frontier.push_back(next);
            }
        }
    }

    false
}

/// `i`-th cell of the player's starting edge
fn start_cell(player: Player, i: i8) -> Coord {
    match player {
        Player::One => Coord::new(0, i),
        Player::Two => Coord::new(i, 0),
    }
}

fn on_target_edge(cell: Coord, player: Player, n: i8) -> bool {
    match player {
        Player::One => cell.row == n - 1,
        Player::Two => cell.col == n - 1,
    }
}
