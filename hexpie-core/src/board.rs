//! Hex board geometry and cell storage
//!
//! The board is an N×N rhombus addressed by `(row, col)`. Player One owns the
//! top and bottom edges (rows 0 and N-1), Player Two owns the left and right
//! edges (columns 0 and N-1).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::Player;

/// Largest supported board side
pub const MAX_BOARD_SIZE: u8 = 26;

/// Offsets of the six hex neighbors in `(d_row, d_col)` form
/// Index: 0=up, 1=down, 2=left, 3=right, 4=down-left, 5=up-right
pub const NEIGHBOR_OFFSETS: [(i8, i8); 6] = [
    (-1, 0),  // up
    (1, 0),   // down
    (0, -1),  // left
    (0, 1),   // right
    (1, -1),  // down-left
    (-1, 1),  // up-right
];

/// A board coordinate (also the move type: a move is the cell it occupies)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this coordinate lies on a board of the given size
    pub fn is_valid(&self, size: u8) -> bool {
        let n = size as i8;
        self.row >= 0 && self.row < n && self.col >= 0 && self.col < n
    }

    /// Get neighbor in direction (0-5), possibly off the board
    pub fn neighbor(&self, direction: u8) -> Coord {
        let (dr, dc) = NEIGHBOR_OFFSETS[direction as usize % 6];
        Coord::new(self.row + dr, self.col + dc)
    }

    /// On-board neighbors for a board of the given size
    pub fn neighbors(self, size: u8) -> impl Iterator<Item = Coord> {
        (0..6u8)
            .map(move |dir| self.neighbor(dir))
            .filter(move |c| c.is_valid(size))
    }

    /// Row-major index, for flat board encodings
    pub fn index(&self, size: u8) -> usize {
        self.row as usize * size as usize + self.col as usize
    }

    /// Inverse of [`Coord::index`]
    pub fn from_index(index: usize, size: u8) -> Coord {
        let n = size as usize;
        Coord::new((index / n) as i8, (index % n) as i8)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cell contents of an N×N board
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: u8,
    cells: Vec<Option<Player>>,
}

impl Board {
    /// Empty board. The caller is responsible for the size bound.
    pub fn new(size: u8) -> Self {
        Self {
            size,
            cells: vec![None; size as usize * size as usize],
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    /// Stone at `coord`; `None` for empty or off-board cells
    pub fn get(&self, coord: Coord) -> Option<Player> {
        if !coord.is_valid(self.size) {
            return None;
        }
        self.cells[coord.index(self.size)]
    }

    pub(crate) fn set(&mut self, coord: Coord, player: Player) {
        let idx = coord.index(self.size);
        self.cells[idx] = Some(player);
    }

    /// Iterate occupied cells
    pub fn stones(&self) -> impl Iterator<Item = (Coord, Player)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|p| (Coord::from_index(i, size), p)))
    }

    /// Number of stones a player has on the board
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|c| **c == Some(player)).count()
    }

    /// Flat row-major encoding: +1 for Player One, -1 for Player Two, 0 for empty
    pub fn to_signs(&self) -> Vec<i8> {
        self.cells
            .iter()
            .map(|c| c.map_or(0, Player::sign))
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size as i8;
        for row in 0..n {
            for col in 0..n {
                let digit = match self.get(Coord::new(row, col)) {
                    None => 0,
                    Some(Player::One) => 1,
                    Some(Player::Two) => 2,
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", digit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
