//! Board rendering during play
//!
//! Displays are observers: they see every position but cannot affect the game.

use std::io::{self, Write};
use std::time::Duration;

use hexpie_core::{Coord, HexState, Player};

/// Everything a display gets after a move
pub struct Frame<'a> {
    pub state: &'a HexState,
    pub newest_move: Coord,
    /// Physical winner, once the game is decided
    pub winner: Option<Player>,
    pub agent1: &'a str,
    pub agent2: &'a str,
    pub delay: Duration,
}

impl Frame<'_> {
    /// Name of the agent currently holding `color` on the board
    pub fn owner_of(&self, color: Player) -> &str {
        let agent1_color = if self.state.switched() {
            Player::Two
        } else {
            Player::One
        };
        if color == agent1_color {
            self.agent1
        } else {
            self.agent2
        }
    }
}

/// Display capability
pub trait GameDisplay {
    fn display_board(&mut self, frame: &Frame<'_>);
}

/// Discards every frame
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDisplay;

impl GameDisplay for NullDisplay {
    fn display_board(&mut self, _frame: &Frame<'_>) {}
}

/// Plain-text renderer. The board is drawn as a rhombus, each row shifted
/// right by one column; the newest stone is uppercase.
pub struct TextDisplay<W: Write> {
    out: W,
    sleep: bool,
}

impl TextDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out, sleep: true }
    }

    /// Ignore frame delays (for tests and piped output)
    pub fn without_delay(mut self) -> Self {
        self.sleep = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let state = frame.state;
        let n = state.size() as i8;

        writeln!(
            self.out,
            "{} (X, top-bottom) vs {} (O, left-right)",
            frame.owner_of(Player::One),
            frame.owner_of(Player::Two)
        )?;

        for row in 0..n {
            let mut line = " ".repeat(row as usize);
            for col in 0..n {
                let coord = Coord::new(row, col);
                let glyph = match state.board().get(coord) {
                    None => '.',
                    Some(Player::One) => 'x',
                    Some(Player::Two) => 'o',
                };
                if col > 0 {
                    line.push(' ');
                }
                if coord == frame.newest_move {
                    line.push(glyph.to_ascii_uppercase());
                } else {
                    line.push(glyph);
                }
            }
            writeln!(self.out, "{}", line.trim_end())?;
        }

        if state.switched() && state.history().len() == 2 {
            writeln!(self.out, "Swap: {} takes the opening stone", frame.owner_of(Player::One))?;
        }

        if let Some(winner) = frame.winner {
            let glyph = match winner {
                Player::One => 'X',
                Player::Two => 'O',
            };
            writeln!(self.out, "Winner: {} ({})", frame.owner_of(winner), glyph)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> GameDisplay for TextDisplay<W> {
    fn display_board(&mut self, frame: &Frame<'_>) {
        if let Err(err) = self.render(frame) {
            tracing::warn!(%err, "failed to render board");
        }
        if self.sleep && !frame.delay.is_zero() {
            std::thread::sleep(frame.delay);
        }
    }
}
