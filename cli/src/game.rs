use std::io::{BufRead, Write};
use sweeper_core::{Board, BoardResult, BoardState, Coord2, GameConfig};

use crate::input::Command;
use crate::render::Renderer;

/// One board at a time, replaced on restart.
pub struct Session {
    seed: Option<u64>,
    board: Board,
    announced: bool,
}

impl Session {
    /// A fixed `seed` replays the same layout on every restart, otherwise each board gets a fresh one.
    pub fn new(config: GameConfig, seed: Option<u64>) -> sweeper_core::Result<Self> {
        Ok(Self {
            seed,
            board: Self::new_board(config, seed)?,
            announced: false,
        })
    }

    fn new_board(config: GameConfig, seed: Option<u64>) -> sweeper_core::Result<Board> {
        let seed = seed.unwrap_or_else(rand::random);
        log::debug!("New {:?} board, seed: {}", config.size, seed);
        Board::with_seed(config, seed)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn restart(&mut self) -> sweeper_core::Result<()> {
        self.board = Self::new_board(self.board.config(), self.seed)?;
        self.announced = false;
        Ok(())
    }

    /// Primary action.
    pub fn reveal(&mut self, coords: Coord2) -> sweeper_core::Result<bool> {
        let outcome = self.board.open(coords)?;
        log::debug!("Reveal {:?}: {:?}", coords, outcome);
        Ok(outcome.has_update())
    }

    /// Secondary action. The first click fills the board whichever button it was.
    pub fn flag(&mut self, coords: Coord2) -> sweeper_core::Result<bool> {
        let changed = match self.board.state() {
            BoardState::Empty => self.board.fill(coords)?.has_update(),
            BoardState::Started => self.board.place_flag(coords)?.has_update(),
            BoardState::Finished => {
                self.board.validate_coords(coords)?;
                self.board.reveal_all();
                false
            }
        };
        log::debug!("Flag {:?}: changed {}", coords, changed);
        Ok(changed)
    }

    /// End-of-game message, handed out once per board.
    pub fn take_announcement(&mut self) -> Option<&'static str> {
        if self.announced || !self.board.is_finished() {
            return None;
        }
        self.announced = true;
        match self.board.result() {
            BoardResult::Won => Some("You won!!!"),
            BoardResult::Lost => Some("You lost..."),
            BoardResult::Pending => None,
        }
    }
}

/// Reads commands line by line until `quit` or end of input, redrawing after each one.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    renderer: &mut Renderer<W>,
) -> anyhow::Result<()> {
    renderer.draw(session.board())?;
    renderer.prompt()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            renderer.prompt()?;
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                log::debug!("Bad input {:?}: {}", line, err);
                renderer.message(err)?;
                renderer.usage()?;
                renderer.prompt()?;
                continue;
            }
        };

        let played = match command {
            Command::Quit => break,
            Command::Help => {
                renderer.usage()?;
                renderer.prompt()?;
                continue;
            }
            Command::Restart => session.restart().map(|()| true),
            Command::Reveal(coords) => session.reveal(coords),
            Command::Flag(coords) => session.flag(coords),
        };
        if let Err(err) = played {
            renderer.message(err)?;
        }

        renderer.draw(session.board())?;
        if let Some(announcement) = session.take_announcement() {
            renderer.message(announcement)?;
        }
        renderer.prompt()?;
    }

    Ok(())
}
