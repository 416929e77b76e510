use std::io::{self, Write};
use sweeper_core::{Board, BoardResult, BoardState};

use crate::theme::Theme;

pub const USAGE: &str = "\
commands:
  r ROW COL   reveal a cell (or chord a revealed one)
  f ROW COL   toggle a flag
  n           new game
  h           this help
  q           quit";

/// Owns the output sink and the glyphs, everything the game loop needs to draw.
pub struct Renderer<W: Write> {
    out: W,
    theme: Theme,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self { out, theme }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn draw(&mut self, board: &Board) -> io::Result<()> {
        let (rows, columns) = board.size();
        let width = (columns.max(rows) - 1).to_string().len() + 1;

        write!(self.out, "{:>width$}", "")?;
        for col in 0..columns {
            write!(self.out, "{col:>width$}")?;
        }
        writeln!(self.out)?;

        for row in 0..rows {
            write!(self.out, "{row:>width$}")?;
            for col in 0..columns {
                let view = board
                    .view((row, col))
                    .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
                write!(self.out, "{:>width$}", self.theme.glyph(view))?;
            }
            writeln!(self.out)?;
        }

        let status = match (board.state(), board.result()) {
            (BoardState::Empty, _) => "pick a cell to start",
            (BoardState::Started, _) => "playing",
            (BoardState::Finished, BoardResult::Won) => "won",
            (BoardState::Finished, _) => "lost",
        };
        writeln!(
            self.out,
            "mines left: {}  flags: {}/{}  [{}]",
            board.mines_left(),
            board.flags_count(),
            board.mines_count(),
            status
        )
    }

    pub fn message(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{message}")
    }

    pub fn usage(&mut self) -> io::Result<()> {
        self.message(USAGE)
    }

    pub fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{GameConfig, MineLayout};

    fn render(board: &Board) -> String {
        let mut renderer = Renderer::new(Vec::new(), Theme::ASCII);
        renderer.draw(board).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn draws_hidden_board_with_indices() {
        let board = Board::new(2, 3, 0.0).unwrap();

        assert_eq!(
            render(&board),
            "   0 1 2\n 0 # # #\n 1 # # #\nmines left: 0  flags: 0/0  [pick a cell to start]\n"
        );
    }

    #[test]
    fn draws_revealed_cells_and_flags() {
        let config = GameConfig::new((3, 3), 0.25).unwrap();
        let mut board = Board::from_config(config).unwrap();
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();
        board.fill_with((0, 2), layout).unwrap();
        board.place_flag((0, 0)).unwrap();

        assert_eq!(
            render(&board),
            "   0 1 2\n 0 F 1 .\n 1 # 2 1\n 2 # # #\nmines left: 1  flags: 1/2  [playing]\n"
        );
    }
}
