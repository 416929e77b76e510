use alloc::collections::VecDeque;
use alloc::vec;
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Empty -> Started, when the board is filled
/// - Started -> Finished, when a mine goes off or the board is cleared
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    /// No mines placed yet
    Empty,
    Started,
    /// Terminal, a new board is needed to play again
    Finished,
}

impl BoardState {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::Empty
    }
}

/// Only meaningful once the board is [`BoardState::Finished`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardResult {
    Pending,
    Won,
    Lost,
}

impl Default for BoardResult {
    fn default() -> Self {
        Self::Pending
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardFields")]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    mines_count: CellCount,
    flags_count: CellCount,
    state: BoardState,
    result: BoardResult,
    seed: u64,
    triggered_mine: Option<Coord2>,
}

/// Deserialized form of a [`Board`], checked before indexing relies on it.
#[derive(Deserialize)]
struct BoardFields {
    config: GameConfig,
    cells: Array2<Cell>,
    mines_count: CellCount,
    flags_count: CellCount,
    state: BoardState,
    result: BoardResult,
    seed: u64,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<BoardFields> for Board {
    type Error = GameError;

    fn try_from(fields: BoardFields) -> Result<Self> {
        let config = GameConfig::new(fields.config.size, fields.config.mine_density)?;
        let flags = fields.cells.iter().filter(|cell| cell.flagged).count();
        let triggered_in_bounds = fields
            .triggered_mine
            .is_none_or(|(row, col)| row < config.rows() && col < config.columns());

        if fields.cells.dim() != (usize::from(config.rows()), usize::from(config.columns()))
            || fields.mines_count != config.mine_count()
            || usize::from(fields.flags_count) != flags
            || fields.flags_count > fields.mines_count
            || !triggered_in_bounds
        {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self {
            config,
            cells: fields.cells,
            mines_count: fields.mines_count,
            flags_count: fields.flags_count,
            state: fields.state,
            result: fields.result,
            seed: fields.seed,
            triggered_mine: fields.triggered_mine,
        })
    }
}

impl Board {
    pub const DEFAULT_SEED: u64 = 0;

    pub fn new(rows: Coord, columns: Coord, mine_density: f64) -> Result<Self> {
        Self::from_config(GameConfig::new((rows, columns), mine_density)?)
    }

    pub fn from_config(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, Self::DEFAULT_SEED)
    }

    /// The seed decides where [`Board::fill`] puts the mines.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mine_density)?;
        Ok(Self {
            config,
            cells: Array2::default(config.size.to_nd_index()),
            mines_count: config.mine_count(),
            flags_count: 0,
            state: Default::default(),
            result: Default::default(),
            seed,
            triggered_mine: None,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn columns(&self) -> Coord {
        self.config.columns()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn result(&self) -> BoardResult {
        self.result
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn mines_count(&self) -> CellCount {
        self.mines_count
    }

    pub fn flags_count(&self) -> CellCount {
        self.flags_count
    }

    pub fn mines_left(&self) -> isize {
        (self.mines_count as isize) - (self.flags_count as isize)
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    /// All cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, columns) = self.size();
        if coords.0 < rows && coords.1 < columns {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// How the cell should be drawn in the current state of the game.
    pub fn view(&self, coords: Coord2) -> Result<CellView> {
        let cell = self.cell(coords)?;

        Ok(if cell.flagged {
            if self.state.is_finished() && !cell.is_mine {
                CellView::WrongFlag
            } else {
                CellView::Flagged
            }
        } else if cell.revealed && cell.is_mine {
            if cell.exploded {
                CellView::Exploded
            } else {
                CellView::Mine
            }
        } else if cell.revealed {
            CellView::Number(cell.value.unsigned_abs())
        } else {
            CellView::Hidden
        })
    }

    /// Primary action: fills an empty board, reveals on a started one, and uncovers everything once finished.
    pub fn open(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        match self.state {
            BoardState::Empty => self.fill(coords),
            BoardState::Started => self.reveal_cell(coords),
            BoardState::Finished => {
                self.reveal_all();
                Ok(RevealOutcome::NoChange)
            }
        }
    }

    /// Places the mines around `start` using the board's seed, then reveals `start`.
    pub fn fill(&mut self, start: Coord2) -> Result<RevealOutcome> {
        self.fill_with(start, RandomMineGenerator::new(self.seed))
    }

    pub fn fill_with(
        &mut self,
        start: Coord2,
        generator: impl MineGenerator,
    ) -> Result<RevealOutcome> {
        let start = self.validate_coords(start)?;
        if !self.state.is_empty() {
            return Err(GameError::AlreadyFilled);
        }

        let layout = generator.generate(&self.config, start);
        if layout.size() != self.size()
            || layout.mine_count() != self.mines_count
            || layout.contains_mine(start)
        {
            log::warn!(
                "Rejected mine layout of size {:?} with {} mines",
                layout.size(),
                layout.mine_count()
            );
            return Err(GameError::InvalidLayout);
        }

        for ((row, col), cell) in self.cells.indexed_iter_mut() {
            let coords = (row as Coord, col as Coord);
            if layout.contains_mine(coords) {
                cell.arm();
            } else {
                cell.value = layout.adjacent_mine_count(coords) as i8;
            }
        }

        self.state = BoardState::Started;
        log::debug!(
            "Filled {:?} board with {} mines, starting at {:?}",
            self.size(),
            self.mines_count,
            start
        );

        Ok(self.reveal_unchecked(start))
    }

    /// Reveals a hidden cell, or chords an already revealed one.
    pub fn reveal_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_started()?;

        Ok(self.reveal_unchecked(coords))
    }

    /// Opens the unflagged neighbors of a revealed cell once enough of them are flagged.
    pub fn reveal_neighbors(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_started()?;

        if !self.cells[coords.to_nd_index()].revealed {
            return Ok(RevealOutcome::NoChange);
        }
        Ok(self.expand(coords))
    }

    /// Toggles the flag on a hidden cell. Setting a new flag is refused once there are as many flags as mines.
    pub fn place_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_started()?;

        let at_limit = self.flags_count == self.mines_count;
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.revealed || (!cell.flagged && at_limit) {
            return Ok(MarkOutcome::NoChange);
        }

        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flags_count += 1;
        } else {
            self.flags_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// Reveals every cell that is not flagged. Flags stay so they can be checked against the mines.
    pub fn reveal_all(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| !cell.flagged) {
            cell.revealed = true;
        }
    }

    /// The board is won once every mine is flagged and every other cell is revealed.
    pub fn check_result(&mut self) -> BoardResult {
        if self.state != BoardState::Started {
            return self.result;
        }

        let mines_flagged = self
            .cells
            .iter()
            .filter(|cell| cell.is_mine && cell.flagged)
            .count();
        let cells_revealed = self
            .cells
            .iter()
            .filter(|cell| !cell.is_mine && cell.revealed)
            .count();

        if mines_flagged == usize::from(self.mines_count)
            && cells_revealed == usize::from(self.config.safe_cell_count())
        {
            self.state = BoardState::Finished;
            self.result = BoardResult::Won;
            log::debug!("Board cleared, game won");
        }
        self.result
    }

    fn reveal_unchecked(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.flagged {
            return RevealOutcome::NoChange;
        }
        if cell.revealed {
            return self.expand(coords);
        }

        cell.revealed = true;
        let (is_mine, value) = (cell.is_mine, cell.value);
        if is_mine {
            self.detonate(coords);
            return RevealOutcome::HitMine;
        }
        log::trace!("Revealed {:?}, value {}", coords, value);

        let outcome = if value == 0 {
            RevealOutcome::Revealed | self.expand(coords)
        } else {
            RevealOutcome::Revealed
        };
        outcome | self.settle()
    }

    /// Breadth-first reveal from an already revealed cell. The origin always opens its neighbors, any other cell
    /// only does when it has no adjacent mines.
    fn expand(&mut self, origin: Coord2) -> RevealOutcome {
        let value = self.cells[origin.to_nd_index()].value;
        let adjacent_flags = self.count_flagged_neighbors(origin);
        if i16::from(adjacent_flags) < i16::from(value) {
            log::trace!(
                "Not enough flags around {:?}: {} of {}",
                origin,
                adjacent_flags,
                value
            );
            return RevealOutcome::NoChange;
        }

        let columns = self.columns();
        let mut visited = vec![false; self.cells.len()];
        visited[linear_index(origin, columns)] = true;
        let mut to_visit = VecDeque::from([origin]);
        let mut outcome = RevealOutcome::NoChange;

        while let Some(node) = to_visit.pop_front() {
            let cell = &mut self.cells[node.to_nd_index()];
            if !cell.revealed {
                cell.revealed = true;
                outcome = RevealOutcome::Revealed;
                log::trace!("Flood revealed {:?}, value {}", node, cell.value);
            }
            let (is_mine, value) = (cell.is_mine, cell.value);

            if is_mine {
                self.detonate(node);
                return RevealOutcome::HitMine;
            }

            if value == 0 || node == origin {
                for pos in self.cells.iter_neighbors(node) {
                    let index = linear_index(pos, columns);
                    let neighbor = &self.cells[pos.to_nd_index()];
                    if !neighbor.revealed && !neighbor.flagged && !visited[index] {
                        visited[index] = true;
                        to_visit.push_back(pos);
                    }
                }
            }
        }

        outcome | self.settle()
    }

    fn settle(&mut self) -> RevealOutcome {
        match self.check_result() {
            BoardResult::Won => RevealOutcome::Won,
            _ => RevealOutcome::NoChange,
        }
    }

    fn detonate(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.revealed = true;
        cell.exploded = true;
        self.triggered_mine = Some(coords);
        self.state = BoardState::Finished;
        self.result = BoardResult::Lost;
        log::debug!("Mine at {:?} exploded, game lost", coords);
        self.reveal_all();
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].flagged)
            .count() as u8
    }

    fn check_started(&self) -> Result<()> {
        match self.state {
            BoardState::Empty => Err(GameError::NotStarted),
            BoardState::Started => Ok(()),
            BoardState::Finished => Err(GameError::AlreadyEnded),
        }
    }
}

/// The solution grid, `M` for mines and the neighbor count otherwise.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                if cell.is_mine {
                    write!(f, "M\t")?;
                } else {
                    write!(f, "{}\t", cell.value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    fn layout(size: Coord2, mines: &[Coord2]) -> MineLayout {
        MineLayout::from_mine_coords(size, mines).unwrap()
    }

    /// 3x3 with mines in opposite corners, started from the top right which opens its three neighbors:
    ///
    /// ```text
    /// M 1 0
    /// 1 2 1
    /// 0 1 M
    /// ```
    fn corners_board() -> Board {
        let mut board = Board::new(3, 3, 0.25).unwrap();
        let outcome = board.fill_with((0, 2), layout((3, 3), &[(0, 0), (2, 2)])).unwrap();
        assert_eq!(outcome, RevealOutcome::Revealed);
        board
    }

    fn revealed(board: &Board) -> usize {
        board.iter_cells().filter(|(_, cell)| cell.is_revealed()).count()
    }

    #[test]
    fn new_board_starts_empty() {
        let board = Board::new(10, 10, 0.16).unwrap();

        assert_eq!(board.state(), BoardState::Empty);
        assert_eq!(board.result(), BoardResult::Pending);
        assert_eq!(board.mines_count(), 16);
        assert_eq!(board.flags_count(), 0);
        assert_eq!(board.size(), (10, 10));
        assert!(board.iter_cells().all(|(_, cell)| *cell == Cell::default()));
    }

    #[test]
    fn new_board_rejects_bad_parameters() {
        assert_eq!(Board::new(0, 4, 0.1), Err(GameError::InvalidSize));
        assert_eq!(Board::new(4, 4, 2.0), Err(GameError::InvalidDensity));
        assert_eq!(Board::new(1, 1, 1.0), Err(GameError::TooManyMines));
    }

    #[test]
    fn actions_before_fill_are_rejected() {
        let mut board = Board::new(4, 4, 0.1).unwrap();

        assert_eq!(board.reveal_cell((0, 0)), Err(GameError::NotStarted));
        assert_eq!(board.reveal_neighbors((0, 0)), Err(GameError::NotStarted));
        assert_eq!(board.place_flag((0, 0)), Err(GameError::NotStarted));
        assert_eq!(board.state(), BoardState::Empty);
    }

    #[test]
    fn fill_places_exact_mine_count_away_from_start() {
        let config = GameConfig::new((9, 9), 0.3).unwrap();
        for seed in 0..64 {
            let mut board = Board::with_seed(config, seed).unwrap();
            let start = ((seed % 9) as Coord, (seed / 9 % 9) as Coord);
            let outcome = board.fill(start).unwrap();

            assert_ne!(outcome, RevealOutcome::HitMine);
            assert_eq!(board.state(), BoardState::Started);
            let start_cell = board.cell(start).unwrap();
            assert!(!start_cell.is_mine());
            assert!(start_cell.is_revealed());
            let mines = board.iter_cells().filter(|(_, cell)| cell.is_mine()).count();
            assert_eq!(mines, 24);
        }
    }

    #[test]
    fn same_seed_fills_same_board() {
        let config = GameConfig::default();
        let mut a = Board::with_seed(config, 1234).unwrap();
        let mut b = Board::with_seed(config, 1234).unwrap();
        a.fill((5, 5)).unwrap();
        b.fill((5, 5)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn fill_twice_is_rejected() {
        let mut board = corners_board();
        let before = board.clone();

        assert_eq!(board.fill((1, 1)), Err(GameError::AlreadyFilled));
        assert_eq!(board, before);
    }

    #[test]
    fn fill_out_of_bounds_leaves_board_empty() {
        let mut board = Board::new(3, 3, 0.25).unwrap();

        assert_eq!(board.fill((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.state(), BoardState::Empty);
    }

    #[test]
    fn fill_rejects_layouts_that_do_not_fit() {
        let mut board = Board::new(3, 3, 0.25).unwrap();

        // wrong mine count
        let outcome = board.fill_with((0, 2), layout((3, 3), &[(0, 0)]));
        assert_eq!(outcome, Err(GameError::InvalidLayout));
        // mine under the start cell
        let outcome = board.fill_with((0, 0), layout((3, 3), &[(0, 0), (2, 2)]));
        assert_eq!(outcome, Err(GameError::InvalidLayout));
        // wrong size
        let outcome = board.fill_with((0, 2), layout((4, 4), &[(0, 0), (2, 2)]));
        assert_eq!(outcome, Err(GameError::InvalidLayout));

        assert_eq!(board.state(), BoardState::Empty);
        assert_eq!(revealed(&board), 0);
    }

    #[test]
    fn values_count_adjacent_mines() {
        let mut board = Board::new(5, 5, 0.05).unwrap();
        board.fill_with((0, 0), layout((5, 5), &[(2, 2)])).unwrap();

        for ((row, col), cell) in board.iter_cells() {
            let expected = if (row, col) == (2, 2) {
                Cell::MINE_VALUE
            } else if row.abs_diff(2) <= 1 && col.abs_diff(2) <= 1 {
                1
            } else {
                0
            };
            assert_eq!(cell.value(), expected, "value at {:?}", (row, col));
        }
    }

    #[test]
    fn revealing_every_safe_cell_without_flags_does_not_win() {
        let mut board = Board::new(5, 5, 0.05).unwrap();
        let outcome = board.fill_with((0, 0), layout((5, 5), &[(2, 2)])).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed);
        assert_eq!(revealed(&board), 24);
        assert_eq!(board.state(), BoardState::Started);
        assert_eq!(board.result(), BoardResult::Pending);

        // flagging alone does not re-check the board
        assert_eq!(board.place_flag((2, 2)), Ok(MarkOutcome::Changed));
        assert_eq!(board.state(), BoardState::Started);

        // re-activating a revealed cell does
        assert_eq!(board.reveal_cell((0, 0)), Ok(RevealOutcome::Won));
        assert_eq!(board.state(), BoardState::Finished);
        assert_eq!(board.result(), BoardResult::Won);
    }

    #[test]
    fn flood_stops_at_numbered_cells() {
        let mut board = Board::new(5, 5, 0.2).unwrap();
        let wall = [(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)];
        board.fill_with((0, 0), layout((5, 5), &wall)).unwrap();

        for ((row, col), cell) in board.iter_cells() {
            assert_eq!(cell.is_revealed(), row < 2, "revealed at {:?}", (row, col));
        }
        assert!(
            board
                .iter_cells()
                .filter(|&((row, _), _)| row == 1)
                .all(|(_, cell)| cell.value() > 0)
        );
    }

    #[test]
    fn flood_reveals_zero_region_and_its_border() {
        let mut board = corners_board();
        assert_eq!(revealed(&board), 4);
        for coords in [(0, 2), (0, 1), (1, 1), (1, 2)] {
            assert!(board.cell(coords).unwrap().is_revealed());
        }

        // the bottom left zero opens its numbered neighbors but not the mine
        board.place_flag((0, 0)).unwrap();
        board.place_flag((2, 2)).unwrap();
        assert_eq!(board.reveal_cell((2, 0)), Ok(RevealOutcome::Won));
        assert_eq!(revealed(&board), 7);
    }

    #[test]
    fn hitting_a_mine_loses_and_reveals_everything_unflagged() {
        let mut board = corners_board();
        board.place_flag((2, 1)).unwrap();

        assert_eq!(board.reveal_cell((0, 0)), Ok(RevealOutcome::HitMine));
        assert_eq!(board.state(), BoardState::Finished);
        assert_eq!(board.result(), BoardResult::Lost);
        assert_eq!(board.triggered_mine(), Some((0, 0)));

        let exploded = board.cell((0, 0)).unwrap();
        assert!(exploded.is_exploded() && exploded.is_revealed());
        assert!(!board.cell((2, 1)).unwrap().is_revealed());
        assert_eq!(revealed(&board), 8);

        assert_eq!(board.view((0, 0)), Ok(CellView::Exploded));
        assert_eq!(board.view((2, 2)), Ok(CellView::Mine));
        assert_eq!(board.view((2, 1)), Ok(CellView::WrongFlag));
        assert_eq!(board.view((1, 1)), Ok(CellView::Number(2)));
    }

    #[test]
    fn finished_board_rejects_moves() {
        let mut board = corners_board();
        board.reveal_cell((2, 2)).unwrap();
        let before = board.clone();

        assert_eq!(board.reveal_cell((2, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(board.place_flag((2, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(board.reveal_neighbors((1, 1)), Err(GameError::AlreadyEnded));
        assert_eq!(board, before);
    }

    #[test]
    fn flag_budget_is_limited_to_mine_count() {
        let mut board = corners_board();

        assert_eq!(board.place_flag((1, 0)), Ok(MarkOutcome::Changed));
        assert_eq!(board.place_flag((2, 0)), Ok(MarkOutcome::Changed));
        assert_eq!(board.flags_count(), 2);
        assert_eq!(board.mines_left(), 0);

        assert_eq!(board.place_flag((2, 1)), Ok(MarkOutcome::NoChange));
        assert!(!board.cell((2, 1)).unwrap().is_flagged());
        assert_eq!(board.flags_count(), 2);

        assert_eq!(board.place_flag((1, 0)), Ok(MarkOutcome::Changed));
        assert_eq!(board.flags_count(), 1);
    }

    #[test]
    fn flagging_twice_restores_the_cell() {
        let mut board = corners_board();
        let before = board.clone();

        board.place_flag((2, 0)).unwrap();
        assert_eq!(board.view((2, 0)), Ok(CellView::Flagged));
        board.place_flag((2, 0)).unwrap();

        assert_eq!(board, before);
    }

    #[test]
    fn revealed_cells_cannot_be_flagged() {
        let mut board = corners_board();

        assert_eq!(board.place_flag((1, 1)), Ok(MarkOutcome::NoChange));
        assert_eq!(board.flags_count(), 0);
    }

    #[test]
    fn flagged_cells_cannot_be_revealed() {
        let mut board = corners_board();
        board.place_flag((0, 0)).unwrap();

        assert_eq!(board.reveal_cell((0, 0)), Ok(RevealOutcome::NoChange));
        assert_eq!(board.state(), BoardState::Started);
    }

    #[test]
    fn chord_with_too_few_flags_changes_nothing() {
        let mut board = corners_board();
        board.place_flag((0, 0)).unwrap();
        let before = board.clone();

        assert_eq!(board.reveal_cell((1, 1)), Ok(RevealOutcome::NoChange));
        assert_eq!(board.reveal_neighbors((1, 1)), Ok(RevealOutcome::NoChange));
        assert_eq!(board, before);
    }

    #[test]
    fn chord_on_hidden_cell_does_nothing() {
        let mut board = corners_board();
        let before = board.clone();

        assert_eq!(board.reveal_neighbors((2, 0)), Ok(RevealOutcome::NoChange));
        assert_eq!(board, before);
    }

    #[test]
    fn chord_with_correct_flags_opens_neighbors_and_wins() {
        let mut board = corners_board();
        board.place_flag((0, 0)).unwrap();
        board.place_flag((2, 2)).unwrap();

        assert_eq!(board.reveal_neighbors((1, 1)), Ok(RevealOutcome::Won));
        assert_eq!(board.result(), BoardResult::Won);
        for coords in [(1, 0), (2, 0), (2, 1)] {
            assert_eq!(
                board.view(coords),
                Ok(CellView::Number(board.cell(coords).unwrap().value() as u8))
            );
        }
        assert_eq!(board.view((0, 0)), Ok(CellView::Flagged));
    }

    #[test]
    fn chord_with_wrong_flag_explodes_mid_cascade() {
        let mut board = corners_board();
        board.place_flag((0, 0)).unwrap();
        board.place_flag((2, 1)).unwrap();

        assert_eq!(board.reveal_cell((1, 1)), Ok(RevealOutcome::HitMine));
        assert_eq!(board.result(), BoardResult::Lost);
        assert_eq!(board.triggered_mine(), Some((2, 2)));
        assert!(board.cell((2, 2)).unwrap().is_exploded());
        assert_eq!(board.view((2, 1)), Ok(CellView::WrongFlag));
        assert_eq!(board.view((0, 0)), Ok(CellView::Flagged));
    }

    #[test]
    fn mine_free_board_is_won_on_first_reveal() {
        let mut board = Board::new(4, 6, 0.0).unwrap();

        assert_eq!(board.fill((3, 5)), Ok(RevealOutcome::Won));
        assert_eq!(board.result(), BoardResult::Won);
        assert_eq!(revealed(&board), 24);
    }

    #[test]
    fn out_of_bounds_coordinates_are_rejected() {
        let mut board = corners_board();
        let before = board.clone();

        assert_eq!(board.reveal_cell((0, 3)), Err(GameError::InvalidCoords));
        assert_eq!(board.place_flag((3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.reveal_neighbors((9, 9)), Err(GameError::InvalidCoords));
        assert_eq!(board.view((3, 3)), Err(GameError::InvalidCoords));
        assert_eq!(board, before);
    }

    #[test]
    fn open_follows_board_state() {
        let mut board = Board::with_seed(GameConfig::new((6, 6), 0.1).unwrap(), 9).unwrap();

        assert!(board.open((2, 2)).unwrap().has_update());
        assert_eq!(board.state(), BoardState::Started);

        let mine = board
            .iter_cells()
            .find(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
            .unwrap();
        assert_eq!(board.open(mine), Ok(RevealOutcome::HitMine));
        assert_eq!(board.open((0, 0)), Ok(RevealOutcome::NoChange));
        assert!(board.iter_cells().all(|(_, cell)| cell.is_revealed() || cell.is_flagged()));
    }

    #[test]
    fn deserialized_board_keeps_playing() {
        let mut board = corners_board();
        board.place_flag((0, 0)).unwrap();

        let value = serde_json::to_value(&board).unwrap();
        let mut restored: Board = serde_json::from_value(value).unwrap();

        assert_eq!(restored, board);
        restored.place_flag((2, 2)).unwrap();
        assert_eq!(restored.reveal_cell((2, 0)), Ok(RevealOutcome::Won));
    }

    #[test]
    fn deserializing_mismatched_board_fails() {
        let mut board = corners_board();
        board.place_flag((0, 0)).unwrap();
        let value = serde_json::to_value(&board).unwrap();

        let mut resized = value.clone();
        resized["config"]["size"] = serde_json::json!([4, 3]);
        assert!(serde_json::from_value::<Board>(resized).is_err());

        let mut miscounted = value.clone();
        miscounted["flags_count"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Board>(miscounted).is_err());

        let mut stray_mine = value;
        stray_mine["triggered_mine"] = serde_json::json!([7, 7]);
        assert!(serde_json::from_value::<Board>(stray_mine).is_err());
    }

    #[test]
    fn display_shows_solution() {
        let board = corners_board();
        assert_eq!(format!("{board}"), "M\t1\t0\t\n1\t2\t1\t\n0\t1\tM\t\n");
    }
}
