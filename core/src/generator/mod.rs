use crate::*;
pub use random::*;

mod random;

/// Decides where the mines go once the first cell has been picked.
pub trait MineGenerator {
    fn generate(self, config: &GameConfig, start: Coord2) -> MineLayout;
}

/// A prebuilt layout is its own generator; [`Board::fill_with`] still checks it fits.
impl MineGenerator for MineLayout {
    fn generate(self, _config: &GameConfig, _start: Coord2) -> MineLayout {
        self
    }
}
