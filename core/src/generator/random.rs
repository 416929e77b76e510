use super::*;

/// Places mines by rejection sampling: draw a uniform position, redraw if it already holds a mine or is the
/// starting cell. Cheap as long as mines are a modest fraction of the board.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: &GameConfig, start: Coord2) -> MineLayout {
        use rand::prelude::*;

        let (rows, columns) = config.size;
        let mut layout = MineLayout::empty(config.size);

        // unchecked configs may not leave room for a safe start cell
        let mines = config.mine_count().min(config.total_cells().saturating_sub(1));
        if mines < config.mine_count() {
            log::warn!(
                "Cannot keep start cell safe with {} mines on {} cells, placing {}",
                config.mine_count(),
                config.total_cells(),
                mines
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let rejection_limit = u32::from(config.total_cells());
        let mut rejected: u32 = 0;
        while layout.mine_count() < mines {
            let coords = (rng.random_range(0..rows), rng.random_range(0..columns));
            if coords == start || !layout.place_mine(coords) {
                rejected += 1;
                if rejected == rejection_limit {
                    log::warn!(
                        "Rejection sampling is struggling, {} draws rejected with {} of {} mines placed",
                        rejected,
                        layout.mine_count(),
                        mines
                    );
                }
            }
        }

        log::trace!(
            "Placed {} mines with seed {}, {} samples rejected",
            layout.mine_count(),
            self.seed,
            rejected
        );
        layout
    }
}
