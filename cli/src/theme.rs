use sweeper_core::CellView;

/// Glyphs used to draw each kind of cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Theme {
    pub hidden: char,
    pub flag: char,
    pub wrong_flag: char,
    pub mine: char,
    pub exploded: char,
    pub numbers: [char; 9],
}

impl Theme {
    pub const ASCII: Theme = Theme {
        hidden: '#',
        flag: 'F',
        wrong_flag: 'x',
        mine: '*',
        exploded: '@',
        numbers: ['.', '1', '2', '3', '4', '5', '6', '7', '8'],
    };

    pub const UNICODE: Theme = Theme {
        hidden: '■',
        flag: '⚑',
        wrong_flag: '✗',
        mine: '●',
        exploded: '✹',
        numbers: ['·', '1', '2', '3', '4', '5', '6', '7', '8'],
    };

    pub fn glyph(&self, view: CellView) -> char {
        use CellView::*;
        match view {
            Hidden => self.hidden,
            Flagged => self.flag,
            WrongFlag => self.wrong_flag,
            Number(count) => self
                .numbers
                .get(usize::from(count))
                .copied()
                .unwrap_or('?'),
            Mine => self.mine,
            Exploded => self.exploded,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::UNICODE
    }
}
