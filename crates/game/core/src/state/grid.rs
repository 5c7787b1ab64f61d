use std::collections::{BTreeSet, VecDeque};

use super::{Direction, Position};

/// Symbolic state of one grid cell.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CellTag {
    #[default]
    Wall,
    Open,
    Start,
    Finish,
    Coin,
    Pass,
}

impl CellTag {
    /// Cells the player may step onto without breaking anything.
    pub const fn is_walkable(self) -> bool {
        !matches!(self, CellTag::Wall)
    }

    /// Cells an enemy may occupy. Start and Finish are off limits.
    pub const fn is_enemy_walkable(self) -> bool {
        matches!(self, CellTag::Open | CellTag::Coin | CellTag::Pass)
    }

    /// Single-character glyph used by text dumps and test fixtures.
    pub const fn glyph(self) -> char {
        match self {
            CellTag::Wall => '#',
            CellTag::Open => '.',
            CellTag::Start => 'S',
            CellTag::Finish => 'F',
            CellTag::Coin => 'c',
            CellTag::Pass => 'p',
        }
    }

    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '#' => Some(CellTag::Wall),
            '.' | ' ' => Some(CellTag::Open),
            'S' => Some(CellTag::Start),
            'F' => Some(CellTag::Finish),
            'c' => Some(CellTag::Coin),
            'p' => Some(CellTag::Pass),
            _ => None,
        }
    }
}

/// Row-major grid of cell tags.
///
/// Reads are public; writes are crate-private so every mutation goes through
/// [`LevelState`](super::LevelState).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: u32,
    cols: u32,
    cells: Vec<CellTag>,
}

impl Grid {
    pub fn filled(rows: u32, cols: u32, tag: CellTag) -> Self {
        Self {
            rows,
            cols,
            cells: vec![tag; rows as usize * cols as usize],
        }
    }

    /// Parses a grid from glyph rows (see [`CellTag::glyph`]).
    ///
    /// Returns `None` for ragged input, an empty grid, or an unknown glyph.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let cols = rows.first()?.chars().count();
        if cols == 0 {
            return None;
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for line in rows {
            if line.chars().count() != cols {
                return None;
            }
            for glyph in line.chars() {
                cells.push(CellTag::from_glyph(glyph)?);
            }
        }
        Some(Self {
            rows: rows.len() as u32,
            cols: cols as u32,
            cells,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row >= 0
            && position.col >= 0
            && position.row < self.rows as i32
            && position.col < self.cols as i32
    }

    /// True when `position` lies strictly inside the border ring.
    pub fn is_interior(&self, position: Position) -> bool {
        position.row >= 1
            && position.col >= 1
            && position.row < self.rows as i32 - 1
            && position.col < self.cols as i32 - 1
    }

    /// Tag at `position`, or `None` when out of bounds.
    pub fn get(&self, position: Position) -> Option<CellTag> {
        self.index(position).map(|idx| self.cells[idx])
    }

    pub(crate) fn set(&mut self, position: Position, tag: CellTag) -> bool {
        match self.index(position) {
            Some(idx) => {
                self.cells[idx] = tag;
                true
            }
            None => false,
        }
    }

    pub fn count(&self, tag: CellTag) -> usize {
        self.cells.iter().filter(|cell| **cell == tag).count()
    }

    pub fn positions_of(&self, tag: CellTag) -> impl Iterator<Item = Position> + '_ {
        self.iter().filter(move |(_, cell)| *cell == tag).map(|(pos, _)| pos)
    }

    /// First position holding `tag` in row-major order.
    pub fn find(&self, tag: CellTag) -> Option<Position> {
        self.positions_of(tag).next()
    }

    /// Every cell with its position, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellTag)> + '_ {
        let cols = self.cols as usize;
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            (
                Position::new((idx / cols) as i32, (idx % cols) as i32),
                *cell,
            )
        })
    }

    /// Cells reachable from `origin` through walkable cells (4-connected).
    pub fn reachable_from(&self, origin: Position) -> BTreeSet<Position> {
        let mut seen = BTreeSet::new();
        if !self.get(origin).is_some_and(CellTag::is_walkable) {
            return seen;
        }
        let mut queue = VecDeque::from([origin]);
        seen.insert(origin);
        while let Some(current) = queue.pop_front() {
            for direction in Direction::ALL {
                let next = current.step(direction);
                if self.get(next).is_some_and(CellTag::is_walkable) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Glyph rows, one string per grid row.
    ///
    /// A grid with no columns renders as no rows.
    pub fn to_rows(&self) -> Vec<String> {
        if self.cols == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.cols as usize)
            .map(|row| row.iter().map(|cell| cell.glyph()).collect())
            .collect()
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.row as usize * self.cols as usize + position.col as usize)
    }
}
