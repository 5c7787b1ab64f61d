use std::fmt;

/// Discrete grid position expressed in cell coordinates.
///
/// Signed so that a step off the grid edge is representable; bounds are
/// checked against the [`Grid`](super::Grid) rather than the type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position one cell away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        self.offset(direction, 1)
    }

    pub fn offset(self, direction: Direction, distance: i32) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr * distance, self.col + dc * distance)
    }

    /// Cell halfway between `self` and `other` (used when carving on a step of 2).
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }

    /// Top-left pixel of this cell on a grid with the given pitch.
    pub fn to_pixels(self, pitch: u32) -> (i64, i64) {
        let pitch = i64::from(pitch);
        (i64::from(self.col) * pitch, i64::from(self.row) * pitch)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One unit grid step. Also the enemy action set.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed enumeration order; ties between equal action values resolve to the
    /// earliest entry.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, col)` delta.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Index into [`Direction::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_enumeration_order() {
        for (i, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), i);
        }
    }

    #[test]
    fn steps_and_midpoints() {
        let origin = Position::new(3, 3);
        assert_eq!(origin.step(Direction::Up), Position::new(2, 3));
        assert_eq!(origin.step(Direction::Right), Position::new(3, 4));
        assert_eq!(origin.offset(Direction::Down, 2), Position::new(5, 3));
        assert_eq!(origin.midpoint(Position::new(3, 1)), Position::new(3, 2));
    }

    #[test]
    fn directions_parse_case_insensitively() {
        assert_eq!("LEFT".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(Direction::Down.to_string(), "down");
    }

    #[test]
    fn pixels_follow_pitch() {
        assert_eq!(Position::new(2, 5).to_pixels(37), (185, 74));
    }
}
