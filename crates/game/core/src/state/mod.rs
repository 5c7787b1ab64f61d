//! Grid data types and the level state that owns them.
mod common;
mod grid;
mod level;

pub use common::{Direction, Position};
pub use grid::{CellTag, Grid};
pub use level::{LevelProgress, LevelState};
