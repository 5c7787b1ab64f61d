//! Controllers that act on a [`LevelState`](crate::state::LevelState) each tick.
mod enemy;
mod player;

pub use enemy::{Enemy, EnemyDecision, LearningParams, ValueTable};
pub use player::{MoveOutcome, MoveRejection, Player, PlayerStep, TickInput};
