//! Deterministic maze-chase game logic.
//!
//! `maze-core` defines the rules of the game and nothing else: no rendering,
//! no input polling, no timing. A session driver feeds one [`TickInput`] per
//! tick to the [`Player`], advances the enemies through
//! [`LevelState::tick_enemies`], and reads the grid back for display.
//!
//! - [`env`] generates mazes from a seedable random source
//! - [`state`] holds the grid and the [`LevelState`] that owns it
//! - [`agent`] hosts the player and enemy controllers
//!
//! All grid mutation flows through [`LevelState`].
pub mod agent;
pub mod config;
pub mod env;
pub mod error;
pub mod state;

pub use agent::{
    Enemy, EnemyDecision, LearningParams, MoveOutcome, MoveRejection, Player, PlayerStep,
    TickInput, ValueTable,
};
pub use config::{ConfigError, GameConfig};
pub use env::{
    GenerationError, Maze, MazeGenerator, MazeRequest, MazeRng, Placement, compute_seed,
    seeded_rng,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{CellTag, Direction, Grid, LevelProgress, LevelState, Position};
