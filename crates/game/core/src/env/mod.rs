//! Procedural content: the maze generator and the random source it owns.
mod generator;
mod rng;

pub use generator::{GenerationError, Maze, MazeGenerator, MazeRequest, Placement};
pub use rng::{MazeRng, compute_seed, seeded_rng};
