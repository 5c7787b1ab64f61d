//! Randomized depth-first backtracker with item decoration.
//!
//! The carver works on the odd lattice: it starts at `(1, 1)` and moves two
//! cells at a time, opening the cell in between, so walls always survive on
//! even coordinates and the result is a spanning tree over the lattice.
//! Decoration then claims `Open` cells in a fixed order (endpoints, coins,
//! passes) and never overwrites anything already tagged.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{ConfigError, GameConfig};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CellTag, Direction, Grid, Position};

use super::rng::{MazeRng, seeded_rng};

/// What the generator was trying to place when it gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Placement {
    Endpoints,
    Coin,
    Pass,
    Enemy,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("placed {placed} of {requested} {item} cells (gave up after {attempts} attempts)")]
    Exhausted {
        item: Placement,
        requested: u32,
        placed: u32,
        attempts: u32,
    },
}

impl GameError for GenerationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Config(err) => err.severity(),
            Self::Exhausted { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(err) => err.error_code(),
            Self::Exhausted { .. } => "GENERATION_EXHAUSTED",
        }
    }
}

/// Dimensions and item counts for one maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeRequest {
    pub rows: u32,
    pub cols: u32,
    pub coins: u32,
    pub passes: u32,
}

impl MazeRequest {
    pub const fn new(rows: u32, cols: u32, coins: u32, passes: u32) -> Self {
        Self {
            rows,
            cols,
            coins,
            passes,
        }
    }

    /// Request used by a level: coin count scales with the level number.
    pub fn for_level(config: &GameConfig, level: u32) -> Self {
        Self::new(
            config.rows,
            config.cols,
            config.coins_for_level(level),
            config.pass_count,
        )
    }
}

/// A freshly generated, decorated maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    pub start: Position,
    pub finish: Position,
}

/// Maze generator owning the session's random source.
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    rng: MazeRng,
    max_attempts: u32,
}

impl MazeGenerator {
    pub fn new(rng: MazeRng, max_attempts: u32) -> Self {
        Self {
            rng,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_seed(seed: u64, max_attempts: u32) -> Self {
        Self::new(seeded_rng(seed), max_attempts)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn generate(&mut self, request: &MazeRequest) -> Result<Maze, GenerationError> {
        if request.rows < GameConfig::MIN_DIMENSION || request.cols < GameConfig::MIN_DIMENSION {
            return Err(ConfigError::InvalidDimensions {
                rows: request.rows,
                cols: request.cols,
            }
            .into());
        }

        let mut grid = self.carve(request.rows, request.cols);
        check_capacity(&grid, request)?;

        let (start, finish) = self.place_endpoints(&mut grid)?;
        self.scatter(&mut grid, Placement::Coin, CellTag::Coin, request.coins)?;
        self.scatter(&mut grid, Placement::Pass, CellTag::Pass, request.passes)?;

        tracing::debug!(
            rows = request.rows,
            cols = request.cols,
            coins = request.coins,
            passes = request.passes,
            %start,
            %finish,
            "maze generated"
        );

        Ok(Maze {
            grid,
            start,
            finish,
        })
    }

    /// Uniformly samples an interior cell whose tag satisfies `accept`,
    /// giving up after the configured number of attempts.
    pub fn sample_cell<F>(&mut self, grid: &Grid, accept: F) -> Option<Position>
    where
        F: Fn(CellTag) -> bool,
    {
        for _ in 0..self.max_attempts {
            let candidate = self.random_interior(grid);
            if grid.get(candidate).is_some_and(&accept) {
                return Some(candidate);
            }
        }
        None
    }

    pub(crate) fn carve(&mut self, rows: u32, cols: u32) -> Grid {
        let mut grid = Grid::filled(rows, cols, CellTag::Wall);
        let origin = Position::new(1, 1);
        grid.set(origin, CellTag::Open);

        let mut stack = vec![origin];
        while let Some(&current) = stack.last() {
            let mut neighbors = Direction::ALL.map(|direction| current.offset(direction, 2));
            neighbors.shuffle(&mut self.rng);

            let next = neighbors
                .into_iter()
                .find(|n| grid.is_interior(*n) && grid.get(*n) == Some(CellTag::Wall));

            match next {
                Some(next) => {
                    grid.set(next, CellTag::Open);
                    grid.set(current.midpoint(next), CellTag::Open);
                    stack.push(next);
                }
                None => {
                    stack.pop();
                }
            }
        }
        grid
    }

    fn place_endpoints(&mut self, grid: &mut Grid) -> Result<(Position, Position), GenerationError> {
        for _ in 0..self.max_attempts {
            let start = self.random_interior(grid);
            let finish = self.random_interior(grid);
            if start != finish
                && grid.get(start) == Some(CellTag::Open)
                && grid.get(finish) == Some(CellTag::Open)
            {
                grid.set(start, CellTag::Start);
                grid.set(finish, CellTag::Finish);
                return Ok((start, finish));
            }
        }
        Err(GenerationError::Exhausted {
            item: Placement::Endpoints,
            requested: 2,
            placed: 0,
            attempts: self.max_attempts,
        })
    }

    fn scatter(
        &mut self,
        grid: &mut Grid,
        item: Placement,
        tag: CellTag,
        count: u32,
    ) -> Result<(), GenerationError> {
        for placed in 0..count {
            let Some(position) = self.sample_cell(grid, |cell| cell == CellTag::Open) else {
                tracing::warn!(%item, placed, requested = count, "placement attempts exhausted");
                return Err(GenerationError::Exhausted {
                    item,
                    requested: count,
                    placed,
                    attempts: self.max_attempts,
                });
            };
            grid.set(position, tag);
        }
        Ok(())
    }

    fn random_interior(&mut self, grid: &Grid) -> Position {
        let row = self.rng.gen_range(1..grid.rows() as i32 - 1);
        let col = self.rng.gen_range(1..grid.cols() as i32 - 1);
        Position::new(row, col)
    }
}

/// Fails fast when the carved maze cannot hold every requested item.
fn check_capacity(grid: &Grid, request: &MazeRequest) -> Result<(), GenerationError> {
    let open = grid.count(CellTag::Open) as u64;
    let exhausted = |item, requested, placed| GenerationError::Exhausted {
        item,
        requested,
        placed,
        attempts: 0,
    };

    if open < 2 {
        return Err(exhausted(Placement::Endpoints, 2, 0));
    }
    let free = open - 2;
    if free < u64::from(request.coins) {
        return Err(exhausted(Placement::Coin, request.coins, free as u32));
    }
    let free = free - u64::from(request.coins);
    if free < u64::from(request.passes) {
        return Err(exhausted(Placement::Pass, request.passes, free as u32));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(seed: u64, request: MazeRequest) -> Maze {
        MazeGenerator::from_seed(seed, GameConfig::DEFAULT_MAX_PLACEMENT_ATTEMPTS)
            .generate(&request)
            .unwrap()
    }

    #[test]
    fn carves_a_spanning_tree_over_the_odd_lattice() {
        let mut generator = MazeGenerator::from_seed(11, 100);
        let grid = generator.carve(21, 21);

        // 10x10 lattice nodes plus one connector per tree edge.
        assert_eq!(grid.count(CellTag::Open), 100 + 99);
        for (position, tag) in grid.iter() {
            if position.row % 2 == 1 && position.col % 2 == 1 {
                assert_eq!(tag, CellTag::Open, "lattice node {position} left as wall");
            }
            if position.row % 2 == 0 && position.col % 2 == 0 {
                assert_eq!(tag, CellTag::Wall, "pillar {position} carved");
            }
            if !grid.is_interior(position) {
                assert_eq!(tag, CellTag::Wall, "border {position} carved");
            }
        }
    }

    #[test]
    fn carved_open_cells_match_config_capacity() {
        let mut generator = MazeGenerator::from_seed(4, 100);
        for (rows, cols) in [(3, 3), (5, 5), (5, 7), (6, 6), (7, 7), (15, 19), (21, 21)] {
            let grid = generator.carve(rows, cols);
            let expected = GameConfig::with_dimensions(rows, cols).open_cells();
            assert_eq!(grid.count(CellTag::Open), expected as usize, "{rows}x{cols}");
        }
    }

    #[test]
    fn every_item_is_reachable_from_start() {
        for seed in 0..25 {
            let maze = generate(seed, MazeRequest::new(21, 21, 16, 5));
            let reachable = maze.grid.reachable_from(maze.start);
            assert!(reachable.contains(&maze.finish), "seed {seed}: finish unreachable");
            for (position, tag) in maze.grid.iter() {
                if tag.is_walkable() {
                    assert!(reachable.contains(&position), "seed {seed}: {position} cut off");
                }
            }
        }
    }

    #[test]
    fn exactly_one_start_and_finish() {
        for seed in 0..25 {
            let maze = generate(seed, MazeRequest::new(15, 19, 8, 5));
            assert_eq!(maze.grid.count(CellTag::Start), 1);
            assert_eq!(maze.grid.count(CellTag::Finish), 1);
            assert_eq!(maze.grid.get(maze.start), Some(CellTag::Start));
            assert_eq!(maze.grid.get(maze.finish), Some(CellTag::Finish));
            assert_ne!(maze.start, maze.finish);
        }
    }

    #[test]
    fn places_requested_item_counts() {
        let maze = generate(3, MazeRequest::new(21, 21, 24, 5));
        assert_eq!(maze.grid.count(CellTag::Coin), 24);
        assert_eq!(maze.grid.count(CellTag::Pass), 5);
    }

    #[test]
    fn same_seed_same_layout() {
        let request = MazeRequest::new(13, 17, 8, 5);
        assert_eq!(generate(99, request), generate(99, request));
    }

    #[test]
    fn tiny_maze_keeps_endpoints_inside() {
        let maze = generate(5, MazeRequest::new(5, 5, 1, 0));
        for position in [maze.start, maze.finish] {
            assert!((1..=3).contains(&position.row));
            assert!((1..=3).contains(&position.col));
        }
        assert_eq!(maze.grid.count(CellTag::Coin), 1);
    }

    #[test]
    fn overfull_request_is_exhausted_not_looping() {
        // A 5x5 maze has 7 open cells: 2 endpoints + 1 coin leaves 4 for 5 passes.
        let err = MazeGenerator::from_seed(1, 1_000)
            .generate(&MazeRequest::new(5, 5, 1, 5))
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::Exhausted {
                item: Placement::Pass,
                requested: 5,
                placed: 4,
                attempts: 0,
            }
        );
        assert!(err.severity().is_recoverable());
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        let err = MazeGenerator::from_seed(1, 10)
            .generate(&MazeRequest::new(2, 8, 0, 0))
            .unwrap_err();
        assert_eq!(
            err,
            GenerationError::Config(ConfigError::InvalidDimensions { rows: 2, cols: 8 })
        );
    }

    #[test]
    fn sampling_gives_up_when_nothing_matches() {
        let grid = Grid::filled(5, 5, CellTag::Wall);
        let mut generator = MazeGenerator::from_seed(1, 50);
        assert_eq!(generator.sample_cell(&grid, CellTag::is_enemy_walkable), None);
    }
}
