//! Level state: the single owner of the mutable grid.
//!
//! Controllers read the grid through [`LevelState::grid`] and change it only
//! through the methods here. Regeneration replaces the grid, the item
//! counters, the lives and the enemy list in one step.

use crate::agent::{Enemy, EnemyDecision, LearningParams};
use crate::config::{ConfigError, GameConfig};
use crate::env::{GenerationError, MazeGenerator, MazeRequest, Placement};

use super::{CellTag, Grid, Position};

/// Result of [`LevelState::advance_level`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelProgress {
    /// A fresh maze for `level` is in place.
    Advanced { level: u32 },
    /// The last level was cleared; the level number stays at the maximum.
    SessionComplete,
}

#[derive(Clone, Debug)]
pub struct LevelState {
    config: GameConfig,
    generator: MazeGenerator,
    grid: Grid,
    start: Position,
    finish: Position,
    level: u32,
    lives: u32,
    passes: u32,
    enemies: Vec<Enemy>,
    complete: bool,
}

impl LevelState {
    /// Validates `config` and generates the maze for `level`.
    pub fn new(
        config: GameConfig,
        generator: MazeGenerator,
        level: u32,
    ) -> Result<Self, GenerationError> {
        config.validate()?;
        let mut state = Self::empty(config, generator);
        state.generate_level(level)?;
        Ok(state)
    }

    pub fn from_seed(config: GameConfig, seed: u64, level: u32) -> Result<Self, GenerationError> {
        let generator = MazeGenerator::from_seed(seed, config.max_placement_attempts);
        Self::new(config, generator, level)
    }

    /// Installs a prepared layout instead of generating one.
    ///
    /// The grid must hold exactly one `Start` and one `Finish`. Enemies are
    /// still spawned from the generator's random source.
    pub fn with_grid(
        config: GameConfig,
        generator: MazeGenerator,
        level: u32,
        grid: Grid,
    ) -> Result<Self, GenerationError> {
        config.validate()?;
        if grid.count(CellTag::Start) != 1 || grid.count(CellTag::Finish) != 1 {
            return Err(ConfigError::MissingEndpoints.into());
        }
        let (Some(start), Some(finish)) = (grid.find(CellTag::Start), grid.find(CellTag::Finish))
        else {
            return Err(ConfigError::MissingEndpoints.into());
        };

        let mut state = Self::empty(config, generator);
        state.check_level(level)?;
        state.install(level, grid, start, finish)?;
        Ok(state)
    }

    fn empty(config: GameConfig, generator: MazeGenerator) -> Self {
        Self {
            grid: Grid::filled(config.rows, config.cols, CellTag::Wall),
            lives: config.starting_lives,
            config,
            generator,
            start: Position::ORIGIN,
            finish: Position::ORIGIN,
            level: 1,
            passes: 0,
            enemies: Vec::new(),
            complete: false,
        }
    }

    /// Replaces the grid with a fresh maze for `level` and resets coins,
    /// passes, lives and enemies.
    pub fn generate_level(&mut self, level: u32) -> Result<(), GenerationError> {
        self.check_level(level)?;
        let maze = self
            .generator
            .generate(&MazeRequest::for_level(&self.config, level))?;
        self.install(level, maze.grid, maze.start, maze.finish)
    }

    fn check_level(&self, level: u32) -> Result<(), ConfigError> {
        if level == 0 || level > self.config.max_levels {
            return Err(ConfigError::LevelOutOfRange {
                level,
                max_levels: self.config.max_levels,
            });
        }
        Ok(())
    }

    fn install(
        &mut self,
        level: u32,
        grid: Grid,
        start: Position,
        finish: Position,
    ) -> Result<(), GenerationError> {
        let enemies = self.spawn_enemies(&grid)?;

        self.grid = grid;
        self.start = start;
        self.finish = finish;
        self.level = level;
        self.lives = self.config.starting_lives;
        self.passes = 0;
        self.enemies = enemies;
        self.complete = false;

        tracing::info!(
            level,
            coins = self.remaining_coins(),
            enemies = self.enemies.len(),
            %start,
            %finish,
            "level ready"
        );
        Ok(())
    }

    fn spawn_enemies(&mut self, grid: &Grid) -> Result<Vec<Enemy>, GenerationError> {
        let requested = self.config.enemy_count;
        let mut enemies = Vec::with_capacity(requested as usize);
        for placed in 0..requested {
            let position = self
                .generator
                .sample_cell(grid, CellTag::is_enemy_walkable)
                .ok_or(GenerationError::Exhausted {
                    item: Placement::Enemy,
                    requested,
                    placed,
                    attempts: self.generator.max_attempts(),
                })?;
            enemies.push(Enemy::new(position, self.config.enemy_move_delay));
        }
        Ok(enemies)
    }

    /// Clears a coin at `position`. No-op on any other tag.
    pub fn collect_coin(&mut self, position: Position) -> bool {
        if self.grid.get(position) != Some(CellTag::Coin) {
            return false;
        }
        self.grid.set(position, CellTag::Open)
    }

    /// Clears a pass at `position` and bumps the displayed pass count.
    pub fn collect_pass(&mut self, position: Position) -> bool {
        if self.grid.get(position) != Some(CellTag::Pass) {
            return false;
        }
        self.grid.set(position, CellTag::Open);
        self.passes += 1;
        true
    }

    /// Opens the wall at `position` when the caller holds a token.
    ///
    /// Fails without mutation on a non-wall cell, out of bounds, or without
    /// a token. The caller settles token bookkeeping (see [`Self::spend_pass`]).
    pub fn break_wall(&mut self, position: Position, has_token: bool) -> bool {
        if !has_token || self.grid.get(position) != Some(CellTag::Wall) {
            return false;
        }
        self.grid.set(position, CellTag::Open)
    }

    /// Decrements the displayed pass count; refuses to go below zero.
    pub fn spend_pass(&mut self) -> bool {
        if self.passes == 0 {
            return false;
        }
        self.passes -= 1;
        true
    }

    pub fn remaining_coins(&self) -> usize {
        self.grid.count(CellTag::Coin)
    }

    /// True iff `position` is the finish and every coin is gone; in that case
    /// the level advances (or the session completes) before returning.
    pub fn check_finish(&mut self, position: Position) -> Result<bool, GenerationError> {
        if position != self.finish || self.remaining_coins() != 0 {
            return Ok(false);
        }
        self.advance_level()?;
        Ok(true)
    }

    pub fn advance_level(&mut self) -> Result<LevelProgress, GenerationError> {
        if self.level >= self.config.max_levels {
            self.level = self.config.max_levels;
            self.complete = true;
            tracing::info!(level = self.level, "final level cleared");
            return Ok(LevelProgress::SessionComplete);
        }
        let next = self.level + 1;
        self.generate_level(next)?;
        Ok(LevelProgress::Advanced { level: next })
    }

    /// Takes one life; returns true when none are left.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    /// Runs one decision tick for every enemy; returns the decisions taken.
    pub fn tick_enemies(&mut self) -> Vec<EnemyDecision> {
        let params = LearningParams::from_config(&self.config);
        let grid = &self.grid;
        self.enemies
            .iter_mut()
            .filter_map(|enemy| enemy.tick(grid, &params))
            .collect()
    }

    /// Adds an enemy at an enemy-walkable cell. Returns false otherwise.
    pub fn add_enemy(&mut self, position: Position) -> bool {
        if !self.grid.get(position).is_some_and(CellTag::is_enemy_walkable) {
            return false;
        }
        self.enemies
            .push(Enemy::new(position, self.config.enemy_move_delay));
        true
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Pass count shown to the player.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn finish(&self) -> Position {
        self.finish
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn is_game_over(&self) -> bool {
        self.lives == 0
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
