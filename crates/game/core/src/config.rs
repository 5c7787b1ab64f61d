use crate::error::{ErrorSeverity, GameError};

/// Game configuration constants and tunable parameters.
///
/// Every field has a `DEFAULT_*` associated constant; [`GameConfig::validate`]
/// rejects combinations the generator or the learning rule cannot work with.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GameConfig {
    /// Grid height in cells, border walls included.
    pub rows: u32,
    /// Grid width in cells, border walls included.
    pub cols: u32,
    /// Last playable level; advancing past it completes the session.
    pub max_levels: u32,
    /// Lives granted at the start of every level.
    pub starting_lives: u32,
    /// Coins placed per level number (level 3 gets `3 * coins_per_level`).
    pub coins_per_level: u32,
    /// Pass tokens embedded in every generated maze.
    pub pass_count: u32,
    /// Enemies spawned on every level.
    pub enemy_count: u32,
    /// Ticks between two enemy decisions.
    pub enemy_move_delay: u32,
    /// Step size α of the enemy value update.
    pub learning_rate: f64,
    /// Discount γ applied to the next state's best value.
    pub discount: f64,
    /// Flat reward received by an enemy for every decision.
    pub step_reward: f64,
    /// Upper bound on resample attempts for a single placement.
    pub max_placement_attempts: u32,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROWS: u32 = 21;
    pub const DEFAULT_COLS: u32 = 21;
    pub const DEFAULT_MAX_LEVELS: u32 = 5;
    pub const DEFAULT_STARTING_LIVES: u32 = 3;
    pub const DEFAULT_COINS_PER_LEVEL: u32 = 8;
    pub const DEFAULT_PASS_COUNT: u32 = 5;
    pub const DEFAULT_ENEMY_COUNT: u32 = 3;
    pub const DEFAULT_ENEMY_MOVE_DELAY: u32 = 3;
    pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
    pub const DEFAULT_DISCOUNT: f64 = 0.9;
    pub const DEFAULT_STEP_REWARD: f64 = -1.0;
    pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Smallest grid that still has an interior cell to carve from.
    pub const MIN_DIMENSION: u32 = 3;

    pub fn new() -> Self {
        Self {
            rows: Self::DEFAULT_ROWS,
            cols: Self::DEFAULT_COLS,
            max_levels: Self::DEFAULT_MAX_LEVELS,
            starting_lives: Self::DEFAULT_STARTING_LIVES,
            coins_per_level: Self::DEFAULT_COINS_PER_LEVEL,
            pass_count: Self::DEFAULT_PASS_COUNT,
            enemy_count: Self::DEFAULT_ENEMY_COUNT,
            enemy_move_delay: Self::DEFAULT_ENEMY_MOVE_DELAY,
            learning_rate: Self::DEFAULT_LEARNING_RATE,
            discount: Self::DEFAULT_DISCOUNT,
            step_reward: Self::DEFAULT_STEP_REWARD,
            max_placement_attempts: Self::DEFAULT_MAX_PLACEMENT_ATTEMPTS,
        }
    }

    pub fn with_dimensions(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            ..Self::new()
        }
    }

    /// Number of coins requested for the given level.
    pub fn coins_for_level(&self, level: u32) -> u32 {
        self.coins_per_level.saturating_mul(level)
    }

    /// Open cells in any perfect maze carved on this grid: one per odd
    /// lattice node plus one connector per spanning-tree edge.
    pub fn open_cells(&self) -> u32 {
        let lattice_rows = self.rows.saturating_sub(1) / 2;
        let lattice_cols = self.cols.saturating_sub(1) / 2;
        let nodes = lattice_rows.saturating_mul(lattice_cols);
        nodes.saturating_mul(2).saturating_sub(1)
    }

    /// Distinct cells the busiest level needs: both endpoints, its coins and
    /// every pass, plus one enemy-walkable cell when enemies spawn.
    pub fn required_cells(&self) -> u32 {
        let items = 2u32
            .saturating_add(self.coins_for_level(self.max_levels))
            .saturating_add(self.pass_count);
        if self.enemy_count > 0 { items.max(3) } else { items }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < Self::MIN_DIMENSION || self.cols < Self::MIN_DIMENSION {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.max_levels == 0 {
            return Err(ConfigError::NoLevels);
        }
        if self.enemy_move_delay == 0 {
            return Err(ConfigError::ZeroMoveDelay);
        }
        if self.max_placement_attempts == 0 {
            return Err(ConfigError::ZeroPlacementAttempts);
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(ConfigError::LearningRate(self.learning_rate));
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(ConfigError::Discount(self.discount));
        }
        let (open_cells, required) = (self.open_cells(), self.required_cells());
        if open_cells < required {
            return Err(ConfigError::InsufficientCapacity {
                open_cells,
                required,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural configuration problems reported before any maze is generated.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    #[error("grid must be at least 3x3, got {rows}x{cols}")]
    InvalidDimensions { rows: u32, cols: u32 },

    #[error("max_levels must be at least 1")]
    NoLevels,

    #[error("level {level} is outside 1..={max_levels}")]
    LevelOutOfRange { level: u32, max_levels: u32 },

    #[error("layout must contain exactly one start and one finish cell")]
    MissingEndpoints,

    #[error("enemy_move_delay must be at least 1 tick")]
    ZeroMoveDelay,

    #[error("max_placement_attempts must be at least 1")]
    ZeroPlacementAttempts,

    #[error("maze has {open_cells} open cells but the last level needs {required}")]
    InsufficientCapacity { open_cells: u32, required: u32 },

    #[error("learning rate {0} is outside (0, 1]")]
    LearningRate(f64),

    #[error("discount {0} is outside [0, 1]")]
    Discount(f64),
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDimensions { .. } => "CONFIG_INVALID_DIMENSIONS",
            Self::NoLevels => "CONFIG_NO_LEVELS",
            Self::LevelOutOfRange { .. } => "CONFIG_LEVEL_OUT_OF_RANGE",
            Self::MissingEndpoints => "CONFIG_MISSING_ENDPOINTS",
            Self::ZeroMoveDelay => "CONFIG_ZERO_MOVE_DELAY",
            Self::ZeroPlacementAttempts => "CONFIG_ZERO_PLACEMENT_ATTEMPTS",
            Self::InsufficientCapacity { .. } => "CONFIG_INSUFFICIENT_CAPACITY",
            Self::LearningRate(_) => "CONFIG_LEARNING_RATE",
            Self::Discount(_) => "CONFIG_DISCOUNT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_degenerate_grids() {
        let config = GameConfig::with_dimensions(2, 9);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDimensions { rows: 2, cols: 9 })
        );

        let config = GameConfig::with_dimensions(0, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_delay_and_bad_rates() {
        let mut config = GameConfig::default();
        config.enemy_move_delay = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroMoveDelay));

        let mut config = GameConfig::default();
        config.learning_rate = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::LearningRate(0.0)));

        let mut config = GameConfig::default();
        config.discount = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::Discount(1.5)));
    }

    #[test]
    fn coins_scale_with_level() {
        let config = GameConfig::default();
        assert_eq!(config.coins_for_level(1), 8);
        assert_eq!(config.coins_for_level(4), 32);
    }

    #[test]
    fn open_cells_follow_the_lattice() {
        assert_eq!(GameConfig::default().open_cells(), 199);
        assert_eq!(GameConfig::with_dimensions(5, 7).open_cells(), 11);
        assert_eq!(GameConfig::with_dimensions(6, 6).open_cells(), 7);
        assert_eq!(GameConfig::with_dimensions(3, 3).open_cells(), 1);
    }

    #[test]
    fn rejects_grids_too_small_for_the_last_level() {
        // 7x7 holds 17 open cells; level 5 asks for 2 + 40 + 5.
        let config = GameConfig::with_dimensions(7, 7);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InsufficientCapacity {
                open_cells: 17,
                required: 47
            })
        );

        let config = GameConfig {
            coins_per_level: 2,
            pass_count: 4,
            ..GameConfig::with_dimensions(7, 7)
        };
        assert_eq!(config.required_cells(), 16);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn enemies_need_a_cell_besides_the_endpoints() {
        let config = GameConfig {
            coins_per_level: 0,
            pass_count: 0,
            enemy_count: 1,
            ..GameConfig::with_dimensions(3, 3)
        };
        assert_eq!(config.open_cells(), 1);
        assert_eq!(config.required_cells(), 3);
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "rows": 11, "cols": 15 }"#).unwrap();
        assert_eq!(config.rows, 11);
        assert_eq!(config.cols, 15);
        assert_eq!(config.pass_count, GameConfig::DEFAULT_PASS_COUNT);
    }
}
