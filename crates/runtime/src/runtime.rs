//! Session orchestration.
//!
//! A [`Session`] owns one [`LevelState`] and one [`Player`] and advances them
//! one tick at a time. Each tick resolves the player first, then the enemies,
//! then collision, then the finish check.
use maze_core::{
    ConfigError, EnemyDecision, GameConfig, Grid, LevelState, MoveOutcome, Player, PlayerStep,
    Position, TickInput, compute_seed,
};
use serde::{Deserialize, Serialize};

use crate::api::{InputProvider, Result};
use crate::events::GameEvent;

/// Runtime configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Base seed; restarts derive their seeds from it.
    pub seed: u64,
    /// Level every new session starts on.
    pub start_level: u32,
    /// Edge length of a cell in pixels, used for collision boxes.
    pub grid_pitch: u32,
}

impl RuntimeConfig {
    pub const DEFAULT_START_LEVEL: u32 = 1;
    pub const DEFAULT_GRID_PITCH: u32 = 37;

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.game.validate()?;
        check_level(&self.game, self.start_level)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seed: 0,
            start_level: Self::DEFAULT_START_LEVEL,
            grid_pitch: Self::DEFAULT_GRID_PITCH,
        }
    }
}

fn check_level(game: &GameConfig, level: u32) -> std::result::Result<(), ConfigError> {
    if level == 0 || level > game.max_levels {
        return Err(ConfigError::LevelOutOfRange {
            level,
            max_levels: game.max_levels,
        });
    }
    Ok(())
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    Running,
    GameOver,
    Complete,
}

impl SessionStatus {
    fn of(level: &LevelState) -> Self {
        if level.is_complete() {
            Self::Complete
        } else if level.is_game_over() {
            Self::GameOver
        } else {
            Self::Running
        }
    }
}

/// What happened during one call to [`Session::tick`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// `None` when the session had already ended.
    pub player: Option<PlayerStep>,
    pub enemy_decisions: Vec<EnemyDecision>,
    pub events: Vec<GameEvent>,
    pub status: SessionStatus,
}

/// Read-only snapshot handed to renderers and input providers.
#[derive(Clone, Debug)]
pub struct SessionView<'a> {
    pub grid: &'a Grid,
    pub level: u32,
    pub lives: u32,
    pub passes: u32,
    pub remaining_coins: usize,
    pub player: Position,
    pub enemies: Vec<Position>,
    pub status: SessionStatus,
    pub tick: u64,
}

/// End-of-run totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub level: u32,
    pub lives: u32,
    pub coins_collected: u32,
    pub remaining_coins: usize,
    pub status: SessionStatus,
}

/// True when the pitch-sized boxes anchored at `a` and `b` intersect.
pub fn overlaps(a: Position, b: Position, pitch: u32) -> bool {
    let size = i64::from(pitch.max(1));
    let (ax, ay) = a.to_pixels(pitch.max(1));
    let (bx, by) = b.to_pixels(pitch.max(1));
    (ax - bx).abs() < size && (ay - by).abs() < size
}

#[derive(Debug)]
pub struct Session {
    config: RuntimeConfig,
    level: LevelState,
    player: Player,
    status: SessionStatus,
    tick: u64,
    epoch: u64,
}

impl Session {
    /// Generates the configured start level.
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        config.validate()?;
        let level = Self::generate(&config, config.start_level, 0)?;
        Ok(Self::assemble(config, level, 0))
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    fn generate(config: &RuntimeConfig, level: u32, epoch: u64) -> Result<LevelState> {
        let seed = compute_seed(config.seed, epoch);
        Ok(LevelState::from_seed(config.game.clone(), seed, level)?)
    }

    fn assemble(config: RuntimeConfig, level: LevelState, epoch: u64) -> Self {
        let player = Player::new(level.start());
        let status = SessionStatus::of(&level);
        Self {
            config,
            level,
            player,
            status,
            tick: 0,
            epoch,
        }
    }

    /// Throws away the current session and starts a fresh one on `level`.
    ///
    /// On error the current session is left untouched.
    pub fn new_session(&mut self, level: u32) -> Result<()> {
        check_level(&self.config.game, level)?;
        let epoch = self.epoch + 1;
        let state = Self::generate(&self.config, level, epoch)?;
        tracing::info!(level, epoch, "new session");
        *self = Self::assemble(self.config.clone(), state, epoch);
        Ok(())
    }

    /// Starts over on the configured start level with full lives.
    pub fn restart(&mut self) -> Result<()> {
        self.new_session(self.config.start_level)
    }

    /// Advances the session by one tick. No-op once the session has ended.
    pub fn tick(&mut self, input: TickInput) -> Result<TickReport> {
        if self.status != SessionStatus::Running {
            return Ok(TickReport {
                tick: self.tick,
                player: None,
                enemy_decisions: Vec::new(),
                events: Vec::new(),
                status: self.status,
            });
        }
        self.tick += 1;

        let mut events = Vec::new();
        let step = self.player.update(&mut self.level, input);
        self.record_step(&step, &mut events);

        let enemy_decisions = self.level.tick_enemies();

        if self.caught() {
            let position = self.player.position();
            let out_of_lives = self.level.lose_life();
            self.player.respawn();
            events.push(GameEvent::PlayerCaught {
                position,
                lives_left: self.level.lives(),
            });
            if out_of_lives {
                self.status = SessionStatus::GameOver;
                events.push(GameEvent::GameOver {
                    level: self.level.level(),
                });
                tracing::info!(level = self.level.level(), tick = self.tick, "game over");
            }
        }

        if self.status == SessionStatus::Running && self.level.check_finish(self.player.position())?
        {
            if self.level.is_complete() {
                self.status = SessionStatus::Complete;
                events.push(GameEvent::SessionComplete {
                    level: self.level.level(),
                });
            } else {
                self.player.enter_level(self.level.start());
                events.push(GameEvent::LevelAdvanced {
                    level: self.level.level(),
                });
            }
        }

        for event in &events {
            tracing::debug!(tick = self.tick, ?event, "game event");
        }

        Ok(TickReport {
            tick: self.tick,
            player: Some(step),
            enemy_decisions,
            events,
            status: self.status,
        })
    }

    fn record_step(&self, step: &PlayerStep, events: &mut Vec<GameEvent>) {
        let position = self.player.position();
        match step.outcome {
            MoveOutcome::BrokeWall { to } => events.push(GameEvent::WallBroken {
                position: to,
                passes: self.level.passes(),
            }),
            MoveOutcome::Rejected(rejection) => {
                events.push(GameEvent::MoveRejected { rejection })
            }
            MoveOutcome::Idle | MoveOutcome::Moved { .. } => {}
        }
        if step.collected_coin {
            events.push(GameEvent::CoinCollected {
                position,
                remaining: self.level.remaining_coins(),
            });
        }
        if step.collected_pass {
            events.push(GameEvent::PassCollected {
                position,
                passes: self.level.passes(),
            });
        }
    }

    fn caught(&self) -> bool {
        let player = self.player.position();
        self.level
            .enemies()
            .iter()
            .any(|enemy| overlaps(player, enemy.position(), self.config.grid_pitch))
    }

    /// Polls `provider` once per tick until the session ends or `max_ticks`
    /// ticks have run.
    pub fn run<P>(&mut self, provider: &mut P, max_ticks: u64) -> Result<RunSummary>
    where
        P: InputProvider + ?Sized,
    {
        let mut budget = max_ticks;
        while self.status == SessionStatus::Running && budget > 0 {
            let input = provider.next_input(&self.view());
            self.tick(input)?;
            budget -= 1;
        }

        let summary = self.summary();
        tracing::info!(
            ticks = summary.ticks,
            level = summary.level,
            lives = summary.lives,
            status = %summary.status,
            "run finished"
        );
        Ok(summary)
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            grid: self.level.grid(),
            level: self.level.level(),
            lives: self.level.lives(),
            passes: self.level.passes(),
            remaining_coins: self.level.remaining_coins(),
            player: self.player.position(),
            enemies: self.level.enemies().iter().map(|e| e.position()).collect(),
            status: self.status,
            tick: self.tick,
        }
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.config.seed,
            ticks: self.tick,
            level: self.level.level(),
            lives: self.level.lives(),
            coins_collected: self.player.coins_collected(),
            remaining_coins: self.level.remaining_coins(),
            status: self.status,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn level_state(&self) -> &LevelState {
        &self.level
    }

    /// Direct access for fixtures, e.g. placing enemies by hand.
    pub fn level_state_mut(&mut self) -> &mut LevelState {
        &mut self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Number of restarts since the session was created.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Builder for [`Session`]
#[derive(Debug, Default)]
pub struct SessionBuilder {
    config: RuntimeConfig,
    level: Option<LevelState>,
}

impl SessionBuilder {
    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from a prepared level instead of generating one
    pub fn level_state(mut self, level: LevelState) -> Self {
        self.level = Some(level);
        self
    }

    pub fn build(self) -> Result<Session> {
        match self.level {
            Some(level) => Ok(Session::assemble(self.config, level, 0)),
            None => Session::new(self.config),
        }
    }
}
