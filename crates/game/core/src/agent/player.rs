//! Player controller: one grid step per tick, wall breaking with pass tokens,
//! and item pickup on whatever cell the player ends the tick on.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Direction, LevelState, Position};

/// Input sampled once per tick by the session driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickInput {
    pub direction: Option<Direction>,
    /// Break through a wall in `direction` if a pass token is held.
    pub force: bool,
}

impl TickInput {
    pub const IDLE: Self = Self {
        direction: None,
        force: false,
    };

    pub const fn step(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            force: false,
        }
    }

    pub const fn force(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            force: true,
        }
    }
}

/// Why a movement intent did not change the player's position.
///
/// Rejections are values, not failures: the tick carries on as if no
/// direction had been pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveRejection {
    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is a wall")]
    Blocked { destination: Position },

    #[error("no pass token to break the wall at {destination}")]
    NoPassToken { destination: Position },
}

impl GameError for MoveRejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            Self::Blocked { .. } => "MOVE_BLOCKED",
            Self::NoPassToken { .. } => "MOVE_NO_PASS_TOKEN",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Idle,
    Moved { to: Position },
    BrokeWall { to: Position },
    Rejected(MoveRejection),
}

/// Everything that happened to the player during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerStep {
    pub outcome: MoveOutcome,
    pub collected_coin: bool,
    pub collected_pass: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    position: Position,
    start: Position,
    coins_collected: u32,
    passes_collected: u32,
}

impl Player {
    pub fn new(start: Position) -> Self {
        Self {
            position: start,
            start,
            coins_collected: 0,
            passes_collected: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn coins_collected(&self) -> u32 {
        self.coins_collected
    }

    /// Unspent pass tokens.
    pub fn passes_collected(&self) -> u32 {
        self.passes_collected
    }

    /// Resolves one tick of input, then picks up whatever lies on the
    /// resulting cell.
    pub fn update(&mut self, level: &mut LevelState, input: TickInput) -> PlayerStep {
        let outcome = match input.direction {
            Some(direction) => self.try_move(level, direction, input.force),
            None => MoveOutcome::Idle,
        };

        let collected_coin = level.collect_coin(self.position);
        if collected_coin {
            self.coins_collected += 1;
        }
        let collected_pass = level.collect_pass(self.position);
        if collected_pass {
            self.passes_collected += 1;
        }

        PlayerStep {
            outcome,
            collected_coin,
            collected_pass,
        }
    }

    fn try_move(&mut self, level: &mut LevelState, direction: Direction, force: bool) -> MoveOutcome {
        let destination = self.position.step(direction);
        let Some(tag) = level.grid().get(destination) else {
            return MoveOutcome::Rejected(MoveRejection::OutOfBounds { destination });
        };

        if tag.is_walkable() {
            self.position = destination;
            return MoveOutcome::Moved { to: destination };
        }

        if !force {
            return MoveOutcome::Rejected(MoveRejection::Blocked { destination });
        }
        if !level.break_wall(destination, self.passes_collected > 0) {
            return MoveOutcome::Rejected(MoveRejection::NoPassToken { destination });
        }

        self.passes_collected -= 1;
        level.spend_pass();
        self.position = destination;
        tracing::debug!(%destination, remaining = self.passes_collected, "wall broken");
        MoveOutcome::BrokeWall { to: destination }
    }

    /// Sends the player back to the level's start cell.
    pub fn respawn(&mut self) {
        self.position = self.start;
    }

    /// Moves the player into a freshly generated level.
    ///
    /// Unspent passes are dropped along with the old maze so the player's
    /// tally matches the level's displayed count; the coin tally carries over.
    pub fn enter_level(&mut self, start: Position) {
        self.start = start;
        self.position = start;
        self.passes_collected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::MazeGenerator;
    use crate::state::{CellTag, Grid};

    fn level() -> LevelState {
        let grid = Grid::from_rows(&[
            "#######", //
            "#Sp#c.#",
            "#.###.#",
            "#...F.#",
            "#######",
        ])
        .unwrap();
        let config = GameConfig {
            enemy_count: 0,
            coins_per_level: 1,
            pass_count: 1,
            ..GameConfig::with_dimensions(5, 7)
        };
        LevelState::with_grid(config, MazeGenerator::from_seed(9, 100), 1, grid).unwrap()
    }

    #[test]
    fn moves_freely_onto_open_cells() {
        let mut level = level();
        let mut player = Player::new(level.start());
        let step = player.update(&mut level, TickInput::step(Direction::Down));
        assert_eq!(step.outcome, MoveOutcome::Moved { to: Position::new(2, 1) });
        assert_eq!(player.position(), Position::new(2, 1));
    }

    #[test]
    fn idle_tick_still_picks_up() {
        let mut level = level();
        let mut player = Player::new(Position::new(1, 2));
        let step = player.update(&mut level, TickInput::IDLE);
        assert_eq!(step.outcome, MoveOutcome::Idle);
        assert!(step.collected_pass);
        assert_eq!(player.passes_collected(), 1);
        assert_eq!(level.passes(), 1);

        let step = player.update(&mut level, TickInput::IDLE);
        assert!(!step.collected_pass);
        assert_eq!(player.passes_collected(), 1);
    }

    #[test]
    fn walls_block_without_force() {
        let mut level = level();
        let mut player = Player::new(Position::new(1, 2));
        player.update(&mut level, TickInput::IDLE);

        let step = player.update(&mut level, TickInput::step(Direction::Right));
        assert_eq!(
            step.outcome,
            MoveOutcome::Rejected(MoveRejection::Blocked {
                destination: Position::new(1, 3)
            })
        );
        assert_eq!(player.passes_collected(), 1);
        assert_eq!(level.grid().get(Position::new(1, 3)), Some(CellTag::Wall));
    }

    #[test]
    fn forcing_without_token_is_rejected() {
        let mut level = level();
        let mut player = Player::new(level.start());
        let step = player.update(&mut level, TickInput::force(Direction::Up));
        assert_eq!(
            step.outcome,
            MoveOutcome::Rejected(MoveRejection::NoPassToken {
                destination: Position::new(0, 1)
            })
        );
        assert_eq!(level.passes(), 0);
        assert_eq!(level.grid().get(Position::new(0, 1)), Some(CellTag::Wall));
    }

    #[test]
    fn breaking_a_wall_consumes_exactly_one_pass() {
        let mut level = level();
        let mut player = Player::new(Position::new(1, 2));
        player.update(&mut level, TickInput::IDLE);

        let step = player.update(&mut level, TickInput::force(Direction::Right));
        assert_eq!(step.outcome, MoveOutcome::BrokeWall { to: Position::new(1, 3) });
        assert_eq!(player.passes_collected(), 0);
        assert_eq!(level.passes(), 0);
        assert_eq!(level.grid().get(Position::new(1, 3)), Some(CellTag::Open));

        // The opening is permanent and walking back through costs nothing.
        player.update(&mut level, TickInput::step(Direction::Left));
        let step = player.update(&mut level, TickInput::force(Direction::Right));
        assert_eq!(step.outcome, MoveOutcome::Moved { to: Position::new(1, 3) });
        assert_eq!(level.passes(), 0);
    }

    #[test]
    fn pickup_happens_after_the_move() {
        let mut level = level();
        let mut player = Player::new(Position::new(1, 5));
        let step = player.update(&mut level, TickInput::step(Direction::Left));
        assert!(step.collected_coin);
        assert_eq!(player.coins_collected(), 1);
        assert_eq!(level.remaining_coins(), 0);
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut level = level();
        // Open a border cell so the next step leaves the grid.
        let mut player = Player::new(Position::new(1, 2));
        player.update(&mut level, TickInput::IDLE);
        player.update(&mut level, TickInput::step(Direction::Left));
        player.update(&mut level, TickInput::force(Direction::Up));
        assert_eq!(player.position(), Position::new(0, 1));

        let step = player.update(&mut level, TickInput::step(Direction::Up));
        assert_eq!(
            step.outcome,
            MoveOutcome::Rejected(MoveRejection::OutOfBounds {
                destination: Position::new(-1, 1)
            })
        );
        assert_eq!(player.position(), Position::new(0, 1));
    }

    #[test]
    fn respawn_and_level_entry() {
        let mut level = level();
        let mut player = Player::new(level.start());
        player.update(&mut level, TickInput::step(Direction::Down));
        player.respawn();
        assert_eq!(player.position(), level.start());

        player.enter_level(Position::new(3, 3));
        assert_eq!(player.start(), Position::new(3, 3));
        assert_eq!(player.position(), Position::new(3, 3));
        assert_eq!(player.passes_collected(), 0);
    }
}
