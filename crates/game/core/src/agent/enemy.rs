//! Enemy controller: a throttled decision clock over a tabular value function.
//!
//! Each decision picks the highest-valued action for the enemy's current
//! position, attempts the step, and then applies a one-step bootstrapped
//! update:
//!
//! ```text
//! Q[s][a] <- Q[s][a] + alpha * (reward + gamma * max Q[s'] - Q[s][a])
//! ```
//!
//! `s'` is the attempted destination. The update runs even when the step is
//! rejected and the enemy stays put, so an enemy keeps revising its estimate
//! of a move it never actually makes.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::state::{CellTag, Direction, Grid, Position};

/// Constants of the value update.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LearningParams {
    pub learning_rate: f64,
    pub discount: f64,
    pub reward: f64,
}

impl LearningParams {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            learning_rate: config.learning_rate,
            discount: config.discount,
            reward: config.step_reward,
        }
    }
}

impl Default for LearningParams {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Grow-only map from position to one value per action in [`Direction::ALL`] order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueTable {
    entries: BTreeMap<Position, [f64; 4]>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of states visited so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self, state: Position) -> Option<&[f64; 4]> {
        self.entries.get(&state)
    }

    /// Value of `action` in `state`; unseen entries read as zero.
    pub fn value(&self, state: Position, action: Direction) -> f64 {
        self.values(state)
            .map(|values| values[action.index()])
            .unwrap_or(0.0)
    }

    /// Highest-valued action for `state`, lazily initialising it.
    ///
    /// Ties go to the earliest action in [`Direction::ALL`].
    pub fn best_action(&mut self, state: Position) -> Direction {
        let values = *self.entry(state);
        Direction::ALL
            .into_iter()
            .fold(Direction::ALL[0], |best, action| {
                if values[action.index()] > values[best.index()] {
                    action
                } else {
                    best
                }
            })
    }

    /// Applies one update and returns the new value of `(state, action)`.
    pub fn update(
        &mut self,
        state: Position,
        action: Direction,
        next_state: Position,
        params: &LearningParams,
    ) -> f64 {
        let next_best = self
            .entry(next_state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        let value = &mut self.entry(state)[action.index()];
        *value += params.learning_rate * (params.reward + params.discount * next_best - *value);
        *value
    }

    fn entry(&mut self, state: Position) -> &mut [f64; 4] {
        self.entries.entry(state).or_insert([0.0; 4])
    }
}

/// Record of one enemy decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyDecision {
    pub from: Position,
    pub action: Direction,
    pub target: Position,
    pub moved: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    position: Position,
    move_delay: u32,
    frame_count: u32,
    table: ValueTable,
}

impl Enemy {
    pub fn new(position: Position, move_delay: u32) -> Self {
        Self {
            position,
            move_delay: move_delay.max(1),
            frame_count: 0,
            table: ValueTable::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn move_delay(&self) -> u32 {
        self.move_delay
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    /// Action the enemy would take from `state` right now.
    pub fn choose_action(&mut self, state: Position) -> Direction {
        self.table.best_action(state)
    }

    /// Advances the decision clock; decides once every `move_delay` ticks.
    pub fn tick(&mut self, grid: &Grid, params: &LearningParams) -> Option<EnemyDecision> {
        self.frame_count += 1;
        if self.frame_count < self.move_delay {
            return None;
        }
        self.frame_count = 0;
        Some(self.decide(grid, params))
    }

    /// Chooses, attempts and learns from one action regardless of the clock.
    pub fn decide(&mut self, grid: &Grid, params: &LearningParams) -> EnemyDecision {
        let state = self.position;
        let action = self.choose_action(state);
        let target = state.step(action);

        let moved = grid.get(target).is_some_and(CellTag::is_enemy_walkable);
        if moved {
            self.position = target;
        }
        self.table.update(state, action, target, params);

        tracing::trace!(from = %state, %action, %target, moved, "enemy decision");

        EnemyDecision {
            from: state,
            action,
            target,
            moved,
        }
    }
}
