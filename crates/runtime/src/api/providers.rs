//! Abstraction for sourcing player intent.
//!
//! Session users plug in [`InputProvider`] implementations so a session can
//! run with polled keyboard input, scripted fixtures, or an autopilot.
use std::collections::VecDeque;

use maze_core::TickInput;

use crate::runtime::SessionView;

/// Supplies one [`TickInput`] per tick.
///
/// Different implementations can handle:
/// - Human input polled by a frontend
/// - Scripted/replayed inputs
/// - Autopilots that read the grid
pub trait InputProvider {
    fn next_input(&mut self, view: &SessionView<'_>) -> TickInput;
}

/// Never moves. Useful for testing or as a fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleInput;

impl InputProvider for IdleInput {
    fn next_input(&mut self, _view: &SessionView<'_>) -> TickInput {
        TickInput::IDLE
    }
}

/// Replays a fixed input sequence, then idles.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    inputs: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl FromIterator<TickInput> for ScriptedInput {
    fn from_iter<I: IntoIterator<Item = TickInput>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl InputProvider for ScriptedInput {
    fn next_input(&mut self, _view: &SessionView<'_>) -> TickInput {
        self.inputs.pop_front().unwrap_or(TickInput::IDLE)
    }
}
