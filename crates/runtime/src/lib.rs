//! Synchronous session driver for the maze-chase core.
//!
//! [`Session`] wires a [`maze_core::LevelState`] and a [`maze_core::Player`]
//! into a tick loop with collision, lives and level progression. Input comes
//! from an [`InputProvider`]; every tick reports its [`GameEvent`]s.
//!
//! - [`runtime`] hosts the session and its builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] defines the per-tick events
pub mod api;
pub mod events;
pub mod runtime;

pub use api::{IdleInput, InputProvider, Result, RuntimeError, ScriptedInput};
pub use events::GameEvent;
pub use runtime::{
    RunSummary, RuntimeConfig, Session, SessionBuilder, SessionStatus, SessionView, TickReport,
    overlaps,
};
