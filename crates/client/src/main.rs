//! Headless maze-chase client.
//!
//! Builds a session from environment configuration, lets the autopilot play
//! it, then prints the final frame and (optionally) a JSON summary.
//!
//! ```bash
//! MAZE_SEED=42 MAZE_JSON_SUMMARY=1 RUST_LOG=maze_runtime=debug cargo run -p maze-client
//! ```
mod autopilot;
mod config;
mod format;
mod logging;

use anyhow::{Context, Result};
use maze_runtime::Session;

use crate::autopilot::Autopilot;
use crate::config::ClientConfig;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let game = &config.runtime.game;
    tracing::info!(
        seed = config.runtime.seed,
        rows = game.rows,
        cols = game.cols,
        enemies = game.enemy_count,
        start_level = config.runtime.start_level,
        "starting maze session"
    );

    let mut session = Session::new(config.runtime.clone()).context("failed to build session")?;
    let summary = session
        .run(&mut Autopilot::new(), config.max_ticks)
        .context("session aborted")?;

    println!("{}", format::render(&session.view()));
    if config.json_summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
