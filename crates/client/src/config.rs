//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use maze_runtime::RuntimeConfig;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    /// Tick budget for the autopilot run.
    pub max_ticks: u64,
    /// Also write logs to `<dir>/maze.log` when set.
    pub log_dir: Option<PathBuf>,
    /// Print the run summary as JSON after the final frame.
    pub json_summary: bool,
}

impl ClientConfig {
    pub const DEFAULT_MAX_TICKS: u64 = 20_000;

    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MAZE_SEED` - Session seed (default: random)
    /// - `MAZE_ROWS`, `MAZE_COLS` - Grid size (default: 21x21)
    /// - `MAZE_ENEMIES` - Enemies per level (default: 3)
    /// - `MAZE_START_LEVEL` - First level (default: 1)
    /// - `MAZE_MAX_TICKS` - Tick budget (default: 20000)
    /// - `MAZE_LOG_DIR` - Directory for a log file (default: none)
    /// - `MAZE_JSON_SUMMARY` - Print a JSON summary (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut runtime = RuntimeConfig::with_seed(
            read("MAZE_SEED")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or_else(rand::random::<u64>),
        );
        if let Some(rows) = parse(read("MAZE_ROWS")) {
            runtime.game.rows = rows;
        }
        if let Some(cols) = parse(read("MAZE_COLS")) {
            runtime.game.cols = cols;
        }
        if let Some(enemies) = parse(read("MAZE_ENEMIES")) {
            runtime.game.enemy_count = enemies;
        }
        if let Some(level) = parse(read("MAZE_START_LEVEL")) {
            runtime.start_level = level;
        }

        Self {
            runtime,
            max_ticks: parse(read("MAZE_MAX_TICKS")).unwrap_or(Self::DEFAULT_MAX_TICKS),
            log_dir: read("MAZE_LOG_DIR").map(PathBuf::from),
            json_summary: read("MAZE_JSON_SUMMARY").is_some_and(|v| is_truthy(&v)),
        }
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("MAZE_SEED", "42"),
            ("MAZE_ROWS", "11"),
            ("MAZE_COLS", "15"),
            ("MAZE_ENEMIES", "0"),
            ("MAZE_START_LEVEL", "2"),
            ("MAZE_MAX_TICKS", "500"),
            ("MAZE_LOG_DIR", "/tmp/maze"),
            ("MAZE_JSON_SUMMARY", "yes"),
        ]);
        assert_eq!(config.runtime.seed, 42);
        assert_eq!(config.runtime.game.rows, 11);
        assert_eq!(config.runtime.game.cols, 15);
        assert_eq!(config.runtime.game.enemy_count, 0);
        assert_eq!(config.runtime.start_level, 2);
        assert_eq!(config.max_ticks, 500);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/maze")));
        assert!(config.json_summary);
    }

    #[test]
    fn unparsable_values_keep_defaults() {
        let config = config(&[("MAZE_SEED", "7"), ("MAZE_ROWS", "many"), ("MAZE_LOG_DIR", " ")]);
        assert_eq!(config.runtime.seed, 7);
        assert_eq!(config.runtime.game.rows, 21);
        assert_eq!(config.max_ticks, ClientConfig::DEFAULT_MAX_TICKS);
        assert_eq!(config.log_dir, None);
        assert!(!config.json_summary);
    }
}
