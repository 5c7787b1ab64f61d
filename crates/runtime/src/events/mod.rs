//! Events emitted by the session driver, one batch per tick.

use maze_core::{MoveRejection, Position};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    CoinCollected {
        position: Position,
        remaining: usize,
    },
    PassCollected {
        position: Position,
        passes: u32,
    },
    WallBroken {
        position: Position,
        passes: u32,
    },
    MoveRejected {
        rejection: MoveRejection,
    },
    PlayerCaught {
        position: Position,
        lives_left: u32,
    },
    LevelAdvanced {
        level: u32,
    },
    SessionComplete {
        level: u32,
    },
    GameOver {
        level: u32,
    },
}

impl GameEvent {
    /// Events that end the session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::SessionComplete { .. } | Self::GameOver { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kind_tag() {
        let event = GameEvent::PlayerCaught {
            position: Position::new(3, 4),
            lives_left: 2,
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["kind"], "player_caught");
        assert_eq!(json["lives_left"], 2);
        assert_eq!(json["position"]["row"], 3);

        let back: GameEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn terminal_events() {
        assert!(GameEvent::GameOver { level: 1 }.is_terminal());
        assert!(GameEvent::SessionComplete { level: 5 }.is_terminal());
        assert!(!GameEvent::LevelAdvanced { level: 2 }.is_terminal());
    }
}
