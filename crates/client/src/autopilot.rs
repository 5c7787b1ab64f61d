//! Breadth-first autopilot: nearest coin first, then the finish.
use std::collections::{BTreeSet, VecDeque};

use maze_core::{CellTag, Direction, Grid, Position, TickInput};
use maze_runtime::{InputProvider, SessionView};

#[derive(Clone, Copy, Debug, Default)]
pub struct Autopilot;

impl Autopilot {
    pub fn new() -> Self {
        Self
    }
}

impl InputProvider for Autopilot {
    fn next_input(&mut self, view: &SessionView<'_>) -> TickInput {
        let target = if view.remaining_coins > 0 {
            CellTag::Coin
        } else {
            CellTag::Finish
        };
        let is_goal = |tag: CellTag| tag == target;

        // Route around enemies when possible, straight through otherwise.
        first_step(view.grid, view.player, &view.enemies, is_goal)
            .or_else(|| first_step(view.grid, view.player, &[], is_goal))
            .map_or(TickInput::IDLE, TickInput::step)
    }
}

/// First move on a shortest walkable path from `from` to any cell whose tag
/// satisfies `is_goal`, skipping `blocked` cells.
pub fn first_step<F>(
    grid: &Grid,
    from: Position,
    blocked: &[Position],
    is_goal: F,
) -> Option<Direction>
where
    F: Fn(CellTag) -> bool,
{
    let mut seen = BTreeSet::from([from]);
    let mut queue: VecDeque<(Position, Direction)> = Direction::ALL
        .into_iter()
        .map(|direction| (from.step(direction), direction))
        .collect();
    seen.extend(queue.iter().map(|(position, _)| *position));

    while let Some((position, first)) = queue.pop_front() {
        let Some(tag) = grid.get(position) else {
            continue;
        };
        if !tag.is_walkable() || blocked.contains(&position) {
            continue;
        }
        if is_goal(tag) {
            return Some(first);
        }
        for direction in Direction::ALL {
            let next = position.step(direction);
            if seen.insert(next) {
                queue.push_back((next, first));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{GameConfig, LevelState, MazeGenerator};
    use maze_runtime::{RuntimeConfig, Session, SessionStatus};

    fn layout() -> Grid {
        Grid::from_rows(&[
            "#######", //
            "#S.c#p#",
            "#.###.#",
            "#..F..#",
            "#######",
        ])
        .unwrap()
    }

    #[test]
    fn heads_for_the_nearest_goal() {
        let grid = layout();
        let coin = |tag: CellTag| tag == CellTag::Coin;
        let finish = |tag: CellTag| tag == CellTag::Finish;

        assert_eq!(first_step(&grid, Position::new(1, 1), &[], coin), Some(Direction::Right));
        assert_eq!(first_step(&grid, Position::new(1, 1), &[], finish), Some(Direction::Down));
        assert_eq!(first_step(&grid, Position::new(1, 3), &[], finish), Some(Direction::Left));
    }

    #[test]
    fn blocked_cells_cut_the_route() {
        let grid = layout();
        let coin = |tag: CellTag| tag == CellTag::Coin;
        assert_eq!(
            first_step(&grid, Position::new(1, 1), &[Position::new(1, 2)], coin),
            None
        );
        assert_eq!(
            first_step(&grid, Position::new(1, 1), &[], |tag| tag == CellTag::Wall),
            None
        );
    }

    #[test]
    fn clears_a_prepared_layout() {
        let game = GameConfig {
            enemy_count: 0,
            coins_per_level: 1,
            pass_count: 1,
            max_levels: 1,
            ..GameConfig::with_dimensions(5, 7)
        };
        let level =
            LevelState::with_grid(game.clone(), MazeGenerator::from_seed(3, 100), 1, layout())
                .unwrap();
        let mut session = Session::builder()
            .config(RuntimeConfig {
                game,
                ..RuntimeConfig::default()
            })
            .level_state(level)
            .build()
            .unwrap();

        let summary = session.run(&mut Autopilot::new(), 50).unwrap();
        assert_eq!(summary.status, SessionStatus::Complete);
        // 2 ticks to the coin, 2 back, 4 down to the finish.
        assert_eq!(summary.ticks, 8);
    }

    #[test]
    fn clears_every_generated_level_without_enemies() {
        let mut config = RuntimeConfig::with_seed(11);
        config.game.enemy_count = 0;
        let mut session = Session::new(config).unwrap();

        let summary = session.run(&mut Autopilot::new(), 20_000).unwrap();

        assert_eq!(summary.status, SessionStatus::Complete);
        assert_eq!(summary.level, 5);
        assert_eq!(summary.coins_collected, 8 + 16 + 24 + 32 + 40);
    }
}
