//! Plain-text frame rendering.
use maze_runtime::SessionView;

const PLAYER: char = '@';
const ENEMY: char = 'E';

/// Renders the grid with the player and enemies overlaid, followed by a
/// status line.
pub fn render(view: &SessionView<'_>) -> String {
    let mut rows: Vec<Vec<char>> = view
        .grid
        .to_rows()
        .into_iter()
        .map(|row| row.chars().collect())
        .collect();

    let mut mark = |row: i32, col: i32, glyph: char| {
        let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) else {
            return;
        };
        if let Some(cell) = rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = glyph;
        }
    };
    for enemy in &view.enemies {
        mark(enemy.row, enemy.col, ENEMY);
    }
    mark(view.player.row, view.player.col, PLAYER);

    let mut out: String = rows
        .into_iter()
        .map(|row| row.into_iter().collect::<String>() + "\n")
        .collect();
    out.push_str(&format!(
        "level {} | lives {} | passes {} | coins left {} | tick {} | {}",
        view.level, view.lives, view.passes, view.remaining_coins, view.tick, view.status
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{Grid, Position};
    use maze_runtime::SessionStatus;

    #[test]
    fn overlays_actors_on_the_grid() {
        let grid = Grid::from_rows(&["#####", "#S.c#", "###F#", "#####"]).unwrap();
        let view = SessionView {
            grid: &grid,
            level: 2,
            lives: 3,
            passes: 1,
            remaining_coins: 1,
            player: Position::new(1, 2),
            enemies: vec![Position::new(1, 3)],
            status: SessionStatus::Running,
            tick: 14,
        };

        let frame = render(&view);
        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines[1], "#S@E#");
        assert_eq!(lines[2], "###F#");
        assert_eq!(
            lines[4],
            "level 2 | lives 3 | passes 1 | coins left 1 | tick 14 | running"
        );
    }
}
