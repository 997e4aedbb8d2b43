//! Character-cell renderer
//!
//! One character per grid cell: `.` for floor, an arrow glyph for the player
//! showing which way it faces.

use super::Renderer;
use crate::sim::{Direction, Entity, Grid};

const FLOOR: char = '.';

fn player_glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

#[derive(Debug, Default)]
pub struct TextRenderer {
    cell_size: u32,
    lines: Vec<Vec<char>>,
    /// Column/row currently holding the player glyph
    player_at: Option<(usize, usize)>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current frame, one line per grid row
    pub fn frame(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn slot(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if self.cell_size == 0 || x < 0 || y < 0 {
            return None;
        }
        let col = x as usize / self.cell_size as usize;
        let row = y as usize / self.cell_size as usize;
        (row < self.lines.len() && col < self.lines[row].len()).then_some((col, row))
    }
}

impl Renderer for TextRenderer {
    fn draw_grid(&mut self, grid: &Grid) {
        self.cell_size = grid.cell_size();
        self.lines = vec![vec![FLOOR; grid.columns()]; grid.rows()];
        self.player_at = None;
    }

    fn draw_player(&mut self, player: &Entity) {
        if let Some((col, row)) = self.player_at.take() {
            self.lines[row][col] = FLOOR;
        }
        let position = player.position();
        match self.slot(position.x(), position.y()) {
            Some((col, row)) => {
                self.lines[row][col] = player_glyph(player.direction());
                self.player_at = Some((col, row));
            }
            None => log::warn!(
                "Player at ({}, {}) is outside the drawn grid",
                position.x(),
                position.y()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{GameState, Rules};

    fn state(width: u32, height: u32) -> GameState {
        let config = GameConfig {
            cell_size: 64,
            viewport_width: width,
            viewport_height: height,
        };
        GameState::new(config, Rules::default()).unwrap()
    }

    #[test]
    fn test_initial_frame() {
        let state = state(192, 128);
        let mut r = TextRenderer::new();
        r.draw_grid(state.grid());
        r.draw_player(state.player());
        assert_eq!(r.frame(), "v..\n...");
    }

    #[test]
    fn test_present_redraws_after_move() {
        let mut state = state(192, 128);
        let mut r = TextRenderer::new();
        r.draw_grid(state.grid());
        r.draw_player(state.player());

        state.handle_key_input("ArrowRight");
        assert_eq!(r.present(&mut state), 1);
        assert_eq!(r.frame(), ".>.\n...");

        state.handle_key_input("ArrowDown");
        r.present(&mut state);
        assert_eq!(r.frame(), "...\n.v.");
    }

    #[test]
    fn test_present_without_events_is_noop() {
        let mut state = state(128, 128);
        let mut r = TextRenderer::new();
        r.draw_grid(state.grid());
        r.draw_player(state.player());

        state.handle_key_input("ArrowUp");
        state.handle_key_input("KeyA");
        assert_eq!(r.present(&mut state), 0);
        assert_eq!(r.frame(), "v.\n..");
    }
}
