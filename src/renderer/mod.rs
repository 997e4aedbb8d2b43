//! Rendering seam
//!
//! Renderers read the grid and the player and never mutate game state. The
//! DOM renderer lives in the wasm entry point; `TextRenderer` serves native
//! builds and tests.

pub mod text;

pub use text::TextRenderer;

use crate::sim::{Entity, GameEvent, GameState, Grid};

pub trait Renderer {
    /// Draw every cell (called at startup and after the grid is rebuilt)
    fn draw_grid(&mut self, grid: &Grid);

    /// Draw the player at its position with its current visual tags
    fn draw_player(&mut self, player: &Entity);

    /// Drain queued events and redraw what they touched. Returns the number
    /// of events handled.
    fn present(&mut self, state: &mut GameState) -> usize {
        let events = state.drain_events();
        if events.is_empty() {
            return 0;
        }
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::GridRegenerated { .. }))
        {
            self.draw_grid(state.grid());
        }
        self.draw_player(state.player());
        events.len()
    }
}
