//! Game state and the movement state machine
//!
//! `GameState` owns the grid and the player. Input enters through
//! `handle_key_input`; every visible change is queued as a `GameEvent` for
//! the renderer to drain.

use log::{debug, info};

use super::entity::{Direction, Entity};
use super::grid::{Grid, UpperBound};
use super::movement::{DirectionPolicy, MoveResult, try_move};
use super::position::Position;
use crate::config::GameConfig;
use crate::consts::PLAYER_ID;
use crate::error::ConfigError;
use crate::input;

/// Behaviour switches that change how the grid and moves resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rules {
    pub upper_bound: UpperBound,
    pub direction_policy: DirectionPolicy,
    /// Rebuild the grid when the viewport changes (inert when false)
    pub regenerate_on_resize: bool,
    /// Pixels trimmed from each viewport axis before generating
    pub viewport_inset: u32,
}

/// Change notifications for observers (the renderer)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Player stepped to a new cell
    PlayerMoved {
        from: Position,
        to: Position,
        direction: Direction,
    },
    /// Player turned in place (rejected move under `DirectionPolicy::Always`)
    PlayerTurned { direction: Direction },
    /// Grid was rebuilt after a viewport change
    GridRegenerated { columns: usize, rows: usize },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    player: Entity,
    rules: Rules,
    /// Last viewport size the state accepted (a failed rebuild keeps the old one)
    viewport: (u32, u32),
    events: Vec<GameEvent>,
}

impl GameState {
    /// Generate the grid and place the player at the origin
    pub fn new(config: GameConfig, rules: Rules) -> Result<Self, ConfigError> {
        let viewport = (config.viewport_width, config.viewport_height);
        let grid = build_grid(viewport, config.cell_size, &rules)?;
        let player = Entity::new(PLAYER_ID, Position::ORIGIN);

        info!(
            "Player {} placed at ({}, {})",
            player.id(),
            player.position().x(),
            player.position().y()
        );

        Ok(Self {
            grid,
            player,
            rules,
            viewport,
            events: Vec::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Single input entry point. Unknown codes are ignored and return `None`.
    pub fn handle_key_input(&mut self, code: &str) -> Option<MoveResult> {
        let direction = input::decode(code)?;
        Some(self.apply_intent(direction))
    }

    /// Validate and apply one movement intent
    pub fn apply_intent(&mut self, direction: Direction) -> MoveResult {
        let from = self.player.position();
        let facing = self.player.direction();
        let result = try_move(&self.player, direction, &self.grid, self.rules.direction_policy);

        if result.accepted {
            self.player.apply(&result);
            debug!(
                "Moved {} to ({}, {})",
                direction.as_str(),
                result.new_position.x(),
                result.new_position.y()
            );
            self.events.push(GameEvent::PlayerMoved {
                from,
                to: result.new_position,
                direction,
            });
        } else {
            debug!(
                "Rejected {} from ({}, {})",
                direction.as_str(),
                from.x(),
                from.y()
            );
            if result.new_direction != facing {
                self.player.apply(&result);
                self.events.push(GameEvent::PlayerTurned {
                    direction: result.new_direction,
                });
            }
        }

        result
    }

    /// Record a viewport change.
    ///
    /// Only the stored size changes unless `regenerate_on_resize` is set. A
    /// failed regeneration keeps both the previous grid and the previous
    /// size. If the player's cell is gone after regenerating, the player goes
    /// back to the origin.
    pub fn on_viewport_resize(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        if !self.rules.regenerate_on_resize {
            self.viewport = (width, height);
            debug!("Viewport resized to {}x{} (grid kept)", width, height);
            return Ok(());
        }

        let grid = build_grid((width, height), self.grid.cell_size(), &self.rules)?;
        self.grid = grid;
        self.viewport = (width, height);
        self.events.push(GameEvent::GridRegenerated {
            columns: self.grid.columns(),
            rows: self.grid.rows(),
        });

        let from = self.player.position();
        if !self.grid.contains(from) {
            self.player.place(Position::ORIGIN);
            info!(
                "Player cell ({}, {}) left the grid, reset to origin",
                from.x(),
                from.y()
            );
            self.events.push(GameEvent::PlayerMoved {
                from,
                to: Position::ORIGIN,
                direction: self.player.direction(),
            });
        }

        Ok(())
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

fn build_grid(viewport: (u32, u32), cell_size: u32, rules: &Rules) -> Result<Grid, ConfigError> {
    let (width, height) = viewport;
    let inset = rules.viewport_inset;
    if width <= inset || height <= inset {
        return Err(ConfigError::InvalidViewport {
            width: width as i64 - inset as i64,
            height: height as i64 - inset as i64,
        });
    }
    Grid::generate_with(width - inset, height - inset, cell_size, rules.upper_bound)
}
