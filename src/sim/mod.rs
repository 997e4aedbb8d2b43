//! Grid and movement core
//!
//! All gameplay logic lives here. This module must stay pure:
//! - No rendering or platform dependencies
//! - State changes only through `GameState`
//! - Rejected moves are values, not errors

pub mod entity;
pub mod grid;
pub mod movement;
pub mod position;
pub mod state;

pub use entity::{
    Direction, Entity, IDLE_TAG, TagTransition, VisualTags, derive_visual_state,
};
pub use grid::{Cell, Grid, UpperBound};
pub use movement::{DirectionPolicy, MoveResult, try_move};
pub use position::Position;
pub use state::{GameEvent, GameState, Rules};
