//! Single-cell movement with bounds checking
//!
//! A move targets the neighbouring cell one `cell_size` away. Horizontal moves
//! look up `grid[entity.y][candidate.x]`, vertical moves look up
//! `grid[candidate.y][entity.x]`. A missing cell rejects the move; rejection
//! is an ordinary result, never an error.

use serde::{Deserialize, Serialize};

use super::entity::{Direction, Entity};
use super::grid::Grid;
use super::position::Position;

/// Whether a rejected move still turns the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionPolicy {
    /// Facing changes only together with an accepted move
    #[default]
    OnAccept,
    /// Facing follows every attempt, accepted or not
    Always,
}

/// Outcome of a move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub accepted: bool,
    pub new_position: Position,
    pub new_direction: Direction,
}

/// Compute the outcome of moving `entity` one cell toward `direction`.
///
/// Uses the cell size `grid` was generated with. Does not mutate anything.
pub fn try_move(
    entity: &Entity,
    direction: Direction,
    grid: &Grid,
    policy: DirectionPolicy,
) -> MoveResult {
    let current = entity.position();
    let step = direction.unit() * grid.cell_size() as i32;

    let target = current.offset(step).filter(|candidate| {
        if direction.is_horizontal() {
            grid.has_cell(candidate.x(), current.y())
        } else {
            grid.has_cell(current.x(), candidate.y())
        }
    });

    match target {
        Some(new_position) => MoveResult {
            accepted: true,
            new_position,
            new_direction: direction,
        },
        None => MoveResult {
            accepted: false,
            new_position: current,
            new_direction: match policy {
                DirectionPolicy::OnAccept => entity.direction(),
                DirectionPolicy::Always => direction,
            },
        },
    }
}
