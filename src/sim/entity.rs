//! The player entity, its facing direction and the visual tags derived from it

use glam::IVec2;

use super::movement::MoveResult;
use super::position::Position;

/// Facing / movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in screen space (y grows downward)
    pub fn unit(&self) -> IVec2 {
        match self {
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Tag shared by every resting pose
pub const IDLE_TAG: &str = "idle";

/// Display tags for a facing direction, e.g. `["idle", "down"]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualTags([&'static str; 2]);

impl VisualTags {
    pub fn as_slice(&self) -> &[&'static str] {
        &self.0
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(&tag)
    }

    /// Tags to drop and tags to apply when switching from `self` to `next`
    pub fn transition(&self, next: &VisualTags) -> TagTransition {
        TagTransition {
            remove: self.0.iter().copied().filter(|t| !next.contains(t)).collect(),
            add: next.0.iter().copied().filter(|t| !self.contains(t)).collect(),
        }
    }
}

/// Difference between two tag sets, applied by the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTransition {
    pub remove: Vec<&'static str>,
    pub add: Vec<&'static str>,
}

impl TagTransition {
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.add.is_empty()
    }
}

/// Visual tags for a direction. Pure; applying them is the renderer's job.
pub fn derive_visual_state(direction: Direction) -> VisualTags {
    VisualTags([IDLE_TAG, direction.as_str()])
}

/// A controllable actor on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: u32,
    position: Position,
    direction: Direction,
    /// Always false: moves are instantaneous, there is no walk animation
    is_moving: bool,
}

impl Entity {
    /// New idle entity facing down
    pub fn new(id: u32, position: Position) -> Self {
        Self {
            id,
            position,
            direction: Direction::default(),
            is_moving: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn visual_tags(&self) -> VisualTags {
        derive_visual_state(self.direction)
    }

    /// Commit a movement outcome (position and direction together)
    pub(crate) fn apply(&mut self, result: &MoveResult) {
        self.position = result.new_position;
        self.direction = result.new_direction;
    }

    /// Teleport without turning (used when the grid is rebuilt under the entity)
    pub(crate) fn place(&mut self, position: Position) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entity_is_idle_facing_down() {
        let e = Entity::new(1, Position::ORIGIN);
        assert_eq!(e.direction(), Direction::Down);
        assert!(!e.is_moving());
        assert_eq!(e.visual_tags().as_slice(), &["idle", "down"]);
    }

    #[test]
    fn test_visual_state_per_direction() {
        assert_eq!(derive_visual_state(Direction::Up).as_slice(), &["idle", "up"]);
        assert_eq!(derive_visual_state(Direction::Down).as_slice(), &["idle", "down"]);
        assert_eq!(derive_visual_state(Direction::Left).as_slice(), &["idle", "left"]);
        assert_eq!(derive_visual_state(Direction::Right).as_slice(), &["idle", "right"]);
    }

    #[test]
    fn test_tag_transition_keeps_shared_tags() {
        let down = derive_visual_state(Direction::Down);
        let left = derive_visual_state(Direction::Left);
        let t = down.transition(&left);
        assert_eq!(t.remove, vec!["down"]);
        assert_eq!(t.add, vec!["left"]);
        assert!(down.transition(&down).is_empty());
    }

    #[test]
    fn test_units_are_axis_aligned() {
        for d in Direction::ALL {
            let u = d.unit();
            assert_eq!(u.x.abs() + u.y.abs(), 1);
            assert_eq!(d.is_horizontal(), u.x != 0);
        }
        assert_eq!(Direction::Up.unit(), IVec2::new(0, -1));
    }
}
