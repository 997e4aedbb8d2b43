//! Grid coordinates

use glam::IVec2;

/// A pixel coordinate on the grid.
///
/// Positions are values: moving an entity replaces its position with a new
/// one rather than editing the axes one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn as_ivec2(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// New position shifted by `delta`, or `None` if an axis would overflow
    pub fn offset(&self, delta: IVec2) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(delta.x)?,
            y: self.y.checked_add(delta.y)?,
        })
    }

    /// True if both axes are non-negative multiples of `cell_size`
    pub fn is_aligned(&self, cell_size: u32) -> bool {
        let step = cell_size as i64;
        step > 0
            && self.x >= 0
            && self.y >= 0
            && self.x as i64 % step == 0
            && self.y as i64 % step == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_returns_new_value() {
        let p = Position::new(64, 128);
        let moved = p.offset(IVec2::new(64, 0)).unwrap();
        assert_eq!(moved, Position::new(128, 128));
        assert_eq!(p, Position::new(64, 128));
    }

    #[test]
    fn test_offset_overflow() {
        let p = Position::new(i32::MAX, 0);
        assert_eq!(p.offset(IVec2::X), None);
        assert_eq!(p.offset(IVec2::NEG_X), Some(Position::new(i32::MAX - 1, 0)));
    }

    #[test]
    fn test_alignment() {
        assert!(Position::ORIGIN.is_aligned(64));
        assert!(Position::new(448, 64).is_aligned(64));
        assert!(!Position::new(-64, 0).is_aligned(64));
        assert!(!Position::new(32, 0).is_aligned(64));
        assert!(!Position::ORIGIN.is_aligned(0));
    }
}
