//! Level grid generation
//!
//! The grid is laid out once from the viewport size and the cell size. Rows
//! are keyed by their y coordinate and cells within a row by x, both in
//! pixels, so a lookup is `rows[y][x]`.

use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};

use super::position::Position;
use crate::error::ConfigError;

/// Where row/column generation stops along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpperBound {
    /// Start coordinates strictly below the viewport extent
    #[default]
    Exclusive,
    /// Start coordinates up to and including the viewport extent
    Inclusive,
    /// Start coordinates strictly below `extent - cell_size`
    Inset,
}

impl UpperBound {
    /// Exclusive limit for start coordinates along one axis
    fn limit(self, extent: i64, cell_size: i64) -> i64 {
        match self {
            UpperBound::Exclusive => extent,
            UpperBound::Inclusive => extent + 1,
            UpperBound::Inset => extent - cell_size,
        }
    }
}

/// One addressable square of the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
}

/// The full set of cells covering the play area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cell_size: u32,
    width: u32,
    height: u32,
    rows: BTreeMap<i32, BTreeMap<i32, Cell>>,
}

impl Grid {
    /// Generate a grid with the default (exclusive) upper bound
    pub fn generate(width: u32, height: u32, cell_size: u32) -> Result<Self, ConfigError> {
        Self::generate_with(width, height, cell_size, UpperBound::default())
    }

    /// Generate a grid covering `width` x `height` pixels in `cell_size` steps
    pub fn generate_with(
        width: u32,
        height: u32,
        cell_size: u32,
        bound: UpperBound,
    ) -> Result<Self, ConfigError> {
        if cell_size == 0 || cell_size > i32::MAX as u32 {
            return Err(ConfigError::InvalidCellSize {
                raw: cell_size.to_string(),
            });
        }
        if width == 0 || height == 0 || width >= i32::MAX as u32 || height >= i32::MAX as u32 {
            return Err(ConfigError::InvalidViewport {
                width: width as i64,
                height: height as i64,
            });
        }

        let step = cell_size as i64;
        let max_x = bound.limit(width as i64, step).max(0);
        let max_y = bound.limit(height as i64, step).max(0);

        let mut rows = BTreeMap::new();
        for y in (0..max_y).step_by(cell_size as usize) {
            let y = y as i32;
            let row: BTreeMap<i32, Cell> = (0..max_x)
                .step_by(cell_size as usize)
                .map(|x| {
                    let x = x as i32;
                    (
                        x,
                        Cell {
                            position: Position::new(x, y),
                        },
                    )
                })
                .collect();
            rows.insert(y, row);
        }

        let grid = Self {
            cell_size,
            width,
            height,
            rows,
        };

        if grid.is_empty() {
            return Err(ConfigError::ViewportTooSmall {
                width,
                height,
                cell_size,
            });
        }

        info!(
            "Generated {}x{} grid ({} cells of {}px, {:?} bound)",
            grid.columns(),
            grid.rows(),
            grid.len(),
            cell_size,
            bound
        );

        Ok(grid)
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Viewport size the grid was generated from
    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells per row
    pub fn columns(&self) -> usize {
        self.rows.values().next().map_or(0, |row| row.len())
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if row `y` has a cell at column `x`
    pub fn has_cell(&self, x: i32, y: i32) -> bool {
        self.rows.get(&y).is_some_and(|row| row.contains_key(&x))
    }

    pub fn contains(&self, position: Position) -> bool {
        self.has_cell(position.x(), position.y())
    }

    /// Cells in row-major order (top row first, left to right)
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.values().flat_map(|row| row.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generate_512_by_64() {
        let grid = Grid::generate(512, 512, 64).unwrap();
        assert_eq!(grid.len(), 64);
        assert_eq!(grid.rows(), 8);
        assert_eq!(grid.columns(), 8);
        assert!(grid.contains(Position::ORIGIN));
        assert!(grid.contains(Position::new(448, 448)));
        assert!(!grid.contains(Position::new(512, 0)));
        assert!(!grid.contains(Position::new(0, 512)));
    }

    #[test]
    fn test_partial_cells_are_kept() {
        // 500 / 64 rounds up to 8 columns, the last starting at 448
        let grid = Grid::generate(500, 130, 64).unwrap();
        assert_eq!(grid.columns(), 8);
        assert_eq!(grid.rows(), 3);
        assert!(grid.contains(Position::new(448, 128)));
    }

    #[test]
    fn test_inclusive_bound_adds_edge_row_and_column() {
        let grid = Grid::generate_with(512, 512, 64, UpperBound::Inclusive).unwrap();
        assert_eq!(grid.columns(), 9);
        assert_eq!(grid.rows(), 9);
        assert!(grid.contains(Position::new(512, 512)));
    }

    #[test]
    fn test_inset_bound_drops_edge_row_and_column() {
        let grid = Grid::generate_with(512, 512, 64, UpperBound::Inset).unwrap();
        assert_eq!(grid.columns(), 7);
        assert_eq!(grid.rows(), 7);
        assert!(!grid.contains(Position::new(448, 0)));
    }

    #[test]
    fn test_zero_cell_size_is_rejected() {
        let err = Grid::generate(512, 512, 0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCellSize { .. }));
    }

    #[test]
    fn test_zero_viewport_is_rejected() {
        let err = Grid::generate(0, 512, 64).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidViewport { .. }));
    }

    #[test]
    fn test_inset_on_tiny_viewport_is_rejected() {
        let err = Grid::generate_with(64, 64, 64, UpperBound::Inset).unwrap_err();
        assert!(matches!(err, ConfigError::ViewportTooSmall { .. }));
    }

    #[test]
    fn test_cells_are_row_major() {
        let grid = Grid::generate(128, 128, 64).unwrap();
        let order: Vec<_> = grid.cells().map(|c| (c.position.x(), c.position.y())).collect();
        assert_eq!(order, vec![(0, 0), (64, 0), (0, 64), (64, 64)]);
    }

    proptest! {
        #[test]
        fn prop_grid_stays_inside_viewport(
            width in 1u32..1024,
            height in 1u32..1024,
            cell_size in 8u32..256,
        ) {
            let grid = Grid::generate(width, height, cell_size).unwrap();
            prop_assert!(grid.contains(Position::ORIGIN));
            for cell in grid.cells() {
                prop_assert!(cell.position.x() < width as i32);
                prop_assert!(cell.position.y() < height as i32);
                prop_assert!(cell.position.is_aligned(cell_size));
            }
            let expected = width.div_ceil(cell_size) as usize * height.div_ceil(cell_size) as usize;
            prop_assert_eq!(grid.len(), expected);
        }

        #[test]
        fn prop_generation_is_idempotent(
            width in 1u32..1024,
            height in 1u32..1024,
            cell_size in 8u32..128,
        ) {
            let a = Grid::generate(width, height, cell_size).unwrap();
            let b = Grid::generate(width, height, cell_size).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
