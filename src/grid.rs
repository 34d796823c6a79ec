//! Discrete grid bounds and the mapping between grid cells and a rendering
//! surface.

use crate::common::Cell;
use crate::config::{CELL_SIZE, GRID_COLS, GRID_ROWS};

/// Immutable play area. The y axis grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cols: i32,
    rows: i32,
    cell_size: i32,
    offset: (i32, i32),
}

impl Grid {
    /// Create a grid with the given dimensions, anchored at the surface origin.
    ///
    /// # Panics
    /// If any dimension is not positive.
    pub const fn new(cols: i32, rows: i32, cell_size: i32) -> Self {
        assert!(
            cols > 0 && rows > 0 && cell_size > 0,
            "grid dimensions must be positive"
        );
        Self {
            cols,
            rows,
            cell_size,
            offset: (0, 0),
        }
    }

    /// Copy of this grid centred on a surface of the given size.
    pub fn centered(self, screen_width: i32, screen_height: i32) -> Self {
        Self {
            offset: (
                (screen_width - self.width()).div_euclid(2),
                (screen_height - self.height()).div_euclid(2),
            ),
            ..self
        }
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Surface offset of cell `(0, 0)`'s lower-left corner.
    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    /// Width of the grid on the surface.
    pub fn width(&self) -> i32 {
        self.cols * self.cell_size
    }

    /// Height of the grid on the surface.
    pub fn height(&self) -> i32 {
        self.rows * self.cell_size
    }

    /// `true` if `cell` lies inside the grid.
    pub fn contains(&self, (x, y): Cell) -> bool {
        (0..self.cols).contains(&x) && (0..self.rows).contains(&y)
    }

    /// Surface coordinates of the centre of `cell`.
    pub fn grid_to_screen(&self, (x, y): Cell) -> (i32, i32) {
        let half = self.cell_size / 2;
        (
            self.offset.0 + x * self.cell_size + half,
            self.offset.1 + y * self.cell_size + half,
        )
    }

    /// Grid cell under a surface point. May be out of bounds; check with
    /// [`Grid::contains`].
    pub fn screen_to_grid(&self, screen_x: i32, screen_y: i32) -> Cell {
        (
            (screen_x - self.offset.0).div_euclid(self.cell_size),
            (screen_y - self.offset.1).div_euclid(self.cell_size),
        )
    }

    /// Iterate every cell, row by row from `y = 0`.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| (x, y)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(GRID_COLS, GRID_ROWS, CELL_SIZE)
    }
}
