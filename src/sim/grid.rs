//! Hex grid geometry
//!
//! Rows are laid out top to bottom in "odd-r" offset coordinates:
//! - even rows start at `margin + radius`
//! - odd rows are shifted right by one radius
//! - columns are `2 * radius` apart, rows `sqrt(3) * radius` apart
//!
//! Row lengths are computed independently, so neighbouring rows may differ
//! by one column. Everything here is pure; occupancy lives in `Board`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A grid slot, always in bounds for the geometry that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The six neighbours of `(row, col)`, possibly out of bounds.
///
/// The direction set depends on row parity: odd rows sit half a cell to the
/// right, so their upper and lower neighbours are `col` and `col + 1`; even
/// rows use `col - 1` and `col`.
pub fn hex_neighbors(row: isize, col: isize) -> [(isize, isize); 6] {
    if row.rem_euclid(2) == 1 {
        [
            (row, col - 1),
            (row, col + 1),
            (row - 1, col),
            (row - 1, col + 1),
            (row + 1, col),
            (row + 1, col + 1),
        ]
    } else {
        [
            (row, col - 1),
            (row, col + 1),
            (row - 1, col - 1),
            (row - 1, col),
            (row + 1, col - 1),
            (row + 1, col),
        ]
    }
}

/// Row/column layout for a board of a given pixel size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    radius: f32,
    margin: f32,
    width: f32,
    height: f32,
    /// Number of columns in each row
    row_lens: Vec<usize>,
}

impl GridGeometry {
    pub fn new(width: f32, height: f32, radius: f32, margin: f32) -> Self {
        let mut geometry = Self {
            radius,
            margin,
            width,
            height,
            row_lens: Vec::new(),
        };
        if radius.is_nan() || radius <= 0.0 || !width.is_finite() || !height.is_finite() {
            return geometry;
        }

        let y_max = height - margin - radius;
        let x_max = width - margin - radius;
        for row in 0.. {
            if geometry.center_y(row) > y_max {
                break;
            }
            let x_start = geometry.row_start_x(row);
            if x_start > x_max {
                break;
            }
            // Same arithmetic as `center`, so the last center never passes x_max
            let mut cols = 1;
            while x_start + cols as f32 * geometry.col_spacing() <= x_max {
                cols += 1;
            }
            geometry.row_lens.push(cols);
        }
        geometry
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn margin(&self) -> f32 {
        self.margin
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Horizontal distance between centers in a row
    #[inline]
    pub fn col_spacing(&self) -> f32 {
        self.radius * 2.0
    }

    /// Vertical distance between row centers
    #[inline]
    pub fn row_spacing(&self) -> f32 {
        3.0_f32.sqrt() * self.radius
    }

    /// Center y of row 0
    #[inline]
    pub fn top_y(&self) -> f32 {
        self.margin + self.radius
    }

    pub fn row_count(&self) -> usize {
        self.row_lens.len()
    }

    /// Columns in `row`, 0 for rows past the bottom
    pub fn row_len(&self, row: usize) -> usize {
        self.row_lens.get(row).copied().unwrap_or(0)
    }

    pub fn row_lens(&self) -> &[usize] {
        &self.row_lens
    }

    /// Bounds check for signed coordinates (neighbour lookups go negative)
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (col as usize) < self.row_len(row as usize)
    }

    /// Convert signed coordinates to a cell if they are on the grid
    pub fn cell(&self, row: isize, col: isize) -> Option<Cell> {
        self.contains(row, col)
            .then(|| Cell::new(row as usize, col as usize))
    }

    /// Pixel center of a cell. Callers are expected to pass in-bounds cells;
    /// the math itself is defined everywhere.
    pub fn center(&self, cell: Cell) -> Vec2 {
        Vec2::new(
            self.row_start_x(cell.row) + cell.col as f32 * self.col_spacing(),
            self.center_y(cell.row),
        )
    }

    /// Row index whose centerline is nearest to `y` (may be off the grid;
    /// saturates at the `isize` limits for huge or infinite `y`)
    pub fn nearest_row(&self, y: f32) -> isize {
        ((y - self.top_y()) / self.row_spacing()).round() as isize
    }

    /// In-bounds neighbours of a cell
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        hex_neighbors(cell.row as isize, cell.col as isize)
            .into_iter()
            .filter_map(move |(r, c)| self.cell(r, c))
    }

    /// Every cell, row-major
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.row_lens
            .iter()
            .enumerate()
            .flat_map(|(row, &len)| (0..len).map(move |col| Cell::new(row, col)))
    }

    fn center_y(&self, row: usize) -> f32 {
        self.top_y() + row as f32 * self.row_spacing()
    }

    fn row_start_x(&self, row: usize) -> f32 {
        let even_start = self.margin + self.radius;
        if row % 2 == 1 {
            even_start + self.radius
        } else {
            even_start
        }
    }
}
