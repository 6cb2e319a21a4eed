//! Bubble board: occupancy layered over the hex grid
//!
//! The board owns which cell holds which kind. Pixel positions always come
//! from `GridGeometry`, and `Placed` records are rebuilt on every query so
//! they can never drift from the occupancy store.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::circles_overlap;
use super::grid::{Cell, GridGeometry};
use super::kind::{BubbleKind, START_KINDS};
use crate::consts::*;

/// An occupied cell with its pixel center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placed {
    pub row: usize,
    pub col: usize,
    pub pos: Vec2,
    pub kind: BubbleKind,
}

impl Placed {
    pub fn cell(&self) -> Cell {
        Cell::new(self.row, self.col)
    }
}

/// Jagged per-row storage, one slot per grid cell
type Rows<T> = Vec<Vec<T>>;

fn rows_like<T: Clone>(geometry: &GridGeometry, value: T) -> Rows<T> {
    geometry
        .row_lens()
        .iter()
        .map(|&len| vec![value.clone(); len])
        .collect()
}

/// The bubble grid
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    geometry: GridGeometry,
    cells: Rows<Option<BubbleKind>>,
}

/// Serialized form of a board, checked before it becomes a `Board`
#[derive(Deserialize)]
struct BoardData {
    geometry: GridGeometry,
    cells: Rows<Option<BubbleKind>>,
}

impl TryFrom<BoardData> for Board {
    type Error = String;

    fn try_from(data: BoardData) -> Result<Self, Self::Error> {
        // Row lengths are derived, never trusted from the input
        let g = &data.geometry;
        let geometry = GridGeometry::new(g.width(), g.height(), g.radius(), g.margin());
        let shape: Vec<usize> = data.cells.iter().map(Vec::len).collect();
        if shape != geometry.row_lens() {
            return Err(format!(
                "board cells have shape {:?}, geometry expects {:?}",
                shape,
                geometry.row_lens()
            ));
        }
        Ok(Self {
            geometry,
            cells: data.cells,
        })
    }
}

impl Board {
    /// Create a board and seed the top rows from the starting kinds
    pub fn new<R: Rng>(width: f32, height: f32, radius: f32, rng: &mut R) -> Self {
        let mut board = Self::empty(width, height, radius);
        board.seed_initial_rows(INITIAL_ROWS, rng);
        board
    }

    /// Create a board with no bubbles
    pub fn empty(width: f32, height: f32, radius: f32) -> Self {
        let geometry = GridGeometry::new(width, height, radius, BOARD_MARGIN);
        let cells = rows_like(&geometry, None);
        Self { geometry, cells }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn radius(&self) -> f32 {
        self.geometry.radius()
    }

    pub fn margin(&self) -> f32 {
        self.geometry.margin()
    }

    pub fn width(&self) -> f32 {
        self.geometry.width()
    }

    pub fn height(&self) -> f32 {
        self.geometry.height()
    }

    /// Rebuild the grid for a new size.
    ///
    /// Occupancy does not survive a resize: the board comes back empty.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.geometry = GridGeometry::new(width, height, self.radius(), self.margin());
        self.cells = rows_like(&self.geometry, None);
        log::info!(
            "Board resized to {}x{}: {} rows",
            width,
            height,
            self.geometry.row_count()
        );
    }

    /// Kind at a cell, `None` when empty or off the grid
    pub fn kind_at(&self, row: usize, col: usize) -> Option<BubbleKind> {
        self.cells.get(row)?.get(col).copied().flatten()
    }

    /// Overwrite a cell. Returns false (and changes nothing) when off the grid.
    pub fn set_kind(&mut self, row: usize, col: usize, kind: Option<BubbleKind>) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(slot) => {
                *slot = kind;
                true
            }
            None => false,
        }
    }

    /// Distinct kinds currently on the board
    pub fn active_kinds(&self) -> BTreeSet<BubbleKind> {
        self.cells.iter().flatten().flatten().copied().collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|k| k.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    /// Push every row down by one and fill a new top row from `kinds`.
    ///
    /// Shifted rows are copied by column index and clipped or padded to the
    /// destination length; the bottom row falls off.
    pub fn add_row_random<R: Rng>(&mut self, kinds: &[BubbleKind], rng: &mut R) {
        let row_count = self.geometry.row_count();
        if row_count == 0 || kinds.is_empty() {
            return;
        }

        let mut next: Rows<Option<BubbleKind>> = Vec::with_capacity(row_count);
        next.push(
            (0..self.geometry.row_len(0))
                .map(|_| Some(kinds[rng.random_range(0..kinds.len())]))
                .collect(),
        );
        for row in 1..row_count {
            let src = &self.cells[row - 1];
            let mut dst = vec![None; self.geometry.row_len(row)];
            let n = src.len().min(dst.len());
            dst[..n].copy_from_slice(&src[..n]);
            next.push(dst);
        }
        self.cells = next;
        log::debug!("Row added ({} kinds)", kinds.len());
    }

    /// Largest center y of any bubble, 0 for an empty board
    pub fn lowest_occupied_y(&self) -> f32 {
        self.placed().map(|p| p.pos.y).fold(0.0, f32::max)
    }

    /// Every bubble, row-major. Recomputed on each call.
    pub fn placed(&self) -> impl Iterator<Item = Placed> + '_ {
        self.geometry
            .cells()
            .filter_map(move |cell| self.placed_at(cell))
    }

    /// Does a circle overlap any bubble (with a little contact slack)?
    pub fn collides(&self, pos: Vec2, radius: f32) -> bool {
        let bubble_radius = self.radius();
        self.placed()
            .any(|p| circles_overlap(p.pos, bubble_radius, pos, radius, CONTACT_TOLERANCE))
    }

    /// Has a circle reached the ceiling?
    pub fn hit_top(&self, y: f32, radius: f32) -> bool {
        let ceiling = self.geometry.top_y() - self.radius() * CEILING_SLACK;
        y - radius <= ceiling
    }

    /// Stick a projectile to the nearest sensible empty cell.
    ///
    /// Prefers cells that touch the ceiling or another bubble; falls back to
    /// any empty cell nearby. Returns `None` when nothing is free.
    pub fn snap_and_attach(&mut self, pos: Vec2, kind: BubbleKind) -> Option<Placed> {
        let cell = self
            .find_nearest_empty(pos, true)
            .or_else(|| self.find_nearest_empty(pos, false))?;
        self.cells[cell.row][cell.col] = Some(kind);
        log::debug!("Attached {:?} at ({}, {})", kind, cell.row, cell.col);
        Some(Placed {
            row: cell.row,
            col: cell.col,
            pos: self.geometry.center(cell),
            kind,
        })
    }

    /// Pop the same-kind cluster containing `(row, col)` if it has 3+ bubbles
    pub fn pop_clusters_from(&mut self, row: usize, col: usize) -> Vec<Placed> {
        let Some(kind) = self.kind_at(row, col) else {
            return Vec::new();
        };
        let cluster = self.flood_same(Cell::new(row, col), kind);
        if cluster.len() < 3 {
            return Vec::new();
        }

        let popped: Vec<Placed> = cluster
            .into_iter()
            .map(|cell| Placed {
                row: cell.row,
                col: cell.col,
                pos: self.geometry.center(cell),
                kind,
            })
            .collect();
        for p in &popped {
            self.cells[p.row][p.col] = None;
        }
        log::debug!("Popped {} {:?}", popped.len(), kind);
        popped
    }

    /// Remove every bubble that is no longer connected to the ceiling
    pub fn drop_floaters(&mut self) -> Vec<Placed> {
        let mut anchored = rows_like(&self.geometry, false);
        for col in 0..self.geometry.row_len(0) {
            if self.cells[0][col].is_some() {
                self.flood_connected(Cell::new(0, col), &mut anchored);
            }
        }

        let floating: Vec<Placed> = self
            .placed()
            .filter(|p| !anchored[p.row][p.col])
            .collect();
        for p in &floating {
            self.cells[p.row][p.col] = None;
        }
        if !floating.is_empty() {
            log::debug!("Dropped {} floaters", floating.len());
        }
        floating
    }

    fn placed_at(&self, cell: Cell) -> Option<Placed> {
        let kind = self.kind_at(cell.row, cell.col)?;
        Some(Placed {
            row: cell.row,
            col: cell.col,
            pos: self.geometry.center(cell),
            kind,
        })
    }

    /// Fill the top `n` rows; the lowest seeded row only gets even columns
    fn seed_initial_rows<R: Rng>(&mut self, n: usize, rng: &mut R) {
        let rows = n.min(self.geometry.row_count());
        for row in 0..rows {
            for col in 0..self.geometry.row_len(row) {
                let fill = row + 1 < rows || col % 2 == 0;
                self.cells[row][col] =
                    fill.then(|| START_KINDS[rng.random_range(0..START_KINDS.len())]);
            }
        }
    }

    /// A cell is supported if it is on the ceiling or touches a bubble
    fn has_support(&self, cell: Cell) -> bool {
        cell.row == 0
            || self
                .geometry
                .neighbors(cell)
                .any(|n| self.cells[n.row][n.col].is_some())
    }

    /// Nearest empty cell within two rows of `pos`.
    ///
    /// Ties go to the first cell in row-then-column order.
    fn find_nearest_empty(&self, pos: Vec2, require_support: bool) -> Option<Cell> {
        if !pos.is_finite() {
            return None;
        }
        let approx = self.geometry.nearest_row(pos.y);
        let last_row = self.geometry.row_count() as isize - 1;
        let first = approx.saturating_sub(2).max(0);
        let last = approx.saturating_add(2).min(last_row);
        let mut best: Option<(Cell, f32)> = None;

        for row in first..=last {
            let row = row as usize;
            for col in 0..self.geometry.row_len(row) {
                let cell = Cell::new(row, col);
                if self.cells[row][col].is_some() {
                    continue;
                }
                if require_support && !self.has_support(cell) {
                    continue;
                }
                let d2 = self.geometry.center(cell).distance_squared(pos);
                if best.is_none_or(|(_, best_d2)| d2 < best_d2) {
                    best = Some((cell, d2));
                }
            }
        }

        best.map(|(cell, _)| cell)
    }

    /// Depth-first search over same-kind neighbours
    fn flood_same(&self, start: Cell, kind: BubbleKind) -> Vec<Cell> {
        let mut seen = rows_like(&self.geometry, false);
        let mut out = Vec::new();
        let mut stack = vec![start];

        while let Some(cell) = stack.pop() {
            if seen[cell.row][cell.col] {
                continue;
            }
            seen[cell.row][cell.col] = true;
            if self.cells[cell.row][cell.col] != Some(kind) {
                continue;
            }
            out.push(cell);
            stack.extend(self.geometry.neighbors(cell));
        }
        out
    }

    /// Mark every occupied cell reachable from `start`, regardless of kind
    fn flood_connected(&self, start: Cell, visited: &mut Rows<bool>) {
        let mut stack = vec![start];
        while let Some(cell) = stack.pop() {
            if visited[cell.row][cell.col] || self.cells[cell.row][cell.col].is_none() {
                continue;
            }
            visited[cell.row][cell.col] = true;
            stack.extend(self.geometry.neighbors(cell));
        }
    }
}
