//! The occupancy grid (§3 "Grid", §4.8).
//!
//! A grid owns a contiguous `rows × cols` array of cells over an enclosing
//! world rectangle (§3 invariant: cell `(r, c)` covers
//! `[origin.x + c·w, origin.x + (c+1)·w] × [origin.y + r·h, origin.y + (r+1)·h]`).
//! Neighborhoods are computed once at construction and never change — only
//! `obstructed` and `clearance` are refreshed later, by
//! [`Grid::scan_obstructions`] and [`Grid::compute_clearance`] respectively.

use bt_core::{CellId, Rect, Size, Vec2};

use crate::cell::GridCell;
use crate::error::{SpatialError, SpatialResult};
use crate::obstacle::ObstacleWorld;

/// A uniform 2D occupancy grid over a world rectangle (§3, §4.8).
pub struct Grid {
    bounds: Rect,
    rows: u32,
    cols: u32,
    cell_size: Size,
    cells: Vec<GridCell>,
}

impl Grid {
    /// Builds a grid over `bounds` with `rows × cols` cells, computing every
    /// cell's bounds and wiring up its (up to) 8-neighborhood (§4.8).
    pub fn new(bounds: Rect, rows: u32, cols: u32) -> SpatialResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(SpatialError::EmptyGrid { rows, cols });
        }

        let cell_size = Size::new(bounds.size.width / cols as f32, bounds.size.height / rows as f32);

        let mut cells = Vec::with_capacity((rows * cols) as usize);
        for r in 0..rows {
            for c in 0..cols {
                let origin = Vec2::new(
                    bounds.origin.x + c as f32 * cell_size.width,
                    bounds.origin.y + r as f32 * cell_size.height,
                );
                cells.push(GridCell {
                    row: r,
                    col: c,
                    bounds: Rect::new(origin, cell_size),
                    obstructed: false,
                    clearance: 0,
                    neighbors: Vec::new(),
                });
            }
        }

        let mut grid = Self { bounds, rows, cols, cell_size, cells };
        grid.wire_neighbors();
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    fn index_of(&self, row: u32, col: u32) -> usize {
        (row * self.cols + col) as usize
    }

    #[inline]
    fn id_of(&self, row: u32, col: u32) -> CellId {
        CellId(self.index_of(row, col) as u32)
    }

    pub fn cell(&self, id: CellId) -> &GridCell {
        &self.cells[id.index()]
    }

    pub fn cell_mut(&mut self, id: CellId) -> &mut GridCell {
        &mut self.cells[id.index()]
    }

    /// Looks up the cell at `(row, col)`, `None` if out of range.
    pub fn cell_at(&self, row: u32, col: u32) -> Option<CellId> {
        if row < self.rows && col < self.cols {
            Some(self.id_of(row, col))
        } else {
            None
        }
    }

    /// Looks up the cell whose bounds contain `point` (§4.8). Edge ties
    /// resolve to the lower index because [`Rect::contains`] is half-open on
    /// the max edge; a point exactly on the world's far edge is clamped into
    /// the last row/column rather than falling outside the grid.
    pub fn cell_at_point(&self, point: Vec2) -> Option<CellId> {
        let max = self.bounds.max();
        if point.x < self.bounds.origin.x
            || point.y < self.bounds.origin.y
            || point.x > max.x
            || point.y > max.y
        {
            return None;
        }

        let mut col = ((point.x - self.bounds.origin.x) / self.cell_size.width).floor() as i64;
        let mut row = ((point.y - self.bounds.origin.y) / self.cell_size.height).floor() as i64;
        col = col.clamp(0, self.cols as i64 - 1);
        row = row.clamp(0, self.rows as i64 - 1);
        Some(self.id_of(row as u32, col as u32))
    }

    /// The fixed 8-neighborhood of `id`, trimmed at grid edges (§4.8).
    pub fn neighbors(&self, id: CellId) -> &[CellId] {
        self.cells[id.index()].neighbors()
    }

    fn wire_neighbors(&mut self) {
        const OFFSETS: [(i32, i32); 8] =
            [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

        for r in 0..self.rows {
            for c in 0..self.cols {
                let mut found = Vec::with_capacity(8);
                for (dr, dc) in OFFSETS {
                    let nr = r as i32 + dr;
                    let nc = c as i32 + dc;
                    if nr >= 0 && nc >= 0 && (nr as u32) < self.rows && (nc as u32) < self.cols {
                        found.push(self.id_of(nr as u32, nc as u32));
                    }
                }
                let idx = self.index_of(r, c);
                self.cells[idx].neighbors = found;
            }
        }
    }

    /// Recomputes every cell's `obstructed` flag against `world` (§4.8, §8
    /// "Grid" invariant: `cell.obstructed ⇔ ∃ obstacle o: overlaps(o,
    /// cell.bounds)`).
    pub fn scan_obstructions(&mut self, world: &dyn ObstacleWorld) {
        for cell in &mut self.cells {
            cell.obstructed = world.overlaps(cell.bounds);
        }
    }

    /// Recomputes every cell's `clearance` in reverse row-major order
    /// (bottom-right first), per §4.8 / §8's "Grid clearance" law:
    /// `clearance(r,c) = 0` if obstructed, else
    /// `1 + min(clearance(r,c+1), clearance(r+1,c), clearance(r+1,c+1))`,
    /// treating off-grid neighbors as clearance 0.
    pub fn compute_clearance(&mut self) {
        for r in (0..self.rows).rev() {
            for c in (0..self.cols).rev() {
                let idx = self.index_of(r, c);
                if self.cells[idx].obstructed {
                    self.cells[idx].clearance = 0;
                    continue;
                }
                let east = self.clearance_at(r, c + 1);
                let south = self.clearance_at(r + 1, c);
                let southeast = self.clearance_at(r + 1, c + 1);
                self.cells[idx].clearance = 1 + east.min(south).min(southeast);
            }
        }
    }

    /// Clearance at `(row, col)`, or `0` if that cell is off-grid — the
    /// boundary convention §8's clearance law specifies.
    fn clearance_at(&self, row: u32, col: u32) -> u32 {
        if row < self.rows && col < self.cols {
            self.cells[self.index_of(row, col)].clearance
        } else {
            0
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, &GridCell)> {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i as u32), c))
    }
}
