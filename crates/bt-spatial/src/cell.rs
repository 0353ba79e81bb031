//! A single grid cell (§3 "Grid cell").
//!
//! Search-only fields the original `GridNode` carries (`_heuristic`, the D*
//! `_priority`) are deliberately **not** stored here — per §9's preferred
//! option, `bt-pathfind` keeps that per-search state in a side-table keyed by
//! `CellId` instead, so more than one pathfinder can run over the same grid.
//! What a cell itself owns is everything that's a property of the world, not
//! of a particular search: its bounds, its obstruction flag, its clearance,
//! and its fixed 8-neighborhood.

use bt_core::{CellId, Rect};

/// One cell of a [`crate::grid::Grid`] (§3).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    pub bounds: Rect,
    /// `true` iff some obstacle's shape overlaps `bounds`, as of the most
    /// recent [`crate::grid::Grid::scan_obstructions`] (§3 invariant).
    pub obstructed: bool,
    /// Largest `n` such that the `n×n` block anchored here (this cell as its
    /// top-left corner) is entirely unobstructed (§3, §8 "Grid clearance").
    pub clearance: u32,
    /// Up to 8 neighbors (cardinal + diagonal), fixed at grid construction
    /// and trimmed at grid edges (§4.8).
    pub(crate) neighbors: Vec<CellId>,
}

impl GridCell {
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }
}
