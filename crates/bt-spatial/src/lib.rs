//! `bt-spatial` — the occupancy grid, clearance propagation, and the
//! `ObstacleWorld` contract the pathfinding core searches over.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|------------------------------------------------------------------|
//! | [`cell`]     | `GridCell` — bounds, obstruction flag, clearance, fixed neighbors |
//! | [`grid`]     | `Grid` — the `rows × cols` cell array, lookups, obstruction scan, clearance pass |
//! | [`obstacle`] | `ObstacleWorld`, `RectObstacleWorld` — the world-collision contract |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                               |
//!
//! # Design notes
//!
//! A cell stores only world-owned properties (bounds, obstruction, clearance,
//! neighbors); per-search state (`g`/`h`/`k` scores) lives in `bt-pathfind`'s
//! own side-tables keyed by `bt_core::CellId` so more than one pathfinder can
//! search the same grid concurrently without stepping on each other's state.

pub mod cell;
pub mod error;
pub mod grid;
pub mod obstacle;

#[cfg(test)]
mod tests;

pub use cell::GridCell;
pub use error::{SpatialError, SpatialResult};
pub use grid::Grid;
pub use obstacle::{ObstacleWorld, RectObstacleWorld};
