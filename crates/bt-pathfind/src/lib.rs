//! `bt-pathfind` — grid pathfinding: A*, D*-Lite incremental replanning,
//! path smoothing, and the synchronous per-tick agent mover.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                         |
//! |----------------|-------------------------------------------------------------------|
//! | [`pathfinder`] | `Pathfinder` trait, `PathfinderState`, `HeuristicFn`              |
//! | [`path`]       | `Path`, the smoothing pass, `untraversed`                         |
//! | [`astar`]      | `AStarPathfinder` — static-world best-first search                |
//! | [`dstar`]      | `DStarPathfinder` — D*-Lite / LPA* incremental replanning          |
//! | [`mover`]      | `AgentMover` — per-tick cursor advance along a path                |
//! | [`error`]      | `PathfindError`, `PathfindResult<T>`                               |
//!
//! # Design notes
//!
//! Both pathfinders search over a [`bt_spatial::Grid`] they borrow each
//! call rather than own — the grid is shared world state a caller scans and
//! ticks independently (§5 "concurrent pathfinders on the same grid are
//! unsupported", but nothing here assumes single ownership of the grid
//! itself). Per-search state (`g`/`rhs`/open set for D*) lives on the
//! pathfinder, not on the grid's cells, per §9's preferred side-table
//! design — see `dstar` module docs.

pub mod astar;
pub mod dstar;
pub mod error;
pub mod mover;
pub mod path;
pub mod pathfinder;

#[cfg(test)]
mod tests;

pub use astar::AStarPathfinder;
pub use dstar::DStarPathfinder;
pub use error::{PathfindError, PathfindResult};
pub use mover::AgentMover;
pub use path::Path;
pub use pathfinder::{HeuristicFn, Pathfinder, PathfinderState};
