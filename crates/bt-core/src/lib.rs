//! `bt-core` — foundational types shared by the behavior-tree and
//! pathfinding engines.
//!
//! This crate is a dependency of every other `bt-*` crate. It intentionally
//! has no `bt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                            |
//! |-----------|------------------------------------------------------|
//! | [`geo`]   | `Vec2`, `Size`, `Rect` — opaque 2D value types       |
//! | [`ids`]   | `NodeId` (tree arena), `CellId` (grid arena)         |
//! | [`rng`]   | `TreeRng` — seedable RNG for `Random` node selection |
//! | [`error`] | `BtError`, `BtResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{BtError, BtResult};
pub use geo::{Rect, Size, Vec2};
pub use ids::{CellId, NodeId};
pub use rng::TreeRng;
