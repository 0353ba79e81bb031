//! The common pathfinder state machine and interface (§3 "Pathfinder
//! state", §4.9 "Common interface").

use bt_core::Vec2;

use crate::error::PathfindResult;
use crate::path::Path;

/// `(cell, cell) → float` heuristic supplied at pathfinder construction.
/// Must be admissible for `AStarPathfinder` to return optimal paths (§6).
pub type HeuristicFn = Box<dyn Fn(Vec2, Vec2) -> f32 + Send>;

/// One of {UNINITIALIZED, RUNNING, SUCCESS, FAILURE} (§3, §4.9 state
/// machine).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathfinderState {
    Uninitialized,
    Running,
    Success,
    Failure,
}

/// Shared interface implemented by [`crate::astar::AStarPathfinder`] and
/// [`crate::dstar::DStarPathfinder`] (§4.9).
///
/// `tick`'s signature returns a typed [`crate::error::PathfindError`] rather
/// than silently no-opping when called before a path exists — the same
/// "typed runtime error, not a panic" idiom `bt-behavior` already uses for
/// its own state-contract violations (§7, §10.2). A failed *plan* is not an
/// error and is never represented this way — only the programmer error of
/// ticking an uninitialized pathfinder is.
pub trait Pathfinder {
    /// Plans from the agent's current cell to the cell containing `target`
    /// and transitions to RUNNING, or FAILURE if no path exists (§4.9).
    fn compute_path(&mut self, grid: &bt_spatial::Grid, target: Vec2) -> PathfindResult<Path>;

    /// Blocking-style helper: computes a path to `target` at `velocity`,
    /// then synchronously ticks until SUCCESS or FAILURE, returning whether
    /// the agent reached the target (§4.9, §9 "synchronous interpretation").
    fn move_to(&mut self, grid: &bt_spatial::Grid, target: Vec2, velocity: f32) -> PathfindResult<bool>;

    /// Clears the current path and resets to UNINITIALIZED (§4.9).
    fn stop(&mut self);

    /// Per-frame advance used by the host loop (§4.9).
    fn tick(&mut self, grid: &bt_spatial::Grid) -> PathfindResult<PathfinderState>;

    fn state(&self) -> PathfinderState;

    /// Sets the speed (world units per second) `tick` moves the agent at,
    /// independent of `move_to` — the per-frame host loop (§2 "the host may
    /// call `pathfinder.tick()` each frame to step agent movement") needs
    /// this to configure movement without going through `move_to`'s
    /// synchronous run-to-completion helper.
    fn set_velocity(&mut self, velocity: f32);

    fn agent_position(&self) -> Vec2;

    fn current_path(&self) -> &[Vec2];

    /// The portion of the current path past the agent's position, projected
    /// onto it (§3, §10.4 — the Rust form of the original `getUntraversedPath`).
    fn untraversed_path(&self, agent_pos: Vec2) -> Vec<Vec2>;
}
