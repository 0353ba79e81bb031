//! Pathfinding-subsystem error type.
//!
//! Planning failure itself (no route exists) is *not* an error — §7 treats it
//! as the normal `FAILURE` state. What lives here are the state-contract
//! violations §7 calls out explicitly: ticking before a path has ever been
//! computed, or handing the pathfinder a position that doesn't land on the
//! grid at all.

use bt_core::Vec2;
use thiserror::Error;

use crate::pathfinder::PathfinderState;

#[derive(Debug, Error)]
pub enum PathfindError {
    #[error("pathfinder is not running (state = {0:?}); call compute_path or move_to first")]
    NotRunning(PathfinderState),

    #[error("agent position {0} does not resolve to any cell of this grid")]
    AgentOffGrid(Vec2),

    #[error("target position {0} does not resolve to any cell of this grid")]
    TargetOffGrid(Vec2),
}

pub type PathfindResult<T> = Result<T, PathfindError>;
