//! Behavior-tree error type.
//!
//! Build-time validation errors (§4.6) and runtime state-contract violations
//! (§7) share one flat enum, following `bt-core::BtError`'s pattern —
//! planning failure has no variant here because it isn't an error (§7); it's
//! a normal `FAILURE` pathfinder state, reported by `bt-pathfind` instead.
//!
//! Several checks the spec lists as build-time validation (leaf child count,
//! inverter child count and priority function, timer child count) are
//! unrepresentable in [`crate::def::NodeDefKind`] instead of checked here:
//! `Leaf` simply has no children field, `Inverter` has no `priority_fn`
//! field, and `Inverter`/`Timer` hold a single `Box<NodeDef>` rather than a
//! `Vec`. What remains here is what the type system can't rule out.

use thiserror::Error;

use bt_core::NodeId;

/// Errors produced by `bt-behavior`.
#[derive(Debug, Error)]
pub enum BehaviorError {
    // ── Build-time validation (§4.6) ───────────────────────────────────────
    #[error("timer '{0}' has a negative delay: {1}")]
    TimerNegativeDelay(String, f32),

    #[error("composite '{0}' must have at least one child")]
    CompositeNoChildren(String),

    #[error("tree name '{0}' is already registered with the manager")]
    DuplicateTreeName(String),

    // ── Runtime state-contract violations (§7) ─────────────────────────────
    #[error("cannot start an action already in state {0:?}")]
    ActionInvalidStart(crate::ActionState),

    #[error("cannot terminate an action in state {0:?}; must be RUNNING or PAUSED")]
    ActionInvalidTerminate(crate::ActionState),

    #[error("cannot pause an action in state {0:?}; only RUNNING can be paused")]
    ActionInvalidPause(crate::ActionState),

    #[error("cannot resume an action in state {0:?}; only PAUSED can be resumed")]
    ActionInvalidResume(crate::ActionState),

    #[error("cannot reset an action in state {0:?}; only FINISHED can be reset")]
    ActionInvalidReset(crate::ActionState),

    #[error("node {0} cannot be reparented while RUNNING")]
    NodeReparentWhileRunning(NodeId),

    #[error("tree '{0}' not found")]
    TreeNotFound(String),

    #[error("cannot remove tree '{0}' while it is RUNNING")]
    TreeRemoveWhileRunning(String),

    #[error("cannot restart tree '{0}' unless it is FINISHED (current state: {1:?})")]
    TreeRestartNotFinished(String, crate::NodeState),
}

/// Shorthand result type.
pub type BehaviorResult<T> = Result<T, BehaviorError>;
