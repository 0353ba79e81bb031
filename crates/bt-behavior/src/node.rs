//! Node envelope and per-variant state (§3 Node, §4.2–§4.5).
//!
//! Nodes live in a flat arena owned by [`crate::tree::Tree`] (§9 "Parent
//! back-pointers... model the tree as a flat arena indexed by node id,
//! storing `parent_id` as an integer"); this module defines the envelope
//! record and the tagged-union variant payloads dispatched on by the arena's
//! `tick`/`update_priority` walks (§9 "Variant dispatch").

use bt_core::NodeId;

use crate::action::{Action, ActionState};
use crate::def::PriorityFn;

/// The four lifecycle states shared by every node (§3).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeState {
    Inactive,
    Running,
    Paused,
    Finished,
}

impl From<ActionState> for NodeState {
    fn from(a: ActionState) -> Self {
        match a {
            ActionState::Inactive => NodeState::Inactive,
            ActionState::Running => NodeState::Running,
            ActionState::Paused => NodeState::Paused,
            ActionState::Finished => NodeState::Finished,
        }
    }
}

/// Common fields every node carries, regardless of variant (§3 Node).
pub(crate) struct NodeRecord {
    pub name: String,
    /// `NodeId::INVALID` at the root.
    pub parent: NodeId,
    /// Position within the parent's child list; `-1` at the root (§3).
    pub child_index: i32,
    pub state: NodeState,
    pub priority: f32,
    /// Mandatory for Leaf, forbidden for Inverter, optional override for
    /// the other variants (§4.6).
    pub priority_fn: Option<PriorityFn>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

/// Tagged union over the six node variants (§3 node variant table).
pub(crate) enum NodeKind {
    Leaf(LeafData),
    Inverter,
    Timer(TimerData),
    Priority(CompositeData),
    Selector(CompositeData),
    Random(RandomData),
}

pub(crate) struct LeafData {
    pub action: Action,
}

pub(crate) struct TimerData {
    pub pre_delay: bool,
    pub delay: f32,
    pub elapsed: f32,
    /// Post-cooldown mode only: `true` while the gate forces priority to 0.
    pub cooling: bool,
    /// `true` once `start()` has been called at least once — distinguishes
    /// the first activation (starts immediately) from a re-selection
    /// following a natural finish (cooldown is deferred to that
    /// re-selection per §4.4 "or by own finish followed by re-selection").
    pub ran_before: bool,
}

/// Shared state for Priority/Selector composites (§4.3).
pub(crate) struct CompositeData {
    pub preempt: bool,
    /// Index into `children`, not a `NodeId` — selection is positional.
    pub running: Option<usize>,
}

pub(crate) struct RandomData {
    pub preempt: bool,
    pub weighted: bool,
    pub running: Option<usize>,
}

impl NodeKind {
    pub fn leaf(action: Action) -> Self {
        NodeKind::Leaf(LeafData { action })
    }

    pub fn timer(pre_delay: bool, delay: f32) -> Self {
        NodeKind::Timer(TimerData {
            pre_delay,
            delay,
            elapsed: 0.0,
            cooling: false,
            ran_before: false,
        })
    }

    pub fn priority(preempt: bool) -> Self {
        NodeKind::Priority(CompositeData { preempt, running: None })
    }

    pub fn selector(preempt: bool) -> Self {
        NodeKind::Selector(CompositeData { preempt, running: None })
    }

    pub fn random(preempt: bool, weighted: bool) -> Self {
        NodeKind::Random(RandomData { preempt, weighted, running: None })
    }
}
