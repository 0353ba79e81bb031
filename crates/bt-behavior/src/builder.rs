//! Turns a declarative [`NodeDef`] tree into a runnable [`BehaviorTree`]
//! (§4.6).
//!
//! Validation that the type system can't express up front — non-negative
//! timer delays, non-empty composite child lists — happens here, during the
//! single recursive descent that also allocates the arena. Everything else
//! (leaf child count, inverter arity, inverter priority functions) is ruled
//! out by [`NodeDefKind`] itself; see `error.rs`.

use bt_core::{NodeId, TreeRng};

use crate::action::Action;
use crate::def::{NodeDef, NodeDefKind, TimerMode};
use crate::error::{BehaviorError, BehaviorResult};
use crate::node::{NodeKind, NodeRecord};
use crate::tree::BehaviorTree;

/// Consumes a [`NodeDef`] tree and produces a [`BehaviorTree`] with a fresh
/// arena, seeded RNG, and every node at `NodeState::Inactive` (§4.6).
pub struct TreeBuilder {
    seed: u64,
}

impl TreeBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn build(self, root: NodeDef) -> BehaviorResult<BehaviorTree> {
        let mut nodes = Vec::new();
        let root_id = push_node(&mut nodes, root, NodeId::INVALID, -1)?;
        Ok(BehaviorTree { nodes, root: root_id, rng: TreeRng::new(self.seed) })
    }
}

fn push_node(
    nodes: &mut Vec<NodeRecord>,
    def: NodeDef,
    parent: NodeId,
    child_index: i32,
) -> BehaviorResult<NodeId> {
    let NodeDef { name, kind } = def;

    let (kind, priority_fn, child_defs) = match kind {
        NodeDefKind::Leaf { action, priority_fn } => {
            (NodeKind::leaf(Action::new(action)), Some(priority_fn), Vec::new())
        }
        NodeDefKind::Inverter { child } => (NodeKind::Inverter, None, vec![*child]),
        NodeDefKind::Timer { child, mode, delay } => {
            if delay < 0.0 {
                return Err(BehaviorError::TimerNegativeDelay(name, delay));
            }
            let pre_delay = matches!(mode, TimerMode::PreDelay);
            (NodeKind::timer(pre_delay, delay), None, vec![*child])
        }
        NodeDefKind::Priority { children, preempt, priority_fn } => {
            if children.is_empty() {
                return Err(BehaviorError::CompositeNoChildren(name));
            }
            (NodeKind::priority(preempt), priority_fn, children)
        }
        NodeDefKind::Selector { children, preempt, priority_fn } => {
            if children.is_empty() {
                return Err(BehaviorError::CompositeNoChildren(name));
            }
            (NodeKind::selector(preempt), priority_fn, children)
        }
        NodeDefKind::Random { children, preempt, weighted, priority_fn } => {
            if children.is_empty() {
                return Err(BehaviorError::CompositeNoChildren(name));
            }
            (NodeKind::random(preempt, weighted), priority_fn, children)
        }
    };

    // Reserve this node's slot before recursing into children so the arena
    // index assigned here matches the id we return.
    let id = NodeId::try_from(nodes.len()).expect("arena index fits in NodeId");
    nodes.push(NodeRecord {
        name,
        parent,
        child_index,
        state: crate::node::NodeState::Inactive,
        priority: 0.0,
        priority_fn,
        children: Vec::new(),
        kind,
    });

    let mut child_ids = Vec::with_capacity(child_defs.len());
    for (i, child_def) in child_defs.into_iter().enumerate() {
        child_ids.push(push_node(nodes, child_def, id, i as i32)?);
    }
    nodes[id.index()].children = child_ids;

    Ok(id)
}
