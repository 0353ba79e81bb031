//! Declarative tree definitions (§4.6) — the input [`TreeBuilder`] consumes.
//!
//! A parser that turns some wire format (JSON, etc.) into a [`NodeDef`] tree
//! is an external collaborator (§6); this crate only consumes the record.

use crate::action::ActionDef;

/// A first-class priority function, captured at build time. May close over
/// external state (agent position, blackboard values, ...) — the engine
/// treats it as pure from its own perspective (§9 "Callbacks").
pub type PriorityFn = Box<dyn FnMut() -> f32 + Send>;

/// Declarative, recursive node definition (§4.6).
pub struct NodeDef {
    pub name: String,
    pub kind: NodeDefKind,
}

impl NodeDef {
    pub fn new(name: impl Into<String>, kind: NodeDefKind) -> Self {
        Self { name: name.into(), kind }
    }

    /// Pre-order search for the first definition named `name`, starting at
    /// (and including) `self` — the authoring-time counterpart of
    /// `BehaviorTree::find_by_name` (§4.6, §10.4).
    pub fn find_by_name(&self, name: &str) -> Option<&NodeDef> {
        if self.name == name {
            return Some(self);
        }
        for child in self.children() {
            if let Some(found) = child.find_by_name(name) {
                return Some(found);
            }
        }
        None
    }

    fn children(&self) -> &[NodeDef] {
        match &self.kind {
            NodeDefKind::Leaf { .. } => &[],
            NodeDefKind::Inverter { child } | NodeDefKind::Timer { child, .. } => {
                std::slice::from_ref(child.as_ref())
            }
            NodeDefKind::Priority { children, .. }
            | NodeDefKind::Selector { children, .. }
            | NodeDefKind::Random { children, .. } => children,
        }
    }
}

/// Per-variant definition payload (§3 node variant table, §4.6 validation).
pub enum NodeDefKind {
    Leaf {
        action: ActionDef,
        priority_fn: PriorityFn,
    },
    Inverter {
        child: Box<NodeDef>,
    },
    Timer {
        child: Box<NodeDef>,
        mode: TimerMode,
        delay: f32,
    },
    Priority {
        children: Vec<NodeDef>,
        preempt: bool,
        priority_fn: Option<PriorityFn>,
    },
    Selector {
        children: Vec<NodeDef>,
        preempt: bool,
        priority_fn: Option<PriorityFn>,
    },
    Random {
        children: Vec<NodeDef>,
        preempt: bool,
        weighted: bool,
        priority_fn: Option<PriorityFn>,
    },
}

/// Which of the two mutually exclusive Timer semantics applies (§4.4, §9:
/// "Two concrete variants... preferable to a boolean in new code").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerMode {
    /// Suppress the child for `delay` seconds before starting it.
    PreDelay,
    /// After the child is preempted (or finishes and is reselected), report
    /// priority zero for `delay` seconds before becoming selectable again.
    PostCooldown,
}
