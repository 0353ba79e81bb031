//! `bt-behavior` — action runtime, node arena, declarative builder, and the
//! tree manager that drives named trees per tick.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|------------------------------------------------------------------|
//! | [`action`]  | `Action`, `ActionDef`, `ActionState` — the four-state leaf lifecycle |
//! | [`def`]     | `NodeDef`, `NodeDefKind`, `TimerMode` — the declarative authoring surface |
//! | [`node`]    | `NodeRecord`, `NodeKind`, `NodeState` — the arena envelope and per-variant payloads |
//! | [`builder`] | `TreeBuilder` — validates a `NodeDef` and allocates the arena    |
//! | [`tree`]    | `BehaviorTree` — the arena plus `tick`/`update_priority` walks   |
//! | [`manager`] | `TreeManager` — owns named trees, drives `tick` across all of them |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                             |
//!
//! # Design notes
//!
//! Nodes live in a flat `Vec<NodeRecord>` arena addressed by `bt_core::NodeId`
//! rather than an owned-child / weak-parent object graph — see `node.rs` and
//! `tree.rs` module docs for why. `update_priority` always walks the whole
//! tree bottom-up before `tick` descends top-down along the active branch
//! only; composites re-select a running child only when `preempt` is set or
//! none is currently running.

pub mod action;
pub mod builder;
pub mod def;
pub mod error;
pub mod manager;
pub mod node;
pub mod tree;


pub use action::{Action, ActionDef, ActionState};
pub use builder::TreeBuilder;
pub use def::{NodeDef, NodeDefKind, PriorityFn, TimerMode};
pub use error::{BehaviorError, BehaviorResult};
pub use manager::TreeManager;
pub use node::NodeState;
pub use tree::BehaviorTree;
