//! Owns a named collection of trees and drives their per-frame ticking
//! (§4.7).
//!
//! Trees are kept in insertion order (a `Vec` alongside a name index,
//! mirroring `bt-core`'s typed-id-over-`Vec` arena pattern rather than
//! reaching for a `HashMap` as the primary store) so that iteration order —
//! and therefore tick order — is reproducible regardless of name hashing.

use std::collections::HashMap;

use crate::error::{BehaviorError, BehaviorResult};
use crate::node::NodeState;
use crate::tree::BehaviorTree;

struct Entry {
    name: String,
    tree: BehaviorTree,
}

/// Runs a set of independent behavior trees, addressed by name (§4.7).
#[derive(Default)]
pub struct TreeManager {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl TreeManager {
    pub fn new() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }

    /// Registers `tree` under `name`, INACTIVE until [`TreeManager::start`]
    /// is called (§4.7).
    pub fn add(&mut self, name: impl Into<String>, tree: BehaviorTree) -> BehaviorResult<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(BehaviorError::DuplicateTreeName(name));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push(Entry { name, tree });
        Ok(())
    }

    /// Removes a tree; refuses while it is RUNNING or PAUSED (§4.7).
    pub fn remove(&mut self, name: &str) -> BehaviorResult<()> {
        let idx = self.lookup(name)?;
        let state = self.entries[idx].tree.state();
        if matches!(state, NodeState::Running | NodeState::Paused) {
            return Err(BehaviorError::TreeRemoveWhileRunning(name.to_string()));
        }
        self.entries.remove(idx);
        self.reindex_from(idx);
        Ok(())
    }

    /// INACTIVE → RUNNING.
    pub fn start(&mut self, name: &str) -> BehaviorResult<()> {
        let idx = self.lookup(name)?;
        self.entries[idx].tree.activate();
        Ok(())
    }

    pub fn pause(&mut self, name: &str) -> BehaviorResult<()> {
        let idx = self.lookup(name)?;
        self.entries[idx].tree.pause()
    }

    pub fn resume(&mut self, name: &str) -> BehaviorResult<()> {
        let idx = self.lookup(name)?;
        self.entries[idx].tree.resume()
    }

    /// FINISHED → INACTIVE → RUNNING again; refuses otherwise (§4.7).
    pub fn restart(&mut self, name: &str) -> BehaviorResult<()> {
        let idx = self.lookup(name)?;
        let state = self.entries[idx].tree.state();
        if state != NodeState::Finished {
            return Err(BehaviorError::TreeRestartNotFinished(name.to_string(), state));
        }
        self.entries[idx].tree.reset();
        self.entries[idx].tree.activate();
        Ok(())
    }

    pub fn state(&self, name: &str) -> BehaviorResult<NodeState> {
        let idx = self.lookup(name)?;
        Ok(self.entries[idx].tree.state())
    }

    /// Read-only access — a managed tree may be mutated only through
    /// `TreeManager`'s own methods, never via a handle back to callers
    /// (§4.7, §5 "the manager does not expose mutable handles").
    pub fn get(&self, name: &str) -> Option<&BehaviorTree> {
        self.index.get(name).map(|&i| &self.entries[i].tree)
    }

    /// Ticks every RUNNING tree once, in insertion order (§4.7).
    pub fn tick(&mut self, dt: f32) {
        for entry in &mut self.entries {
            if entry.tree.state() == NodeState::Running {
                entry.tree.tick(dt);
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    fn lookup(&self, name: &str) -> BehaviorResult<usize> {
        self.index.get(name).copied().ok_or_else(|| BehaviorError::TreeNotFound(name.to_string()))
    }

    fn reindex_from(&mut self, start: usize) {
        self.index.clear();
        for (i, entry) in self.entries.iter().enumerate() {
            self.index.insert(entry.name.clone(), i);
            let _ = start;
        }
    }
}
