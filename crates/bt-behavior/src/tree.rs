//! The behavior-tree arena: [`BehaviorTree`] and its internal tick /
//! priority-propagation walks (§4.2–§4.5, §5).
//!
//! # Selection model
//!
//! Every call to [`BehaviorTree::tick`] performs two full passes, matching
//! §5's "`update_priority` walks strictly bottom-up; `tick` descends
//! strictly top-down": first [`Tree::update_priority`] refreshes every
//! node's `priority` bottom-up, unconditionally; then
//! [`Tree::tick_node`] descends only along the currently active branch,
//! using the now-fresh priorities to decide whether to (re)select a child.
//! A composite with `preempt = false` and a running child simply ignores
//! its siblings' fresh priorities until that child finishes — this is where
//! the "ties broken by lowest index" and "non-preemptible children run to
//! completion" rules (§4.3) actually bite, not in whether priorities were
//! computed at all.

use bt_core::{NodeId, TreeRng};

use crate::action::ActionState;
use crate::error::BehaviorResult;
use crate::node::{NodeKind, NodeRecord, NodeState};

enum Disc {
    Leaf,
    Inverter,
    Timer,
    Priority,
    Selector,
    Random,
}

/// A fully linked behavior tree: a flat arena of [`NodeRecord`]s plus the
/// root index and the tree's deterministic RNG (§9 "flat arena indexed by
/// node id").
pub struct BehaviorTree {
    pub(crate) nodes: Vec<NodeRecord>,
    pub(crate) root: NodeId,
    pub(crate) rng: TreeRng,
}

impl BehaviorTree {
    #[inline]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The root's current lifecycle state.
    #[inline]
    pub fn state(&self) -> NodeState {
        self.nodes[self.root.index()].state
    }

    /// A node's most recently computed priority (§3: `priority ∈ [0,1]`).
    pub fn priority(&self, id: NodeId) -> f32 {
        self.nodes[id.index()].priority
    }

    /// A node's lifecycle state.
    pub fn node_state(&self, id: NodeId) -> NodeState {
        self.nodes[id.index()].state
    }

    pub fn name_of(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].name
    }

    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Pre-order search for the first node named `name` (§4.6, §10.4).
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.find_from(self.root, name)
    }

    fn find_from(&self, id: NodeId, name: &str) -> Option<NodeId> {
        if self.nodes[id.index()].name == name {
            return Some(id);
        }
        for &c in &self.nodes[id.index()].children {
            if let Some(found) = self.find_from(c, name) {
                return Some(found);
            }
        }
        None
    }

    /// A short human-readable line for node `id` — the idiomatic-Rust form
    /// of the original's `toString(bool verbose)` (§10.4): `NodeKind` in
    /// `{:?}` already disambiguates, so there is no `verbose` flag to carry.
    pub fn describe(&self, id: NodeId) -> String {
        let rec = &self.nodes[id.index()];
        let kind = match &rec.kind {
            NodeKind::Leaf(_) => "Leaf",
            NodeKind::Inverter => "Inverter",
            NodeKind::Timer(_) => "Timer",
            NodeKind::Priority(_) => "Priority",
            NodeKind::Selector(_) => "Selector",
            NodeKind::Random(_) => "Random",
        };
        format!(
            "{kind}({id}) name={:?} priority={:.3} state={:?}",
            rec.name, rec.priority, rec.state
        )
    }

    /// INACTIVE → RUNNING for the whole tree. Called once by the owning
    /// [`crate::manager::TreeManager`] when a tree is started or restarted.
    pub fn activate(&mut self) {
        self.start_node(self.root);
    }

    /// The per-frame entry point: refresh priorities, then tick the active
    /// branch (§4.2, §5).
    pub fn tick(&mut self, dt: f32) -> NodeState {
        self.refresh_priority();
        self.tick_node(self.root, dt)
    }

    /// Recomputes every node's `priority` bottom-up without ticking anything
    /// (§4.2 "`update_priority()` recursively refreshes priorities
    /// bottom-up"). `tick` calls this internally; exposed separately so a
    /// caller (or a test) can observe fresh priorities — e.g. a Timer's
    /// cooldown-gated priority — without advancing any action or timer
    /// accumulator.
    pub fn refresh_priority(&mut self) -> f32 {
        self.update_priority(self.root)
    }

    pub fn pause(&mut self) -> BehaviorResult<()> {
        self.pause_node(self.root)
    }

    pub fn resume(&mut self) -> BehaviorResult<()> {
        self.resume_node(self.root)
    }

    /// Returns the whole tree to INACTIVE and clears per-tick accumulators
    /// (§4.2 "reset()").
    pub fn reset(&mut self) {
        self.reset_node(self.root);
    }

    /// Stops the tree and any running descendants without clearing
    /// accumulators (§4.2 "preempt()").
    pub fn preempt(&mut self) {
        self.preempt_node(self.root);
    }

    // ── update_priority (bottom-up) ────────────────────────────────────────

    fn update_priority(&mut self, id: NodeId) -> f32 {
        let children: Vec<NodeId> = self.nodes[id.index()].children.clone();
        for &c in &children {
            self.update_priority(c);
        }
        let child_priorities: Vec<f32> =
            children.iter().map(|c| self.nodes[c.index()].priority).collect();
        let p = compute_own_priority(&mut self.nodes[id.index()], &child_priorities);
        self.nodes[id.index()].priority = p;
        p
    }

    // ── tick (top-down) ─────────────────────────────────────────────────────

    fn tick_node(&mut self, id: NodeId, dt: f32) -> NodeState {
        match discriminant(&self.nodes[id.index()].kind) {
            Disc::Leaf => self.tick_leaf(id, dt),
            Disc::Inverter => self.tick_inverter(id, dt),
            Disc::Timer => self.tick_timer(id, dt),
            Disc::Priority => self.tick_composite(id, dt, true),
            Disc::Selector => self.tick_composite(id, dt, false),
            Disc::Random => self.tick_random(id, dt),
        }
    }

    fn tick_leaf(&mut self, id: NodeId, dt: f32) -> NodeState {
        let rec = &mut self.nodes[id.index()];
        let NodeKind::Leaf(data) = &mut rec.kind else { unreachable!() };
        if data.action.state() == ActionState::Inactive {
            let _ = data.action.start();
        }
        if data.action.state() == ActionState::Running {
            data.action.update(dt);
        }
        let state = NodeState::from(data.action.state());
        rec.state = state;
        state
    }

    fn tick_inverter(&mut self, id: NodeId, dt: f32) -> NodeState {
        let child = self.nodes[id.index()].children[0];
        let state = self.tick_node(child, dt);
        self.nodes[id.index()].state = state;
        state
    }

    fn tick_timer(&mut self, id: NodeId, dt: f32) -> NodeState {
        let child = self.nodes[id.index()].children[0];

        enum Step {
            Wait,
            StartThenTick,
            JustTick,
        }

        let step = {
            let rec = &mut self.nodes[id.index()];
            let NodeKind::Timer(t) = &mut rec.kind else { unreachable!() };
            if t.pre_delay {
                if t.elapsed < t.delay {
                    t.elapsed += dt;
                    if t.elapsed >= t.delay { Step::StartThenTick } else { Step::Wait }
                } else {
                    Step::JustTick
                }
            } else if t.cooling {
                t.elapsed += dt;
                if t.elapsed >= t.delay {
                    t.cooling = false;
                    t.elapsed = 0.0;
                    Step::StartThenTick
                } else {
                    Step::Wait
                }
            } else {
                Step::JustTick
            }
        };

        let state = match step {
            Step::Wait => NodeState::Running,
            Step::StartThenTick => {
                self.start_node(child);
                self.tick_node(child, dt)
            }
            Step::JustTick => self.tick_node(child, dt),
        };

        self.nodes[id.index()].state = state;
        state
    }

    fn tick_composite(&mut self, id: NodeId, dt: f32, priority_rule: bool) -> NodeState {
        let children = self.nodes[id.index()].children.clone();
        let (preempt, running) = match &self.nodes[id.index()].kind {
            NodeKind::Priority(c) | NodeKind::Selector(c) => (c.preempt, c.running),
            _ => unreachable!(),
        };

        let mut new_running = running;
        if preempt || running.is_none() {
            let priorities: Vec<f32> =
                children.iter().map(|c| self.nodes[c.index()].priority).collect();
            let picked = if priority_rule {
                argmax_lowest_tie(&priorities)
            } else {
                priorities.iter().position(|&p| p > 0.0).unwrap_or(0)
            };
            if new_running != Some(picked) {
                if let Some(prev) = new_running {
                    self.preempt_node(children[prev]);
                }
                self.start_node(children[picked]);
                new_running = Some(picked);
            }
        }

        set_running(&mut self.nodes[id.index()].kind, new_running);

        let r = new_running.expect("composite ticked with no selected child");
        let state = self.tick_node(children[r], dt);

        if state == NodeState::Finished {
            set_running(&mut self.nodes[id.index()].kind, None);
        }
        self.nodes[id.index()].state = state;
        state
    }

    fn tick_random(&mut self, id: NodeId, dt: f32) -> NodeState {
        let children = self.nodes[id.index()].children.clone();
        let (preempt, weighted, running) = match &self.nodes[id.index()].kind {
            NodeKind::Random(r) => (r.preempt, r.weighted, r.running),
            _ => unreachable!(),
        };

        let mut new_running = running;
        if preempt || running.is_none() {
            let priorities: Vec<f32> =
                children.iter().map(|c| self.nodes[c.index()].priority).collect();
            let picked = if weighted {
                self.choose_weighted(&priorities)
            } else {
                self.choose_uniform(&priorities)
            };
            if new_running != Some(picked) {
                if let Some(prev) = new_running {
                    self.preempt_node(children[prev]);
                }
                self.start_node(children[picked]);
                new_running = Some(picked);
            }
        }

        if let NodeKind::Random(r) = &mut self.nodes[id.index()].kind {
            r.running = new_running;
        }

        let r = new_running.expect("random node ticked with no selected child");
        let state = self.tick_node(children[r], dt);

        if state == NodeState::Finished {
            if let NodeKind::Random(rd) = &mut self.nodes[id.index()].kind {
                rd.running = None;
            }
        }
        self.nodes[id.index()].state = state;
        state
    }

    /// Uniform pick among children with `priority > 0`, or any child if all
    /// are zero (§4.3, §8 boundary behavior).
    fn choose_uniform(&mut self, priorities: &[f32]) -> usize {
        let eligible: Vec<usize> =
            priorities.iter().enumerate().filter(|(_, &p)| p > 0.0).map(|(i, _)| i).collect();
        let pool: Vec<usize> = if eligible.is_empty() { (0..priorities.len()).collect() } else { eligible };
        let idx = self.rng.choose_index(pool.len()).unwrap_or(0);
        pool[idx]
    }

    /// Weighted draw proportional to priority; falls back to uniform when
    /// every priority is zero (§4.3, §8: "selects any child uniformly (by
    /// convention)").
    fn choose_weighted(&mut self, priorities: &[f32]) -> usize {
        let total: f32 = priorities.iter().sum();
        if total <= 0.0 {
            return self.choose_uniform(priorities);
        }
        let draw = self.rng.gen_unit() * total;
        let mut acc = 0.0_f32;
        for (i, &p) in priorities.iter().enumerate() {
            acc += p;
            if draw < acc {
                return i;
            }
        }
        priorities.len() - 1
    }

    // ── start / preempt / pause / resume / reset ───────────────────────────

    fn start_node(&mut self, id: NodeId) {
        match discriminant(&self.nodes[id.index()].kind) {
            Disc::Leaf => {
                let rec = &mut self.nodes[id.index()];
                if let NodeKind::Leaf(data) = &mut rec.kind {
                    if data.action.state() == ActionState::Inactive {
                        let _ = data.action.start();
                    }
                }
                rec.state = NodeState::Running;
            }
            Disc::Inverter => {
                let child = self.nodes[id.index()].children[0];
                self.start_node(child);
                self.nodes[id.index()].state = NodeState::Running;
            }
            Disc::Timer => self.start_timer(id),
            Disc::Priority | Disc::Selector | Disc::Random => {
                // Child selection is deferred to the first `tick` (the
                // "no running child" branch picks one) — see module docs.
                self.nodes[id.index()].state = NodeState::Running;
            }
        }
    }

    fn start_timer(&mut self, id: NodeId) {
        let child = self.nodes[id.index()].children[0];
        let should_start_child = {
            let rec = &mut self.nodes[id.index()];
            let NodeKind::Timer(t) = &mut rec.kind else { unreachable!() };
            rec.state = NodeState::Running;
            if t.pre_delay {
                t.elapsed = 0.0;
                t.ran_before = true;
                false
            } else if t.cooling {
                // Still counting down from an earlier preempt; don't restart yet.
                false
            } else if t.ran_before {
                // Re-selection following a natural finish: defer via cooldown.
                t.cooling = true;
                t.elapsed = 0.0;
                false
            } else {
                t.ran_before = true;
                true
            }
        };
        if should_start_child {
            self.start_node(child);
        }
    }

    fn preempt_node(&mut self, id: NodeId) {
        match discriminant(&self.nodes[id.index()].kind) {
            Disc::Leaf => {
                let rec = &mut self.nodes[id.index()];
                if let NodeKind::Leaf(data) = &mut rec.kind {
                    if matches!(data.action.state(), ActionState::Running | ActionState::Paused) {
                        let _ = data.action.terminate();
                    }
                }
                rec.state = NodeState::Inactive;
            }
            Disc::Inverter => {
                let child = self.nodes[id.index()].children[0];
                self.preempt_node(child);
                self.nodes[id.index()].state = NodeState::Inactive;
            }
            Disc::Timer => {
                let child = self.nodes[id.index()].children[0];
                self.preempt_node(child);
                let rec = &mut self.nodes[id.index()];
                let NodeKind::Timer(t) = &mut rec.kind else { unreachable!() };
                if t.pre_delay {
                    t.elapsed = 0.0;
                    rec.state = NodeState::Inactive;
                } else {
                    // Post-cooldown gate stays alive to count down (§4.4).
                    t.cooling = true;
                    t.elapsed = 0.0;
                    t.ran_before = true;
                    rec.state = NodeState::Running;
                }
            }
            Disc::Priority | Disc::Selector => {
                let running = match &self.nodes[id.index()].kind {
                    NodeKind::Priority(c) | NodeKind::Selector(c) => c.running,
                    _ => unreachable!(),
                };
                if let Some(r) = running {
                    let child = self.nodes[id.index()].children[r];
                    self.preempt_node(child);
                }
                set_running(&mut self.nodes[id.index()].kind, None);
                self.nodes[id.index()].state = NodeState::Inactive;
            }
            Disc::Random => {
                let running = match &self.nodes[id.index()].kind {
                    NodeKind::Random(r) => r.running,
                    _ => unreachable!(),
                };
                if let Some(r) = running {
                    let child = self.nodes[id.index()].children[r];
                    self.preempt_node(child);
                }
                if let NodeKind::Random(r) = &mut self.nodes[id.index()].kind {
                    r.running = None;
                }
                self.nodes[id.index()].state = NodeState::Inactive;
            }
        }
    }

    fn pause_node(&mut self, id: NodeId) -> BehaviorResult<()> {
        let children = self.nodes[id.index()].children.clone();
        match discriminant(&self.nodes[id.index()].kind) {
            Disc::Leaf => {
                let rec = &mut self.nodes[id.index()];
                if let NodeKind::Leaf(data) = &mut rec.kind {
                    data.action.pause()?;
                }
                rec.state = NodeState::Paused;
            }
            Disc::Inverter => {
                self.pause_node(children[0])?;
                self.nodes[id.index()].state = NodeState::Paused;
            }
            Disc::Timer => {
                let gating = {
                    let NodeKind::Timer(t) = &self.nodes[id.index()].kind else { unreachable!() };
                    (t.pre_delay && t.elapsed < t.delay) || (!t.pre_delay && t.cooling)
                };
                if !gating {
                    self.pause_node(children[0])?;
                }
                self.nodes[id.index()].state = NodeState::Paused;
            }
            Disc::Priority | Disc::Selector => {
                let running = match &self.nodes[id.index()].kind {
                    NodeKind::Priority(c) | NodeKind::Selector(c) => c.running,
                    _ => unreachable!(),
                };
                if let Some(r) = running {
                    self.pause_node(children[r])?;
                }
                self.nodes[id.index()].state = NodeState::Paused;
            }
            Disc::Random => {
                let running = match &self.nodes[id.index()].kind {
                    NodeKind::Random(r) => r.running,
                    _ => unreachable!(),
                };
                if let Some(r) = running {
                    self.pause_node(children[r])?;
                }
                self.nodes[id.index()].state = NodeState::Paused;
            }
        }
        Ok(())
    }

    fn resume_node(&mut self, id: NodeId) -> BehaviorResult<()> {
        let children = self.nodes[id.index()].children.clone();
        match discriminant(&self.nodes[id.index()].kind) {
            Disc::Leaf => {
                let rec = &mut self.nodes[id.index()];
                if let NodeKind::Leaf(data) = &mut rec.kind {
                    data.action.resume()?;
                }
                rec.state = NodeState::Running;
            }
            Disc::Inverter => {
                self.resume_node(children[0])?;
                self.nodes[id.index()].state = NodeState::Running;
            }
            Disc::Timer => {
                let gating = {
                    let NodeKind::Timer(t) = &self.nodes[id.index()].kind else { unreachable!() };
                    (t.pre_delay && t.elapsed < t.delay) || (!t.pre_delay && t.cooling)
                };
                if !gating {
                    self.resume_node(children[0])?;
                }
                self.nodes[id.index()].state = NodeState::Running;
            }
            Disc::Priority | Disc::Selector => {
                let running = match &self.nodes[id.index()].kind {
                    NodeKind::Priority(c) | NodeKind::Selector(c) => c.running,
                    _ => unreachable!(),
                };
                if let Some(r) = running {
                    self.resume_node(children[r])?;
                }
                self.nodes[id.index()].state = NodeState::Running;
            }
            Disc::Random => {
                let running = match &self.nodes[id.index()].kind {
                    NodeKind::Random(r) => r.running,
                    _ => unreachable!(),
                };
                if let Some(r) = running {
                    self.resume_node(children[r])?;
                }
                self.nodes[id.index()].state = NodeState::Running;
            }
        }
        Ok(())
    }

    fn reset_node(&mut self, id: NodeId) {
        let children = self.nodes[id.index()].children.clone();
        match discriminant(&self.nodes[id.index()].kind) {
            Disc::Leaf => {
                let rec = &mut self.nodes[id.index()];
                if let NodeKind::Leaf(data) = &mut rec.kind {
                    match data.action.state() {
                        ActionState::Running | ActionState::Paused => {
                            let _ = data.action.terminate();
                            let _ = data.action.reset();
                        }
                        ActionState::Finished => {
                            let _ = data.action.reset();
                        }
                        ActionState::Inactive => {}
                    }
                }
                rec.state = NodeState::Inactive;
            }
            Disc::Inverter => {
                self.reset_node(children[0]);
                self.nodes[id.index()].state = NodeState::Inactive;
            }
            Disc::Timer => {
                self.reset_node(children[0]);
                let rec = &mut self.nodes[id.index()];
                let NodeKind::Timer(t) = &mut rec.kind else { unreachable!() };
                t.elapsed = 0.0;
                t.cooling = false;
                t.ran_before = false;
                rec.state = NodeState::Inactive;
            }
            Disc::Priority | Disc::Selector => {
                for &c in &children {
                    self.reset_node(c);
                }
                set_running(&mut self.nodes[id.index()].kind, None);
                self.nodes[id.index()].state = NodeState::Inactive;
            }
            Disc::Random => {
                for &c in &children {
                    self.reset_node(c);
                }
                if let NodeKind::Random(r) = &mut self.nodes[id.index()].kind {
                    r.running = None;
                }
                self.nodes[id.index()].state = NodeState::Inactive;
            }
        }
    }
}

fn discriminant(kind: &NodeKind) -> Disc {
    match kind {
        NodeKind::Leaf(_) => Disc::Leaf,
        NodeKind::Inverter => Disc::Inverter,
        NodeKind::Timer(_) => Disc::Timer,
        NodeKind::Priority(_) => Disc::Priority,
        NodeKind::Selector(_) => Disc::Selector,
        NodeKind::Random(_) => Disc::Random,
    }
}

fn set_running(kind: &mut NodeKind, running: Option<usize>) {
    match kind {
        NodeKind::Priority(c) | NodeKind::Selector(c) => c.running = running,
        _ => unreachable!(),
    }
}

/// Index of the maximum value, ties broken by the lowest index (§4.3, §4.2
/// "Sibling tie-break").
fn argmax_lowest_tie(values: &[f32]) -> usize {
    let mut best = 0;
    for i in 1..values.len() {
        if values[i] > values[best] {
            best = i;
        }
    }
    best
}

fn compute_own_priority(rec: &mut NodeRecord, child_priorities: &[f32]) -> f32 {
    let raw = if let Some(pf) = rec.priority_fn.as_mut() {
        pf()
    } else {
        default_priority(&rec.kind, child_priorities)
    };
    raw.clamp(0.0, 1.0)
}

fn default_priority(kind: &NodeKind, child_priorities: &[f32]) -> f32 {
    match kind {
        NodeKind::Leaf(_) => unreachable!("leaf priority_fn is mandatory, enforced at build time"),
        NodeKind::Inverter => 1.0 - child_priorities.first().copied().unwrap_or(0.0),
        NodeKind::Timer(t) => {
            if !t.pre_delay && t.cooling {
                0.0
            } else {
                child_priorities.first().copied().unwrap_or(0.0)
            }
        }
        NodeKind::Priority(c) | NodeKind::Selector(c) => match c.running {
            Some(r) => child_priorities[r],
            None => child_priorities.iter().copied().fold(0.0_f32, f32::max),
        },
        NodeKind::Random(_) => {
            if child_priorities.is_empty() {
                0.0
            } else {
                child_priorities.iter().sum::<f32>() / child_priorities.len() as f32
            }
        }
    }
}
