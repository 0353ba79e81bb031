//! Action runtime — the leaf-attached lifecycle (§4.1).
//!
//! An [`Action`] is built from an immutable [`ActionDef`] (id + callbacks)
//! and owns the four-state lifecycle a [`crate::node::NodeKind::Leaf`]
//! mirrors into its own `state`.

use crate::error::{BehaviorError, BehaviorResult};

/// Invoked once when an action starts.
pub type StartFn = Box<dyn FnMut() + Send>;
/// Invoked every tick while `RUNNING`. Returns `true` when the action is done.
pub type UpdateFn = Box<dyn FnMut(f32) -> bool + Send>;
/// Invoked once when an action is terminated (naturally or by preemption).
pub type TerminateFn = Box<dyn FnMut() + Send>;

/// The four lifecycle states shared by [`Action`] and, mirrored, by leaf
/// nodes (§3 Action, §3 Node).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionState {
    Inactive,
    Running,
    Paused,
    Finished,
}

/// Immutable definition consumed to build an [`Action`]. `start` and
/// `terminate` are optional; `update` is mandatory (§4.1).
pub struct ActionDef {
    pub id: String,
    pub start: Option<StartFn>,
    pub update: UpdateFn,
    pub terminate: Option<TerminateFn>,
}

impl ActionDef {
    pub fn new(id: impl Into<String>, update: UpdateFn) -> Self {
        Self { id: id.into(), start: None, update, terminate: None }
    }

    pub fn with_start(mut self, start: StartFn) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_terminate(mut self, terminate: TerminateFn) -> Self {
        self.terminate = Some(terminate);
        self
    }
}

/// The action lifecycle itself, owned by a leaf node.
///
/// Calling an operation from a disallowed state is a programmer error:
/// `Action` signals it with a typed [`BehaviorError`] rather than mutating
/// state silently (§4.1 Failure modes).
pub struct Action {
    id: String,
    start: Option<StartFn>,
    update: UpdateFn,
    terminate: Option<TerminateFn>,
    state: ActionState,
}

impl Action {
    pub fn new(def: ActionDef) -> Self {
        Self {
            id: def.id,
            start: def.start,
            update: def.update,
            terminate: def.terminate,
            state: ActionState::Inactive,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn state(&self) -> ActionState {
        self.state
    }

    /// INACTIVE → RUNNING.
    pub fn start(&mut self) -> BehaviorResult<()> {
        if self.state != ActionState::Inactive {
            return Err(BehaviorError::ActionInvalidStart(self.state));
        }
        if let Some(f) = self.start.as_mut() {
            f();
        }
        self.state = ActionState::Running;
        Ok(())
    }

    /// Invokes the update callback while `RUNNING`; a no-op while `PAUSED`
    /// (§4.2: "PAUSED ignores `update(dt)`"). Any other state is a
    /// programmer error upstream — leaves only call this after `start()`.
    pub fn update(&mut self, dt: f32) -> ActionState {
        if self.state == ActionState::Running {
            let finished = (self.update)(dt);
            if finished {
                self.state = ActionState::Finished;
            }
        }
        self.state
    }

    /// RUNNING | PAUSED → FINISHED.
    pub fn terminate(&mut self) -> BehaviorResult<()> {
        match self.state {
            ActionState::Running | ActionState::Paused => {
                if let Some(f) = self.terminate.as_mut() {
                    f();
                }
                self.state = ActionState::Finished;
                Ok(())
            }
            other => Err(BehaviorError::ActionInvalidTerminate(other)),
        }
    }

    /// RUNNING → PAUSED.
    pub fn pause(&mut self) -> BehaviorResult<()> {
        if self.state != ActionState::Running {
            return Err(BehaviorError::ActionInvalidPause(self.state));
        }
        self.state = ActionState::Paused;
        Ok(())
    }

    /// PAUSED → RUNNING.
    pub fn resume(&mut self) -> BehaviorResult<()> {
        if self.state != ActionState::Paused {
            return Err(BehaviorError::ActionInvalidResume(self.state));
        }
        self.state = ActionState::Running;
        Ok(())
    }

    /// FINISHED → INACTIVE.
    pub fn reset(&mut self) -> BehaviorResult<()> {
        if self.state != ActionState::Finished {
            return Err(BehaviorError::ActionInvalidReset(self.state));
        }
        self.state = ActionState::Inactive;
        Ok(())
    }
}
