//! Incremental replanning pathfinder using Lifelong-Planning-A* / D*-Lite
//! bookkeeping (§4.9 "D* variant").
//!
//! Search state (`g`, `rhs`) is kept in side-tables keyed by `CellId` rather
//! than on the grid cells themselves (§9 "grid ownership vs. shared use",
//! preferred option (a)) — `bt-spatial::GridCell` carries only world-owned
//! properties, so more than one pathfinder could search the same grid.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use bt_core::{CellId, Vec2};
use bt_spatial::Grid;

use crate::error::{PathfindError, PathfindResult};
use crate::mover::AgentMover;
use crate::path::{self, Path};
use crate::pathfinder::{HeuristicFn, Pathfinder, PathfinderState};

#[inline]
fn order_key(cost: f32) -> u32 {
    debug_assert!(cost >= 0.0 && !cost.is_nan());
    cost.to_bits()
}

const INF: f32 = f32::INFINITY;

/// D*-Lite / LPA* pathfinder: maintains `g`/`rhs` estimates across ticks and
/// replans incrementally when the grid's obstructions change along the
/// remaining path, instead of researching from scratch (§4.9).
pub struct DStarPathfinder {
    heuristic: HeuristicFn,
    smoothing: bool,
    tick_dt: f32,
    velocity: f32,
    agent_pos: Vec2,
    mover: AgentMover,
    path: Path,
    state: PathfinderState,

    goal: Option<CellId>,
    g: HashMap<CellId, f32>,
    rhs: HashMap<CellId, f32>,
    open: BinaryHeap<Reverse<(u32, u32, CellId)>>,
    /// Last-observed `obstructed` flag per cell, used to detect changes
    /// between ticks without rescanning the whole grid from nothing.
    last_obstructed: HashMap<CellId, bool>,
}

impl DStarPathfinder {
    /// `velocity` is the speed `tick` moves the agent at until changed with
    /// [`Pathfinder::set_velocity`] or by a `move_to` call.
    pub fn new(heuristic: HeuristicFn, smoothing: bool, tick_dt: f32, velocity: f32, agent_pos: Vec2) -> Self {
        Self {
            heuristic,
            smoothing,
            tick_dt,
            velocity,
            agent_pos,
            mover: AgentMover::new(0.0),
            path: Path::empty(),
            state: PathfinderState::Uninitialized,
            goal: None,
            g: HashMap::new(),
            rhs: HashMap::new(),
            open: BinaryHeap::new(),
            last_obstructed: HashMap::new(),
        }
    }

    fn cell_epsilon(grid: &Grid) -> f32 {
        let bounds = grid.bounds();
        let w = bounds.size.width / grid.cols() as f32;
        let h = bounds.size.height / grid.rows() as f32;
        0.5 * Vec2::new(w, h).length()
    }

    fn g_of(&self, cell: CellId) -> f32 {
        self.g.get(&cell).copied().unwrap_or(INF)
    }

    fn rhs_of(&self, cell: CellId) -> f32 {
        self.rhs.get(&cell).copied().unwrap_or(INF)
    }

    /// `k(cell) = min(g(cell), rhs(cell)) + h(cell, goal)`, tie-broken on the
    /// lower of `(g, rhs)` (§4.9's numeric contract, followed verbatim).
    fn key(&self, grid: &Grid, cell: CellId, goal_center: Vec2) -> (u32, u32) {
        let min_g_rhs = self.g_of(cell).min(self.rhs_of(cell));
        let h = (self.heuristic)(grid.cell(cell).bounds.center(), goal_center);
        let primary = if min_g_rhs.is_infinite() { INF } else { min_g_rhs + h };
        (order_key(primary.min(f32::MAX)), order_key(min_g_rhs.min(f32::MAX)))
    }

    fn step_cost(grid: &Grid, a: CellId, b: CellId) -> f32 {
        grid.cell(a).bounds.center().distance(grid.cell(b).bounds.center())
    }

    /// Recomputes `rhs(cell)` from its neighbors and re-queues it if it is
    /// now locally inconsistent (`g != rhs`). `start` is never given an `rhs`
    /// of its own — its `rhs` is fixed at 0, the search anchor.
    fn update_vertex(&mut self, grid: &Grid, cell: CellId, start: CellId, goal_center: Vec2) {
        if cell != start {
            let mut best = INF;
            for &neighbor in grid.neighbors(cell) {
                if grid.cell(neighbor).obstructed {
                    continue;
                }
                let candidate = self.g_of(neighbor) + Self::step_cost(grid, neighbor, cell);
                if candidate < best {
                    best = candidate;
                }
            }
            self.rhs.insert(cell, best);
        }

        if self.g_of(cell) != self.rhs_of(cell) {
            let key = self.key(grid, cell, goal_center);
            self.open.push(Reverse((key.0, key.1, cell)));
        }
        // Stale queue entries for now-consistent cells are left in place and
        // discarded lazily in `compute_shortest_path` — cheaper than a
        // decrease-key-capable heap for grids this size.
    }

    /// Drains the open set until `goal` is locally consistent and no queued
    /// cell has a better key than `goal`'s (standard LPA* termination,
    /// evaluated at `goal` rather than `start` since `g`/`rhs` here measure
    /// distance *from* `start` — the source anchor with `rhs = 0` — so it is
    /// `goal`'s value that still needs to settle). Reuses whatever `g`/`rhs`
    /// survived from the previous run (§4.9 "reusing prior work").
    fn compute_shortest_path(&mut self, grid: &Grid, start: CellId, goal: CellId, goal_center: Vec2) {
        loop {
            let Some(&Reverse((top_k1, top_k2, _))) = self.open.peek() else { break };
            let goal_key = self.key(grid, goal, goal_center);
            let goal_consistent = self.g_of(goal) == self.rhs_of(goal);
            if goal_consistent && (top_k1, top_k2) >= goal_key {
                break;
            }

            let Reverse((popped_k1, popped_k2, cell)) = self.open.pop().unwrap();
            let fresh_key = self.key(grid, cell, goal_center);
            if (popped_k1, popped_k2) != fresh_key {
                // Stale entry — a newer one (or none, if now consistent) was
                // already pushed when the key last changed.
                continue;
            }

            if self.g_of(cell) > self.rhs_of(cell) {
                self.g.insert(cell, self.rhs_of(cell));
                let neighbors: Vec<CellId> = grid.neighbors(cell).to_vec();
                for neighbor in neighbors {
                    self.update_vertex(grid, neighbor, start, goal_center);
                }
            } else {
                self.g.insert(cell, INF);
                let mut affected = grid.neighbors(cell).to_vec();
                affected.push(cell);
                for neighbor in affected {
                    self.update_vertex(grid, neighbor, start, goal_center);
                }
            }
        }
    }

    /// Greedy descent from `start` to `goal` following the cell with the
    /// lowest `g(neighbor) + step_cost`, once `g`/`rhs` have converged.
    fn extract_cell_path(&self, grid: &Grid, start: CellId, goal: CellId) -> Option<Vec<CellId>> {
        if self.g_of(goal).is_infinite() {
            return None;
        }
        let mut path = vec![start];
        let mut current = start;
        let max_steps = (grid.rows() * grid.cols()) as usize + 1;
        while current != goal {
            if path.len() > max_steps {
                return None;
            }
            let mut best_neighbor = None;
            let mut best_cost = INF;
            for &neighbor in grid.neighbors(current) {
                if grid.cell(neighbor).obstructed {
                    continue;
                }
                let cost = self.g_of(neighbor) + Self::step_cost(grid, current, neighbor);
                if cost < best_cost {
                    best_cost = cost;
                    best_neighbor = Some(neighbor);
                }
            }
            match best_neighbor {
                Some(next) => {
                    current = next;
                    path.push(current);
                }
                None => return None,
            }
        }
        Some(path)
    }

    /// Full (re)plan from scratch: resets `g`/`rhs`/open and runs
    /// `compute_shortest_path` once. Used only by `compute_path`; incremental
    /// replans inside `tick` reuse the existing tables instead.
    fn replan_from_scratch(&mut self, grid: &Grid, start: CellId, goal: CellId) {
        self.g.clear();
        self.rhs.clear();
        self.open.clear();
        self.rhs.insert(start, 0.0);
        let goal_center = grid.cell(goal).bounds.center();
        let key = self.key(grid, start, goal_center);
        self.open.push(Reverse((key.0, key.1, start)));
        self.compute_shortest_path(grid, start, goal, goal_center);
        self.snapshot_obstructions(grid);
    }

    fn snapshot_obstructions(&mut self, grid: &Grid) {
        self.last_obstructed.clear();
        for (id, cell) in grid.iter() {
            self.last_obstructed.insert(id, cell.obstructed);
        }
    }

    /// Returns the cells whose `obstructed` flag differs from the last
    /// snapshot, updating the snapshot to match.
    fn detect_changes(&mut self, grid: &Grid) -> Vec<CellId> {
        let mut changed = Vec::new();
        for (id, cell) in grid.iter() {
            let previously = self.last_obstructed.get(&id).copied().unwrap_or(false);
            if previously != cell.obstructed {
                changed.push(id);
            }
        }
        for &id in &changed {
            self.last_obstructed.insert(id, grid.cell(id).obstructed);
        }
        changed
    }
}

impl Pathfinder for DStarPathfinder {
    fn compute_path(&mut self, grid: &Grid, target: Vec2) -> PathfindResult<Path> {
        let start = grid
            .cell_at_point(self.agent_pos)
            .ok_or(PathfindError::AgentOffGrid(self.agent_pos))?;
        let goal = grid
            .cell_at_point(target)
            .ok_or(PathfindError::TargetOffGrid(target))?;

        self.mover = AgentMover::new(Self::cell_epsilon(grid));
        self.goal = Some(goal);

        if start == goal {
            self.path = Path::new(vec![target]);
            self.state = PathfinderState::Running;
            return Ok(self.path.clone());
        }

        self.replan_from_scratch(grid, start, goal);
        self.rebuild_path(grid, start, goal, target);
        Ok(self.path.clone())
    }

    fn move_to(&mut self, grid: &Grid, target: Vec2, velocity: f32) -> PathfindResult<bool> {
        self.velocity = velocity;
        self.compute_path(grid, target)?;
        if velocity <= 0.0 {
            return Ok(false);
        }
        loop {
            match self.tick(grid)? {
                PathfinderState::Running => continue,
                PathfinderState::Success => return Ok(true),
                PathfinderState::Failure => return Ok(false),
                PathfinderState::Uninitialized => unreachable!("tick never re-enters Uninitialized"),
            }
        }
    }

    fn stop(&mut self) {
        self.state = PathfinderState::Uninitialized;
        self.path = Path::empty();
        self.mover.reset();
        self.goal = None;
        self.g.clear();
        self.rhs.clear();
        self.open.clear();
        self.last_obstructed.clear();
    }

    fn tick(&mut self, grid: &Grid) -> PathfindResult<PathfinderState> {
        match self.state {
            PathfinderState::Uninitialized => return Err(PathfindError::NotRunning(self.state)),
            PathfinderState::Success | PathfinderState::Failure => return Ok(self.state),
            PathfinderState::Running => {}
        }

        let goal = self.goal.expect("goal is set whenever state is Running");
        let changed = self.detect_changes(grid);
        if !changed.is_empty() {
            let Some(start) = grid.cell_at_point(self.agent_pos) else {
                self.state = PathfinderState::Failure;
                return Ok(self.state);
            };
            let goal_center = grid.cell(goal).bounds.center();
            for cell in changed {
                self.update_vertex(grid, cell, start, goal_center);
                let neighbors: Vec<CellId> = grid.neighbors(cell).to_vec();
                for neighbor in neighbors {
                    self.update_vertex(grid, neighbor, start, goal_center);
                }
            }
            self.compute_shortest_path(grid, start, goal, goal_center);
            let target = self.path.points().last().copied().unwrap_or(grid.cell(goal).bounds.center());
            self.rebuild_path(grid, start, goal, target);
            if self.path.is_empty() {
                self.state = PathfinderState::Failure;
                return Ok(self.state);
            }
            self.mover.reset();
        }

        self.state = self.mover.tick(self.path.points(), &mut self.agent_pos, self.velocity, self.tick_dt);
        Ok(self.state)
    }

    fn state(&self) -> PathfinderState {
        self.state
    }

    fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    fn agent_position(&self) -> Vec2 {
        self.agent_pos
    }

    fn current_path(&self) -> &[Vec2] {
        self.path.points()
    }

    fn untraversed_path(&self, agent_pos: Vec2) -> Vec<Vec2> {
        path::untraversed(self.path.points(), agent_pos)
    }
}

impl DStarPathfinder {
    fn rebuild_path(&mut self, grid: &Grid, start: CellId, goal: CellId, target: Vec2) {
        match self.extract_cell_path(grid, start, goal) {
            Some(cells) if cells.len() >= 2 => {
                let mut points = Vec::with_capacity(cells.len());
                points.push(self.agent_pos);
                for &cell in &cells[1..cells.len() - 1] {
                    points.push(grid.cell(cell).bounds.center());
                }
                points.push(target);
                let mut built = Path::new(points);
                if self.smoothing {
                    built = path::smooth(&built, grid);
                }
                self.path = built;
                self.state = PathfinderState::Running;
            }
            Some(_) => {
                self.path = Path::new(vec![target]);
                self.state = PathfinderState::Running;
            }
            None => {
                self.path = Path::empty();
                self.state = PathfinderState::Failure;
            }
        }
    }
}
