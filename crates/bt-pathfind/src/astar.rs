//! Classic A* over a [`bt_spatial::Grid`] (§4.9 "A* variant").

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use bt_core::{CellId, Vec2};
use bt_spatial::Grid;

use crate::error::{PathfindError, PathfindResult};
use crate::mover::AgentMover;
use crate::path::{self, Path};
use crate::pathfinder::{HeuristicFn, Pathfinder, PathfinderState};

/// Best-first search with an admissible heuristic, computed once per
/// `compute_path` call and never updated until recomputed — the static-world
/// variant (§4.9).
pub struct AStarPathfinder {
    heuristic: HeuristicFn,
    smoothing: bool,
    tick_dt: f32,
    velocity: f32,
    agent_pos: Vec2,
    mover: AgentMover,
    path: Path,
    state: PathfinderState,
}

impl AStarPathfinder {
    /// `tick_dt` is the fixed per-tick timestep this pathfinder advances its
    /// agent by; `agent_pos` is the agent's starting world position;
    /// `velocity` is the speed `tick` moves the agent at (world units per
    /// second) until changed with [`Pathfinder::set_velocity`] or by a
    /// `move_to` call.
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
        }
    }

    fn cell_epsilon(grid: &Grid) -> f32 {
        let bounds = grid.bounds();
        let w = bounds.size.width / grid.cols() as f32;
        let h = bounds.size.height / grid.rows() as f32;
        0.5 * Vec2::new(w, h).length()
    }
}

impl Pathfinder for AStarPathfinder {
    fn compute_path(&mut self, grid: &Grid, target: Vec2) -> PathfindResult<Path> {
        let start = grid
            .cell_at_point(self.agent_pos)
            .ok_or(PathfindError::AgentOffGrid(self.agent_pos))?;
        let goal = grid
            .cell_at_point(target)
            .ok_or(PathfindError::TargetOffGrid(target))?;

        self.mover = AgentMover::new(Self::cell_epsilon(grid));

        if start == goal {
            self.path = Path::new(vec![target]);
            self.state = PathfinderState::Running;
            return Ok(self.path.clone());
        }

        match search(grid, start, goal, &self.heuristic) {
            Some(cells) => {
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
            None => {
                self.path = Path::empty();
                self.state = PathfinderState::Failure;
            }
        }
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
    }

    fn tick(&mut self, _grid: &Grid) -> PathfindResult<PathfinderState> {
        match self.state {
            PathfinderState::Uninitialized => Err(PathfindError::NotRunning(self.state)),
            PathfinderState::Success | PathfinderState::Failure => Ok(self.state),
            PathfinderState::Running => {
                self.state = self.mover.tick(self.path.points(), &mut self.agent_pos, self.velocity, self.tick_dt);
                Ok(self.state)
            }
        }
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

/// Converts a non-negative f32 cost into a bit pattern that sorts the same
/// way the float does — lets costs live in an ordered `BinaryHeap` key.
#[inline]
fn order_key(cost: f32) -> u32 {
    debug_assert!(cost >= 0.0 && !cost.is_nan());
    cost.to_bits()
}

/// Runs A* from `start` to `goal`, returning the cell path (inclusive of
/// both ends) or `None` if unreachable. Tie-breaks on f-score by lower
/// h-score, then by insertion order (§4.9).
fn search(grid: &Grid, start: CellId, goal: CellId, heuristic: &HeuristicFn) -> Option<Vec<CellId>> {
    let center = |c: CellId| grid.cell(c).bounds.center();
    let goal_center = center(goal);

    let mut g_score: HashMap<CellId, f32> = HashMap::new();
    let mut came_from: HashMap<CellId, CellId> = HashMap::new();
    let mut closed: HashSet<CellId> = HashSet::new();
    // Reverse(...) turns the max-heap into a min-heap on (f, h, insertion-seq).
    let mut open: BinaryHeap<Reverse<(u32, u32, u64, CellId)>> = BinaryHeap::new();
    let mut seq: u64 = 0;

    g_score.insert(start, 0.0);
    let h_start = heuristic(center(start), goal_center);
    open.push(Reverse((order_key(h_start), order_key(h_start), seq, start)));
    seq += 1;

    while let Some(Reverse((_, _, _, current))) = open.pop() {
        if current == goal {
            return Some(reconstruct(came_from, current));
        }
        if !closed.insert(current) {
            continue;
        }

        let current_g = g_score[&current];
        for &neighbor in grid.neighbors(current) {
            if grid.cell(neighbor).obstructed || closed.contains(&neighbor) {
                continue;
            }
            let step_cost = center(current).distance(center(neighbor));
            let tentative_g = current_g + step_cost;
            let best_known = g_score.get(&neighbor).copied().unwrap_or(f32::INFINITY);
            if tentative_g < best_known {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);
                let h = heuristic(center(neighbor), goal_center);
                let f = tentative_g + h;
                open.push(Reverse((order_key(f), order_key(h), seq, neighbor)));
                seq += 1;
            }
        }
    }
    None
}

fn reconstruct(came_from: HashMap<CellId, CellId>, goal: CellId) -> Vec<CellId> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
