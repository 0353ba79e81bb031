//! Unit tests for bt-pathfind.

#[cfg(test)]
mod shared {
    use bt_core::Vec2;
    use bt_spatial::{Grid, RectObstacleWorld};
    use crate::pathfinder::HeuristicFn;

    /// Chebyshev distance on world-space points — always `<=` the Euclidean
    /// step cost `search()` actually charges, so it stays admissible (§8
    /// scenario 5: "Chebyshev heuristic").
    pub fn chebyshev() -> HeuristicFn {
        Box::new(|a: Vec2, b: Vec2| (a.x - b.x).abs().max((a.y - b.y).abs()))
    }

    pub fn open_grid(rows: u32, cols: u32) -> Grid {
        let bounds = bt_core::Rect::new(Vec2::ZERO, bt_core::Size::new(cols as f32, rows as f32));
        let mut grid = Grid::new(bounds, rows, cols).unwrap();
        grid.scan_obstructions(&RectObstacleWorld::empty());
        grid
    }
}

// ── Scenario 5: A* path + detour (§8 end-to-end #5) ────────────────────────

mod astar_scenarios {
    use bt_core::Vec2;
    use bt_spatial::RectObstacleWorld;

    use crate::astar::AStarPathfinder;
    use crate::pathfinder::Pathfinder;
    use super::shared::{chebyshev, open_grid};

    #[test]
    fn diagonal_path_on_empty_grid_has_five_points() {
        let grid = open_grid(5, 5);
        let agent_start = grid.cell(grid.cell_at(0, 0).unwrap()).bounds.center();
        let target = grid.cell(grid.cell_at(4, 4).unwrap()).bounds.center();

        let mut finder = AStarPathfinder::new(chebyshev(), false, 0.1, 1.0, agent_start);
        let path = finder.compute_path(&grid, target).unwrap();

        assert_eq!(path.len(), 5, "5x5 diagonal traverse should need 5 cells including both ends");
        assert_eq!(path.points()[0], agent_start);
        assert_eq!(*path.points().last().unwrap(), target);
    }

    #[test]
    fn column_obstruction_forces_detour_through_gap() {
        let mut grid = open_grid(5, 5);
        // Obstruct column 2 except row 2, which is left as the only gap.
        let mut obstacles = Vec::new();
        for row in 0..5u32 {
            if row != 2 {
                obstacles.push(grid.cell(grid.cell_at(row, 2).unwrap()).bounds);
            }
        }
        grid.scan_obstructions(&RectObstacleWorld::new(obstacles));

        let agent_start = grid.cell(grid.cell_at(0, 0).unwrap()).bounds.center();
        let target = grid.cell(grid.cell_at(4, 4).unwrap()).bounds.center();
        let gap_center = grid.cell(grid.cell_at(2, 2).unwrap()).bounds.center();

        let mut finder = AStarPathfinder::new(chebyshev(), false, 0.1, 1.0, agent_start);
        let path = finder.compute_path(&grid, target).unwrap();

        assert!(
            path.points().iter().any(|&p| p == gap_center),
            "path must detour through the only unobstructed cell in column 2"
        );
    }

    #[test]
    fn unreachable_target_is_failure_not_error() {
        let mut grid = open_grid(3, 3);
        // Wall off the entire middle row so (0,*) cannot reach (2,*).
        let obstacles: Vec<_> =
            (0..3).map(|c| grid.cell(grid.cell_at(1, c).unwrap()).bounds).collect();
        grid.scan_obstructions(&RectObstacleWorld::new(obstacles));

        let agent_start = grid.cell(grid.cell_at(0, 0).unwrap()).bounds.center();
        let target = grid.cell(grid.cell_at(2, 2).unwrap()).bounds.center();

        let mut finder = AStarPathfinder::new(chebyshev(), false, 0.1, 1.0, agent_start);
        let path = finder.compute_path(&grid, target).unwrap();
        assert!(path.is_empty());
        assert_eq!(finder.state(), crate::pathfinder::PathfinderState::Failure);
    }

    #[test]
    fn target_equals_agent_cell_succeeds_on_first_tick() {
        let grid = open_grid(3, 3);
        let agent_start = grid.cell(grid.cell_at(1, 1).unwrap()).bounds.center();

        let mut finder = AStarPathfinder::new(chebyshev(), false, 0.1, 1.0, agent_start);
        let path = finder.compute_path(&grid, agent_start).unwrap();
        assert_eq!(path.len(), 1);

        let state = finder.tick(&grid).unwrap();
        assert_eq!(state, crate::pathfinder::PathfinderState::Success);
    }
}

// ── Mover boundary behaviors (§8 boundary) ──────────────────────────────────

mod mover {
    use bt_core::Vec2;
    use crate::mover::AgentMover;
    use crate::pathfinder::PathfinderState;

    #[test]
    fn empty_path_is_immediate_failure() {
        let mut mover = AgentMover::new(0.1);
        let mut pos = Vec2::ZERO;
        let state = mover.tick(&[], &mut pos, 1.0, 0.1);
        assert_eq!(state, PathfinderState::Failure);
        assert_eq!(pos, Vec2::ZERO, "agent must not move on an empty path");
    }

    #[test]
    fn reaching_last_point_succeeds() {
        let path = vec![Vec2::new(1.0, 0.0)];
        let mut mover = AgentMover::new(0.05);
        let mut pos = Vec2::ZERO;
        // Large step relative to the remaining distance lands on the point.
        let state = mover.tick(&path, &mut pos, 100.0, 1.0);
        assert_eq!(state, PathfinderState::Success);
        assert_eq!(pos, Vec2::new(1.0, 0.0));
    }
}

// ── Pathfinder state-contract violations (§7) ───────────────────────────────

mod state_contract {
    use bt_core::Vec2;
    use crate::astar::AStarPathfinder;
    use crate::error::PathfindError;
    use crate::pathfinder::Pathfinder;
    use super::shared::{chebyshev, open_grid};

    #[test]
    fn tick_before_compute_path_is_not_running_error() {
        let grid = open_grid(3, 3);
        let mut finder = AStarPathfinder::new(chebyshev(), false, 0.1, 1.0, Vec2::ZERO);
        let err = finder.tick(&grid).unwrap_err();
        assert!(matches!(err, PathfindError::NotRunning(_)));
    }

    #[test]
    fn stop_returns_to_uninitialized() {
        let grid = open_grid(3, 3);
        let agent_start = grid.cell(grid.cell_at(0, 0).unwrap()).bounds.center();
        let target = grid.cell(grid.cell_at(2, 2).unwrap()).bounds.center();
        let mut finder = AStarPathfinder::new(chebyshev(), false, 0.1, 1.0, agent_start);
        finder.compute_path(&grid, target).unwrap();
        finder.stop();
        assert_eq!(finder.state(), crate::pathfinder::PathfinderState::Uninitialized);
        assert!(finder.current_path().is_empty());
    }
}

// ── Smoothing (§4.9 "Smoothing") ────────────────────────────────────────────

mod smoothing {
    use bt_spatial::RectObstacleWorld;

    use crate::astar::AStarPathfinder;
    use crate::pathfinder::Pathfinder;
    use super::shared::{chebyshev, open_grid};

    #[test]
    fn smoothing_shortens_a_clear_straight_run() {
        let grid = open_grid(5, 1);
        let agent_start = grid.cell(grid.cell_at(0, 0).unwrap()).bounds.center();
        let target = grid.cell(grid.cell_at(4, 0).unwrap()).bounds.center();

        let mut unsmoothed = AStarPathfinder::new(chebyshev(), false, 0.1, 1.0, agent_start);
        let raw = unsmoothed.compute_path(&grid, target).unwrap();

        let mut smoothed = AStarPathfinder::new(chebyshev(), true, 0.1, 1.0, agent_start);
        let collapsed = smoothed.compute_path(&grid, target).unwrap();

        assert!(collapsed.len() <= raw.len());
        assert_eq!(collapsed.points()[0], agent_start);
        assert_eq!(*collapsed.points().last().unwrap(), target);
    }

    #[test]
    fn smoothing_never_cuts_through_an_obstruction() {
        let mut grid = open_grid(3, 3);
        grid.scan_obstructions(&RectObstacleWorld::new([
            grid.cell(grid.cell_at(0, 1).unwrap()).bounds,
        ]));
        let agent_start = grid.cell(grid.cell_at(0, 0).unwrap()).bounds.center();
        let target = grid.cell(grid.cell_at(0, 2).unwrap()).bounds.center();

        let mut finder = AStarPathfinder::new(chebyshev(), true, 0.1, 1.0, agent_start);
        let path = finder.compute_path(&grid, target).unwrap();

        let detour = grid.cell(grid.cell_at(1, 1).unwrap()).bounds.center();
        assert!(path.points().contains(&detour), "smoothing must not erase the required detour");
    }
}

// ── Scenario 6: D* replan on dynamic obstruction (§8 end-to-end #6) ────────

mod dstar_scenarios {
    use bt_core::Vec2;
    use bt_spatial::RectObstacleWorld;

    use crate::dstar::DStarPathfinder;
    use crate::pathfinder::{Pathfinder, PathfinderState};
    use super::shared::{chebyshev, open_grid};

    #[test]
    fn replans_around_new_obstruction_and_still_reaches_goal() {
        let mut grid = open_grid(10, 10);
        let agent_start = grid.cell(grid.cell_at(0, 0).unwrap()).bounds.center();
        let target = grid.cell(grid.cell_at(9, 9).unwrap()).bounds.center();

        // tick_dt/velocity chosen so each tick advances roughly one cell.
        let mut finder = DStarPathfinder::new(chebyshev(), false, 0.2, 7.0, agent_start);
        finder.compute_path(&grid, target).unwrap();

        for _ in 0..3 {
            let state = finder.tick(&grid).unwrap();
            assert_eq!(state, PathfinderState::Running);
        }

        let path_before: Vec<Vec2> = finder.current_path().to_vec();

        grid.scan_obstructions(&RectObstacleWorld::new([
            grid.cell(grid.cell_at(5, 5).unwrap()).bounds,
        ]));

        let mut state = finder.tick(&grid).unwrap();
        assert_ne!(state, PathfinderState::Failure, "goal remains reachable around one blocked cell");

        let path_after: Vec<Vec2> = finder.current_path().to_vec();
        assert_ne!(path_before, path_after, "replanning must change the remaining path");

        let mut guard = 0;
        while state == PathfinderState::Running && guard < 500 {
            state = finder.tick(&grid).unwrap();
            guard += 1;
        }
        assert_eq!(state, PathfinderState::Success);
        assert!(finder.agent_position().distance(target) < 0.5);
    }
}
