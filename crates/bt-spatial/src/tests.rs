//! Unit tests for bt-spatial.

#[cfg(test)]
mod grid_construction {
    use bt_core::{Rect, Size, Vec2};
    use crate::error::SpatialError;
    use crate::grid::Grid;

    #[test]
    fn rejects_empty_dimensions() {
        let bounds = Rect::new(Vec2::ZERO, Size::new(10.0, 10.0));
        assert!(matches!(Grid::new(bounds, 0, 4), Err(SpatialError::EmptyGrid { .. })));
        assert!(matches!(Grid::new(bounds, 4, 0), Err(SpatialError::EmptyGrid { .. })));
    }

    #[test]
    fn cell_count_and_bounds() {
        let bounds = Rect::new(Vec2::new(0.0, 0.0), Size::new(10.0, 20.0));
        let grid = Grid::new(bounds, 4, 2).unwrap();
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 2);

        let c = grid.cell(grid.cell_at(0, 0).unwrap());
        assert_eq!(c.bounds.origin, Vec2::new(0.0, 0.0));
        assert_eq!(c.bounds.size, Size::new(5.0, 5.0));

        let c = grid.cell(grid.cell_at(3, 1).unwrap());
        assert_eq!(c.bounds.origin, Vec2::new(5.0, 15.0));
    }

    #[test]
    fn cell_at_out_of_range_is_none() {
        let bounds = Rect::new(Vec2::ZERO, Size::new(10.0, 10.0));
        let grid = Grid::new(bounds, 2, 2).unwrap();
        assert!(grid.cell_at(2, 0).is_none());
        assert!(grid.cell_at(0, 2).is_none());
    }

    #[test]
    fn neighbors_trimmed_at_corner() {
        let bounds = Rect::new(Vec2::ZERO, Size::new(10.0, 10.0));
        let grid = Grid::new(bounds, 3, 3).unwrap();
        let corner = grid.cell_at(0, 0).unwrap();
        assert_eq!(grid.neighbors(corner).len(), 3);

        let center = grid.cell_at(1, 1).unwrap();
        assert_eq!(grid.neighbors(center).len(), 8);

        let edge = grid.cell_at(0, 1).unwrap();
        assert_eq!(grid.neighbors(edge).len(), 5);
    }
}

#[cfg(test)]
mod cell_at_point {
    use bt_core::{Rect, Size, Vec2};
    use crate::grid::Grid;

    fn grid() -> Grid {
        let bounds = Rect::new(Vec2::ZERO, Size::new(10.0, 10.0));
        Grid::new(bounds, 2, 2).unwrap()
    }

    #[test]
    fn interior_point_resolves_to_its_cell() {
        let grid = grid();
        assert_eq!(grid.cell_at_point(Vec2::new(1.0, 1.0)), grid.cell_at(0, 0));
        assert_eq!(grid.cell_at_point(Vec2::new(6.0, 1.0)), grid.cell_at(0, 1));
        assert_eq!(grid.cell_at_point(Vec2::new(1.0, 6.0)), grid.cell_at(1, 0));
        assert_eq!(grid.cell_at_point(Vec2::new(6.0, 6.0)), grid.cell_at(1, 1));
    }

    #[test]
    fn interior_boundary_ties_resolve_to_lower_index() {
        let grid = grid();
        assert_eq!(grid.cell_at_point(Vec2::new(5.0, 1.0)), grid.cell_at(0, 1));
        assert_eq!(grid.cell_at_point(Vec2::new(1.0, 5.0)), grid.cell_at(1, 0));
    }

    #[test]
    fn far_world_edge_clamps_into_last_cell() {
        let grid = grid();
        assert_eq!(grid.cell_at_point(Vec2::new(10.0, 10.0)), grid.cell_at(1, 1));
    }

    #[test]
    fn outside_world_bounds_is_none() {
        let grid = grid();
        assert!(grid.cell_at_point(Vec2::new(-1.0, 5.0)).is_none());
        assert!(grid.cell_at_point(Vec2::new(11.0, 5.0)).is_none());
    }
}

#[cfg(test)]
mod scan_obstructions {
    use bt_core::{Rect, Size, Vec2};
    use crate::grid::Grid;
    use crate::obstacle::RectObstacleWorld;

    #[test]
    fn marks_only_overlapping_cells() {
        let bounds = Rect::new(Vec2::ZERO, Size::new(10.0, 10.0));
        let mut grid = Grid::new(bounds, 2, 2).unwrap();
        let world = RectObstacleWorld::new([Rect::new(Vec2::new(0.0, 0.0), Size::new(2.0, 2.0))]);
        grid.scan_obstructions(&world);

        assert!(grid.cell(grid.cell_at(0, 0).unwrap()).obstructed);
        assert!(!grid.cell(grid.cell_at(0, 1).unwrap()).obstructed);
        assert!(!grid.cell(grid.cell_at(1, 0).unwrap()).obstructed);
        assert!(!grid.cell(grid.cell_at(1, 1).unwrap()).obstructed);
    }

    #[test]
    fn empty_world_leaves_everything_clear() {
        let bounds = Rect::new(Vec2::ZERO, Size::new(10.0, 10.0));
        let mut grid = Grid::new(bounds, 3, 3).unwrap();
        grid.scan_obstructions(&RectObstacleWorld::empty());
        for (_, cell) in grid.iter() {
            assert!(!cell.obstructed);
        }
    }

    #[test]
    fn rescan_clears_stale_obstructions() {
        let bounds = Rect::new(Vec2::ZERO, Size::new(10.0, 10.0));
        let mut grid = Grid::new(bounds, 2, 2).unwrap();
        let blocked = RectObstacleWorld::new([Rect::new(Vec2::new(0.0, 0.0), Size::new(2.0, 2.0))]);
        grid.scan_obstructions(&blocked);
        assert!(grid.cell(grid.cell_at(0, 0).unwrap()).obstructed);

        grid.scan_obstructions(&RectObstacleWorld::empty());
        assert!(!grid.cell(grid.cell_at(0, 0).unwrap()).obstructed);
    }
}

#[cfg(test)]
mod clearance {
    use bt_core::{Rect, Size, Vec2};
    use crate::grid::Grid;
    use crate::obstacle::RectObstacleWorld;

    #[test]
    fn all_clear_grid_grows_clearance_toward_top_left() {
        let bounds = Rect::new(Vec2::ZERO, Size::new(12.0, 12.0));
        let mut grid = Grid::new(bounds, 3, 3).unwrap();
        grid.scan_obstructions(&RectObstacleWorld::empty());
        grid.compute_clearance();

        assert_eq!(grid.cell(grid.cell_at(2, 2).unwrap()).clearance, 1);
        assert_eq!(grid.cell(grid.cell_at(2, 1).unwrap()).clearance, 1);
        assert_eq!(grid.cell(grid.cell_at(1, 1).unwrap()).clearance, 2);
        assert_eq!(grid.cell(grid.cell_at(0, 0).unwrap()).clearance, 3);
    }

    #[test]
    fn obstructed_cell_has_zero_clearance() {
        let bounds = Rect::new(Vec2::ZERO, Size::new(12.0, 12.0));
        let mut grid = Grid::new(bounds, 3, 3).unwrap();
        let world = RectObstacleWorld::new([Rect::new(Vec2::new(4.0, 4.0), Size::new(1.0, 1.0))]);
        grid.scan_obstructions(&world);
        grid.compute_clearance();

        assert_eq!(grid.cell(grid.cell_at(1, 1).unwrap()).clearance, 0);
        // A clear cell whose SE-block neighbor is obstructed is capped at 1.
        assert_eq!(grid.cell(grid.cell_at(0, 0).unwrap()).clearance, 1);
    }
}
