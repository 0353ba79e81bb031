//! The obstacle world contract (§6 "Obstacle world") and a small default
//! implementation used by tests and simple callers.
//!
//! The core treats the world as opaquely as the original CUGL `ObstacleWorld`
//! — "a callable that, given a cell's bounds rectangle, returns whether any
//! obstacle overlaps it" (§6). Real collaborators (a physics world, a tile
//! map) implement [`ObstacleWorld`] themselves; `bt-spatial` does not assume
//! anything about obstacle shape beyond "has an axis-aligned bounding
//! rectangle", mirroring `dt-spatial::network::RoadNetwork`'s `rstar`-backed
//! spatial index (§10.3 dependency alignment).

use bt_core::Rect;
use rstar::{RTree, RTreeObject, AABB};

/// Narrow contract the pathfinding core consumes from its physics/obstacle
/// collaborator (§6, §1 "obstacles as shapes with bounds").
pub trait ObstacleWorld {
    /// `true` if any obstacle in the world overlaps `bounds`.
    fn overlaps(&self, bounds: Rect) -> bool;
}

fn rect_to_aabb(r: Rect) -> AABB<[f32; 2]> {
    let min = r.min();
    let max = r.max();
    AABB::from_corners([min.x, min.y], [max.x, max.y])
}

#[derive(Clone, Copy)]
struct ObstacleEntry(Rect);

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        rect_to_aabb(self.0)
    }
}

/// A simple [`ObstacleWorld`] backed by an `rstar` R-tree of axis-aligned
/// rectangles — the equivalent, for this narrow trait, of
/// `dt-spatial::RoadNetwork`'s R-tree-backed node index (§10.3).
///
/// Useful as the default collaborator for tests and for callers whose
/// obstacles are already rectangular; a tile-based or physics-engine-backed
/// world would implement [`ObstacleWorld`] directly instead.
pub struct RectObstacleWorld {
    tree: RTree<ObstacleEntry>,
}

impl RectObstacleWorld {
    pub fn new(obstacles: impl IntoIterator<Item = Rect>) -> Self {
        let entries: Vec<ObstacleEntry> = obstacles.into_iter().map(ObstacleEntry).collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn empty() -> Self {
        Self { tree: RTree::new() }
    }
}

impl ObstacleWorld for RectObstacleWorld {
    fn overlaps(&self, bounds: Rect) -> bool {
        let query = rect_to_aabb(bounds);
        self.tree.locate_in_envelope_intersecting(&query).next().is_some()
    }
}
