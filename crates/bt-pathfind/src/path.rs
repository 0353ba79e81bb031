//! `Path` — an ordered sequence of world-space points (§3 "Path"), plus the
//! optional smoothing pass and `getUntraversedPath` (§4.9, §10.4).

use bt_core::Vec2;

use bt_spatial::Grid;

/// An ordered sequence of 2D points in world coordinates, from the agent's
/// position at the moment `compute_path` was called to the target (§3).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path(Vec<Vec2>);

impl Path {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self(points)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn points(&self) -> &[Vec2] {
        &self.0
    }

    pub fn into_points(self) -> Vec<Vec2> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Simplifies `path` by walking it from the start and, while the straight
/// segment from the current anchor to point `i+2` crosses no obstructed
/// cell, dropping point `i+1` (§4.9 "Smoothing").
pub fn smooth(path: &Path, grid: &Grid) -> Path {
    let points = path.points();
    if points.len() < 3 {
        return path.clone();
    }

    let mut result = vec![points[0]];
    let mut anchor = points[0];
    let mut i = 1;
    while i + 1 < points.len() {
        if segment_is_clear(grid, anchor, points[i + 1]) {
            // The segment anchor -> i+2 is clear, so i+1 can be dropped.
            i += 1;
        } else {
            result.push(points[i]);
            anchor = points[i];
            i += 1;
        }
    }
    result.push(points[points.len() - 1]);
    Path(result)
}

/// `true` if the straight segment `a -> b` crosses no obstructed grid cell.
/// Sampled at roughly half a cell's width so no obstruction can hide between
/// samples.
fn segment_is_clear(grid: &Grid, a: Vec2, b: Vec2) -> bool {
    let bounds = grid.bounds();
    let cell_w = bounds.size.width / grid.cols() as f32;
    let cell_h = bounds.size.height / grid.rows() as f32;
    let sample_step = cell_w.min(cell_h) * 0.5;
    if sample_step <= 0.0 {
        return true;
    }

    let dist = a.distance(b);
    let steps = ((dist / sample_step).ceil() as usize).max(1);
    for s in 0..=steps {
        let t = s as f32 / steps as f32;
        let p = Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
        if let Some(cell) = grid.cell_at_point(p) {
            if grid.cell(cell).obstructed {
                return false;
            }
        } else {
            // A sample landing outside the grid is treated as blocked —
            // smoothing should never cut a corner through unmapped space.
            return false;
        }
    }
    true
}

/// The portion of `points` past the agent's current position, projected onto
/// the path (§3 "the untraversed suffix"): the closest point on any segment
/// of the path to `agent_pos`, followed by every vertex after that segment.
pub fn untraversed(points: &[Vec2], agent_pos: Vec2) -> Vec<Vec2> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let mut best_segment = 0;
    let mut best_dist_sq = f32::INFINITY;
    let mut best_point = points[0];

    for i in 0..points.len() - 1 {
        let a = points[i];
        let b = points[i + 1];
        let ab = b.sub(a);
        let len_sq = ab.dot(ab);
        let t = if len_sq > 0.0 {
            (agent_pos.sub(a).dot(ab) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let projected = a.add(ab.scale(t));
        let dist_sq = projected.distance_squared(agent_pos);
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            best_segment = i;
            best_point = projected;
        }
    }

    let mut result = vec![best_point];
    result.extend_from_slice(&points[best_segment + 1..]);
    result
}
