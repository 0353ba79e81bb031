//! tree_runner — a patrol/chase behavior tree steering an A*-piloted agent
//! across an occupancy grid with a few rectangular obstacles.
//!
//! The "chase" leaf's priority function reads the live distance to a moving
//! target; a Priority composite with `preempt = true` switches between chase
//! and patrol every frame based on whichever priority function reports
//! higher right now. Both leaves drive the same [`AStarPathfinder`], handing
//! it a fresh target whenever they're (re)selected.
//!
//! Callbacks on `bt-behavior` nodes are `Send` (so a tree can be handed to a
//! worker thread), so shared state here goes through `Arc<Mutex<_>>` rather
//! than `Rc<RefCell<_>>`.

use std::sync::{Arc, Mutex};

use anyhow::Result;

use bt_behavior::{ActionDef, NodeDef, NodeDefKind, NodeState, PriorityFn, TreeBuilder, TreeManager};
use bt_core::{Rect, Size, Vec2};
use bt_pathfind::{AStarPathfinder, Pathfinder, PathfinderState};
use bt_spatial::{Grid, RectObstacleWorld};

const GRID_SIZE: u32 = 12;
const TICK_DT: f32 = 0.1;
const AGENT_VELOCITY: f32 = 6.0;
const CHASE_RADIUS: f32 = 5.0;
const SEED: u64 = 7;
const FRAMES: u32 = 60;

fn chebyshev(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

fn main() -> Result<()> {
    println!("=== tree_runner — behavior tree + A* demo ===");

    let bounds = Rect::new(Vec2::ZERO, Size::new(GRID_SIZE as f32, GRID_SIZE as f32));
    let mut grid = Grid::new(bounds, GRID_SIZE, GRID_SIZE)?;
    let obstacles = RectObstacleWorld::new([
        Rect::new(Vec2::new(4.0, 2.0), Size::new(1.0, 6.0)),
        Rect::new(Vec2::new(8.0, 5.0), Size::new(2.0, 1.0)),
    ]);
    grid.scan_obstructions(&obstacles);
    grid.compute_clearance();
    let grid = Arc::new(grid);
    println!(
        "Grid: {}x{} cells, {} obstructed",
        grid.rows(),
        grid.cols(),
        grid.iter().filter(|(_, c)| c.obstructed).count()
    );

    let agent_start = grid.cell(grid.cell_at(0, 0).unwrap()).bounds.center();
    let pathfinder = Arc::new(Mutex::new(AStarPathfinder::new(
        Box::new(chebyshev),
        true,
        TICK_DT,
        AGENT_VELOCITY,
        agent_start,
    )));
    let active_target = Arc::new(Mutex::new(None::<Vec2>));

    // A "player" the agent chases when within CHASE_RADIUS, otherwise it
    // patrols a two-point loop.
    let player_pos = Arc::new(Mutex::new(grid.cell(grid.cell_at(11, 11).unwrap()).bounds.center()));
    let patrol_route = [
        grid.cell(grid.cell_at(0, 11).unwrap()).bounds.center(),
        grid.cell(grid.cell_at(11, 0).unwrap()).bounds.center(),
    ];
    let patrol_index = Arc::new(Mutex::new(0usize));

    let chase_priority_fn: PriorityFn = {
        let pathfinder = pathfinder.clone();
        let player_pos = player_pos.clone();
        Box::new(move || {
            let dist = pathfinder.lock().unwrap().agent_position().distance(*player_pos.lock().unwrap());
            (1.0 - dist / CHASE_RADIUS).max(0.0)
        })
    };
    let patrol_priority_fn: PriorityFn = Box::new(|| 0.3_f32);

    // Both leaves share one driver: (re)plan toward `wanted` if the
    // pathfinder isn't already en route there, then tick it one frame.
    // `Arc<dyn Fn + Send + Sync>` rather than a bare closure so both leaves
    // can cheaply clone a handle to the same driver while staying `Send`.
    let drive_toward: Arc<dyn Fn(Vec2) -> bool + Send + Sync> = {
        let grid = grid.clone();
        let pathfinder = pathfinder.clone();
        let active_target = active_target.clone();
        Arc::new(move |wanted: Vec2| -> bool {
            let mut pf = pathfinder.lock().unwrap();
            let retarget = match *active_target.lock().unwrap() {
                Some(prev) => prev.distance(wanted) > 0.5 || pf.state() != PathfinderState::Running,
                None => true,
            };
            if retarget {
                *active_target.lock().unwrap() = Some(wanted);
                let _ = pf.compute_path(&grid, wanted);
            }
            matches!(pf.tick(&grid), Ok(PathfinderState::Success))
        })
    };

    let chase_action = {
        let player_pos = player_pos.clone();
        let drive_toward = drive_toward.clone();
        ActionDef::new(
            "chase",
            Box::new(move |_dt: f32| drive_toward(*player_pos.lock().unwrap())),
        )
    };

    let patrol_action = {
        let drive_toward = drive_toward.clone();
        let patrol_index = patrol_index.clone();
        ActionDef::new(
            "patrol",
            Box::new(move |_dt: f32| {
                let target = patrol_route[*patrol_index.lock().unwrap()];
                let reached = drive_toward(target);
                if reached {
                    let mut idx = patrol_index.lock().unwrap();
                    *idx = (*idx + 1) % patrol_route.len();
                }
                // Patrol never finishes on its own — it just keeps looping
                // until the parent preempts it in favor of chase.
                false
            }),
        )
    };

    let tree_def = NodeDef::new(
        "guard",
        NodeDefKind::Priority {
            children: vec![
                NodeDef::new("chase", NodeDefKind::Leaf { action: chase_action, priority_fn: chase_priority_fn }),
                NodeDef::new("patrol", NodeDefKind::Leaf { action: patrol_action, priority_fn: patrol_priority_fn }),
            ],
            preempt: true,
            priority_fn: None,
        },
    );

    let tree = TreeBuilder::new(SEED).build(tree_def)?;
    let mut manager = TreeManager::new();
    manager.add("guard", tree)?;
    manager.start("guard")?;

    for frame in 0..FRAMES {
        manager.tick(TICK_DT);

        // The player drifts toward the agent so the demo shows both a
        // patrol phase and a preempting chase phase.
        {
            let mut p = player_pos.lock().unwrap();
            let agent = pathfinder.lock().unwrap().agent_position();
            let toward_agent = agent.sub(*p);
            let dist = toward_agent.length();
            if dist > 0.01 {
                let step = dist.min(0.3);
                *p = p.add(toward_agent.scale(step / dist));
            }
        }

        if frame % 10 == 0 {
            let tree = manager.get("guard").expect("tree is registered");
            let chase_id = tree.find_by_name("chase").expect("chase leaf exists");
            let active = if tree.node_state(chase_id) == NodeState::Running { "chase" } else { "patrol" };
            println!(
                "frame {frame:02}: agent={} player={} active={active}",
                pathfinder.lock().unwrap().agent_position(),
                *player_pos.lock().unwrap(),
            );
            println!("  {}", tree.describe(chase_id));
        }
    }

    println!("done.");
    Ok(())
}
