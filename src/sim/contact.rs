//! Contact tracking around the active piece
//!
//! Collision-begin pairs grow the touched list; collision-sustained pairs
//! raise the bar whenever the active piece rests higher than it.

use super::physics::{ContactPair, PhysicsWorld};
use super::state::RunState;

/// Record one touched entry per begin pair involving the active piece.
///
/// Entries are not deduplicated: a piece meeting several bodies at once is
/// weighted accordingly in the stability check. Returns the number added.
pub fn on_collision_begin(run: &mut RunState, pairs: &[ContactPair]) -> usize {
    let Some(active) = run.active else {
        return 0;
    };
    let before = run.touched.len();
    for pair in pairs {
        if pair.involves(active) {
            run.touched.push(active);
        }
    }
    run.touched.len() - before
}

/// Raise the bar to the active piece when a sustained pair involves it and
/// the piece sits higher (smaller y) than the bar.
///
/// Returns the new bar level if it moved.
pub fn on_collision_sustained<W: PhysicsWorld + ?Sized>(
    run: &mut RunState,
    world: &W,
    pairs: &[ContactPair],
) -> Option<f32> {
    let active = run.active?;
    let mut raised = None;
    for pair in pairs {
        if !pair.involves(active) {
            continue;
        }
        let Some(pos) = world.position(active) else {
            continue;
        };
        if run.bar_level > pos.y {
            run.bar_level = pos.y;
            raised = Some(pos.y);
        }
    }
    if let Some(bar) = raised {
        log::debug!("Bar raised to {bar}");
    }
    raised
}
