//! Tower stability judgement
//!
//! The touched list accumulates over the whole run, so the spread measures
//! how far the dropped pieces have wandered from each other horizontally.

use super::physics::PhysicsWorld;
use super::state::RunState;

/// Sum of squared deviations from the mean (not divided by the count).
///
/// Fewer than two samples have no spread.
pub fn spread(xs: &[f32]) -> f32 {
    if xs.len() < 2 {
        return 0.0;
    }
    let mean = xs.iter().sum::<f32>() / xs.len() as f32;
    xs.iter().map(|x| (x - mean) * (x - mean)).sum()
}

/// Evaluate the touched pieces at their current x and flag game over when
/// the spread exceeds `threshold`. Returns true only on the tick that ends the run.
pub fn judge<W: PhysicsWorld + ?Sized>(run: &mut RunState, world: &W, threshold: f32) -> bool {
    if run.game_over || run.touched.is_empty() {
        return false;
    }

    let xs: Vec<f32> = run
        .touched
        .iter()
        .filter_map(|id| world.position(*id))
        .map(|p| p.x)
        .collect();

    let variance = spread(&xs);
    if variance > threshold {
        log::info!(
            "Tower unstable: spread {variance:.1} over {} contacts",
            xs.len()
        );
        run.game_over = true;
        return true;
    }
    false
}
