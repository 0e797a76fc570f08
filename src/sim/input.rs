//! Player input: steering and releasing the pending piece

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::{BodyHandle, PhysicsWorld};
use super::state::{DeferredEvent, RunState};

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    Space,
}

/// Anything that can report held keys once per frame
pub trait InputSource {
    fn is_down(&self, key: Key) -> bool;
}

/// Logical input for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Nudge the pending piece left (Left or A)
    pub left: bool,
    /// Nudge the pending piece right (Right or D)
    pub right: bool,
    /// Release the pending piece (Space)
    pub drop: bool,
}

impl TickInput {
    /// Poll the bound keys
    pub fn poll<S: InputSource + ?Sized>(source: &S) -> Self {
        Self {
            left: source.is_down(Key::Left) || source.is_down(Key::A),
            right: source.is_down(Key::Right) || source.is_down(Key::D),
            drop: source.is_down(Key::Space),
        }
    }
}

/// Apply one frame of input to the pending piece.
///
/// Left wins over right when both are held. A drop zeroes the piece's
/// horizontal velocity, hands it to gravity, makes it the active piece and
/// schedules the next spawn `spawn_delay_ms` later. Returns the dropped piece.
pub fn apply_input<W: PhysicsWorld + ?Sized>(
    run: &mut RunState,
    world: &mut W,
    input: &TickInput,
    nudge_step: f32,
    spawn_delay_ms: f32,
) -> Option<BodyHandle> {
    if run.game_over {
        return None;
    }
    let pending = run.pending?;

    let dx = if input.left {
        -nudge_step
    } else if input.right {
        nudge_step
    } else {
        0.0
    };
    if dx != 0.0 {
        if let Some(pos) = world.position(pending) {
            world.set_position(pending, pos + Vec2::new(dx, 0.0));
        }
    }

    if !input.drop {
        return None;
    }

    world.set_velocity_x(pending, 0.0);
    world.set_dynamic(pending, true);
    if let Some(piece) = run.piece_mut(pending) {
        piece.is_static = false;
    }
    run.active = Some(pending);
    run.pending = None;
    run.schedule(DeferredEvent::SpawnNext, spawn_delay_ms);

    log::debug!("Dropped {:?}", pending);
    Some(pending)
}
