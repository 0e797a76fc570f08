//! Piece spawning
//!
//! Draws the next piece's shape and position and asks the physics world for a
//! suspended body. At most one piece may be pending at a time.

use glam::Vec2;
use rand::Rng;

use super::physics::{BodyConfig, BodyHandle, PhysicsWorld};
use super::shape::{ShapeDescriptor, make_polygon, make_rectangle};
use super::state::{Piece, RunState};
use crate::consts::*;
use crate::random_color;

/// Draw a shape: 4/7 rectangle, 2/7 hexagon, 1/7 octagon
pub fn choose_shape<R: Rng>(rng: &mut R) -> ShapeDescriptor {
    let r: f32 = rng.random();
    if r < RECTANGLE_ODDS {
        let width = rng.random_range(RECT_SIDE_MIN..=RECT_SIDE_MAX) as f32;
        let height = rng.random_range(RECT_SIDE_MIN..=RECT_SIDE_MAX) as f32;
        make_rectangle(width, height)
    } else {
        let radius = rng.random_range(POLYGON_RADIUS_MIN..=POLYGON_RADIUS_MAX) as f32;
        let sides = if r < HEXAGON_ODDS { 6 } else { 8 };
        make_polygon(sides, radius)
    }
}

/// Spawn point: screen center with integer jitter, `head_room` above the bar
pub fn spawn_position<R: Rng>(
    rng: &mut R,
    bar_level: f32,
    screen_width: f32,
    head_room: f32,
) -> Vec2 {
    let jitter = rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER) as f32;
    Vec2::new(screen_width / 2.0 + jitter, bar_level - head_room)
}

/// Spawn the next pending piece.
///
/// No-op (returns `None`) when the run is over or a piece is already pending.
pub fn spawn_next<W, R>(
    run: &mut RunState,
    world: &mut W,
    rng: &mut R,
    screen_width: f32,
    head_room: f32,
) -> Option<BodyHandle>
where
    W: PhysicsWorld + ?Sized,
    R: Rng,
{
    if run.game_over || run.pending.is_some() {
        return None;
    }

    let shape = choose_shape(rng);
    let position = spawn_position(rng, run.bar_level, screen_width, head_room);
    let id = if shape.is_polygon() {
        world.create_polygon_body(&shape.vertices, position, BodyConfig::PILE)
    } else {
        world.create_static_body(&shape, position, BodyConfig::PILE)
    };

    log::debug!("Spawned {:?} as {:?} at {}", shape.kind, id, position);

    run.pieces.push(Piece {
        id,
        shape,
        is_static: true,
        color: random_color(rng),
    });
    run.pending = Some(id);
    Some(id)
}
