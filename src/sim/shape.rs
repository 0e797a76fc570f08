//! Piece geometry
//!
//! Rectangles are described by their extents. Polygons are regular, built on a
//! unit circle and then anchored at their bounding-box corner: every vertex is
//! translated so the minimum x and minimum y are both zero, then scaled by the
//! radius. Physics backends receive these anchored vertices as-is.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Shape family of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    /// Regular polygon (6 or 8 sides in play)
    Polygon { sides: u8 },
}

/// Size parameters of a shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Dimensions {
    Rect { width: f32, height: f32 },
    Radius(f32),
}

/// Geometric description of a piece or the floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub kind: ShapeKind,
    pub dimensions: Dimensions,
    /// Outline, anchored so min x = min y = 0
    pub vertices: Vec<Vec2>,
}

impl ShapeDescriptor {
    /// Bounding-box size of the outline
    pub fn extent(&self) -> Vec2 {
        match self.dimensions {
            Dimensions::Rect { width, height } => Vec2::new(width, height),
            Dimensions::Radius(_) => self
                .vertices
                .iter()
                .fold(Vec2::ZERO, |max, v| max.max(*v)),
        }
    }

    pub fn is_polygon(&self) -> bool {
        matches!(self.kind, ShapeKind::Polygon { .. })
    }
}

/// Axis-aligned rectangle of the given size
pub fn make_rectangle(width: f32, height: f32) -> ShapeDescriptor {
    ShapeDescriptor {
        kind: ShapeKind::Rectangle,
        dimensions: Dimensions::Rect { width, height },
        vertices: vec![
            Vec2::ZERO,
            Vec2::new(width, 0.0),
            Vec2::new(width, height),
            Vec2::new(0.0, height),
        ],
    }
}

/// Regular polygon with `sides` vertices on a circle of `radius`.
///
/// Vertices step by `2π/sides`. When `sides % 4 == 0` the whole ring is
/// rotated by half a step so a flat edge faces down.
pub fn make_polygon(sides: u8, radius: f32) -> ShapeDescriptor {
    debug_assert!(sides >= 3, "polygon needs at least 3 sides");
    let n = sides.max(3) as usize;
    let delta = TAU / n as f32;
    let offset = if n % 4 == 0 { delta / 2.0 } else { 0.0 };

    let unit: Vec<Vec2> = (0..n)
        .map(|i| {
            let theta = offset + i as f32 * delta;
            Vec2::new(theta.cos(), theta.sin())
        })
        .collect();

    // Seeded at the origin, so the anchor never moves a shape that already sits in +x/+y
    let min = unit.iter().fold(Vec2::ZERO, |min, v| min.min(*v));

    ShapeDescriptor {
        kind: ShapeKind::Polygon { sides: n as u8 },
        dimensions: Dimensions::Radius(radius),
        vertices: unit.into_iter().map(|v| (v - min) * radius).collect(),
    }
}
