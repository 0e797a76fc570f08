//! Rendering collaborator seam
//!
//! The game only issues scene commands; how shapes, text and camera effects
//! are drawn belongs to the implementation.

use glam::Vec2;

use crate::sim::{BodyHandle, ShapeDescriptor};

/// Text overlays the game maintains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelId {
    /// High score and current score, fixed to the screen
    Score,
    /// Current score riding just above the bar line
    Bar,
}

/// Scene, HUD and camera operations
pub trait Renderer {
    /// Drop everything drawn for the previous run
    fn clear(&mut self);

    /// Attach a drawable to a body; it follows the body from then on
    fn draw_shape(&mut self, body: BodyHandle, shape: &ShapeDescriptor, position: Vec2, color: u32);

    /// Move the full-width bar line to scene `y`
    fn draw_bar(&mut self, y: f32);

    fn set_label(&mut self, label: LabelId, text: &str, position: Vec2);

    /// Scroll the camera vertically (negative is up)
    fn scroll_by(&mut self, dy: f32);

    fn shake(&mut self, duration_ms: f32, intensity: f32);

    /// Fade to black; completion is timed by the game loop
    fn fade_out(&mut self, duration_ms: f32);

    fn follow_body(&mut self, body: BodyHandle);

    /// Purely decorative sprite (clouds)
    fn spawn_decoration(&mut self, position: Vec2);
}
