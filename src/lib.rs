//! Pile Stack - a physics-driven block stacking arcade game
//!
//! Core modules:
//! - `sim`: Stacking rules (spawning, contacts, stability) against an abstract physics world
//! - `game`: Per-frame orchestration, camera sequence and run restarts
//! - `renderer`: Rendering collaborator seam
//! - `platform`: Rapier physics backend, recording renderer and scripted input
//! - `score`: Score and session high score
//! - `settings`: Data-driven tunables

pub mod game;
pub mod platform;
pub mod renderer;
pub mod score;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use score::ScoreKeeper;
pub use settings::Settings;

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Nominal frame time (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Play area dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    pub const FLOOR_THICKNESS: f32 = 200.0;

    /// Distance from the bar to a freshly spawned piece; also the camera scroll trigger
    pub const HEAD_ROOM: f32 = 300.0;
    /// Bar label sits this far above the bar line
    pub const BAR_LABEL_OFFSET: f32 = 17.0;
    /// Sum of squared x deviations above which the tower is judged unstable
    pub const VAR_THRESHOLD: f32 = 1000.0;

    /// Delay between a drop and the next spawn
    pub const SPAWN_DELAY_MS: f32 = 1000.0;
    /// End-of-run camera sequence
    pub const END_SHAKE_MS: f32 = 3000.0;
    pub const END_SHAKE_INTENSITY: f32 = 0.05;
    pub const END_FADE_MS: f32 = 3000.0;

    /// Camera scroll per frame while the bar is inside the headroom band
    pub const CAMERA_SCROLL_STEP: f32 = 50.0;
    /// Chance per scrolling frame of a decorative cloud
    pub const DECORATION_CHANCE: f32 = 0.3;
    /// Height of the band clouds are scattered in
    pub const DECORATION_BAND: f32 = 50.0;

    /// Horizontal nudge per frame while a move key is held
    pub const NUDGE_STEP: f32 = 1.0;

    /// Shape draw odds: r < RECTANGLE_ODDS => rectangle, r < HEXAGON_ODDS => hexagon, else octagon
    pub const RECTANGLE_ODDS: f32 = 4.0 / 7.0;
    pub const HEXAGON_ODDS: f32 = 6.0 / 7.0;
    /// Rectangle side range (inclusive)
    pub const RECT_SIDE_MIN: i32 = 40;
    pub const RECT_SIDE_MAX: i32 = 100;
    /// Polygon radius range (inclusive)
    pub const POLYGON_RADIUS_MIN: i32 = 20;
    pub const POLYGON_RADIUS_MAX: i32 = 60;
    /// Spawn x jitter around screen center (inclusive, both directions)
    pub const SPAWN_JITTER: i32 = 30;
}

/// Random opaque RGB color (0xRRGGBB), render-only
#[inline]
pub fn random_color<R: Rng>(rng: &mut R) -> u32 {
    rng.random::<u32>() & 0x00ff_ffff
}
