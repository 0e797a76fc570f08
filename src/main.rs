//! Pile Stack entry point
//!
//! Plays an autoplay session against the rapier physics world and prints a
//! line per finished run.

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use pile_stack::consts::FRAME_DT;
use pile_stack::platform::{RapierWorld, RecordingRenderer, RenderCommand, ScriptedInput};
use pile_stack::sim::{BodyHandle, GamePhase, Key, PhysicsWorld};
use pile_stack::{Game, Settings};

/// Ten minutes of frames
const MAX_FRAMES: u32 = 60 * 60 * 10;
/// How far the pilot steers a piece from where it spawned
const AIM_SPREAD: f32 = 25.0;

/// Headless autoplay for the block stacking game
#[derive(Debug, Parser)]
#[command(name = "pile-stack", version, about)]
struct Args {
    /// Load tunables from a JSON settings file
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Write the effective tunables to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_settings: Option<PathBuf>,

    /// Stop after this many finished runs
    #[arg(long, default_value_t = 3, value_name = "N")]
    runs: u32,
}

/// Steers each pending piece toward a random target, then drops it
struct Pilot {
    rng: Pcg32,
    piece: Option<BodyHandle>,
    target_x: f32,
}

impl Pilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            piece: None,
            target_x: 0.0,
        }
    }

    fn drive(&mut self, game: &Game<RapierWorld, RecordingRenderer>, keys: &mut ScriptedInput) {
        keys.release_all();
        if game.run().phase != GamePhase::Playing {
            return;
        }
        let Some(pending) = game.run().pending else {
            return;
        };
        let Some(pos) = game.world().position(pending) else {
            return;
        };

        if self.piece != Some(pending) {
            self.piece = Some(pending);
            self.target_x = pos.x + self.rng.random_range(-AIM_SPREAD..=AIM_SPREAD).round();
        }

        let step = game.settings().nudge_step;
        let dx = self.target_x - pos.x;
        if dx <= -step {
            keys.press(Key::Left);
        } else if dx >= step {
            keys.press(Key::Right);
        } else {
            keys.press(Key::Space);
        }
    }
}

fn main() {
    let args = Args::parse();
    env_logger::init();
    log::info!("Pile Stack (headless) starting...");

    let settings = args
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();

    if let Some(path) = args.write_settings {
        if let Err(e) = settings.save(&path) {
            log::error!("Failed to write settings: {e}");
            std::process::exit(1);
        }
        return;
    }

    let mut pilot = Pilot::new(settings.seed.wrapping_add(1));
    let mut game = Game::new(settings, RapierWorld::default(), RecordingRenderer::default());
    let mut keys = ScriptedInput::default();
    let mut clouds = 0usize;
    let mut last_score = 0;
    let mut finished = 0;

    for _ in 0..MAX_FRAMES {
        pilot.drive(&game, &mut keys);
        game.update(&keys, FRAME_DT);

        clouds += game
            .renderer_mut()
            .take()
            .iter()
            .filter(|c| matches!(c, RenderCommand::Decoration(_)))
            .count();

        if game.scores().runs() > finished {
            finished = game.scores().runs();
            println!(
                "run {finished}: score {last_score}, high score {}, clouds {clouds}",
                game.scores().high_score()
            );
            clouds = 0;
            if finished >= args.runs {
                break;
            }
        }
        last_score = game.run().score;
    }

    log::info!("Pile Stack finished after {finished} runs");
}
