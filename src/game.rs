//! Frame driver
//!
//! One `frame` call is one rendered frame. The physics world steps first and
//! its contact batches are applied in order; then timers fire; then the phase
//! logic runs (camera scroll and input while playing, nothing while the
//! end-of-run fade plays out).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::DECORATION_BAND;
use crate::random_color;
use crate::renderer::{LabelId, Renderer};
use crate::score::ScoreKeeper;
use crate::settings::Settings;
use crate::sim::{
    BodyConfig, BodyHandle, ContactEvents, DeferredEvent, GamePhase, InputSource, PhysicsWorld,
    RunState, TickInput, apply_input, judge, make_rectangle, on_collision_begin,
    on_collision_sustained, spawner,
};

/// Score label anchor (screen space)
const SCORE_LABEL_POS: Vec2 = Vec2::new(10.0, 10.0);
/// Bar label left margin
const BAR_LABEL_X: f32 = 10.0;

/// A play session: collaborators, the current run and the session high score
pub struct Game<W: PhysicsWorld, R: Renderer> {
    settings: Settings,
    world: W,
    renderer: R,
    run: RunState,
    scores: ScoreKeeper,
    rng: Pcg32,
}

impl<W: PhysicsWorld, R: Renderer> Game<W, R> {
    /// Create a session and start its first run
    pub fn new(settings: Settings, world: W, renderer: R) -> Self {
        let settings = settings.validated();
        log::info!("Game initialized with seed: {}", settings.seed);
        let mut game = Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            scores: ScoreKeeper::new(settings.screen_height),
            run: RunState::new(settings.screen_height),
            settings,
            world,
            renderer,
        };
        game.start_run();
        game
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn scores(&self) -> &ScoreKeeper {
        &self.scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Tear down the world and scene and build a fresh run
    fn start_run(&mut self) {
        self.world.clear();
        self.renderer.clear();
        self.run = RunState::new(self.scores.baseline());

        let width = self.settings.screen_width;
        let height = self.settings.screen_height;
        let thickness = self.settings.floor_thickness;
        let floor_shape = make_rectangle(width, thickness);
        let floor_pos = Vec2::new(width / 2.0, height + thickness / 4.0);
        let floor = self
            .world
            .create_static_body(&floor_shape, floor_pos, BodyConfig::FLOOR);
        let color = random_color(&mut self.rng);
        self.renderer.draw_shape(floor, &floor_shape, floor_pos, color);
        self.run.floor = Some(floor);

        let bar_label_pos = self.bar_label_position();
        self.renderer.draw_bar(self.run.bar_level);
        self.renderer.set_label(LabelId::Bar, "", bar_label_pos);
        self.renderer
            .set_label(LabelId::Score, &self.scores.label(0), SCORE_LABEL_POS);

        log::info!("Run {} started", self.scores.runs() + 1);
        self.spawn_next();
    }

    fn bar_label_position(&self) -> Vec2 {
        Vec2::new(
            BAR_LABEL_X,
            self.run.bar_level - self.settings.bar_label_offset,
        )
    }

    /// Spawn and draw the next pending piece (no-op if one is pending or the run is over)
    pub fn spawn_next(&mut self) -> Option<BodyHandle> {
        let id = spawner::spawn_next(
            &mut self.run,
            &mut self.world,
            &mut self.rng,
            self.settings.screen_width,
            self.settings.head_room,
        )?;
        if let Some(piece) = self.run.piece(id) {
            let position = self.world.position(id).unwrap_or_default();
            self.renderer
                .draw_shape(id, &piece.shape, position, piece.color);
        }
        Some(id)
    }

    /// Apply one physics sub-step's contact batches
    pub fn handle_contacts(&mut self, events: &ContactEvents) {
        if events.is_empty() {
            return;
        }
        on_collision_begin(&mut self.run, &events.begin);
        if events.sustained.is_empty() {
            return;
        }

        if let Some(bar) = on_collision_sustained(&mut self.run, &self.world, &events.sustained) {
            self.run.score = self.scores.record_height(bar);
            let bar_label_pos = self.bar_label_position();
            let score_text = self.scores.label(self.run.score);
            self.renderer.draw_bar(bar);
            self.renderer
                .set_label(LabelId::Bar, &self.run.score.to_string(), bar_label_pos);
            self.renderer
                .set_label(LabelId::Score, &score_text, SCORE_LABEL_POS);
        }

        judge(&mut self.run, &self.world, self.settings.variance_threshold);
    }

    /// Poll `source` and advance one frame
    pub fn update<S: InputSource + ?Sized>(&mut self, source: &S, dt: f32) {
        let input = TickInput::poll(source);
        self.frame(&input, dt);
    }

    /// Advance one frame of `dt` seconds
    pub fn frame(&mut self, input: &TickInput, dt: f32) {
        for events in self.world.step(dt) {
            self.handle_contacts(&events);
        }

        for event in self.run.advance_timers(dt * 1000.0) {
            match event {
                DeferredEvent::SpawnNext => {
                    self.spawn_next();
                }
                DeferredEvent::FadeComplete => {
                    self.restart();
                    return;
                }
            }
        }

        match self.run.phase {
            GamePhase::Playing => {
                if self.run.game_over {
                    self.begin_ending();
                    return;
                }
                self.scroll_camera();
                apply_input(
                    &mut self.run,
                    &mut self.world,
                    input,
                    self.settings.nudge_step,
                    self.settings.spawn_delay_ms,
                );
            }
            GamePhase::Ending => {}
        }
    }

    /// Scroll up while the bar sits inside the headroom band, sprinkling clouds
    fn scroll_camera(&mut self) {
        if !self.run.needs_scroll(self.settings.head_room) {
            return;
        }
        let step = self.settings.scroll_step;
        self.run.camera_scroll_y -= step;
        self.renderer.scroll_by(-step);

        if self.rng.random::<f32>() < self.settings.decoration_chance {
            let x = self.rng.random::<f32>() * self.settings.screen_width;
            let y = self.run.camera_scroll_y + self.rng.random::<f32>() * DECORATION_BAND;
            self.renderer.spawn_decoration(Vec2::new(x, y));
        }
    }

    /// Playing -> Ending: follow the last piece, shake and fade, restart on fade end
    fn begin_ending(&mut self) {
        self.run.phase = GamePhase::Ending;
        log::info!("Game over at score {}", self.run.score);

        if let Some(active) = self.run.active {
            self.renderer.follow_body(active);
        }
        self.renderer
            .shake(self.settings.end_shake_ms, self.settings.end_shake_intensity);
        self.renderer.fade_out(self.settings.end_fade_ms);
        self.run
            .schedule(DeferredEvent::FadeComplete, self.settings.end_fade_ms);
    }

    /// Discard the current run and start a new one, keeping the high score
    pub fn restart(&mut self) {
        self.scores.finish_run(self.run.score);
        self.start_run();
    }
}
