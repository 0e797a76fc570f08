//! Run state and core simulation types
//!
//! Everything a single run mutates lives in `RunState`. A restart discards it
//! and builds a fresh one; nothing is reset field by field.

use serde::{Deserialize, Serialize};

use super::physics::BodyHandle;
use super::shape::ShapeDescriptor;

/// Current phase of the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player steers and drops pieces
    Playing,
    /// Tower fell; camera shakes and fades before the restart
    Ending,
}

/// A piece in the scene. Transform state lives in the physics backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Piece {
    pub id: BodyHandle,
    pub shape: ShapeDescriptor,
    /// Suspended and steerable until dropped
    pub is_static: bool,
    /// Render-only
    pub color: u32,
}

/// Work scheduled for a later frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredEvent {
    /// Spawn the next pending piece
    SpawnNext,
    /// The end-of-run fade finished
    FadeComplete,
}

/// Single-fire timer evaluated by the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deferred {
    pub remaining_ms: f32,
    pub event: DeferredEvent,
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    /// Ground body, created once per run
    pub floor: Option<BodyHandle>,
    /// Every piece spawned this run, in spawn order
    pub pieces: Vec<Piece>,
    /// Spawned but not yet dropped
    pub pending: Option<BodyHandle>,
    /// Most recently dropped piece
    pub active: Option<BodyHandle>,
    /// One entry per collision-begin pair that involved the active piece
    pub touched: Vec<BodyHandle>,
    /// Top of the stable stack (scene y, smaller is higher)
    pub bar_level: f32,
    /// Score implied by `bar_level`
    pub score: u32,
    pub game_over: bool,
    /// Camera vertical scroll (scene y of the view's top edge)
    pub camera_scroll_y: f32,
    /// Pending single-fire timers
    pub timers: Vec<Deferred>,
}

impl RunState {
    /// Fresh run with the bar resting at `initial_bar`
    pub fn new(initial_bar: f32) -> Self {
        Self {
            phase: GamePhase::Playing,
            floor: None,
            pieces: Vec::new(),
            pending: None,
            active: None,
            touched: Vec::new(),
            bar_level: initial_bar,
            score: 0,
            game_over: false,
            camera_scroll_y: 0.0,
            timers: Vec::new(),
        }
    }

    pub fn piece(&self, id: BodyHandle) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn piece_mut(&mut self, id: BodyHandle) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    /// Number of spawned pieces still suspended
    pub fn suspended_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_static).count()
    }

    /// Arm a single-fire timer
    pub fn schedule(&mut self, event: DeferredEvent, delay_ms: f32) {
        self.timers.push(Deferred {
            remaining_ms: delay_ms.max(0.0),
            event,
        });
    }

    pub fn is_scheduled(&self, event: DeferredEvent) -> bool {
        self.timers.iter().any(|t| t.event == event)
    }

    /// Advance all timers by `dt_ms`, returning the events that fired in arming order
    pub fn advance_timers(&mut self, dt_ms: f32) -> Vec<DeferredEvent> {
        let mut fired = Vec::new();
        self.timers.retain_mut(|timer| {
            timer.remaining_ms -= dt_ms;
            if timer.remaining_ms <= 0.0 {
                fired.push(timer.event);
                false
            } else {
                true
            }
        });
        fired
    }

    /// True when the bar has climbed into the headroom band at the top of the view
    pub fn needs_scroll(&self, head_room: f32) -> bool {
        self.bar_level - self.camera_scroll_y < head_room
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_defaults() {
        let run = RunState::new(600.0);
        assert_eq!(run.phase, GamePhase::Playing);
        assert!(run.floor.is_none());
        assert!(run.pending.is_none());
        assert!(run.active.is_none());
        assert!(run.touched.is_empty());
        assert_eq!(run.bar_level, 600.0);
        assert_eq!(run.score, 0);
        assert!(!run.game_over);
    }

    #[test]
    fn test_timers_fire_once() {
        let mut run = RunState::new(600.0);
        run.schedule(DeferredEvent::SpawnNext, 1000.0);
        assert!(run.is_scheduled(DeferredEvent::SpawnNext));

        assert!(run.advance_timers(500.0).is_empty());
        assert_eq!(run.advance_timers(500.0), vec![DeferredEvent::SpawnNext]);
        assert!(run.advance_timers(1000.0).is_empty());
        assert!(!run.is_scheduled(DeferredEvent::SpawnNext));
    }

    #[test]
    fn test_timers_keep_arming_order() {
        let mut run = RunState::new(600.0);
        run.schedule(DeferredEvent::FadeComplete, 10.0);
        run.schedule(DeferredEvent::SpawnNext, 5.0);
        assert_eq!(
            run.advance_timers(20.0),
            vec![DeferredEvent::FadeComplete, DeferredEvent::SpawnNext]
        );
    }

    #[test]
    fn test_needs_scroll() {
        let mut run = RunState::new(600.0);
        assert!(!run.needs_scroll(300.0));
        run.bar_level = 299.0;
        assert!(run.needs_scroll(300.0));
        run.camera_scroll_y = -50.0;
        assert!(!run.needs_scroll(300.0));
    }
}
