//! Score and session high score
//!
//! The score is how far the bar has climbed above its starting height. The
//! high score lives for the process only; restarts keep it.

use serde::{Deserialize, Serialize};

/// Score label layout: high score line, then current score line
pub const SCORE_LABEL_PREFIX: &str = "HIGH SCORE: ";

/// Score for a bar at `bar_level` when the run started at `baseline`
#[inline]
pub fn score_for(baseline: f32, bar_level: f32) -> u32 {
    (baseline - bar_level).floor().max(0.0) as u32
}

/// Tracks the best score seen this session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreKeeper {
    /// Bar level at run start
    baseline: f32,
    high_score: u32,
    runs: u32,
}

impl ScoreKeeper {
    pub fn new(baseline: f32) -> Self {
        Self {
            baseline,
            high_score: 0,
            runs: 0,
        }
    }

    /// Score for the new bar level; bumps the high score if beaten
    pub fn record_height(&mut self, bar_level: f32) -> u32 {
        let score = score_for(self.baseline, bar_level);
        if score > self.high_score {
            self.high_score = score;
        }
        score
    }

    /// Note a finished run
    pub fn finish_run(&mut self, score: u32) {
        self.runs += 1;
        self.high_score = self.high_score.max(score);
        log::info!(
            "Run {} finished with score {} (high score {})",
            self.runs,
            score,
            self.high_score
        );
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Finished runs this session
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// Two-line HUD text
    pub fn label(&self, score: u32) -> String {
        format!("{SCORE_LABEL_PREFIX}{}\nSCORE {}", self.high_score, score)
    }
}
