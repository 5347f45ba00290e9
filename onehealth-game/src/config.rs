//! Tunable timings and gating rules.
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MISSION_INTRO_DELAY_MS, DEFAULT_QUIZ_FEEDBACK_DELAY_MS, DEFAULT_SCENE_SCROLL_DELAY_MS,
};
use crate::error::GameError;

/// How strictly entry to the puzzle scene is guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleGate {
    /// Entry control stays hidden until all clues are found, but the
    /// navigator itself lets the player in.
    #[default]
    Soft,
    /// Entry is refused until all clues are found.
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "GameConfig::default_scene_scroll_delay_ms")]
    pub scene_scroll_delay_ms: u64,
    #[serde(default = "GameConfig::default_mission_intro_delay_ms")]
    pub mission_intro_delay_ms: u64,
    #[serde(default = "GameConfig::default_quiz_feedback_delay_ms")]
    pub quiz_feedback_delay_ms: u64,
    #[serde(default)]
    pub puzzle_gate: PuzzleGate,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            scene_scroll_delay_ms: Self::default_scene_scroll_delay_ms(),
            mission_intro_delay_ms: Self::default_mission_intro_delay_ms(),
            quiz_feedback_delay_ms: Self::default_quiz_feedback_delay_ms(),
            puzzle_gate: PuzzleGate::default(),
        }
    }
}

impl GameConfig {
    const fn default_scene_scroll_delay_ms() -> u64 {
        DEFAULT_SCENE_SCROLL_DELAY_MS
    }

    const fn default_mission_intro_delay_ms() -> u64 {
        DEFAULT_MISSION_INTRO_DELAY_MS
    }

    const fn default_quiz_feedback_delay_ms() -> u64 {
        DEFAULT_QUIZ_FEEDBACK_DELAY_MS
    }

    /// Parse configuration JSON; missing fields fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Returns [`GameError::InvalidConfig`] when the quiz feedback would be
    /// dismissed in the same instant it is shown.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.quiz_feedback_delay_ms == 0 {
            return Err(GameError::InvalidConfig {
                field: "quiz_feedback_delay_ms",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn with_puzzle_gate(mut self, gate: PuzzleGate) -> Self {
        self.puzzle_gate = gate;
        self
    }
}
