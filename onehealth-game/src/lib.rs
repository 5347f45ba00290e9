//! One Health Explorer Game Engine
//!
//! Platform-agnostic core of the One Health Explorer educational game: screen
//! and scene navigation, the clue chain, the quiz and timeline boards, scoring
//! and badges. Drawing is left to a [`Presenter`] implementation.

pub mod bindings;
pub mod catalog;
pub mod clues;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod interaction;
pub mod modals;
pub mod navigation;
pub mod numbers;
pub mod presenter;
pub mod scheduler;
pub mod scoring;
pub mod state;

use anyhow::Context;

// Re-export commonly used types
pub use catalog::{BadgeInfo, Catalog, Clue, Location, PuzzleContent, QuizContent, QuizToken};
pub use clues::ClueEngine;
pub use config::{GameConfig, PuzzleGate};
pub use error::GameError;
pub use events::{IgnoreReason, InputEvent, Outcome, QuizPlacement, TimelinePlacement};
pub use game::Game;
pub use interaction::{
    CANONICAL_ORDER, DropBoard, PlacementError, PlacementInput, PuzzleVerdict, QuizArea,
    QuizBoard, QuizTokenId, QuizVerdict, TimelineBoard, TimelineOrder, TimelineSlot, grade_quiz,
};
pub use modals::{Continuation, ModalId, Modals};
pub use navigation::{Navigator, SceneId, ScreenId, ScreenRefresh};
pub use presenter::{Control, Presenter, RecordingPresenter, RenderRequest, ScrollTarget};
pub use scheduler::{DeferredAction, ScheduledTask, Scheduler, TaskId, TaskScope};
pub use scoring::{BadgeBoardView, BadgeEntry, Completion, complete_mission};
pub use state::{
    BadgeId, Badges, ClueId, GameState, Language, LocationId, MissionProgress, Settings,
};

/// Clues, locations, badges and quiz content shipped with the crate.
pub const EMBEDDED_CATALOG: &str = include_str!("../assets/data/catalog.json");
/// Default timings and gating.
pub const EMBEDDED_CONFIG: &str = include_str!("../assets/data/config.json");

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the mission catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;

    /// Load a named configuration document
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Loader over the assets compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedData;

impl DataLoader for EmbeddedData {
    type Error = GameError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Catalog::from_json(EMBEDDED_CATALOG)
    }

    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        let json = match config_name {
            constants::CONFIG_ASSET => EMBEDDED_CONFIG,
            constants::CATALOG_ASSET => EMBEDDED_CATALOG,
            other => return Err(GameError::MissingAsset(other.to_string())),
        };
        Ok(serde_json::from_str(json)?)
    }
}

/// Builds games from whatever the data loader provides
pub struct GameEngine<L>
where
    L: DataLoader,
{
    data_loader: L,
}

impl<L> GameEngine<L>
where
    L: DataLoader,
{
    pub const fn new(data_loader: L) -> Self {
        Self { data_loader }
    }

    /// Create a new game on the welcome screen
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or configuration cannot be loaded, or
    /// the configuration fails validation.
    pub fn create_game(&self) -> Result<Game, anyhow::Error> {
        let catalog = self
            .data_loader
            .load_catalog()
            .context("loading mission catalog")?;
        let config: GameConfig = self
            .data_loader
            .load_config(constants::CONFIG_ASSET)
            .context("loading game config")?;
        config.validate().context("validating game config")?;
        Ok(Game::new(catalog, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    #[derive(Debug, thiserror::Error)]
    #[error("fixture missing {0}")]
    struct FixtureError(String);

    #[derive(Clone, Default)]
    struct FixtureLoader {
        config: Option<&'static str>,
    }

    impl DataLoader for FixtureLoader {
        type Error = FixtureError;

        fn load_catalog(&self) -> Result<Catalog, Self::Error> {
            Catalog::from_json(EMBEDDED_CATALOG).map_err(|err| FixtureError(err.to_string()))
        }

        fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
        where
            T: DeserializeOwned,
        {
            let json = self
                .config
                .ok_or_else(|| FixtureError(config_name.to_string()))?;
            serde_json::from_str(json).map_err(|err| FixtureError(err.to_string()))
        }
    }

    #[test]
    fn engine_builds_game_from_loader() {
        let engine = GameEngine::new(FixtureLoader {
            config: Some(r#"{ "puzzle_gate": "hard", "quiz_feedback_delay_ms": 500 }"#),
        });
        let game = engine.create_game().unwrap();
        assert_eq!(game.config().puzzle_gate, PuzzleGate::Hard);
        assert_eq!(game.config().quiz_feedback_delay_ms, 500);
        assert_eq!(game.navigator().current_screen(), ScreenId::Welcome);
    }

    #[test]
    fn engine_reports_loader_failures_with_context() {
        let engine = GameEngine::new(FixtureLoader::default());
        let err = engine.create_game().unwrap_err();
        assert_eq!(err.to_string(), "loading game config");
        assert!(format!("{err:#}").contains("fixture missing config"));

        let engine = GameEngine::new(FixtureLoader {
            config: Some(r#"{ "quiz_feedback_delay_ms": 0 }"#),
        });
        assert!(engine.create_game().is_err());
    }

    #[test]
    fn embedded_loader_serves_known_assets() {
        let loader = EmbeddedData;
        let config: GameConfig = loader.load_config("config").unwrap();
        assert_eq!(config, GameConfig::default());
        let catalog: Catalog = loader.load_config("catalog").unwrap();
        assert_eq!(catalog, loader.load_catalog().unwrap());
        let missing: Result<GameConfig, _> = loader.load_config("weather");
        assert!(matches!(missing, Err(GameError::MissingAsset(name)) if name == "weather"));
    }
}
