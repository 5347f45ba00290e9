use anyhow::{Context, Result};
use std::path::PathBuf;
use thiserror::Error;

use onehealth_game::constants::CONFIG_ASSET;
use onehealth_game::{Catalog, DataLoader, EmbeddedData, Game, GameConfig, GameEngine, GameError};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Embedded catalog plus an optional config file on disk.
#[derive(Debug, Clone, Default)]
pub struct FileDataLoader {
    config_path: Option<PathBuf>,
}

impl FileDataLoader {
    pub const fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }
}

impl DataLoader for FileDataLoader {
    type Error = AssetError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Ok(EmbeddedData.load_catalog()?)
    }

    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        match (&self.config_path, config_name) {
            (Some(path), CONFIG_ASSET) => {
                let display = path.display().to_string();
                let json = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
                    path: display.clone(),
                    source,
                })?;
                serde_json::from_str(&json).map_err(|source| AssetError::Parse {
                    path: display,
                    source,
                })
            }
            _ => Ok(EmbeddedData.load_config(config_name)?),
        }
    }
}

/// Catalog and config loaded once, handed to every scenario iteration.
#[derive(Debug, Clone)]
pub struct TesterAssets {
    pub catalog: Catalog,
    pub config: GameConfig,
}

impl TesterAssets {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let engine = GameEngine::new(FileDataLoader::new(config_path));
        let game = engine.create_game().context("building game from tester assets")?;
        Ok(Self {
            catalog: game.catalog().clone(),
            config: game.config().clone(),
        })
    }

    pub fn load_default() -> Result<Self> {
        Self::load(None)
    }

    pub fn new_game(&self) -> Game {
        Game::new(self.catalog.clone(), self.config.clone())
    }

    pub fn new_game_with(&self, config: GameConfig) -> Game {
        Game::new(self.catalog.clone(), config)
    }
}
