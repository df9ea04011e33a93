//! Game session configuration
//!
//! Loaded from JSON by the native driver; every field has a default so a
//! partial file only overrides what it names.

use std::path::Path;

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the board is seeded on a new game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InitialLayout {
    /// Three 1s and two 2s
    #[default]
    Classic,
    /// `count` cells, each uniformly 1, 2 or 3
    Dealt { count: usize },
}

impl InitialLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitialLayout::Classic => "classic",
            InitialLayout::Dealt { .. } => "dealt",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(InitialLayout::Classic),
            "dealt" | "nine" => Some(InitialLayout::Dealt {
                count: DEALT_TILE_COUNT,
            }),
            _ => None,
        }
    }

    /// Number of tiles placed before the first move
    pub fn tile_count(&self) -> usize {
        match self {
            InitialLayout::Classic => 5,
            InitialLayout::Dealt { count } => *count,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board edge length
    pub board_size: usize,
    pub initial_layout: InitialLayout,
    /// Copies of 1, 2 and 3 per number bag pass
    pub number_randomness: usize,
    /// Fillers next to the single bonus trigger
    pub special_rareness: usize,
    /// Moves before bonus tiles may appear
    pub bonus_move_threshold: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            initial_layout: InitialLayout::Classic,
            number_randomness: NUMBER_RANDOMNESS,
            special_rareness: SPECIAL_RARENESS,
            bonus_move_threshold: BONUS_MOVE_THRESHOLD,
        }
    }
}

impl GameConfig {
    pub fn with_layout(layout: InitialLayout) -> Self {
        Self {
            initial_layout: layout,
            ..Self::default()
        }
    }

    /// Reject configurations a session cannot start from
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.board_size >= 2,
            "board_size must be at least 2, got {}",
            self.board_size
        );
        let cells = self.board_size * self.board_size;
        ensure!(
            self.initial_layout.tile_count() <= cells,
            "{} layout needs {} tiles but the board has {} cells",
            self.initial_layout.as_str(),
            self.initial_layout.tile_count(),
            cells
        );
        ensure!(
            self.number_randomness >= 1,
            "number_randomness must be at least 1"
        );
        Ok(())
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
