//! Optional TOML defaults for the `maze` binary.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use maze_core::Difficulty;
use maze_core::mapgen::DEFAULT_MAX_ATTEMPTS;
use maze_core::session::DEFAULT_PLAYER_NAME;
use serde::Deserialize;

/// Every field may be omitted; missing ones keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Name stamped on recorded sessions and their scores.
    pub player_name: String,
    pub max_attempts: u32,
    pub default_difficulty: Difficulty,
    pub wall_glyph: char,
    pub open_glyph: char,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            default_difficulty: Difficulty::Hard,
            wall_glyph: '#',
            open_glyph: ' ',
        }
    }
}

impl ToolConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
