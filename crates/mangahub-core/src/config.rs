use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::queries::SortKey;
use crate::store::InputPolicy;

/// Root application configuration, loaded from `~/.config/mangahub/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub library: LibraryConfig,
    pub dashboard: DashboardConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub default_sort: SortKey,
    pub input_policy: InputPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub continue_reading_limit: usize,
    pub top_rated_limit: usize,
    pub recent_notifications_limit: usize,
    pub favorite_genres_limit: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// JSON seed file; the built-in catalogue is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            default_sort: SortKey::LastRead,
            input_policy: InputPolicy::Clamp,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            continue_reading_limit: 6,
            top_rated_limit: 4,
            recent_notifications_limit: 3,
            favorite_genres_limit: 3,
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl AppConfig {
    /// Standard config file path: `~/.config/mangahub/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("MANGAHUB_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("mangahub")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn seed_path(&self) -> Option<PathBuf> {
        self.seed.path.as_ref().map(PathBuf::from)
    }
}
