use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use crate::error::{MangaHubError, Result};
use crate::seed::{SeedData, SeedSource};

/// Seed data read from a JSON document:
/// `{ "manga": [...], "notifications": [...], "recommendations": [...] }`.
/// Each array may be omitted.
#[derive(Debug, Clone)]
pub struct JsonSeedFile {
    path: PathBuf,
}

impl JsonSeedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeedSource for JsonSeedFile {
    fn name(&self) -> &str {
        "json"
    }

    fn load(&self) -> Result<SeedData> {
        if !self.path.exists() {
            return Err(MangaHubError::SeedError(format!(
                "seed file does not exist: {}",
                self.path.display()
            )));
        }
        let contents = fs::read_to_string(&self.path)?;
        let seed: SeedData = serde_json::from_str(&contents)?;
        ensure_unique_ids(&seed)?;
        Ok(seed)
    }
}

fn ensure_unique_ids(seed: &SeedData) -> Result<()> {
    let mut seen = HashSet::new();
    for manga in &seed.manga {
        if !seen.insert(manga.id.as_str()) {
            return Err(MangaHubError::SeedError(format!("duplicate manga id: {}", manga.id)));
        }
    }
    let mut seen = HashSet::new();
    for notification in &seed.notifications {
        if !seen.insert(notification.id.as_str()) {
            return Err(MangaHubError::SeedError(format!(
                "duplicate notification id: {}",
                notification.id
            )));
        }
    }
    Ok(())
}
