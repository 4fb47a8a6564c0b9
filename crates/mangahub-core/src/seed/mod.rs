//! Where the store's initial collections come from.
//!
//! The store only sees [`SeedData`]; swapping the built-in catalogue for a
//! file (or anything else implementing [`SeedSource`]) leaves the store and
//! the derivations untouched.

pub mod builtin;
pub mod json;

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::Result;
use crate::models::{MangaEntry, Notification, Recommendation};

pub use builtin::BuiltinSeed;
pub use json::JsonSeedFile;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub manga: Vec<MangaEntry>,
    pub notifications: Vec<Notification>,
    pub recommendations: Vec<Recommendation>,
}

pub trait SeedSource {
    /// Short label used in logs.
    fn name(&self) -> &str;

    fn load(&self) -> Result<SeedData>;
}

/// The JSON file named in `[seed] path`, or the built-in catalogue.
pub fn source_from_config(config: &AppConfig) -> Box<dyn SeedSource> {
    match config.seed_path() {
        Some(path) => Box::new(JsonSeedFile::new(path)),
        None => Box::new(BuiltinSeed),
    }
}
