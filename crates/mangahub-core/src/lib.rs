pub mod app_state;
pub mod config;
pub mod error;
pub mod models;
pub mod queries;
pub mod seed;
pub mod store;

pub use app_state::{AppState, Tab};
pub use config::{AppConfig, DashboardConfig, LibraryConfig, SeedConfig};
pub use error::{ExitCode, MangaHubError, Result};
pub use models::*;

pub use queries::{DashboardSummary, GenreCount, LibraryQuery, SortKey};
pub use seed::{BuiltinSeed, JsonSeedFile, SeedData, SeedSource, source_from_config};
pub use store::{InputPolicy, MAX_RATING, MangaStore};
