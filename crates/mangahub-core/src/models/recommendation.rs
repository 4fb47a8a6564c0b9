use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::{MangaDraft, MangaEntry, ReadingStatus};

/// A suggested work that is not in the library yet.
///
/// The score is supplied by the data source; nothing here computes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub manga: MangaEntry,
    /// Compatibility in `[0, 1]`.
    pub score: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub based_on: Vec<String>,
}

impl Recommendation {
    pub fn compatibility_percent(&self) -> u32 {
        (self.score.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    /// Draft used by "add to library": personal reading state is reset no
    /// matter what the embedded entry carries.
    pub fn to_draft(&self) -> MangaDraft {
        let mut draft = MangaDraft::from(self.manga.clone());
        draft.status = ReadingStatus::ToRead;
        draft.current_chapter = 0;
        draft.rating = 0;
        draft.notes.clear();
        draft.last_read = Utc::now();
        draft
    }
}
