use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Platform;

/// A new-chapter announcement for a tracked work.
///
/// `manga_id` is a weak back-reference: the entry it names may have been
/// removed from the library, and readers must tolerate that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub manga_id: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    pub chapter: u32,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub direct_url: String,
}

impl Notification {
    /// Idempotent.
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}
