use serde::Serialize;

use crate::config::DashboardConfig;
use crate::models::{LibraryStats, MangaEntry, Notification, ReadingStatus};
use crate::queries::genres::{GenreCount, favorite_genres};
use crate::queries::library_view::{SortKey, sort_entries};
use crate::queries::stats::compute_stats;

/// Entries being read, most recently read first.
pub fn continue_reading(items: &[MangaEntry], limit: usize) -> Vec<&MangaEntry> {
    let mut reading: Vec<&MangaEntry> = items
        .iter()
        .filter(|m| m.status == ReadingStatus::Reading)
        .collect();
    sort_entries(&mut reading, SortKey::LastRead);
    reading.truncate(limit);
    reading
}

/// Rated entries, best first.
pub fn top_rated(items: &[MangaEntry], limit: usize) -> Vec<&MangaEntry> {
    let mut rated: Vec<&MangaEntry> = items.iter().filter(|m| m.is_rated()).collect();
    sort_entries(&mut rated, SortKey::Rating);
    rated.truncate(limit);
    rated
}

pub fn unread_notifications(notifications: &[Notification]) -> Vec<&Notification> {
    notifications.iter().filter(|n| !n.is_read).collect()
}

pub fn read_notifications(notifications: &[Notification]) -> Vec<&Notification> {
    notifications.iter().filter(|n| n.is_read).collect()
}

/// First `limit` unread notifications in collection order.
pub fn recent_unread(notifications: &[Notification], limit: usize) -> Vec<&Notification> {
    notifications.iter().filter(|n| !n.is_read).take(limit).collect()
}

/// Everything the dashboard summary shows, derived in one pass over the
/// current collections.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary<'a> {
    pub stats: LibraryStats,
    pub continue_reading: Vec<&'a MangaEntry>,
    pub top_rated: Vec<&'a MangaEntry>,
    pub recent_notifications: Vec<&'a Notification>,
    pub unread_count: usize,
    pub favorite_genres: Vec<GenreCount>,
}

impl<'a> DashboardSummary<'a> {
    pub fn build(
        manga: &'a [MangaEntry],
        notifications: &'a [Notification],
        limits: &DashboardConfig,
    ) -> Self {
        Self {
            stats: compute_stats(manga),
            continue_reading: continue_reading(manga, limits.continue_reading_limit),
            top_rated: top_rated(manga, limits.top_rated_limit),
            recent_notifications: recent_unread(notifications, limits.recent_notifications_limit),
            unread_count: notifications.iter().filter(|n| !n.is_read).count(),
            favorite_genres: favorite_genres(manga, limits.favorite_genres_limit),
        }
    }
}
