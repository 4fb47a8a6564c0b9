use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{LibraryStats, MangaDraft, MangaEntry, Notification, ReadingStatus, Recommendation};
use crate::queries::compute_stats;
use crate::seed::{SeedData, SeedSource};

/// Highest rating a user can give.
pub const MAX_RATING: u8 = 10;

/// How out-of-range numeric input is treated by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Ratings are capped at [`MAX_RATING`], progress at a known chapter total.
    #[default]
    Clamp,
    /// Values are stored as given.
    Permit,
}

/// In-memory owner of the library, the notification feed and the
/// recommendation list.
///
/// Id-addressed operations on an unknown id do nothing. No operation fails.
#[derive(Debug, Clone, Default)]
pub struct MangaStore {
    manga: Vec<MangaEntry>,
    notifications: Vec<Notification>,
    recommendations: Vec<Recommendation>,
    policy: InputPolicy,
}

impl MangaStore {
    /// Seed entries are brought in line with the default policy: ratings and
    /// progress are clamped and the completion rule applied.
    pub fn new(seed: SeedData) -> Self {
        let policy = InputPolicy::default();
        let mut manga = seed.manga;
        for entry in &mut manga {
            normalize(policy, entry);
        }
        Self {
            manga,
            notifications: seed.notifications,
            recommendations: seed.recommendations,
            policy,
        }
    }

    pub fn from_source(source: &dyn SeedSource) -> Result<Self> {
        let seed = source.load()?;
        tracing::info!(
            source = source.name(),
            manga = seed.manga.len(),
            notifications = seed.notifications.len(),
            recommendations = seed.recommendations.len(),
            "seed data loaded"
        );
        Ok(Self::new(seed))
    }

    pub fn with_policy(mut self, policy: InputPolicy) -> Self {
        self.policy = policy;
        self
    }

    // ─── Snapshots ─────────────────────────────────────────

    /// Most recently added first.
    pub fn manga(&self) -> &[MangaEntry] {
        &self.manga
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn get(&self, id: &str) -> Option<&MangaEntry> {
        self.manga.iter().find(|m| m.id == id)
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    pub fn compute_stats(&self) -> LibraryStats {
        compute_stats(&self.manga)
    }

    // ─── Library mutations ─────────────────────────────────

    /// Set the reading status and stamp the entry as just read.
    pub fn set_status(&mut self, id: &str, status: ReadingStatus) {
        let Some(entry) = self.entry_mut(id, "set_status") else {
            return;
        };
        entry.status = status;
        entry.last_read = Utc::now();
        tracing::debug!(id, %status, "status updated");
    }

    /// Set the current chapter, stamp the entry as just read and apply the
    /// completion rule.
    pub fn set_progress(&mut self, id: &str, chapter: u32) {
        let policy = self.policy;
        let Some(entry) = self.entry_mut(id, "set_progress") else {
            return;
        };
        entry.current_chapter = bounded_chapter(policy, chapter, entry.total_chapters);
        entry.last_read = Utc::now();
        let completed = entry.apply_completion_rule();
        tracing::debug!(
            id,
            chapter = entry.current_chapter,
            total = entry.total_chapters,
            completed,
            "progress updated"
        );
    }

    /// Advance by one chapter while chapters remain. Series with an unknown
    /// total are left alone.
    pub fn read_next_chapter(&mut self, id: &str) {
        let Some(entry) = self.get(id) else {
            tracing::debug!(id, op = "read_next_chapter", "unknown manga id, ignoring");
            return;
        };
        if entry.current_chapter < entry.total_chapters {
            let next = entry.current_chapter + 1;
            self.set_progress(id, next);
        }
    }

    /// Set the rating. Does not touch the last-read timestamp.
    pub fn set_rating(&mut self, id: &str, rating: u8) {
        let policy = self.policy;
        let Some(entry) = self.entry_mut(id, "set_rating") else {
            return;
        };
        entry.rating = bounded_rating(policy, rating);
        tracing::debug!(id, rating = entry.rating, "rating updated");
    }

    /// Insert a new entry at the front of the library and return its id.
    pub fn add(&mut self, draft: MangaDraft) -> String {
        let id = Uuid::now_v7().to_string();
        let mut entry = MangaEntry::from_draft(draft, id.clone(), Utc::now());
        normalize(self.policy, &mut entry);
        tracing::debug!(id = %entry.id, title = %entry.title, "manga added");
        self.manga.insert(0, entry);
        id
    }

    /// "Add to library" for the recommendation at `index`.
    ///
    /// Returns the new entry's id, or `None` when `index` is out of range.
    pub fn add_recommendation(&mut self, index: usize) -> Option<String> {
        let Some(draft) = self.recommendations.get(index).map(Recommendation::to_draft) else {
            tracing::debug!(index, "unknown recommendation index, ignoring");
            return None;
        };
        Some(self.add(draft))
    }

    /// Remove an entry. Notifications pointing at it are left in place.
    pub fn remove(&mut self, id: &str) {
        let before = self.manga.len();
        self.manga.retain(|m| m.id != id);
        if self.manga.len() == before {
            tracing::debug!(id, op = "remove", "unknown manga id, ignoring");
        } else {
            tracing::debug!(id, "manga removed");
        }
    }

    // ─── Notification mutations ────────────────────────────

    /// Idempotent.
    pub fn mark_notification_read(&mut self, id: &str) {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.mark_read();
                tracing::debug!(id, "notification marked read");
            }
            None => tracing::debug!(id, op = "mark_notification_read", "unknown notification id, ignoring"),
        }
    }

    pub fn mark_all_notifications_read(&mut self) {
        let mut marked = 0usize;
        for notification in self.notifications.iter_mut().filter(|n| !n.is_read) {
            notification.mark_read();
            marked += 1;
        }
        tracing::debug!(marked, "all notifications marked read");
    }

    // ─── Helpers ───────────────────────────────────────────

    fn entry_mut(&mut self, id: &str, op: &'static str) -> Option<&mut MangaEntry> {
        let entry = self.manga.iter_mut().find(|m| m.id == id);
        if entry.is_none() {
            tracing::debug!(id, op, "unknown manga id, ignoring");
        }
        entry
    }
}

fn normalize(policy: InputPolicy, entry: &mut MangaEntry) {
    entry.rating = bounded_rating(policy, entry.rating);
    entry.current_chapter = bounded_chapter(policy, entry.current_chapter, entry.total_chapters);
    entry.apply_completion_rule();
}

fn bounded_rating(policy: InputPolicy, rating: u8) -> u8 {
    if policy == InputPolicy::Clamp && rating > MAX_RATING {
        tracing::warn!(rating, max = MAX_RATING, "rating out of range, clamping");
        return MAX_RATING;
    }
    rating
}

fn bounded_chapter(policy: InputPolicy, chapter: u32, total: u32) -> u32 {
    if policy == InputPolicy::Clamp && total > 0 && chapter > total {
        tracing::warn!(chapter, total, "progress beyond last chapter, clamping");
        return total;
    }
    chapter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;
    use chrono::{Duration, TimeZone};

    fn entry(id: &str, status: ReadingStatus, current: u32, total: u32) -> MangaEntry {
        let then = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let mut draft = MangaDraft::new(format!("Title {id}"));
        draft.status = status;
        draft.current_chapter = current;
        draft.total_chapters = total;
        draft.last_read = then;
        MangaEntry::from_draft(draft, id, then)
    }

    fn notification(id: &str, manga_id: &str) -> Notification {
        Notification {
            id: id.to_string(),
            manga_id: manga_id.to_string(),
            title: "Chapter out".to_string(),
            message: String::new(),
            chapter: 11,
            timestamp: Utc::now(),
            is_read: false,
            platform: Platform::Asura,
            direct_url: "https://example.org/11".to_string(),
        }
    }

    fn store(manga: Vec<MangaEntry>) -> MangaStore {
        MangaStore::new(SeedData {
            manga,
            notifications: vec![notification("n1", "1"), notification("n2", "2")],
            recommendations: Vec::new(),
        })
    }

    #[test]
    fn test_set_status_refreshes_last_read() {
        let mut store = store(vec![entry("1", ReadingStatus::ToRead, 0, 10)]);
        let before = store.get("1").unwrap().last_read;

        store.set_status("1", ReadingStatus::Dropped);

        let e = store.get("1").unwrap();
        assert_eq!(e.status, ReadingStatus::Dropped);
        assert!(e.last_read > before);
    }

    #[test]
    fn test_set_progress_completes_at_total() {
        let mut store = store(vec![entry("1", ReadingStatus::Reading, 5, 10)]);
        store.set_progress("1", 10);
        let e = store.get("1").unwrap();
        assert_eq!(e.current_chapter, 10);
        assert_eq!(e.status, ReadingStatus::Completed);
    }

    #[test]
    fn test_set_progress_unknown_total_keeps_status() {
        let mut store = store(vec![entry("1", ReadingStatus::OnHold, 5, 0)]);
        store.set_progress("1", 1000);
        let e = store.get("1").unwrap();
        assert_eq!(e.current_chapter, 1000);
        assert_eq!(e.status, ReadingStatus::OnHold);
    }

    #[test]
    fn test_set_progress_clamps_by_default() {
        let mut store = store(vec![entry("1", ReadingStatus::Reading, 5, 10)]);
        store.set_progress("1", 25);
        let e = store.get("1").unwrap();
        assert_eq!(e.current_chapter, 10);
        assert_eq!(e.status, ReadingStatus::Completed);
    }

    #[test]
    fn test_set_progress_permit_policy_keeps_value() {
        let mut store =
            store(vec![entry("1", ReadingStatus::Reading, 5, 10)]).with_policy(InputPolicy::Permit);
        store.set_progress("1", 25);
        let e = store.get("1").unwrap();
        assert_eq!(e.current_chapter, 25);
        assert_eq!(e.status, ReadingStatus::Completed);
    }

    #[test]
    fn test_set_progress_backwards_does_not_reopen() {
        let mut store = store(vec![entry("1", ReadingStatus::Completed, 10, 10)]);
        store.set_progress("1", 3);
        let e = store.get("1").unwrap();
        assert_eq!(e.current_chapter, 3);
        assert_eq!(e.status, ReadingStatus::Completed);
    }

    #[test]
    fn test_read_next_chapter() {
        let mut store = store(vec![
            entry("1", ReadingStatus::Reading, 9, 10),
            entry("2", ReadingStatus::Reading, 40, 0),
        ]);

        store.read_next_chapter("1");
        assert_eq!(store.get("1").unwrap().current_chapter, 10);
        assert_eq!(store.get("1").unwrap().status, ReadingStatus::Completed);

        store.read_next_chapter("1");
        assert_eq!(store.get("1").unwrap().current_chapter, 10, "no chapters left");

        store.read_next_chapter("2");
        assert_eq!(store.get("2").unwrap().current_chapter, 40, "unknown total");
    }

    #[test]
    fn test_set_rating_does_not_touch_last_read() {
        let mut store = store(vec![entry("1", ReadingStatus::Reading, 0, 10)]);
        let before = store.get("1").unwrap().last_read;
        store.set_rating("1", 8);
        let e = store.get("1").unwrap();
        assert_eq!(e.rating, 8);
        assert_eq!(e.last_read, before);
    }

    #[test]
    fn test_set_rating_policy() {
        let mut clamped = store(vec![entry("1", ReadingStatus::Reading, 0, 10)]);
        clamped.set_rating("1", 42);
        assert_eq!(clamped.get("1").unwrap().rating, MAX_RATING);

        let mut permissive =
            store(vec![entry("1", ReadingStatus::Reading, 0, 10)]).with_policy(InputPolicy::Permit);
        permissive.set_rating("1", 42);
        assert_eq!(permissive.get("1").unwrap().rating, 42);
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut store = store(vec![entry("1", ReadingStatus::Reading, 3, 10)]);
        let snapshot = store.manga().to_vec();

        store.set_status("missing", ReadingStatus::Completed);
        store.set_progress("missing", 10);
        store.set_rating("missing", 5);
        store.read_next_chapter("missing");
        store.remove("missing");
        store.mark_notification_read("missing");

        assert_eq!(store.manga(), snapshot.as_slice());
        assert_eq!(store.unread_count(), 2);
    }

    #[test]
    fn test_add_prepends_with_fresh_id() {
        let mut store = store(vec![entry("1", ReadingStatus::Reading, 3, 10)]);
        let before = Utc::now() - Duration::seconds(1);

        let id_a = store.add(MangaDraft::new("Blue Lock"));
        let id_b = store.add(MangaDraft::new("Kingdom"));

        assert_ne!(id_a, id_b);
        assert_eq!(store.manga().len(), 3);
        assert_eq!(store.manga()[0].id, id_b);
        assert_eq!(store.manga()[1].id, id_a);
        assert!(store.get(&id_a).unwrap().date_added >= before);
    }

    #[test]
    fn test_add_clamps_out_of_range_draft() {
        let mut store = store(Vec::new());
        let mut draft = MangaDraft::new("Vagabond");
        draft.status = ReadingStatus::Reading;
        draft.current_chapter = 50;
        draft.total_chapters = 10;
        draft.rating = 42;

        let id = store.add(draft);

        let e = store.get(&id).unwrap();
        assert_eq!(e.current_chapter, 10);
        assert_eq!(e.rating, MAX_RATING);
        assert_eq!(e.status, ReadingStatus::Completed);
        assert_eq!(store.compute_stats().average_rating, 10.0);
    }

    #[test]
    fn test_add_permit_policy_keeps_values() {
        let mut store = store(Vec::new()).with_policy(InputPolicy::Permit);
        let mut draft = MangaDraft::new("Vagabond");
        draft.status = ReadingStatus::Reading;
        draft.current_chapter = 50;
        draft.total_chapters = 10;
        draft.rating = 42;

        let id = store.add(draft);

        let e = store.get(&id).unwrap();
        assert_eq!(e.current_chapter, 50);
        assert_eq!(e.rating, 42);
        assert_eq!(e.status, ReadingStatus::Completed);
    }

    #[test]
    fn test_seed_entries_are_normalized() {
        let mut over = entry("1", ReadingStatus::Reading, 50, 10);
        over.rating = 42;
        let store = store(vec![over, entry("2", ReadingStatus::Reading, 3, 10)]);

        let e = store.get("1").unwrap();
        assert_eq!(e.current_chapter, 10);
        assert_eq!(e.rating, MAX_RATING);
        assert_eq!(e.status, ReadingStatus::Completed);
        assert_eq!(store.get("2").unwrap().status, ReadingStatus::Reading);
    }

    #[test]
    fn test_remove_leaves_dangling_notifications() {
        let mut store = store(vec![entry("1", ReadingStatus::Reading, 3, 10)]);
        store.remove("1");
        assert!(store.get("1").is_none());
        assert_eq!(store.notifications().len(), 2);
        assert_eq!(store.notifications()[0].manga_id, "1");
    }

    #[test]
    fn test_mark_notification_read_twice() {
        let mut store = store(Vec::new());
        store.mark_notification_read("n1");
        store.mark_notification_read("n1");
        assert!(store.notifications()[0].is_read);
        assert!(!store.notifications()[1].is_read);
        assert_eq!(store.unread_count(), 1);
    }

    #[test]
    fn test_mark_all_notifications_read() {
        let mut store = store(Vec::new());
        store.mark_all_notifications_read();
        assert_eq!(store.unread_count(), 0);
    }

    #[test]
    fn test_add_recommendation_resets_state() {
        let mut rec_draft = MangaDraft::new("Omniscient Reader");
        rec_draft.status = ReadingStatus::Completed;
        rec_draft.current_chapter = 200;
        rec_draft.total_chapters = 551;
        rec_draft.rating = 10;
        let recommendation = Recommendation {
            manga: MangaEntry::from_draft(rec_draft, "rec", Utc::now()),
            score: 0.93,
            reason: "Similar to Solo Leveling".to_string(),
            based_on: vec!["Solo Leveling".to_string()],
        };
        let mut store = MangaStore::new(SeedData {
            manga: Vec::new(),
            notifications: Vec::new(),
            recommendations: vec![recommendation],
        });

        let id = store.add_recommendation(0).unwrap();
        let added = store.get(&id).unwrap();
        assert_eq!(added.status, ReadingStatus::ToRead);
        assert_eq!(added.current_chapter, 0);
        assert_eq!(added.rating, 0);
        assert_eq!(added.total_chapters, 551);
        assert_ne!(added.id, "rec");

        assert!(store.add_recommendation(5).is_none());
        assert_eq!(store.manga().len(), 1);
    }
}
