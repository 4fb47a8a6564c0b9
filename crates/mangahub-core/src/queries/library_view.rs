use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::MangaHubError;
use crate::models::{MangaEntry, ReadingStatus};

// ─── SortKey ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Case-insensitive title, ascending.
    Title,
    /// Newest first.
    DateAdded,
    /// Most recently read first.
    #[default]
    LastRead,
    /// Highest first.
    Rating,
    /// Highest read fraction first; unknown totals count as 0.
    Progress,
}

impl SortKey {
    pub const ALL: &[SortKey] = &[
        Self::Title,
        Self::DateAdded,
        Self::LastRead,
        Self::Rating,
        Self::Progress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::DateAdded => "dateAdded",
            Self::LastRead => "lastRead",
            Self::Rating => "rating",
            Self::Progress => "progress",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = MangaHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "title" => Ok(Self::Title),
            "dateadded" | "added" => Ok(Self::DateAdded),
            "lastread" | "recent" => Ok(Self::LastRead),
            "rating" => Ok(Self::Rating),
            "progress" => Ok(Self::Progress),
            _ => Err(MangaHubError::invalid("sort key", s)),
        }
    }
}

// ─── LibraryQuery ───────────────────────────────────────────

/// Parameters of the library view.
///
/// Text matches title, author or any genre (case-insensitive substring, any
/// field suffices). The status filter is an exact match. The genre filter
/// keeps entries carrying at least one of the selected genres.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryQuery {
    pub text: String,
    pub status: Option<ReadingStatus>,
    pub genres: Vec<String>,
    pub sort: SortKey,
}

impl LibraryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_status(mut self, status: Option<ReadingStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Whether `entry` passes every active filter.
    pub fn matches(&self, entry: &MangaEntry) -> bool {
        self.matches_with(entry, &self.text.to_lowercase())
    }

    fn matches_with(&self, entry: &MangaEntry, needle: &str) -> bool {
        if !needle.is_empty() && !text_matches(entry, needle) {
            return false;
        }
        if self.status.is_some_and(|status| entry.status != status) {
            return false;
        }
        if !self.genres.is_empty() && !self.genres.iter().any(|g| entry.has_genre(g)) {
            return false;
        }
        true
    }
}

fn text_matches(entry: &MangaEntry, needle: &str) -> bool {
    entry.title.to_lowercase().contains(needle)
        || entry.author.to_lowercase().contains(needle)
        || entry
            .genres
            .iter()
            .any(|g| g.to_lowercase().contains(needle))
}

// ─── View ───────────────────────────────────────────────────

/// Filtered and sorted subsequence of `items`. Pure: identical inputs give
/// identical output.
pub fn library_view<'a>(items: &'a [MangaEntry], query: &LibraryQuery) -> Vec<&'a MangaEntry> {
    let needle = query.text.to_lowercase();
    let mut view: Vec<&MangaEntry> = items
        .iter()
        .filter(|entry| query.matches_with(entry, &needle))
        .collect();
    sort_entries(&mut view, query.sort);
    view
}

/// Stable sort: entries with equal keys keep their relative order.
pub fn sort_entries(entries: &mut [&MangaEntry], key: SortKey) {
    entries.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &MangaEntry, b: &MangaEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => compare_titles(&a.title, &b.title),
        SortKey::DateAdded => b.date_added.cmp(&a.date_added),
        SortKey::LastRead => b.last_read.cmp(&a.last_read),
        SortKey::Rating => b.rating.cmp(&a.rating),
        SortKey::Progress => b.progress_ratio().total_cmp(&a.progress_ratio()),
    }
}

/// Dictionary-style ordering: accents and case are ignored first, so `Éclair`
/// sorts next to `Eclair` rather than after `Z`. Among titles equal after
/// folding, unaccented letters come first. Titles differing only in case
/// compare equal.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let (a_lower, b_lower) = (a.to_lowercase(), b.to_lowercase());
    fold_accents(&a_lower)
        .cmp(&fold_accents(&b_lower))
        .then_with(|| a_lower.cmp(&b_lower))
}

fn fold_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
