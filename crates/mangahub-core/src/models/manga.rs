use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MangaHubError;

// ─── ReadingStatus ──────────────────────────────────────────

/// Where the user is with a tracked work. Any status may move to any other by
/// explicit user action; the only automatic transition is the completion rule
/// in [`MangaEntry::apply_completion_rule`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadingStatus {
    #[default]
    ToRead,
    Reading,
    Completed,
    Dropped,
    OnHold,
}

impl ReadingStatus {
    /// Sidebar order.
    pub const ALL: &[ReadingStatus] = &[
        Self::Reading,
        Self::Completed,
        Self::ToRead,
        Self::OnHold,
        Self::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToRead => "to-read",
            Self::Reading => "reading",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
            Self::OnHold => "on-hold",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ToRead => "To read",
            Self::Reading => "Reading",
            Self::Completed => "Completed",
            Self::Dropped => "Dropped",
            Self::OnHold => "On hold",
        }
    }
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReadingStatus {
    type Err = MangaHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "to-read" | "toread" | "to_read" => Ok(Self::ToRead),
            "reading" => Ok(Self::Reading),
            "completed" => Ok(Self::Completed),
            "dropped" => Ok(Self::Dropped),
            "on-hold" | "onhold" | "on_hold" => Ok(Self::OnHold),
            _ => Err(MangaHubError::invalid("reading status", s)),
        }
    }
}

// ─── Platform ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Webtoon,
    Mangadex,
    Asura,
    Reaper,
    Physical,
    #[default]
    Other,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Webtoon => "webtoon",
            Self::Mangadex => "mangadex",
            Self::Asura => "asura",
            Self::Reaper => "reaper",
            Self::Physical => "physical",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for Platform {
    type Err = MangaHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "webtoon" => Ok(Self::Webtoon),
            "mangadex" => Ok(Self::Mangadex),
            "asura" => Ok(Self::Asura),
            "reaper" => Ok(Self::Reaper),
            "physical" => Ok(Self::Physical),
            "other" => Ok(Self::Other),
            _ => Err(MangaHubError::invalid("platform", s)),
        }
    }
}

// ─── MangaKind ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MangaKind {
    #[default]
    Manga,
    Manhwa,
    Manhua,
}

impl std::fmt::Display for MangaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manga => write!(f, "manga"),
            Self::Manhwa => write!(f, "manhwa"),
            Self::Manhua => write!(f, "manhua"),
        }
    }
}

impl std::str::FromStr for MangaKind {
    type Err = MangaHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manga" => Ok(Self::Manga),
            "manhwa" => Ok(Self::Manhwa),
            "manhua" => Ok(Self::Manhua),
            _ => Err(MangaHubError::invalid("work type", s)),
        }
    }
}

// ─── MangaEntry ─────────────────────────────────────────────

/// A tracked work together with the user's reading metadata.
///
/// `total_chapters == 0` means the chapter count is unknown (ongoing series).
/// Owned by [`crate::store::MangaStore`]; nothing else mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub status: ReadingStatus,
    #[serde(default)]
    pub current_chapter: u32,
    #[serde(default)]
    pub total_chapters: u32,
    /// 0..=10, 0 meaning unrated.
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub platform: Platform,
    pub date_added: DateTime<Utc>,
    pub last_read: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "type", default)]
    pub kind: MangaKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year: i32,
    /// Whether the work itself has finished publication.
    #[serde(default)]
    pub is_completed: bool,
}

impl MangaEntry {
    /// Materialize a draft with a store-assigned id and creation time.
    pub fn from_draft(draft: MangaDraft, id: impl Into<String>, date_added: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            author: draft.author,
            cover: draft.cover,
            status: draft.status,
            current_chapter: draft.current_chapter,
            total_chapters: draft.total_chapters,
            rating: draft.rating,
            genres: draft.genres,
            tags: draft.tags,
            platform: draft.platform,
            date_added,
            last_read: draft.last_read,
            notes: draft.notes,
            kind: draft.kind,
            description: draft.description,
            year: draft.year,
            is_completed: draft.is_completed,
        }
    }

    /// Promote the status to `Completed` once the last known chapter is
    /// reached. Works with an unknown total (`0`) are never promoted.
    ///
    /// Returns `true` when the status changed.
    pub fn apply_completion_rule(&mut self) -> bool {
        let reached_end = self.total_chapters > 0 && self.current_chapter >= self.total_chapters;
        if reached_end && self.status != ReadingStatus::Completed {
            self.status = ReadingStatus::Completed;
            return true;
        }
        false
    }

    /// Fraction of known chapters read; `0.0` when the total is unknown.
    pub fn progress_ratio(&self) -> f64 {
        if self.total_chapters == 0 {
            return 0.0;
        }
        f64::from(self.current_chapter) / f64::from(self.total_chapters)
    }

    pub fn progress_percent(&self) -> u32 {
        (self.progress_ratio() * 100.0).round() as u32
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    pub fn is_rated(&self) -> bool {
        self.rating > 0
    }
}

// ─── MangaDraft ─────────────────────────────────────────────

/// Input of [`crate::store::MangaStore::add`]: an entry without an id or a
/// creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaDraft {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub status: ReadingStatus,
    #[serde(default)]
    pub current_chapter: u32,
    #[serde(default)]
    pub total_chapters: u32,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default = "Utc::now")]
    pub last_read: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "type", default)]
    pub kind: MangaKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub is_completed: bool,
}

impl MangaDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: String::new(),
            cover: String::new(),
            status: ReadingStatus::ToRead,
            current_chapter: 0,
            total_chapters: 0,
            rating: 0,
            genres: Vec::new(),
            tags: Vec::new(),
            platform: Platform::Other,
            last_read: Utc::now(),
            notes: String::new(),
            kind: MangaKind::Manga,
            description: String::new(),
            year: 0,
            is_completed: false,
        }
    }
}

impl From<MangaEntry> for MangaDraft {
    fn from(entry: MangaEntry) -> Self {
        Self {
            title: entry.title,
            author: entry.author,
            cover: entry.cover,
            status: entry.status,
            current_chapter: entry.current_chapter,
            total_chapters: entry.total_chapters,
            rating: entry.rating,
            genres: entry.genres,
            tags: entry.tags,
            platform: entry.platform,
            last_read: entry.last_read,
            notes: entry.notes,
            kind: entry.kind,
            description: entry.description,
            year: entry.year,
            is_completed: entry.is_completed,
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(current: u32, total: u32, status: ReadingStatus) -> MangaEntry {
        let mut draft = MangaDraft::new("Test");
        draft.current_chapter = current;
        draft.total_chapters = total;
        draft.status = status;
        MangaEntry::from_draft(draft, "t1", Utc::now())
    }

    #[test]
    fn test_completion_rule_promotes_at_last_chapter() {
        let mut e = entry(120, 120, ReadingStatus::Reading);
        assert!(e.apply_completion_rule());
        assert_eq!(e.status, ReadingStatus::Completed);
        assert!(!e.apply_completion_rule(), "second application is a no-op");
    }

    #[test]
    fn test_completion_rule_ignores_unknown_total() {
        let mut e = entry(500, 0, ReadingStatus::Reading);
        assert!(!e.apply_completion_rule());
        assert_eq!(e.status, ReadingStatus::Reading);
    }

    #[test]
    fn test_completion_rule_below_total() {
        let mut e = entry(10, 11, ReadingStatus::OnHold);
        assert!(!e.apply_completion_rule());
        assert_eq!(e.status, ReadingStatus::OnHold);
    }

    #[test]
    fn test_progress_ratio() {
        assert_eq!(entry(0, 0, ReadingStatus::ToRead).progress_ratio(), 0.0);
        assert_eq!(entry(50, 200, ReadingStatus::Reading).progress_ratio(), 0.25);
        assert_eq!(entry(1, 3, ReadingStatus::Reading).progress_percent(), 33);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("to-read".parse::<ReadingStatus>().unwrap(), ReadingStatus::ToRead);
        assert_eq!("On-Hold".parse::<ReadingStatus>().unwrap(), ReadingStatus::OnHold);
        assert!("paused".parse::<ReadingStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ReadingStatus::OnHold).unwrap();
        assert_eq!(json, "\"on-hold\"");
        let back: ReadingStatus = serde_json::from_str("\"to-read\"").unwrap();
        assert_eq!(back, ReadingStatus::ToRead);
    }

    #[test]
    fn test_entry_json_uses_camel_case_and_type_key() {
        let mut e = entry(3, 10, ReadingStatus::Reading);
        e.kind = MangaKind::Manhwa;
        let value = serde_json::to_value(&e).unwrap();
        assert_eq!(value["currentChapter"], 3);
        assert_eq!(value["totalChapters"], 10);
        assert_eq!(value["type"], "manhwa");
        assert!(value.get("dateAdded").is_some());
        assert!(value.get("isCompleted").is_some());
    }

    #[test]
    fn test_platform_and_kind_from_str() {
        assert_eq!("Webtoon".parse::<Platform>().unwrap(), Platform::Webtoon);
        assert!("kindle".parse::<Platform>().is_err());
        assert_eq!("manhua".parse::<MangaKind>().unwrap(), MangaKind::Manhua);
    }
}
