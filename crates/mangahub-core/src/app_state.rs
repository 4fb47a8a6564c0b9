use serde::{Deserialize, Serialize};

use crate::error::MangaHubError;
use crate::models::ReadingStatus;
use crate::queries::{LibraryQuery, SortKey};

/// Which screen is showing. `Status(s)` is the library restricted to one
/// reading status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Tab {
    #[default]
    Dashboard,
    Library,
    Notifications,
    Recommendations,
    Stats,
    Settings,
    Status(ReadingStatus),
}

impl Tab {
    pub fn status_filter(&self) -> Option<ReadingStatus> {
        match self {
            Self::Status(status) => Some(*status),
            _ => None,
        }
    }

    /// Tabs that render the library view.
    pub fn shows_library(&self) -> bool {
        matches!(self, Self::Library | Self::Status(_))
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "dashboard"),
            Self::Library => write!(f, "library"),
            Self::Notifications => write!(f, "notifications"),
            Self::Recommendations => write!(f, "recommendations"),
            Self::Stats => write!(f, "stats"),
            Self::Settings => write!(f, "settings"),
            Self::Status(status) => write!(f, "status-{status}"),
        }
    }
}

impl std::str::FromStr for Tab {
    type Err = MangaHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(status) = s.strip_prefix("status-") {
            return status
                .parse()
                .map(Self::Status)
                .map_err(|_| MangaHubError::invalid("tab", s));
        }
        match s {
            "dashboard" => Ok(Self::Dashboard),
            "library" => Ok(Self::Library),
            "notifications" => Ok(Self::Notifications),
            "recommendations" => Ok(Self::Recommendations),
            "stats" => Ok(Self::Stats),
            "settings" => Ok(Self::Settings),
            _ => Err(MangaHubError::invalid("tab", s)),
        }
    }
}

impl From<Tab> for String {
    fn from(tab: Tab) -> Self {
        tab.to_string()
    }
}

impl TryFrom<String> for Tab {
    type Error = MangaHubError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Transient UI state, passed explicitly to whatever renders or derives
/// views instead of living in globals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub active_tab: Tab,
    pub search_query: String,
    pub selected_genres: Vec<String>,
    pub sort: SortKey,
}

impl AppState {
    pub fn new(sort: SortKey) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Select `genre` if it is not selected, deselect it otherwise.
    pub fn toggle_genre(&mut self, genre: &str) {
        if let Some(pos) = self.selected_genres.iter().position(|g| g == genre) {
            self.selected_genres.remove(pos);
        } else {
            self.selected_genres.push(genre.to_string());
        }
    }

    pub fn clear_genres(&mut self) {
        self.selected_genres.clear();
    }

    /// Parameters for the library view under the current state.
    pub fn library_query(&self) -> LibraryQuery {
        LibraryQuery::new()
            .with_text(self.search_query.clone())
            .with_status(self.active_tab.status_filter())
            .with_genres(self.selected_genres.iter().cloned())
            .with_sort(self.sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_parsing() {
        assert_eq!("library".parse::<Tab>().unwrap(), Tab::Library);
        assert_eq!(
            "status-on-hold".parse::<Tab>().unwrap(),
            Tab::Status(ReadingStatus::OnHold)
        );
        assert!("status-paused".parse::<Tab>().is_err());
        assert!("profile".parse::<Tab>().is_err());
        assert_eq!(Tab::Status(ReadingStatus::ToRead).to_string(), "status-to-read");
    }

    #[test]
    fn test_status_tab_drives_filter() {
        let mut state = AppState::default();
        assert_eq!(state.library_query().status, None);

        state.set_tab(Tab::Status(ReadingStatus::Completed));
        assert_eq!(state.library_query().status, Some(ReadingStatus::Completed));
        assert!(state.active_tab.shows_library());
    }

    #[test]
    fn test_toggle_genre() {
        let mut state = AppState::default();
        state.toggle_genre("Action");
        state.toggle_genre("Romance");
        assert_eq!(state.selected_genres, vec!["Action", "Romance"]);

        state.toggle_genre("Action");
        assert_eq!(state.selected_genres, vec!["Romance"]);
    }

    #[test]
    fn test_library_query_reflects_state() {
        let mut state = AppState::new(SortKey::Rating);
        state.set_search("solo");
        state.toggle_genre("Action");

        let query = state.library_query();
        assert_eq!(query.text, "solo");
        assert_eq!(query.genres, vec!["Action"]);
        assert_eq!(query.sort, SortKey::Rating);
    }

    #[test]
    fn test_state_json_roundtrip() {
        let mut state = AppState::new(SortKey::Title);
        state.set_tab(Tab::Status(ReadingStatus::Dropped));
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"activeTab\":\"status-dropped\""));
        let back: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
