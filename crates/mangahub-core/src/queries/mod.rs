//! Pure derivations over the store's collections. Nothing here mutates.

pub mod dashboard;
pub mod genres;
pub mod library_view;
pub mod stats;

pub use dashboard::{
    DashboardSummary, continue_reading, read_notifications, recent_unread, top_rated,
    unread_notifications,
};
pub use genres::{GenreCount, favorite_genres, unique_genres};
pub use library_view::{LibraryQuery, SortKey, compare_titles, library_view, sort_entries};
pub use stats::compute_stats;
