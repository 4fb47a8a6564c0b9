use serde::{Deserialize, Serialize};

/// Aggregate snapshot of the library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub total_manga: usize,
    /// Sum of `current_chapter` over every entry.
    pub chapters_read: u64,
    pub completed_manga: usize,
    pub reading_manga: usize,
    /// Mean of non-zero ratings, one decimal place; `0.0` when nothing is rated.
    pub average_rating: f64,
}
