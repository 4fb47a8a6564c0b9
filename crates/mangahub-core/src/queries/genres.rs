use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::models::MangaEntry;

/// Every genre in the library, deduplicated and sorted. Feeds the genre
/// filter choices.
pub fn unique_genres(items: &[MangaEntry]) -> Vec<String> {
    items
        .iter()
        .flat_map(|m| m.genres.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Most frequent genres, ties broken alphabetically.
pub fn favorite_genres(items: &[MangaEntry], limit: usize) -> Vec<GenreCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for genre in items.iter().flat_map(|m| m.genres.iter()) {
        *counts.entry(genre.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<GenreCount> = counts
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre: genre.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MangaDraft;
    use chrono::Utc;

    fn with_genres(genres: &[&str]) -> MangaEntry {
        let mut draft = MangaDraft::new("x");
        draft.genres = genres.iter().map(|s| s.to_string()).collect();
        MangaEntry::from_draft(draft, "x", Utc::now())
    }

    #[test]
    fn test_unique_genres_sorted_and_deduplicated() {
        let items = vec![
            with_genres(&["Romance", "Action"]),
            with_genres(&["Action", "Horror"]),
            with_genres(&[]),
        ];
        assert_eq!(unique_genres(&items), vec!["Action", "Horror", "Romance"]);
    }

    #[test]
    fn test_unique_genres_empty_library() {
        assert!(unique_genres(&[]).is_empty());
    }

    #[test]
    fn test_favorite_genres_ranking() {
        let items = vec![
            with_genres(&["Action", "Fantasy"]),
            with_genres(&["Action", "Drama"]),
            with_genres(&["Fantasy", "Action"]),
            with_genres(&["Drama"]),
        ];
        let top = favorite_genres(&items, 2);
        assert_eq!(
            top,
            vec![
                GenreCount { genre: "Action".to_string(), count: 3 },
                GenreCount { genre: "Drama".to_string(), count: 2 },
            ]
        );
    }
}
