use crate::models::{LibraryStats, MangaEntry, ReadingStatus};

pub fn compute_stats(items: &[MangaEntry]) -> LibraryStats {
    let chapters_read = items.iter().map(|m| u64::from(m.current_chapter)).sum();
    let completed_manga = count_by_status(items, ReadingStatus::Completed);
    let reading_manga = count_by_status(items, ReadingStatus::Reading);

    LibraryStats {
        total_manga: items.len(),
        chapters_read,
        completed_manga,
        reading_manga,
        average_rating: average_rating(items),
    }
}

pub fn count_by_status(items: &[MangaEntry], status: ReadingStatus) -> usize {
    items.iter().filter(|m| m.status == status).count()
}

/// Mean of the non-zero ratings rounded to one decimal place.
pub fn average_rating(items: &[MangaEntry]) -> f64 {
    let rated: Vec<u32> = items
        .iter()
        .filter(|m| m.is_rated())
        .map(|m| u32::from(m.rating))
        .collect();
    if rated.is_empty() {
        return 0.0;
    }
    let mean = f64::from(rated.iter().sum::<u32>()) / rated.len() as f64;
    (mean * 10.0).round() / 10.0
}
