use mangahub_core::{
    DashboardSummary, LibraryStats, MangaEntry, Notification, Recommendation,
};

pub fn progress(entry: &MangaEntry) -> String {
    if entry.total_chapters == 0 {
        format!("ch. {}", entry.current_chapter)
    } else {
        format!(
            "{}/{} ({}%)",
            entry.current_chapter,
            entry.total_chapters,
            entry.progress_percent()
        )
    }
}

pub fn rating(entry: &MangaEntry) -> String {
    if entry.is_rated() {
        format!("{}/10", entry.rating)
    } else {
        "-".to_string()
    }
}

pub fn entry_line(entry: &MangaEntry) -> String {
    format!(
        "{id:<10}  {status:<10}  {title:<32}  {progress:<18}  {rating}",
        id = short_id(&entry.id),
        status = entry.status.label(),
        title = truncate(&entry.title, 32),
        progress = progress(entry),
        rating = rating(entry),
    )
}

pub fn print_entries(entries: &[&MangaEntry]) {
    if entries.is_empty() {
        println!("No manga match the current filters.");
        return;
    }
    for entry in entries {
        println!("{}", entry_line(entry));
    }
    println!("{} manga", entries.len());
}

pub fn print_entry_detail(entry: &MangaEntry) {
    println!("{} ({}, {})", entry.title, entry.kind, entry.year);
    println!("  id:        {}", entry.id);
    println!("  author:    {}", entry.author);
    println!("  status:    {}", entry.status.label());
    println!("  progress:  {}", progress(entry));
    println!("  rating:    {}", rating(entry));
    println!("  genres:    {}", entry.genres.join(", "));
    if !entry.tags.is_empty() {
        println!("  tags:      {}", entry.tags.join(", "));
    }
    println!("  platform:  {}", entry.platform);
    println!("  added:     {}", entry.date_added.format("%Y-%m-%d %H:%M"));
    println!("  last read: {}", entry.last_read.format("%Y-%m-%d %H:%M"));
    if !entry.notes.is_empty() {
        println!("  notes:     {}", entry.notes);
    }
    if !entry.description.is_empty() {
        println!();
        println!("  {}", entry.description);
    }
}

pub fn print_stats(stats: &LibraryStats) {
    println!("Library statistics:");
    println!("  Total manga:     {}", stats.total_manga);
    println!("  Chapters read:   {}", stats.chapters_read);
    println!("  Completed:       {}", stats.completed_manga);
    println!("  Reading:         {}", stats.reading_manga);
    println!("  Average rating:  {:.1}", stats.average_rating);
}

pub fn print_notifications(notifications: &[&Notification]) {
    if notifications.is_empty() {
        println!("No notifications.");
        return;
    }
    for n in notifications {
        let marker = if n.is_read { " " } else { "●" };
        println!(
            "{marker} {id:<6}  {when}  {title}",
            id = n.id,
            when = n.timestamp.format("%Y-%m-%d %H:%M"),
            title = n.title,
        );
        if !n.direct_url.is_empty() {
            println!("           {}", n.direct_url);
        }
    }
}

pub fn print_recommendations(recommendations: &[Recommendation]) {
    if recommendations.is_empty() {
        println!("No recommendations.");
        return;
    }
    for (i, rec) in recommendations.iter().enumerate() {
        println!("{}", recommendation_line(i + 1, rec));
        if !rec.reason.is_empty() {
            println!("    {}", rec.reason);
        }
        if !rec.based_on.is_empty() {
            println!("    Based on: {}", rec.based_on.join(", "));
        }
    }
}

/// `position` is the 1-based index accepted by the shell's `adopt`.
pub fn recommendation_line(position: usize, rec: &Recommendation) -> String {
    format!(
        "[{position}] {title} ({kind}) - {pct}% compatible",
        title = rec.manga.title,
        kind = rec.manga.kind,
        pct = rec.compatibility_percent(),
    )
}

pub fn print_dashboard(summary: &DashboardSummary<'_>) {
    print_stats(&summary.stats);

    println!();
    println!("Continue reading:");
    for entry in &summary.continue_reading {
        println!("  {}", entry_line(entry));
    }

    println!();
    println!("Top rated:");
    for entry in &summary.top_rated {
        println!("  {}", entry_line(entry));
    }

    println!();
    println!("New chapters ({} unread):", summary.unread_count);
    print_notifications(&summary.recent_notifications);

    if !summary.favorite_genres.is_empty() {
        let favorites: Vec<String> = summary
            .favorite_genres
            .iter()
            .map(|g| format!("{} ({})", g.genre, g.count))
            .collect();
        println!();
        println!("Favorite genres: {}", favorites.join(", "));
    }
}

pub fn print_genres(genres: &[String]) {
    if genres.is_empty() {
        println!("No genres yet.");
    } else {
        println!("{}", genres.join(", "));
    }
}

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mangahub_core::MangaDraft;

    fn entry(current: u32, total: u32, rating_value: u8) -> MangaEntry {
        let mut draft = MangaDraft::new("Berserk");
        draft.current_chapter = current;
        draft.total_chapters = total;
        draft.rating = rating_value;
        MangaEntry::from_draft(draft, "0190a6b2-7c1e-7000-8000-000000000000", Utc::now())
    }

    #[test]
    fn test_progress_formatting() {
        assert_eq!(progress(&entry(40, 0, 0)), "ch. 40");
        assert_eq!(progress(&entry(187, 374, 0)), "187/374 (50%)");
    }

    #[test]
    fn test_rating_formatting() {
        assert_eq!(rating(&entry(0, 0, 0)), "-");
        assert_eq!(rating(&entry(0, 0, 9)), "9/10");
    }

    #[test]
    fn test_recommendation_line() {
        let rec = Recommendation {
            manga: entry(0, 0, 0),
            score: 0.874,
            reason: String::new(),
            based_on: Vec::new(),
        };
        assert_eq!(recommendation_line(2, &rec), "[2] Berserk (manga) - 87% compatible");
    }

    #[test]
    fn test_short_id_and_truncate() {
        assert_eq!(short_id("0190a6b2-7c1e"), "0190a6b2");
        assert_eq!(short_id("7"), "7");
        assert_eq!(truncate("Omniscient Reader's Viewpoint", 10), "Omniscien…");
        assert_eq!(truncate("Berserk", 10), "Berserk");
    }
}
