use chrono::{DateTime, TimeZone, Utc};

use crate::error::Result;
use crate::models::{
    MangaDraft, MangaEntry, MangaKind, Notification, Platform, ReadingStatus, Recommendation,
};
use crate::seed::{SeedData, SeedSource};

/// In-process demo catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSeed;

impl SeedSource for BuiltinSeed {
    fn name(&self) -> &str {
        "builtin"
    }

    fn load(&self) -> Result<SeedData> {
        Ok(SeedData {
            manga: library(),
            notifications: notifications(),
            recommendations: recommendations(),
        })
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

fn genres(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn cover(slug: &str) -> String {
    format!("https://covers.mangahub.local/{slug}.jpg")
}

fn library() -> Vec<MangaEntry> {
    vec![
        MangaEntry::from_draft(
            MangaDraft {
                title: "Solo Leveling".to_string(),
                author: "Chugong".to_string(),
                cover: cover("solo-leveling"),
                status: ReadingStatus::Completed,
                current_chapter: 179,
                total_chapters: 179,
                rating: 9,
                genres: genres(&["Action", "Fantasy", "Adventure"]),
                tags: genres(&["overpowered", "dungeons"]),
                platform: Platform::Webtoon,
                last_read: at(2024, 2, 10, 21),
                kind: MangaKind::Manhwa,
                description: "The weakest hunter of all mankind gains the power to level up."
                    .to_string(),
                year: 2018,
                is_completed: true,
                ..MangaDraft::new("")
            },
            "1",
            at(2023, 11, 2, 18),
        ),
        MangaEntry::from_draft(
            MangaDraft {
                title: "One Piece".to_string(),
                author: "Eiichiro Oda".to_string(),
                cover: cover("one-piece"),
                status: ReadingStatus::Reading,
                current_chapter: 1095,
                total_chapters: 0,
                rating: 10,
                genres: genres(&["Action", "Adventure", "Comedy"]),
                tags: genres(&["pirates", "weekly"]),
                platform: Platform::Mangadex,
                last_read: at(2024, 3, 3, 9),
                notes: "Catch up on the Egghead arc".to_string(),
                kind: MangaKind::Manga,
                description: "Luffy sets out to find the One Piece and become King of the Pirates."
                    .to_string(),
                year: 1997,
                ..MangaDraft::new("")
            },
            "2",
            at(2023, 8, 14, 12),
        ),
        MangaEntry::from_draft(
            MangaDraft {
                title: "Tower of God".to_string(),
                author: "SIU".to_string(),
                cover: cover("tower-of-god"),
                status: ReadingStatus::Reading,
                current_chapter: 560,
                total_chapters: 0,
                rating: 8,
                genres: genres(&["Action", "Fantasy", "Mystery"]),
                platform: Platform::Webtoon,
                last_read: at(2024, 3, 1, 22),
                kind: MangaKind::Manhwa,
                description: "Bam enters the Tower to follow the girl who was his whole world."
                    .to_string(),
                year: 2010,
                ..MangaDraft::new("")
            },
            "3",
            at(2023, 9, 20, 8),
        ),
        MangaEntry::from_draft(
            MangaDraft {
                title: "Omniscient Reader's Viewpoint".to_string(),
                author: "Sing-Shong".to_string(),
                cover: cover("omniscient-reader"),
                status: ReadingStatus::Reading,
                current_chapter: 182,
                total_chapters: 0,
                rating: 0,
                genres: genres(&["Action", "Fantasy", "Drama"]),
                platform: Platform::Asura,
                last_read: at(2024, 2, 27, 23),
                kind: MangaKind::Manhwa,
                description: "The only reader of a web novel watches its story become reality."
                    .to_string(),
                year: 2020,
                ..MangaDraft::new("")
            },
            "4",
            at(2024, 1, 5, 19),
        ),
        MangaEntry::from_draft(
            MangaDraft {
                title: "Berserk".to_string(),
                author: "Kentaro Miura".to_string(),
                cover: cover("berserk"),
                status: ReadingStatus::OnHold,
                current_chapter: 312,
                total_chapters: 374,
                rating: 10,
                genres: genres(&["Dark Fantasy", "Action", "Horror"]),
                tags: genres(&["deluxe edition"]),
                platform: Platform::Physical,
                last_read: at(2023, 12, 24, 15),
                kind: MangaKind::Manga,
                description: "Guts, a lone mercenary, is bound to a cursed fate.".to_string(),
                year: 1989,
                ..MangaDraft::new("")
            },
            "5",
            at(2023, 6, 30, 10),
        ),
        MangaEntry::from_draft(
            MangaDraft {
                title: "Tales of Demons and Gods".to_string(),
                author: "Mad Snail".to_string(),
                cover: cover("tales-of-demons-and-gods"),
                status: ReadingStatus::ToRead,
                genres: genres(&["Martial Arts", "Fantasy"]),
                platform: Platform::Other,
                last_read: at(2024, 1, 18, 20),
                kind: MangaKind::Manhua,
                description: "Nie Li is reborn into his younger self to change the past."
                    .to_string(),
                year: 2015,
                ..MangaDraft::new("")
            },
            "6",
            at(2024, 1, 18, 20),
        ),
        MangaEntry::from_draft(
            MangaDraft {
                title: "Chainsaw Man".to_string(),
                author: "Tatsuki Fujimoto".to_string(),
                cover: cover("chainsaw-man"),
                status: ReadingStatus::Dropped,
                current_chapter: 40,
                total_chapters: 0,
                rating: 6,
                genres: genres(&["Action", "Horror", "Comedy"]),
                platform: Platform::Mangadex,
                last_read: at(2023, 10, 31, 23),
                kind: MangaKind::Manga,
                description: "Denji merges with his devil dog and becomes a devil hunter."
                    .to_string(),
                year: 2018,
                ..MangaDraft::new("")
            },
            "7",
            at(2023, 10, 1, 14),
        ),
        MangaEntry::from_draft(
            MangaDraft {
                title: "The Beginning After the End".to_string(),
                author: "TurtleMe".to_string(),
                cover: cover("tbate"),
                status: ReadingStatus::Reading,
                current_chapter: 175,
                total_chapters: 0,
                rating: 8,
                genres: genres(&["Fantasy", "Adventure"]),
                platform: Platform::Reaper,
                last_read: at(2024, 3, 2, 18),
                kind: MangaKind::Manhwa,
                description: "A king is reborn into a world of magic and monsters.".to_string(),
                year: 2018,
                ..MangaDraft::new("")
            },
            "8",
            at(2023, 12, 3, 11),
        ),
    ]
}

fn notifications() -> Vec<Notification> {
    let note = |id: &str, manga_id: &str, title: &str, chapter: u32, platform, url: &str, when, is_read| {
        Notification {
            id: id.to_string(),
            manga_id: manga_id.to_string(),
            title: format!("{title}: chapter {chapter}"),
            message: format!("Chapter {chapter} of {title} is out."),
            chapter,
            timestamp: when,
            is_read,
            platform,
            direct_url: url.to_string(),
        }
    };

    vec![
        note(
            "n1",
            "2",
            "One Piece",
            1096,
            Platform::Mangadex,
            "https://mangadex.org/chapter/one-piece-1096",
            at(2024, 3, 4, 7),
            false,
        ),
        note(
            "n2",
            "3",
            "Tower of God",
            561,
            Platform::Webtoon,
            "https://www.webtoons.com/tower-of-god/561",
            at(2024, 3, 3, 15),
            false,
        ),
        note(
            "n3",
            "8",
            "The Beginning After the End",
            176,
            Platform::Reaper,
            "https://reaperscans.com/tbate/176",
            at(2024, 3, 2, 10),
            false,
        ),
        note(
            "n4",
            "4",
            "Omniscient Reader's Viewpoint",
            182,
            Platform::Asura,
            "https://asuracomic.net/orv/182",
            at(2024, 2, 26, 12),
            true,
        ),
    ]
}

fn recommendations() -> Vec<Recommendation> {
    let candidate = |id: &str, draft: MangaDraft| MangaEntry::from_draft(draft, id, at(2024, 3, 1, 0));

    vec![
        Recommendation {
            manga: candidate(
                "r1",
                MangaDraft {
                    title: "Eleceed".to_string(),
                    author: "Son Jeho".to_string(),
                    cover: cover("eleceed"),
                    total_chapters: 0,
                    genres: genres(&["Action", "Comedy", "Fantasy"]),
                    platform: Platform::Webtoon,
                    kind: MangaKind::Manhwa,
                    description: "A kind boy with lightning reflexes meets an awakened cat."
                        .to_string(),
                    year: 2018,
                    ..MangaDraft::new("")
                },
            ),
            score: 0.92,
            reason: "Fast-paced power progression like your top-rated manhwa".to_string(),
            based_on: genres(&["Solo Leveling", "Tower of God", "Action"]),
        },
        Recommendation {
            manga: candidate(
                "r2",
                MangaDraft {
                    title: "Vinland Saga".to_string(),
                    author: "Makoto Yukimura".to_string(),
                    cover: cover("vinland-saga"),
                    total_chapters: 0,
                    genres: genres(&["Action", "Historical", "Drama"]),
                    platform: Platform::Physical,
                    kind: MangaKind::Manga,
                    description: "A young warrior seeks revenge in a brutal Viking age."
                        .to_string(),
                    year: 2005,
                    ..MangaDraft::new("")
                },
            ),
            score: 0.87,
            reason: "Mature, character-driven epic for readers of Berserk".to_string(),
            based_on: genres(&["Berserk", "Dark Fantasy"]),
        },
        Recommendation {
            manga: candidate(
                "r3",
                MangaDraft {
                    title: "Martial Peak".to_string(),
                    author: "Momo".to_string(),
                    cover: cover("martial-peak"),
                    total_chapters: 3800,
                    genres: genres(&["Martial Arts", "Fantasy", "Action"]),
                    platform: Platform::Other,
                    kind: MangaKind::Manhua,
                    description: "Yang Kai climbs the martial path from a lowly sweeper."
                        .to_string(),
                    year: 2018,
                    is_completed: true,
                    ..MangaDraft::new("")
                },
            ),
            score: 0.74,
            reason: "Cultivation story in the vein of your manhua picks".to_string(),
            based_on: genres(&["Tales of Demons and Gods", "Martial Arts"]),
        },
    ]
}
