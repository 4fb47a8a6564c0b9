use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use mangahub_core::queries::{library_view, read_notifications, unique_genres, unread_notifications};
use mangahub_core::{
    AppConfig, DashboardSummary, ExitCode, JsonSeedFile, LibraryQuery, MangaHubError, MangaStore,
    ReadingStatus, SeedSource, SortKey, source_from_config,
};

mod render;
mod shell;

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "mangahub",
    about = "Track your manga, manhwa and manhua reading",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format. Also enabled by setting MANGAHUB_JSON=1.
    #[arg(long, global = true)]
    json: bool,

    /// Config file to use instead of ~/.config/mangahub/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON seed file to load instead of the configured source.
    #[arg(long, global = true)]
    seed: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the library, filtered and sorted.
    List {
        /// Case-insensitive match on title, author or genre.
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long)]
        status: Option<ReadingStatus>,
        /// Keep entries with any of these genres.
        #[arg(long, action = clap::ArgAction::Append)]
        genre: Vec<String>,
        /// title | dateAdded | lastRead | rating | progress
        #[arg(long)]
        sort: Option<SortKey>,
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one library entry.
    Show { id: String },

    /// Show library statistics.
    Stats,

    /// Show the dashboard summary.
    Dashboard,

    /// List every genre in the library.
    Genres,

    /// List new-chapter notifications.
    Notifications {
        /// Only unread notifications.
        #[arg(long)]
        unread: bool,
    },

    /// List recommendations.
    Recommendations,

    /// Interactive session over an in-memory library.
    Shell,

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

// ─── Config Actions ──────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective config and where it is read from.
    Show,
    /// Write the default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() {
                ExitCode::InvalidArgs
            } else {
                ExitCode::Success
            };
            std::process::exit(code as i32);
        }
    };

    let code = match run(cli) {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            eprintln!("error: {err:#}");
            exit_code_for(&err)
        }
    };
    std::process::exit(code as i32);
}

fn run(cli: Cli) -> Result<()> {
    let start = Instant::now();
    init_tracing()?;

    let json_output = cli.json || std::env::var("MANGAHUB_JSON").as_deref() == Ok("1");

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)?;

    if let Commands::Config { action } = &cli.command {
        return run_config(action, &config, &config_path, json_output, start);
    }
    let source: Box<dyn SeedSource> = match &cli.seed {
        Some(path) => Box::new(JsonSeedFile::new(path)),
        None => source_from_config(&config),
    };
    let mut store = MangaStore::from_source(source.as_ref())?.with_policy(config.library.input_policy);

    match cli.command {
        Commands::List { query, status, genre, sort, limit } => {
            let view_query = list_query(query, status, genre, sort.unwrap_or(config.library.default_sort));

            let mut view = library_view(store.manga(), &view_query);
            let total = view.len();
            if let Some(limit) = limit {
                view.truncate(limit);
            }
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": view, "total": total, "sort": view_query.sort },
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                render::print_entries(&view);
            }
        }

        Commands::Show { id } => {
            let dur = start.elapsed().as_millis();
            match store.get(&id) {
                Some(entry) => {
                    if json_output {
                        print_json(&serde_json::json!({"status":"ok","data":entry,"meta":{"duration_ms":dur}}))?;
                    } else {
                        render::print_entry_detail(entry);
                    }
                }
                None => {
                    let err = MangaHubError::MangaNotFound(id);
                    if json_output {
                        print_json(&serde_json::json!({"status":"error","error":"not_found","message":err.to_string(),"meta":{"duration_ms":dur}}))?;
                    } else {
                        eprintln!("{err}");
                    }
                    std::process::exit(ExitCode::from(&err) as i32);
                }
            }
        }

        Commands::Stats => {
            let stats = store.compute_stats();
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":stats,"meta":{"duration_ms":dur}}))?;
            } else {
                render::print_stats(&stats);
            }
        }

        Commands::Dashboard => {
            let summary =
                DashboardSummary::build(store.manga(), store.notifications(), &config.dashboard);
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":summary,"meta":{"duration_ms":dur}}))?;
            } else {
                render::print_dashboard(&summary);
            }
        }

        Commands::Genres => {
            let genres = unique_genres(store.manga());
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":{"genres":genres},"meta":{"duration_ms":dur}}))?;
            } else {
                render::print_genres(&genres);
            }
        }

        Commands::Notifications { unread } => {
            let mut list = unread_notifications(store.notifications());
            let unread_count = list.len();
            if !unread {
                list.extend(read_notifications(store.notifications()));
            }
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": list, "unread": unread_count },
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                println!("{unread_count} unread");
                render::print_notifications(&list);
            }
        }

        Commands::Recommendations => {
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":{"items":store.recommendations()},"meta":{"duration_ms":dur}}))?;
            } else {
                render::print_recommendations(store.recommendations());
            }
        }

        Commands::Shell => {
            shell::Shell::new(&mut store, &config).run()?;
        }

        Commands::Config { .. } => unreachable!("handled before seed data is loaded"),
    }

    Ok(())
}

fn run_config(
    action: &ConfigAction,
    config: &AppConfig,
    path: &Path,
    json_output: bool,
    start: Instant,
) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "path": path.display().to_string(), "exists": path.exists(), "config": config },
                    "meta": { "duration_ms": dur }
                }))?;
            } else {
                println!("# {}", path.display());
                print!("{}", toml::to_string_pretty(config)?);
            }
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
            }
            AppConfig::default().save_to(path)?;
            tracing::info!(path = %path.display(), "default config written");
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":{"path":path.display().to_string()},"meta":{"duration_ms":dur}}))?;
            } else {
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Logs go to stderr; `MANGAHUB_LOG` wins over `RUST_LOG`.
fn init_tracing() -> Result<()> {
    let filter = match std::env::var("MANGAHUB_LOG") {
        Ok(directives) => EnvFilter::try_new(directives)?,
        Err(_) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("mangahub_core=warn,mangahub=warn")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

/// Repeated `--genre` flags select a genre once.
fn list_query(
    text: Option<String>,
    status: Option<ReadingStatus>,
    genres: Vec<String>,
    sort: SortKey,
) -> LibraryQuery {
    let mut unique: Vec<String> = Vec::with_capacity(genres.len());
    for genre in genres {
        if !unique.contains(&genre) {
            unique.push(genre);
        }
    }
    LibraryQuery::new()
        .with_text(text.unwrap_or_default())
        .with_status(status)
        .with_genres(unique)
        .with_sort(sort)
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.downcast_ref::<MangaHubError>()
        .map(ExitCode::from)
        .unwrap_or(ExitCode::GeneralError)
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mangahub_core::BuiltinSeed;

    #[test]
    fn test_repeated_genre_flag_still_filters() {
        let query = list_query(
            None,
            None,
            vec!["Action".to_string(), "Action".to_string()],
            SortKey::Title,
        );
        assert_eq!(query.genres, vec!["Action".to_string()]);

        let store = MangaStore::from_source(&BuiltinSeed).unwrap();
        let view = library_view(store.manga(), &query);
        assert!(!view.is_empty());
        assert!(view.iter().all(|m| m.has_genre("Action")));
        assert!(view.len() < store.manga().len());
    }

    #[test]
    fn test_list_query_carries_every_filter() {
        let query = list_query(
            Some("solo".to_string()),
            Some(ReadingStatus::Completed),
            Vec::new(),
            SortKey::Rating,
        );
        assert_eq!(query.text, "solo");
        assert_eq!(query.status, Some(ReadingStatus::Completed));
        assert!(query.genres.is_empty());
        assert_eq!(query.sort, SortKey::Rating);
    }

    #[test]
    fn test_exit_codes_follow_core_errors() {
        let not_found = anyhow::Error::new(MangaHubError::MangaNotFound("x".to_string()));
        assert_eq!(exit_code_for(&not_found), ExitCode::NotFound);

        let bad = "paused".parse::<ReadingStatus>().map_err(anyhow::Error::new).unwrap_err();
        assert_eq!(exit_code_for(&bad), ExitCode::InvalidArgs);

        let other = anyhow::anyhow!("disk full");
        assert_eq!(exit_code_for(&other), ExitCode::GeneralError);
    }

    #[test]
    fn test_cli_rejects_unknown_status() {
        let err = Cli::try_parse_from(["mangahub", "list", "--status", "paused"]).err().unwrap();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_cli_parses_config_init() {
        let cli = Cli::try_parse_from(["mangahub", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config { action: ConfigAction::Init { force: true } }
        ));
    }
}
