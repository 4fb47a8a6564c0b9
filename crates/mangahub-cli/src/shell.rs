use std::io::{self, BufRead, Write};

use anyhow::Result;

use mangahub_core::queries::{library_view, read_notifications, unique_genres, unread_notifications};
use mangahub_core::{
    AppConfig, AppState, DashboardSummary, MangaDraft, MangaStore, ReadingStatus, SortKey, Tab,
};

use crate::render;

const BANNER: &str = "mangahub shell: type `help` for commands, `quit` to leave.";

const HELP: &str = "\
Library
  list                      show the library with the current filters
  show <id>                 details of one entry
  status <id> <status>      to-read | reading | completed | dropped | on-hold
  progress <id> <chapter>   set the current chapter
  next <id>                 read the next chapter
  rate <id> <0-10>          set the rating
  add <title>               add a new entry
  remove <id>               delete an entry
View
  search [text]             filter by title, author or genre (empty clears)
  tab <tab>                 dashboard | library | notifications | recommendations | status-<status>
  genre [name]              toggle a genre filter (no name clears)
  genres                    list available genres
  sort <key>                title | dateAdded | lastRead | rating | progress
  state                     show the current view state
Feed
  dashboard | stats
  notifications             unread first, then read
  read <notification-id>    mark one notification read
  read-all                  mark every notification read
  recommendations
  adopt <n>                 add recommendation n to the library
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Show(String),
    Status(String, ReadingStatus),
    Progress(String, u32),
    Next(String),
    Rate(String, u8),
    Add(String),
    Remove(String),
    Search(String),
    Tab(Tab),
    ToggleGenre(String),
    ClearGenres,
    Genres,
    Sort(SortKey),
    State,
    Dashboard,
    Stats,
    Notifications,
    Read(String),
    ReadAll,
    Recommendations,
    /// 1-based, as listed by `recommendations`.
    Adopt(usize),
    Help,
    Quit,
    Empty,
    Invalid(String),
    Unknown(String),
}

/// Parse one input line into a shell command.
pub fn parse_command(line: &str) -> ShellCommand {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        [] => ShellCommand::Empty,
        ["q" | "quit" | "exit"] => ShellCommand::Quit,
        ["help" | "?"] => ShellCommand::Help,
        ["list" | "ls"] => ShellCommand::List,
        ["show", id] => ShellCommand::Show(id.to_string()),
        ["status", id, status] => match status.parse() {
            Ok(status) => ShellCommand::Status(id.to_string(), status),
            Err(e) => ShellCommand::Invalid(e.to_string()),
        },
        ["progress", id, chapter] => match chapter.parse() {
            Ok(chapter) => ShellCommand::Progress(id.to_string(), chapter),
            Err(_) => ShellCommand::Invalid(format!("not a chapter number: {chapter}")),
        },
        ["next", id] => ShellCommand::Next(id.to_string()),
        ["rate", id, rating] => match rating.parse() {
            Ok(rating) => ShellCommand::Rate(id.to_string(), rating),
            Err(_) => ShellCommand::Invalid(format!("not a rating: {rating}")),
        },
        ["add", title @ ..] if !title.is_empty() => ShellCommand::Add(title.join(" ")),
        ["remove" | "rm", id] => ShellCommand::Remove(id.to_string()),
        ["search" | "find", rest @ ..] => ShellCommand::Search(rest.join(" ")),
        ["tab", tab] => match tab.parse() {
            Ok(tab) => ShellCommand::Tab(tab),
            Err(e) => ShellCommand::Invalid(e.to_string()),
        },
        ["genre"] => ShellCommand::ClearGenres,
        ["genre", name @ ..] => ShellCommand::ToggleGenre(name.join(" ")),
        ["genres"] => ShellCommand::Genres,
        ["sort", key] => match key.parse() {
            Ok(key) => ShellCommand::Sort(key),
            Err(e) => ShellCommand::Invalid(e.to_string()),
        },
        ["state"] => ShellCommand::State,
        ["dashboard" | "home"] => ShellCommand::Dashboard,
        ["stats"] => ShellCommand::Stats,
        ["notifications" | "notifs"] => ShellCommand::Notifications,
        ["read", id] => ShellCommand::Read(id.to_string()),
        ["read-all"] => ShellCommand::ReadAll,
        ["recommendations" | "recs"] => ShellCommand::Recommendations,
        ["adopt", n] => match n.parse::<usize>() {
            Ok(n) if n >= 1 => ShellCommand::Adopt(n),
            _ => ShellCommand::Invalid(format!("not a recommendation number: {n}")),
        },
        _ => ShellCommand::Unknown(line.trim().to_string()),
    }
}

/// Interactive session: one line is one intent, fully applied before the
/// next line is read.
pub struct Shell<'a> {
    store: &'a mut MangaStore,
    state: AppState,
    config: &'a AppConfig,
}

impl<'a> Shell<'a> {
    pub fn new(store: &'a mut MangaStore, config: &'a AppConfig) -> Self {
        Self {
            store,
            state: AppState::new(config.library.default_sort),
            config,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{BANNER}");
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("{}> ", self.state.active_tab);
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                println!();
                break;
            };
            let command = parse_command(&line?);
            if command == ShellCommand::Quit {
                break;
            }
            self.execute(command);
        }
        Ok(())
    }

    pub fn execute(&mut self, command: ShellCommand) {
        tracing::trace!(?command, "shell command");
        match command {
            ShellCommand::Empty | ShellCommand::Quit => {}
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Invalid(msg) => eprintln!("{msg}"),
            ShellCommand::Unknown(cmd) => eprintln!("Unknown command: {cmd} (try `help`)"),

            ShellCommand::List => self.print_library(),
            ShellCommand::Show(id) => {
                if let Some(id) = self.resolve_id(&id) {
                    if let Some(entry) = self.store.get(&id) {
                        render::print_entry_detail(entry);
                    }
                }
            }
            ShellCommand::Status(id, status) => {
                if let Some(id) = self.resolve_id(&id) {
                    self.store.set_status(&id, status);
                    self.print_entry(&id);
                }
            }
            ShellCommand::Progress(id, chapter) => {
                if let Some(id) = self.resolve_id(&id) {
                    self.store.set_progress(&id, chapter);
                    self.print_entry(&id);
                }
            }
            ShellCommand::Next(id) => {
                if let Some(id) = self.resolve_id(&id) {
                    self.store.read_next_chapter(&id);
                    self.print_entry(&id);
                }
            }
            ShellCommand::Rate(id, rating) => {
                if let Some(id) = self.resolve_id(&id) {
                    self.store.set_rating(&id, rating);
                    self.print_entry(&id);
                }
            }
            ShellCommand::Add(title) => {
                let id = self.store.add(MangaDraft::new(title));
                self.print_entry(&id);
            }
            ShellCommand::Remove(id) => {
                if let Some(id) = self.resolve_id(&id) {
                    self.store.remove(&id);
                    println!("Removed {id}");
                }
            }

            ShellCommand::Search(text) => {
                self.state.set_search(text);
                self.show_library_after_view_change();
            }
            ShellCommand::Tab(tab) => {
                self.state.set_tab(tab);
                self.render_tab();
            }
            ShellCommand::ToggleGenre(genre) => {
                self.state.toggle_genre(&genre);
                self.show_library_after_view_change();
            }
            ShellCommand::ClearGenres => {
                self.state.clear_genres();
                self.show_library_after_view_change();
            }
            ShellCommand::Genres => render::print_genres(&unique_genres(self.store.manga())),
            ShellCommand::Sort(key) => {
                self.state.set_sort(key);
                self.show_library_after_view_change();
            }
            ShellCommand::State => {
                let genres = if self.state.selected_genres.is_empty() {
                    "-".to_string()
                } else {
                    self.state.selected_genres.join(", ")
                };
                println!("tab:    {}", self.state.active_tab);
                println!("search: {:?}", self.state.search_query);
                println!("genres: {genres}");
                println!("sort:   {}", self.state.sort);
            }

            ShellCommand::Dashboard => self.print_dashboard(),
            ShellCommand::Stats => render::print_stats(&self.store.compute_stats()),
            ShellCommand::Notifications => self.print_notifications(),
            ShellCommand::Read(id) => {
                if self.store.notifications().iter().any(|n| n.id == id) {
                    self.store.mark_notification_read(&id);
                    println!("{} unread", self.store.unread_count());
                } else {
                    eprintln!("No notification with id {id}");
                }
            }
            ShellCommand::ReadAll => {
                self.store.mark_all_notifications_read();
                println!("All notifications marked read.");
            }
            ShellCommand::Recommendations => {
                render::print_recommendations(self.store.recommendations());
            }
            ShellCommand::Adopt(n) => match self.store.add_recommendation(n - 1) {
                Some(id) => self.print_entry(&id),
                None => eprintln!("No recommendation number {n}"),
            },
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Exact id, or a unique id prefix as shown by `list`.
    fn resolve_id(&self, token: &str) -> Option<String> {
        if self.store.get(token).is_some() {
            return Some(token.to_string());
        }
        let matches: Vec<&str> = self
            .store
            .manga()
            .iter()
            .map(|m| m.id.as_str())
            .filter(|id| id.starts_with(token))
            .collect();
        match matches.as_slice() {
            [id] => Some(id.to_string()),
            [] => {
                eprintln!("No manga with id {token}");
                None
            }
            _ => {
                eprintln!("Ambiguous id {token} ({} matches)", matches.len());
                None
            }
        }
    }

    fn print_entry(&self, id: &str) {
        if let Some(entry) = self.store.get(id) {
            println!("{}", render::entry_line(entry));
        }
    }

    fn print_library(&self) {
        let view = library_view(self.store.manga(), &self.state.library_query());
        render::print_entries(&view);
    }

    fn print_dashboard(&self) {
        let summary = DashboardSummary::build(
            self.store.manga(),
            self.store.notifications(),
            &self.config.dashboard,
        );
        render::print_dashboard(&summary);
    }

    fn print_notifications(&self) {
        let notifications = self.store.notifications();
        let unread = unread_notifications(notifications);
        println!("{} unread", unread.len());
        render::print_notifications(&unread);
        let read = read_notifications(notifications);
        if !read.is_empty() {
            println!();
            println!("Earlier:");
            render::print_notifications(&read);
        }
    }

    fn render_tab(&self) {
        match self.state.active_tab {
            Tab::Dashboard => self.print_dashboard(),
            Tab::Library | Tab::Status(_) => self.print_library(),
            Tab::Notifications => self.print_notifications(),
            Tab::Recommendations => render::print_recommendations(self.store.recommendations()),
            Tab::Stats => render::print_stats(&self.store.compute_stats()),
            Tab::Settings => println!("{}", AppConfig::config_path().display()),
        }
    }

    fn show_library_after_view_change(&self) {
        if self.state.active_tab.shows_library() {
            self.print_library();
        }
    }
}
