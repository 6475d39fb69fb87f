//! Gametracker terminal UI
//!
//! Renders the game collection as cards next to a summary panel and two
//! charts (entries by genre, hours by game), and drives the collection
//! manager on user input. Every mutation applies locally first and is then
//! persisted through the store client; a persistence failure only surfaces
//! in the status line.

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use gametracker_client::StoreClient;
use gametracker_collection::{Collection, CollectionStats, EntryDraft, GameEntry};
use gametracker_config::TrackerConfig;

/// Shown on cards whose entry has no cover reference
const COVER_PLACEHOLDER: &str = "(no cover art)";

/// Application state
struct App {
    /// The session's entry collection
    collection: Collection,

    /// Store client; `None` in offline sessions
    client: Option<StoreClient>,

    /// Current view
    view: View,

    /// Cards list state
    list_state: ListState,

    /// Add/edit form state
    form: EntryForm,

    /// Status message
    status: String,

    /// Should quit
    should_quit: bool,
}

/// Current view/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Library,
    Form,
}

/// Fields of the add/edit form, in tab order
const FORM_LABELS: [&str; 6] = ["Title", "Platform", "Genre", "Cover URL", "Rating (0-5)", "Hours"];

/// Add/edit form state
///
/// All values are kept as typed text; parsing and clamping happen on
/// submit, where the only hard requirement is a non-empty title.
#[derive(Debug, Clone, Default)]
struct EntryForm {
    /// Id of the entry being edited; `None` when adding
    editing: Option<String>,
    values: [String; 6],
    field: usize,
}

impl EntryForm {
    fn blank() -> Self {
        Self::default()
    }

    fn for_entry(entry: &GameEntry) -> Self {
        Self {
            editing: Some(entry.id.clone()),
            values: [
                entry.title.clone(),
                entry.platform.clone().unwrap_or_default(),
                entry.genre.clone().unwrap_or_default(),
                entry.cover_url.clone().unwrap_or_default(),
                entry.rating.to_string(),
                format_hours(entry.hours_played),
            ],
            field: 0,
        }
    }

    fn next_field(&mut self) {
        self.field = (self.field + 1) % self.values.len();
    }

    fn prev_field(&mut self) {
        self.field = if self.field == 0 {
            self.values.len() - 1
        } else {
            self.field - 1
        };
    }

    fn active_value_mut(&mut self) -> &mut String {
        &mut self.values[self.field]
    }

    /// Turn the form into a draft
    ///
    /// This is the required-field boundary: an empty title is rejected
    /// here and nowhere below. Numeric fields are taken as typed; the
    /// merge layer clamps them into range.
    fn to_draft(&self) -> Result<EntryDraft, String> {
        let [title, platform, genre, cover_url, rating, hours] = &self.values;

        if title.is_empty() {
            return Err("Title is required".to_string());
        }

        Ok(EntryDraft {
            id: self.editing.clone(),
            title: Some(title.clone()),
            platform: Some(platform.clone()),
            genre: Some(genre.clone()),
            cover_url: Some(cover_url.clone()),
            rating: Some(rating.parse().unwrap_or(0)),
            hours_played: Some(hours.parse().unwrap_or(0.0)),
            completed: None,
        })
    }
}

impl App {
    /// Create new application
    fn new(offline: bool) -> Result<Self> {
        let config = TrackerConfig::load_default()?;

        let mut app = Self {
            collection: Collection::new(),
            client: None,
            view: View::Library,
            list_state: ListState::default(),
            form: EntryForm::blank(),
            status: "Ready".to_string(),
            should_quit: false,
        };

        if offline {
            app.collection = demo_collection();
            app.status = "Offline session - changes are not persisted".to_string();
        } else {
            let client = StoreClient::new(&config.client.server_url)?;
            match client.list_entries() {
                Ok(entries) => {
                    app.status = format!("{} games loaded", entries.len());
                    app.collection.reset(entries);
                }
                Err(e) => {
                    warn!("Initial load failed: {e}");
                    app.status = format!("Load failed: {e}");
                }
            }
            app.client = Some(client);
        }

        if !app.collection.is_empty() {
            app.list_state.select(Some(0));
        }

        Ok(app)
    }

    /// Handle input
    fn handle_input(&mut self, key: KeyCode) {
        match self.view {
            View::Library => self.handle_library_input(key),
            View::Form => self.handle_form_input(key),
        }
    }

    /// Handle library view input
    fn handle_library_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('w') => {
                self.select_prev();
            }
            KeyCode::Down | KeyCode::Char('s') => {
                self.select_next();
            }
            KeyCode::Char('a') => {
                self.form = EntryForm::blank();
                self.view = View::Form;
            }
            KeyCode::Char('e') => {
                if let Some(entry) = self.selected_entry() {
                    self.form = EntryForm::for_entry(entry);
                    self.view = View::Form;
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('t') => {
                self.toggle_selected();
            }
            KeyCode::Char('d') => {
                self.delete_selected();
            }
            KeyCode::Char('r') => {
                self.reload();
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Handle form view input
    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.view = View::Library;
                self.status = "Cancelled".to_string();
            }
            KeyCode::Enter => {
                self.submit_form();
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form.next_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.prev_field();
            }
            KeyCode::Backspace => {
                self.form.active_value_mut().pop();
            }
            KeyCode::Char(c) => {
                self.form.active_value_mut().push(c);
            }
            _ => {}
        }
    }

    /// Select previous card
    fn select_prev(&mut self) {
        if self.collection.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.collection.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select next card
    fn select_next(&mut self) {
        if self.collection.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.collection.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Get selected entry
    fn selected_entry(&self) -> Option<&GameEntry> {
        self.list_state
            .selected()
            .and_then(|i| self.collection.entries().get(i))
    }

    /// Submit the add/edit form
    fn submit_form(&mut self) {
        let mut draft = match self.form.to_draft() {
            Ok(draft) => draft,
            Err(msg) => {
                self.status = msg;
                return;
            }
        };

        let editing = draft.id.is_some();
        let id = self.collection.upsert(draft.clone());
        draft.id = Some(id.clone());

        self.status = match &self.client {
            Some(client) if editing => match client.update_entry(&id, &draft) {
                Ok(Some(_)) => "Saved".to_string(),
                Ok(None) => "Saved locally; store has no such entry".to_string(),
                Err(e) => format!("Save failed: {e}"),
            },
            Some(client) => match client.create_entry(&draft) {
                Ok(_) => "Saved".to_string(),
                Err(e) => format!("Save failed: {e}"),
            },
            None => "Saved (offline)".to_string(),
        };

        if !editing {
            self.list_state.select(Some(0));
        }
        self.view = View::Library;
    }

    /// Toggle completed on the selected entry
    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_entry().map(|e| e.id.clone()) else {
            return;
        };
        let Some(completed) = self.collection.toggle_completed(&id) else {
            return;
        };

        self.status = match &self.client {
            Some(client) => {
                let draft = EntryDraft {
                    id: Some(id.clone()),
                    completed: Some(completed),
                    ..Default::default()
                };
                match client.update_entry(&id, &draft) {
                    Ok(_) => {
                        if completed {
                            "Marked completed".to_string()
                        } else {
                            "Back to the backlog".to_string()
                        }
                    }
                    Err(e) => format!("Save failed: {e}"),
                }
            }
            None => "Toggled (offline)".to_string(),
        };
    }

    /// Delete the selected entry
    fn delete_selected(&mut self) {
        let Some(id) = self.selected_entry().map(|e| e.id.clone()) else {
            return;
        };

        self.collection.remove(&id);

        // Keep the selection inside the shrunk list
        if self.collection.is_empty() {
            self.list_state.select(None);
        } else if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.min(self.collection.len() - 1)));
        }

        self.status = match &self.client {
            Some(client) => match client.delete_entry(&id) {
                Ok(()) => "Deleted".to_string(),
                Err(e) => format!("Delete failed: {e}"),
            },
            None => "Deleted (offline)".to_string(),
        };
    }

    /// Reload the collection from the store
    fn reload(&mut self) {
        let Some(client) = &self.client else {
            self.status = "Offline session - nothing to reload".to_string();
            return;
        };

        match client.list_entries() {
            Ok(entries) => {
                self.status = format!("{} games loaded", entries.len());
                self.collection.reset(entries);
                self.list_state
                    .select((!self.collection.is_empty()).then_some(0));
            }
            Err(e) => {
                self.status = format!("Load failed: {e}");
            }
        }
    }
}

/// The original demo collection, used for offline sessions
fn demo_collection() -> Collection {
    Collection::from_entries(vec![
        GameEntry {
            id: "1".to_string(),
            title: "Hollow Knight".to_string(),
            platform: Some("PC".to_string()),
            genre: Some("Metroidvania".to_string()),
            cover_url: None,
            rating: 5,
            hours_played: 120.0,
            completed: false,
        },
        GameEntry {
            id: "2".to_string(),
            title: "Celeste".to_string(),
            platform: Some("Switch".to_string()),
            genre: Some("Platformer".to_string()),
            cover_url: None,
            rating: 4,
            hours_played: 80.0,
            completed: true,
        },
        GameEntry {
            id: "3".to_string(),
            title: "Stardew Valley".to_string(),
            platform: Some("PC".to_string()),
            genre: Some("Simulation".to_string()),
            cover_url: None,
            rating: 5,
            hours_played: 200.0,
            completed: false,
        },
    ])
}

/// Star row for a 0..=5 rating
fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Hours without a trailing ".0" for whole values
fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        format!("{hours:.1}")
    }
}

/// Draw the UI
fn draw_ui(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    match app.view {
        View::Library => draw_cards(frame, columns[0], app),
        View::Form => draw_form(frame, columns[0], app),
    }

    // Stats are recomputed from the full sequence on every draw
    let stats = app.collection.stats();
    draw_stats_column(frame, columns[1], &stats);

    draw_footer(frame, chunks[2], app);
}

/// Draw header
fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new("Gametracker - your games, organized")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Draw the cards list
fn draw_cards(frame: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .collection
        .entries()
        .iter()
        .map(|entry| {
            let badge = if entry.completed {
                Span::styled(" [completed]", Style::default().fg(Color::Green))
            } else {
                Span::styled(" [backlog]", Style::default().fg(Color::DarkGray))
            };

            let labels = [entry.platform.as_deref(), entry.genre.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" · ");

            let cover = entry.cover_url.as_deref().unwrap_or(COVER_PLACEHOLDER);

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        entry.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    badge,
                ]),
                Line::from(Span::styled(labels, Style::default().fg(Color::DarkGray))),
                Line::from(format!(
                    "{}  {} hrs",
                    stars(entry.rating),
                    format_hours(entry.hours_played)
                )),
                Line::from(Span::styled(
                    cover.to_string(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Collection"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Draw the add/edit form
fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let title = if app.form.editing.is_some() {
        "Edit game"
    } else {
        "Add game"
    };

    let mut lines = Vec::new();
    for (i, (label, value)) in FORM_LABELS.iter().zip(&app.form.values).enumerate() {
        let marker = if i == app.form.field { "> " } else { "  " };
        let label_style = if i == app.form.field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{label:<14}"), label_style),
            Span::raw(value.clone()),
        ]));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Draw summary panel and the two charts
fn draw_stats_column(frame: &mut Frame, area: Rect, stats: &CollectionStats) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(area);

    let summary = Paragraph::new(vec![
        Line::from(format!("Total games: {}", stats.total_count)),
        Line::from(format!("Total hours: {}", format_hours(stats.total_hours))),
        Line::from(format!("Completed:   {}", stats.completed_count)),
    ])
    .block(Block::default().borders(Borders::ALL).title("Summary"));
    frame.render_widget(summary, rows[0]);

    let genre_data: Vec<(&str, u64)> = stats
        .genre_histogram
        .iter()
        .map(|(genre, count)| (genre.as_str(), *count as u64))
        .collect();
    let genre_chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("By genre"))
        .data(&genre_data)
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Magenta));
    frame.render_widget(genre_chart, rows[1]);

    let hours_data: Vec<(&str, u64)> = stats
        .hours_series
        .iter()
        .map(|(title, hours)| (title.as_str(), hours.round() as u64))
        .collect();
    let hours_chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Hours played"))
        .data(&hours_data)
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::LightBlue));
    frame.render_widget(hours_chart, rows[2]);
}

/// Draw footer
fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.view {
        View::Library => "[↑↓] Navigate  [A] Add  [E] Edit  [Space] Toggle  [D] Delete  [R] Reload  [Q] Quit",
        View::Form => "[Tab] Next field  [Enter] Save  [Esc] Cancel",
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    let status = Paragraph::new(app.status.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, chunks[0]);
    frame.render_widget(status, chunks[1]);
}

fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .init();

    let offline = std::env::args().any(|arg| arg == "--offline");

    info!("Gametracker starting...");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(offline)?;

    // Main loop
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| draw_ui(f, &mut app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_input(key.code);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Gametracker exiting");
    Ok(())
}
