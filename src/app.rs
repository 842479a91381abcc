use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::dataset::{DataSource, Dataset, Quarter};
use crate::features::dashboard::{Bucket, DashboardSnapshot, DashboardState, Selection, ViewState};
use crate::shared::{Config, I18n, Language, ModernTheme};
use crate::ui;

/// Rows moved by PgUp/PgDn in the table view
pub const TABLE_PAGE: usize = 10;

/// Outcome of the most recent load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Terminal until the user reloads; holds the error text
    Failed(String),
}

/// Status message for user feedback
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub timestamp: Instant,
    pub message_type: StatusType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusType {
    Info,
    Success,
    Error,
}

/// Main application state
pub struct App {
    /// Flag to indicate if the app should quit
    pub should_quit: bool,
    /// Application configuration
    pub config: Config,
    /// Where `config` is written back, `None` to keep it in memory
    config_path: Option<PathBuf>,
    /// Application theme
    pub theme: ModernTheme,
    /// Internationalization
    pub i18n: I18n,
    /// Dataset location
    pub source: DataSource,
    /// Records, selection and the current aggregate
    pub dashboard: DashboardState,
    pub load_state: LoadState,
    /// Timestamp of the last successful load
    pub loaded_at: Option<DateTime<Local>>,
    /// First visible row of the table view
    pub table_offset: usize,
    /// Current status message
    pub status_message: Option<StatusMessage>,
    /// Set by the reload key, served by the event loop
    reload_requested: bool,
    /// Flag to indicate if UI needs redraw
    needs_redraw: bool,
}

impl App {
    /// Create the application. No data is loaded until `run` (or `load_data`).
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        source: DataSource,
        view: ViewState,
        language: Language,
    ) -> Self {
        let theme = ModernTheme::from_mode(config.theme_mode);

        Self {
            should_quit: false,
            config,
            config_path,
            theme,
            i18n: I18n::new(language),
            source,
            dashboard: DashboardState::empty(view),
            load_state: LoadState::Loading,
            loaded_at: None,
            table_offset: 0,
            status_message: None,
            reload_requested: false,
            needs_redraw: true,
        }
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        self.dashboard.snapshot()
    }

    /// Fetch the dataset once and rebuild the dashboard. A failure leaves an
    /// empty record set and the error state; nothing is retried.
    pub async fn load_data(&mut self) {
        self.load_state = LoadState::Loading;

        match Dataset::load(&self.source).await {
            Ok(dataset) => {
                self.loaded_at = Some(dataset.loaded_at);
                self.dashboard.replace_records(dataset.records);
                self.load_state = LoadState::Ready;
            }
            Err(err) => {
                tracing::error!(source = %self.source, error = %err, "failed to load dataset");
                self.loaded_at = None;
                self.dashboard.replace_records(Vec::new());
                self.load_state = LoadState::Failed(err.to_string());
            }
        }

        self.clamp_table_offset();
        self.needs_redraw = true;
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        if !IsTty::is_tty(&io::stdout()) {
            eprintln!("tablero needs an interactive terminal. Use --json for headless output.");
            return Ok(());
        }

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        tracing::info!(source = %self.source, "starting dashboard");
        terminal.draw(|f| ui::draw(f, self))?;
        self.load_data().await;

        while !self.should_quit {
            if self.reload_requested {
                self.reload_requested = false;
                self.load_state = LoadState::Loading;
                terminal.draw(|f| ui::draw(f, self))?;
                self.reload().await;
            }

            // Update status message (auto-clear after 3 seconds)
            self.update_status_message(Duration::from_secs(3));

            if self.needs_redraw {
                terminal.draw(|f| ui::draw(f, self))?;
                self.needs_redraw = false;
            }

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key.code);
                        self.needs_redraw = true;
                    }
                    Event::Resize(_, _) => self.needs_redraw = true,
                    _ => {}
                }
            }
        }

        self.cleanup()?;

        // Cleanup terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        tracing::info!("dashboard closed");
        Ok(())
    }

    async fn reload(&mut self) {
        tracing::info!(source = %self.source, "reloading dataset");
        self.load_data().await;

        match self.load_state {
            LoadState::Ready => {
                let text = self.i18n.t("status.reloaded").to_string();
                self.show_status(&text, StatusType::Success);
            }
            _ => {
                let text = self.i18n.t("status.reload_failed").to_string();
                self.show_status(&text, StatusType::Error);
            }
        }
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyCode) {
        // Help overlay swallows everything but its own close keys
        if self.config.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.toggle_help();
            }
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') => self.select_category(Selection::Overview),
            KeyCode::Char('d') => self.select_category(Selection::Database),
            KeyCode::Char('a') | KeyCode::Char('0') => self.select_bucket(Bucket::All),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.select_bucket(Bucket::Quarter(Quarter::ALL[index]));
            }
            KeyCode::Tab => self.select_bucket(self.dashboard.view().bucket.next()),
            KeyCode::BackTab => self.select_bucket(self.dashboard.view().bucket.prev()),
            KeyCode::PageDown => self.scroll_table(TABLE_PAGE as isize),
            KeyCode::PageUp => self.scroll_table(-(TABLE_PAGE as isize)),
            KeyCode::Char('b') => self.toggle_sidebar(),
            KeyCode::Char('r') => self.reload_requested = true,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('l') => self.toggle_language(),
            KeyCode::Char('?') => self.toggle_help(),
            _ => {}
        }
    }

    /// Step through the navigation list, wrapping at both ends
    fn move_selection(&mut self, step: isize) {
        let items = Selection::nav_items();
        let len = items.len() as isize;
        let current = self.dashboard.view().selection.nav_index() as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.select_category(items[next]);
    }

    fn select_category(&mut self, selection: Selection) {
        self.dashboard.select_category(selection);
        self.table_offset = 0;
    }

    fn select_bucket(&mut self, bucket: Bucket) {
        self.dashboard.select_bucket(bucket);
        self.table_offset = 0;
    }

    fn scroll_table(&mut self, delta: isize) {
        if !self.dashboard.view().selection.is_database() {
            return;
        }
        self.table_offset = self.table_offset.saturating_add_signed(delta);
        self.clamp_table_offset();
    }

    fn clamp_table_offset(&mut self) {
        let last = self.snapshot().filtered.len().saturating_sub(1);
        self.table_offset = self.table_offset.min(last);
    }

    /// Cycle theme mode
    fn toggle_theme(&mut self) {
        let mode = self.config.theme_mode.next();
        self.config.set_theme_mode(mode);
        self.theme = ModernTheme::from_mode(mode);
        self.persist_config();

        let text = format!(
            "{}: {}",
            self.i18n.t("status.theme"),
            self.config.theme_display()
        );
        self.show_status(&text, StatusType::Info);
    }

    fn toggle_language(&mut self) {
        let language = self.i18n.language().toggle();
        self.i18n.set_language(language);
        self.config.language = language;
        self.persist_config();

        let text = self.i18n.t("status.language").to_string();
        self.show_status(&text, StatusType::Info);
    }

    fn toggle_sidebar(&mut self) {
        self.config.toggle_sidebar();
        self.persist_config();
    }

    /// Toggle help overlay
    fn toggle_help(&mut self) {
        self.config.toggle_help();
        self.persist_config();
    }

    fn persist_config(&self) {
        if let Some(path) = &self.config_path {
            if let Err(err) = self.config.save_to(path) {
                tracing::warn!(path = %path.display(), %err, "failed to save config");
            }
        }
    }

    /// Show a status message to the user
    pub fn show_status(&mut self, text: &str, status_type: StatusType) {
        self.status_message = Some(StatusMessage {
            text: text.to_string(),
            timestamp: Instant::now(),
            message_type: status_type,
        });
        self.needs_redraw = true;
    }

    /// Clear status message if it's older than the specified duration
    pub fn update_status_message(&mut self, max_age: Duration) {
        if let Some(ref msg) = self.status_message {
            if msg.timestamp.elapsed() > max_age {
                self.status_message = None;
                self.needs_redraw = true;
            }
        }
    }

    /// Clean up resources before exiting
    fn cleanup(&mut self) -> Result<()> {
        // The help overlay is never restored on the next start
        self.config.show_help = false;
        if let Some(path) = &self.config_path {
            self.config.save_to(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::ThemeMode;
    use std::io::Write;

    const CSV: &str = "\
NAME,TEAM,STATUS,TYPE,DURATION,DATE
Checkout,Payments,Done,Nuevo,1 week,10/feb/2024
Wallet,Payments,WIP,Mejora,3 days,05/may/2024
Menu,Food,Todo,Nuevo,,
Rider,Fulfillment,Done,Mejora,2 hours,12/jul/2024
";

    fn app() -> App {
        let mut app = App::new(
            Config::default(),
            None,
            DataSource::default(),
            ViewState::default(),
            Language::Spanish,
        );
        app.dashboard.replace_records(Dataset::from_text(CSV).records);
        app.load_state = LoadState::Ready;
        app
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();

        app.handle_key_event(KeyCode::Char('k'));
        assert_eq!(app.dashboard.view().selection, Selection::Database);

        app.handle_key_event(KeyCode::Down);
        assert_eq!(app.dashboard.view().selection, Selection::Overview);

        app.handle_key_event(KeyCode::Char('j'));
        assert_eq!(app.dashboard.view().selection, Selection::Team("Martechs & Ads"));
    }

    #[test]
    fn test_quarter_keys() {
        let mut app = app();

        app.handle_key_event(KeyCode::Char('1'));
        assert_eq!(app.snapshot().view.bucket, Bucket::Quarter(Quarter::Q1));
        assert_eq!(app.snapshot().kpis.total, 1);

        app.handle_key_event(KeyCode::Tab);
        assert_eq!(app.snapshot().view.bucket, Bucket::Quarter(Quarter::Q2));

        app.handle_key_event(KeyCode::Char('0'));
        assert_eq!(app.snapshot().view.bucket, Bucket::All);

        app.handle_key_event(KeyCode::BackTab);
        assert_eq!(app.snapshot().view.bucket, Bucket::Quarter(Quarter::Q4));
    }

    #[test]
    fn test_page_shortcuts() {
        let mut app = app();

        app.handle_key_event(KeyCode::Char('d'));
        assert!(app.dashboard.view().selection.is_database());

        app.handle_key_event(KeyCode::Char('g'));
        assert!(app.dashboard.view().selection.is_overview());
    }

    #[test]
    fn test_table_scroll_is_clamped() {
        let mut app = app();

        // Scrolling is ignored outside the table view
        app.handle_key_event(KeyCode::PageDown);
        assert_eq!(app.table_offset, 0);

        app.handle_key_event(KeyCode::Char('d'));
        app.handle_key_event(KeyCode::PageDown);
        assert_eq!(app.table_offset, 3);

        app.handle_key_event(KeyCode::PageUp);
        assert_eq!(app.table_offset, 0);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut app = app();

        app.handle_key_event(KeyCode::Char('?'));
        assert!(app.config.show_help);

        app.handle_key_event(KeyCode::Char('d'));
        assert!(app.dashboard.view().selection.is_overview());
        assert!(!app.should_quit);

        app.handle_key_event(KeyCode::Esc);
        assert!(!app.config.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_theme_and_language_toggles() {
        let mut app = app();

        app.handle_key_event(KeyCode::Char('t'));
        assert_eq!(app.config.theme_mode, ThemeMode::Light);
        assert!(app.status_message.is_some());

        app.handle_key_event(KeyCode::Char('l'));
        assert_eq!(app.i18n.language(), Language::English);
        assert_eq!(app.config.language, Language::English);
    }

    #[test]
    fn test_toggles_are_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut app = App::new(
            Config::default(),
            Some(path.clone()),
            DataSource::default(),
            ViewState::default(),
            Language::Spanish,
        );

        app.handle_key_event(KeyCode::Char('b'));
        assert!(Config::load_from(&path).sidebar_collapsed);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.handle_key_event(KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_load_data_success_and_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{CSV}").unwrap();

        let mut app = App::new(
            Config::default(),
            None,
            DataSource::Path(file.path().to_path_buf()),
            ViewState::default(),
            Language::Spanish,
        );
        app.load_data().await;
        assert_eq!(app.load_state, LoadState::Ready);
        assert_eq!(app.snapshot().kpis.total, 4);
        assert!(app.loaded_at.is_some());

        app.source = DataSource::Path(file.path().with_extension("missing"));
        app.load_data().await;
        assert!(matches!(app.load_state, LoadState::Failed(_)));
        assert_eq!(app.snapshot().kpis.total, 0);
        assert_eq!(app.snapshot().kpis.avg_hours, None);
        // A failed reload must not keep showing the previous load time
        assert!(app.loaded_at.is_none());
    }
}
