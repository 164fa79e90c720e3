//! Terminal explorer
//!
//! Draws the table, the tagging panel and the status lines with ratatui and
//! drives them from crossterm key events. Scans run on a [`ScanWorker`];
//! finished scans are drained at the top of every loop iteration.

pub mod error;
pub mod events;
pub mod state;
pub mod theme;
pub mod widgets;
pub mod worker;

pub use error::{Result, UiError};
pub use state::{AppState, Focus, MessageLevel};
pub use worker::ScanWorker;

use crate::explore::{ExploreSession, ScanRequest};
use crate::picker::DirectoryPicker;
use crate::scan::DirectoryScanner;
use crate::tagging::TagAssigner;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use events::{Effect, apply_scan_result, handle_action, map_key};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use theme::Theme;
use tracing::{debug, warn};
use widgets::{FileTable, Header, HelpBar, StatusBar, TaggingPanelView};

type Backend = CrosstermBackend<Stdout>;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Startup options for the explorer
#[derive(Debug, Clone)]
pub struct ExploreOptions {
    /// First directory to show, the working directory when `None`
    pub start: Option<PathBuf>,
    pub depth: usize,
    pub max_path_length: usize,
}

/// The explorer and its collaborators
pub struct Explorer<'a> {
    scanner: Arc<dyn DirectoryScanner>,
    assigner: &'a dyn TagAssigner,
    picker: &'a dyn DirectoryPicker,
    theme: Theme,
}

impl<'a> Explorer<'a> {
    #[must_use]
    pub fn new(
        scanner: Arc<dyn DirectoryScanner>,
        assigner: &'a dyn TagAssigner,
        picker: &'a dyn DirectoryPicker,
    ) -> Self {
        Self {
            scanner,
            assigner,
            picker,
            theme: Theme::default(),
        }
    }

    /// Set custom theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Run until the user quits
    ///
    /// # Errors
    ///
    /// Returns `UiError` if the terminal cannot be driven or the scan worker
    /// dies. The terminal is restored either way.
    pub fn run(&self, options: &ExploreOptions) -> Result<()> {
        let worker = ScanWorker::spawn(Arc::clone(&self.scanner));
        let mut session = ExploreSession::new(options.depth);
        let first = match &options.start {
            Some(path) => session.request_path(path.clone(), Some(options.depth)),
            None => session.request_current(),
        };
        worker.submit(first)?;

        let mut state = AppState::new(session, options.max_path_length);
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal, &mut state, &worker);
        let restored = restore_terminal();

        result.and(restored)
    }

    fn event_loop(
        &self,
        terminal: &mut Terminal<Backend>,
        state: &mut AppState,
        worker: &ScanWorker,
    ) -> Result<()> {
        while !state.should_exit {
            while let Some((id, result)) = worker.try_next()? {
                apply_scan_result(state, id, result);
            }
            state.prune_messages();

            terminal.draw(|frame| self.draw(frame, state))?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(action) = map_key(state.focus, key) else {
                continue;
            };

            match handle_action(state, action, self.assigner) {
                Effect::None | Effect::Quit => {}
                Effect::Scan(request) => submit(worker, request)?,
                Effect::PickDirectory => {
                    if let Some(request) = self.pick(terminal, state)? {
                        submit(worker, request)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Suspend the UI for the directory picker
    fn pick(&self, terminal: &mut Terminal<Backend>, state: &mut AppState) -> Result<Option<ScanRequest>> {
        let start = state
            .session
            .navigator()
            .current_dir()
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();

        restore_terminal()?;
        let picked = self.picker.pick_directory(&start);
        *terminal = setup_terminal()?;

        match picked {
            Ok(Some(path)) => Ok(Some(state.session.request_path(path, None))),
            Ok(None) => Ok(None),
            Err(err) => {
                warn!("directory picker failed: {err}");
                state.push_message(MessageLevel::Error, err.to_string());
                Ok(None)
            }
        }
    }

    fn draw(&self, frame: &mut Frame, state: &mut AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        let label = state.session.header_label(state.max_path_length);
        frame.render_widget(
            Header::new(&label, state.session.navigator().is_loading(), &self.theme),
            chunks[0],
        );

        let panel_visible = state.session.selection().is_panel_visible();
        let body = if panel_visible {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
                .split(chunks[1])
        } else {
            Layout::default()
                .constraints([Constraint::Percentage(100)])
                .split(chunks[1])
        };

        state.adjust_scroll(FileTable::visible_rows(body[0]));
        frame.render_widget(
            FileTable::new(
                &state.session,
                state.cursor,
                state.scroll_offset,
                state.focus == Focus::Table,
                &self.theme,
            ),
            body[0],
        );

        if panel_visible {
            let items = state.session.panel_items();
            let selection = state.session.selection();
            let can_group = selection.is_all_rows_selected() && selection.anchor().is_some();
            frame.render_widget(
                TaggingPanelView::new(&items, state.panel.input(), &self.theme)
                    .with_cursor(state.panel.cursor())
                    .with_state(state.session.panel_state(), can_group)
                    .with_focus(state.focus),
                body[1],
            );
        }

        let sort = state.session.sort();
        let detail = sort
            .column
            .map(|column| format!("{} {}", column.label(), sort.indicator(column)))
            .unwrap_or_default();
        frame.render_widget(
            StatusBar::new(state.latest_message(), &detail, &self.theme),
            chunks[2],
        );

        let hints = HelpBar::hints_for(state.focus);
        frame.render_widget(HelpBar::new(&hints, &self.theme), chunks[3]);
    }
}

fn submit(worker: &ScanWorker, request: ScanRequest) -> Result<()> {
    debug!(id = %request.id, "submitting scan");
    worker.submit(request)
}

/// Setup terminal for TUI
fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Cleanup terminal after TUI
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
