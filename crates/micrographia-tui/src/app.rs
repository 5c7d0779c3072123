//! Top-level application state and the main event loop.
//!
//! [`AppState`] turns key events into controller actions and is the only
//! place the controller is touched. [`App::run`] sets up the terminal, runs
//! the gateway requests the controller asks for on a tokio runtime, feeds
//! their outcomes back through a channel, and tears everything down cleanly
//! on exit or panic.

use crate::{
    commands::Command,
    event::{self, AppEvent, Keymap},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        help::HelpPopup,
        results_list::{ResultsList, ResultsListState},
        search_bar::{SearchBar, SearchBarState},
        title_bar::TitleBar,
        tray_bar::TrayBar,
        view_pane::{paint, ViewPane, ViewPaneState},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use micrographia_core::{
    config::Config, execute as execute_request, Action, Candidate, Controller, Outcome, Request,
    TaxonomyApi,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc;

/// Panels the main pane leaves to their own widgets.
const SIDE_PANELS: [&str; 3] = ["searchResultsContainer", "comparisonTrayArea", "filterStatus"];

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Results,
    Main,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub controller: Controller,
    pub search: SearchBarState,
    pub results: ResultsListState,
    pub view: ViewPaneState,
    pub focus: Focus,
    /// Focus before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub keymap: Keymap,
    /// API host shown in the title bar.
    pub host: String,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// Requests handed out by [`AppState::handle`] and not yet completed.
    pub in_flight: usize,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme, host: String) -> Self {
        let keymap = Keymap::from_config(&config.keybindings);
        Self {
            controller: Controller::new(),
            search: SearchBarState::default(),
            results: ResultsListState::default(),
            view: ViewPaneState::default(),
            focus: Focus::Search,
            prev_focus: Focus::Search,
            theme,
            config,
            keymap,
            host,
            show_help: false,
            command_bar: CommandBarState::default(),
            in_flight: 0,
            quit: false,
        }
    }

    /// Apply one event. Returns the gateway request the caller must run, if
    /// the event started one.
    pub fn handle(&mut self, event: AppEvent) -> Option<Request> {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                self.show_help = false;
            }
            return None;
        }

        if self.focus == Focus::Command {
            return self.handle_command_bar(event);
        }

        match event {
            AppEvent::Char('?') if self.focus != Focus::Search => {
                tracing::debug!("help popup opened");
                self.show_help = true;
                None
            }
            AppEvent::Char(':') if self.focus != Focus::Search => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
                None
            }
            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
                None
            }
            AppEvent::Escape => {
                if self.focus == Focus::Search {
                    self.focus = Focus::Results;
                }
                None
            }
            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Search => Focus::Results,
                    Focus::Results => Focus::Main,
                    Focus::Main | Focus::Command => Focus::Search,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
                None
            }
            AppEvent::SearchFocus => {
                self.focus = Focus::Search;
                None
            }
            AppEvent::Enter => match self.focus {
                Focus::Search => {
                    let request = self.start_search();
                    if request.is_some() {
                        self.focus = Focus::Results;
                    }
                    request
                }
                Focus::Results => {
                    let tax_id = self.highlighted()?.tax_id;
                    self.act(Action::ShowDetail { tax_id })
                }
                _ => None,
            },
            AppEvent::ToggleCompare => {
                let candidate = self.highlighted()?;
                let checked = !self.controller.selection().contains(&candidate.tax_id);
                self.act(Action::ToggleCompare { candidate, checked })
            }
            AppEvent::Compare => self.act(Action::Compare),
            AppEvent::ClearComparison => self.act(Action::ClearComparison),
            AppEvent::CycleFilter => {
                self.search.handle(&AppEvent::CycleFilter);
                None
            }
            AppEvent::Resize(_, _) => None,
            other => {
                self.dispatch_to_focused(&other);
                None
            }
        }
    }

    /// Apply a settled request.
    pub fn complete(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match &outcome {
            Outcome::Search { .. } => self.results.cursor = 0,
            Outcome::Detail { .. } | Outcome::Batch { .. } => self.view.reset(),
        }
        self.controller.complete(outcome);
    }

    fn act(&mut self, action: Action) -> Option<Request> {
        let request = self.controller.dispatch(action);
        if request.is_some() {
            self.in_flight += 1;
        }
        request
    }

    fn start_search(&mut self) -> Option<Request> {
        self.act(Action::Search {
            term: self.search.query().to_string(),
            filter: self.search.filter,
        })
    }

    /// The result row under the cursor, as a comparison candidate.
    fn highlighted(&self) -> Option<Candidate> {
        self.controller
            .page()
            .results
            .rows()
            .get(self.results.cursor)
            .map(Candidate::from)
    }

    fn handle_command_bar(&mut self, event: AppEvent) -> Option<Request> {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
                None
            }
            AppEvent::Enter => match Command::parse(self.command_bar.input.text()) {
                Ok(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                    self.execute_command(cmd)
                }
                Err(msg) if msg.is_empty() => {
                    self.command_bar.clear();
                    self.focus = self.prev_focus;
                    None
                }
                Err(msg) => {
                    self.command_bar.error = Some(msg);
                    None
                }
            },
            AppEvent::Quit => {
                self.quit = true;
                None
            }
            other => {
                self.command_bar.handle(&other);
                None
            }
        }
    }

    fn execute_command(&mut self, cmd: Command) -> Option<Request> {
        match cmd {
            Command::Quit => {
                self.quit = true;
                None
            }
            Command::Help => {
                self.show_help = !self.show_help;
                None
            }
            Command::Search(term) => {
                self.search.set_query(&term);
                self.start_search()
            }
            Command::Filter(filter) => {
                self.search.filter = filter;
                None
            }
            Command::Detail(tax_id) => self.act(Action::ShowDetail { tax_id }),
            Command::Compare => self.act(Action::Compare),
            Command::Clear => self.act(Action::ClearComparison),
            Command::Theme(name) => {
                self.theme = Theme::by_name(&name);
                None
            }
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: &AppEvent) {
        match self.focus {
            Focus::Search => self.search.handle(event),
            Focus::Results => {
                let len = self.controller.page().results.rows().len();
                self.results.handle(event, len);
            }
            Focus::Main => self.view.handle(event),
            Focus::Command => {}
        }
    }
}

/// Returns true when the current focus is on a text-input widget.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Search | Focus::Command)
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App<A> {
    state: AppState,
    api: Arc<A>,
    runtime: tokio::runtime::Runtime,
    outcomes_tx: mpsc::UnboundedSender<Outcome>,
    outcomes_rx: mpsc::UnboundedReceiver<Outcome>,
}

impl<A: TaxonomyApi + 'static> App<A> {
    pub fn new(api: A, config: Config, theme: Theme, host: String) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Ok(App {
            state: AppState::new(config, theme, host),
            api: Arc::new(api),
            runtime,
            outcomes_tx,
            outcomes_rx,
        })
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            // Outcomes apply in arrival order; the UI thread is the only mutator.
            while let Ok(outcome) = self.outcomes_rx.try_recv() {
                self.state.complete(outcome);
            }

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                let raw = ct_event::read()?;
                if let Event::Key(key) = &raw {
                    if key.kind != crossterm::event::KeyEventKind::Press {
                        continue;
                    }
                }
                let app_event = if is_insert_mode(self.state.focus) {
                    event::to_app_event_insert(raw)
                } else {
                    event::to_app_event(raw, &self.state.keymap)
                };
                if let Some(ev) = app_event {
                    tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                    if let Some(request) = self.state.handle(ev) {
                        self.spawn(request);
                    }
                }
            }
        }
        Ok(())
    }

    fn spawn(&self, request: Request) {
        let api = Arc::clone(&self.api);
        let tx = self.outcomes_tx.clone();
        self.runtime.spawn(async move {
            let outcome = execute_request(api.as_ref(), request).await;
            // The receiver only goes away on shutdown.
            let _ = tx.send(outcome);
        });
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let tree = state.controller.render();

    // Vertical: title | search bar | body | tray
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let pct = state.config.ui.results_pane_width_pct.min(90);
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Percentage(pct), Constraint::Fill(1)])
        .split(vert[2]);

    frame.render_widget(TitleBar::new(&state.host, state.in_flight, &state.theme), vert[0]);
    frame.render_widget(
        SearchBar::new(&state.search, state.focus == Focus::Search, &state.theme),
        vert[1],
    );
    frame.render_widget(
        ResultsList::new(
            tree.find_by_id("searchResultsContainer"),
            state.controller.page().filter_status.as_deref(),
            &state.results,
            state.focus == Focus::Results,
            &state.theme,
        ),
        horiz[0],
    );
    frame.render_widget(
        ViewPane::new(
            paint(&tree, &SIDE_PANELS, &state.theme),
            &state.view,
            state.focus == Focus::Main,
            &state.theme,
        ),
        horiz[1],
    );
    frame.render_widget(
        TrayBar::new(
            tree.find_by_id("comparisonTrayArea"),
            &state.keymap,
            state.in_flight > 0,
            &state.theme,
        ),
        vert[3],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.keymap, &state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::Search {
        let bar = SearchBar::new(&state.search, true, &state.theme);
        frame.set_cursor_position(bar.cursor_position(vert[1]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
