use anyhow::Result;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::api::SearchClient;
use crate::config::AppConfig;
use crate::internal::models::{FetchState, Hit, SearchResponse};
use crate::internal::results::ResultsCache;
use crate::internal::sort::{SortKey, TableSort};

use ratatui::Frame;
use ratatui::widgets::TableState;

/// Input modes for the UI.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Actions/messages sent through the app action channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    NavigateUp,
    NavigateDown,
    SubmitSearch,
    FetchPage { query: String, page: u32 },
    LoadMore,
    SearchCompleted(SearchResponse),
    SearchFailed(String),
    DismissSelected,
    SelectSort(SortKey),
    OpenBrowser,
}

/// Main application state.
///
/// Owns the editable query text, the submitted search key, the per-query
/// results cache and the fetch state. Subcomponents (table, view) only ever
/// borrow this data; none of them keeps its own copy.
pub struct App {
    pub running: bool,
    pub app_version: String,
    pub input_mode: InputMode,
    /// User-editable search text. Deliberately decoupled from `search_key`
    /// so typing never invalidates the results shown for the last submit.
    pub query_input: String,
    /// Cache key of the last submitted query.
    pub search_key: String,
    pub results: ResultsCache,
    pub fetch_state: FetchState,
    pub table: TableSort,
    pub table_state: TableState,
    pub client: Arc<SearchClient>,
    pub spinner_state: usize,
    pub last_spinner_update: Option<tokio::time::Instant>,
    pub config: AppConfig,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let client = Arc::new(SearchClient::new());

        Self {
            running: true,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            input_mode: InputMode::Normal,
            query_input: config.default_query.clone(),
            search_key: String::new(),
            results: ResultsCache::new(),
            fetch_state: FetchState::Idle,
            table: TableSort::default(),
            table_state: TableState::default(),
            client,
            spinner_state: 0,
            last_spinner_update: None,
            config,
            action_tx,
            action_rx,
        }
    }

    /// Hits for the current search key in display order (registry sort plus
    /// reverse toggle applied).
    pub fn displayed_hits(&self) -> Vec<Hit> {
        match self.results.get(&self.search_key) {
            Some(entry) => self.table.apply(&entry.hits),
            None => Vec::new(),
        }
    }

    /// The hit under the table cursor, in display order.
    pub fn selected_hit(&self) -> Option<Hit> {
        let displayed = self.displayed_hits();
        self.table_state
            .selected()
            .and_then(|index| displayed.get(index).cloned())
    }

    pub fn get_spinner_char(&self) -> char {
        const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        FRAMES[self.spinner_state % FRAMES.len()]
    }

    pub async fn run(&mut self, mut tui: crate::tui::Tui) -> Result<()> {
        // Initial search for the configured default query.
        self.search_key = self.config.default_query.clone();
        let _ = self.action_tx.send(Action::FetchPage {
            query: self.search_key.clone(),
            page: 0,
        });

        let mut event_interval = tokio::time::interval(std::time::Duration::from_millis(16));

        loop {
            // Advance the spinner every 100ms.
            let now = tokio::time::Instant::now();
            match self.last_spinner_update {
                Some(last_update) => {
                    if now.duration_since(last_update).as_millis() >= 100 {
                        self.spinner_state = self.spinner_state.wrapping_add(1);
                        self.last_spinner_update = Some(now);
                    }
                }
                None => {
                    self.last_spinner_update = Some(now);
                }
            }

            tui.draw(|f| self.ui(f))?;

            tokio::select! {
                _ = event_interval.tick() => {
                    if event::poll(std::time::Duration::from_millis(0))?
                        && let Event::Key(key) = event::read()?
                            && key.kind == KeyEventKind::Press {
                                self.handle_key_event(key);
                            }
                }
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action).await;
                }
            }

            if !self.running {
                break;
            }
        }
        Ok(())
    }

    fn ui(&mut self, f: &mut Frame) {
        super::view::draw(self, f);
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        // A failed search is terminal for the session: the error notice is
        // all that renders, so only quit remains.
        if self.fetch_state.is_failed() {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    let _ = self.action_tx.send(Action::Quit);
                }
                _ => {}
            }
            return;
        }

        match self.input_mode {
            InputMode::Editing => self.handle_editing_input(key),
            InputMode::Normal => self.handle_normal_input(key),
        }
    }

    fn handle_editing_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.query_input.push(c);
            }
            KeyCode::Backspace => {
                self.query_input.pop();
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let _ = self.action_tx.send(Action::SubmitSearch);
            }
            KeyCode::Esc => {
                // Leave the typed text as-is; it is decoupled from the
                // submitted key anyway.
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    fn handle_normal_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                let _ = self.action_tx.send(Action::Quit);
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Editing;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let _ = self.action_tx.send(Action::NavigateDown);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let _ = self.action_tx.send(Action::NavigateUp);
            }
            KeyCode::Char('t') => {
                let _ = self.action_tx.send(Action::SelectSort(SortKey::Title));
            }
            KeyCode::Char('a') => {
                let _ = self.action_tx.send(Action::SelectSort(SortKey::Author));
            }
            KeyCode::Char('c') => {
                let _ = self.action_tx.send(Action::SelectSort(SortKey::Comments));
            }
            KeyCode::Char('p') => {
                let _ = self.action_tx.send(Action::SelectSort(SortKey::Points));
            }
            KeyCode::Char('n') => {
                let _ = self.action_tx.send(Action::SelectSort(SortKey::None));
            }
            KeyCode::Char('d') | KeyCode::Char('x') => {
                let _ = self.action_tx.send(Action::DismissSelected);
            }
            KeyCode::Char('m') => {
                // One outstanding fetch at a time is the caller's job, not
                // FetchPage's.
                if !self.fetch_state.is_loading() {
                    let _ = self.action_tx.send(Action::LoadMore);
                }
            }
            KeyCode::Enter | KeyCode::Char('o') => {
                let _ = self.action_tx.send(Action::OpenBrowser);
            }
            _ => {}
        }
    }

    pub async fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.running = false;
            }
            Action::NavigateDown => {
                let len = self.displayed_hits().len();
                if len > 0 {
                    let next = match self.table_state.selected() {
                        Some(index) => (index + 1).min(len - 1),
                        None => 0,
                    };
                    self.table_state.select(Some(next));
                }
            }
            Action::NavigateUp => {
                let len = self.displayed_hits().len();
                if len > 0 {
                    let prev = match self.table_state.selected() {
                        Some(index) => index.saturating_sub(1),
                        None => 0,
                    };
                    self.table_state.select(Some(prev));
                }
            }
            Action::SubmitSearch => {
                self.search_key = self.query_input.clone();
                tracing::info!("Submitted search for '{}'", self.search_key);

                if !self.results.contains(&self.search_key) {
                    let _ = self.action_tx.send(Action::FetchPage {
                        query: self.search_key.clone(),
                        page: 0,
                    });
                }
            }
            Action::LoadMore => {
                let page = match self.results.get(&self.search_key) {
                    Some(entry) => entry.page + 1,
                    None => 0,
                };
                let _ = self.action_tx.send(Action::FetchPage {
                    query: self.search_key.clone(),
                    page,
                });
            }
            Action::FetchPage { query, page } => {
                self.fetch_state = FetchState::Loading;
                tracing::debug!("Fetching page {} for '{}'", page, query);

                let client = self.client.clone();
                let tx = self.action_tx.clone();

                tokio::spawn(async move {
                    match client.search(&query, page).await {
                        Ok(resp) => {
                            let _ = tx.send(Action::SearchCompleted(resp));
                        }
                        Err(e) => {
                            let _ = tx.send(Action::SearchFailed(format!("{e:#}")));
                        }
                    }
                });
            }
            Action::SearchCompleted(resp) => {
                // The merge is keyed by whatever `search_key` is *now*, not
                // by the query string the fetch was issued with. A fast
                // second search can therefore absorb a slow first search's
                // results under the new key; the original behaves the same
                // way and it is kept.
                self.results
                    .merge_page(&self.search_key, resp.hits, resp.page);
                self.fetch_state = FetchState::Idle;

                if !self.displayed_hits().is_empty() && self.table_state.selected().is_none() {
                    self.table_state.select(Some(0));
                }
            }
            Action::SearchFailed(message) => {
                tracing::error!("Search failed: {}", message);
                self.fetch_state = FetchState::Failed(message);
            }
            Action::DismissSelected => {
                if let Some(hit) = self.selected_hit() {
                    self.results.dismiss(&self.search_key, &hit.id);

                    // Keep the cursor inside the shrunken list.
                    let len = self.displayed_hits().len();
                    match (len, self.table_state.selected()) {
                        (0, _) => self.table_state.select(None),
                        (n, Some(index)) if index >= n => {
                            self.table_state.select(Some(n - 1));
                        }
                        _ => {}
                    }
                }
            }
            Action::SelectSort(key) => {
                self.table.select(key);
            }
            Action::OpenBrowser => {
                if let Some(hit) = self.selected_hit()
                    && let Some(url) = &hit.url
                {
                    let _ = open::that(url);
                }
            }
        }
    }
}
