//! Single-session event loop.
//!
//! The session task owns the [`SearchController`], the query [`Debouncer`]
//! and the showcase cache. Input events, debounce deadlines and catalog
//! completions are all handled on this one task, so controller state is only
//! ever touched between awaits and each transition is atomic.

use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use futures_util::StreamExt;
use futures_util::future::BoxFuture;
use futures_util::stream::FuturesUnordered;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::catalog::{Catalog, MovieSummary, SearchResponse, TimedCatalog};
use crate::config::{AppConfig, DEFAULT_SHOWCASE_SEEDS};
use crate::controller::{FetchKind, FetchRequest, LoadMore, Phase, SearchController, ViewSnapshot};
use crate::debounce::{DEFAULT_QUIET_PERIOD, Debouncer};
use crate::search_cache::{DEFAULT_SEARCH_CAPACITY, DEFAULT_SEARCH_TTL, SearchCache};
use crate::showcase::{DEFAULT_SHOWCASE_SIZE, DEFAULT_SHOWCASE_TTL, ShowcaseCache, build_showcase};

const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub debounce: Duration,
    pub request_timeout: Duration,
    pub showcase_seeds: Vec<String>,
    pub showcase_size: usize,
    pub showcase_ttl: Duration,
    pub search_ttl: Duration,
}

impl SessionSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            debounce: config.debounce,
            request_timeout: config.request_timeout,
            showcase_seeds: config.showcase_seeds.clone(),
            showcase_size: config.showcase_size,
            showcase_ttl: config.showcase_ttl,
            search_ttl: config.search_ttl,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_QUIET_PERIOD,
            request_timeout: Duration::from_secs(10),
            showcase_seeds: DEFAULT_SHOWCASE_SEEDS
                .iter()
                .map(|seed| seed.to_string())
                .collect(),
            showcase_size: DEFAULT_SHOWCASE_SIZE,
            showcase_ttl: DEFAULT_SHOWCASE_TTL,
            search_ttl: DEFAULT_SEARCH_TTL,
        }
    }
}

#[derive(Debug)]
pub enum SessionEvent {
    QueryChanged(String),
    LoadMore,
}

/// Presentation-side handle: two inbound callbacks plus the published view.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    events: mpsc::Sender<SessionEvent>,
    view: watch::Receiver<ViewSnapshot>,
}

impl SessionHandle {
    pub async fn on_query_change(&self, text: impl Into<String>) -> anyhow::Result<()> {
        self.send(SessionEvent::QueryChanged(text.into())).await
    }

    pub async fn on_load_more(&self) -> anyhow::Result<()> {
        self.send(SessionEvent::LoadMore).await
    }

    pub fn view(&self) -> ViewSnapshot {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.view.clone()
    }

    async fn send(&self, event: SessionEvent) -> anyhow::Result<()> {
        self.events
            .send(event)
            .await
            .map_err(|_| anyhow!("search session has shut down"))
    }
}

/// Starts the session task. It runs until every [`SessionHandle`] is dropped.
pub fn spawn_session<C: Catalog>(
    catalog: Arc<C>,
    settings: SessionSettings,
) -> (SessionHandle, JoinHandle<()>) {
    let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
    let controller = SearchController::new();
    let (view_tx, view_rx) = watch::channel(controller.view());

    let session = Session {
        catalog: Arc::new(TimedCatalog::new(catalog, settings.request_timeout)),
        debouncer: Debouncer::new(settings.debounce),
        showcase: ShowcaseCache::new(settings.showcase_ttl),
        showcase_pending: false,
        searches: SearchCache::new(settings.search_ttl, DEFAULT_SEARCH_CAPACITY),
        in_flight: FuturesUnordered::new(),
        controller,
        settings,
        view_tx,
    };
    let task = tokio::spawn(session.run(events_rx));

    let handle = SessionHandle {
        events: events_tx,
        view: view_rx,
    };
    (handle, task)
}

enum Completion {
    Search {
        request: FetchRequest,
        response: SearchResponse,
    },
    Showcase(Vec<MovieSummary>),
}

struct Session<C> {
    catalog: Arc<TimedCatalog<C>>,
    settings: SessionSettings,
    controller: SearchController,
    debouncer: Debouncer<String>,
    showcase: ShowcaseCache,
    showcase_pending: bool,
    searches: SearchCache,
    in_flight: FuturesUnordered<BoxFuture<'static, Completion>>,
    view_tx: watch::Sender<ViewSnapshot>,
}

impl<C: Catalog> Session<C> {
    async fn run(mut self, mut events: mpsc::Receiver<SessionEvent>) {
        info!(
            debounce_ms = self.debouncer.quiet_period().as_millis() as u64,
            seeds = self.settings.showcase_seeds.len(),
            "search session started"
        );
        self.request_showcase();
        self.publish();

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                text = self.debouncer.settled() => self.handle_commit(&text),
                Some(done) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.handle_completion(done)
                }
            }
            self.publish();
        }

        info!(abandoned = self.in_flight.len(), "search session closed");
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::QueryChanged(text) => {
                self.controller.set_raw_text(&text);
                self.debouncer.push(text);
            }
            SessionEvent::LoadMore => match self.controller.load_more() {
                LoadMore::Fetch(request) => self.spawn_search(request),
                LoadMore::Revealed(count) => debug!(count, "load more served from buffer"),
                LoadMore::Ignored => debug!("load more ignored"),
            },
        }
    }

    fn handle_commit(&mut self, text: &str) {
        match self.controller.commit(text) {
            Some(request) => self.spawn_search(request),
            None if self.controller.phase() == Phase::Idle => self.show_showcase(),
            None => {}
        }
    }

    fn handle_completion(&mut self, done: Completion) {
        match done {
            Completion::Search { request, response } => {
                if let (FetchKind::FirstPage, Ok(page)) = (request.kind, &response) {
                    if !page.results.is_empty() {
                        self.searches.store(&request.query, page.clone());
                    }
                }
                self.controller.apply(&request, response);
            }
            Completion::Showcase(movies) => {
                self.showcase_pending = false;
                self.controller.show_showcase(&movies);
                // An empty grid means every seed failed; rebuild on next use.
                if !movies.is_empty() {
                    self.showcase.store(movies);
                }
            }
        }
    }

    fn show_showcase(&mut self) {
        match self.showcase.fresh() {
            Some(movies) => self.controller.show_showcase(movies),
            None => self.request_showcase(),
        }
    }

    fn request_showcase(&mut self) {
        self.controller.begin_showcase();
        if self.showcase_pending {
            return;
        }
        self.showcase_pending = true;

        let catalog = Arc::clone(&self.catalog);
        let seeds = self.settings.showcase_seeds.clone();
        let target = self.settings.showcase_size;
        self.in_flight.push(Box::pin(async move {
            Completion::Showcase(build_showcase(catalog.as_ref(), &seeds, target).await)
        }));
    }

    fn spawn_search(&mut self, request: FetchRequest) {
        if request.kind == FetchKind::FirstPage {
            if let Some(page) = self.searches.fresh(&request.query) {
                debug!(query = %request.query, "serving first page from cache");
                let page = page.clone();
                self.controller.apply(&request, Ok(page));
                return;
            }
        }
        debug!(query = %request.query, page = request.page, ticket = request.ticket, "issuing search");
        let catalog = Arc::clone(&self.catalog);
        self.in_flight.push(Box::pin(async move {
            let response = catalog.search(&request.query, request.page).await;
            Completion::Search { request, response }
        }));
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.controller.view());
    }
}
