//! Search-and-pagination state machine.
//!
//! The controller never performs I/O. It turns input events into
//! [`FetchRequest`]s and folds completed fetches back into its state, which
//! keeps every transition synchronous and atomic with respect to the event
//! that caused it. The session driver owns the actual catalog calls.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{CatalogError, MovieSummary, SearchResponse};

/// Maximum number of items revealed per increment.
pub const PAGE_INCREMENT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    Results,
    LoadingMore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    FirstPage,
    NextPage,
}

/// A catalog search the controller wants issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: u64,
    pub query: String,
    pub page: u32,
    pub kind: FetchKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadMore {
    /// Nothing to do: no results, already exhausted, or a fetch is in flight.
    Ignored,
    /// Entries were revealed from the already-fetched batch.
    Revealed(usize),
    Fetch(FetchRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Committed,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    NoResults,
    Error,
    LoadMoreFailed,
}

/// Empty/error reason carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn from_error(err: &CatalogError, load_more: bool) -> Self {
        let kind = match (err, load_more) {
            (_, true) => NoticeKind::LoadMoreFailed,
            (CatalogError::ProviderEmpty(_), false) => NoticeKind::NoResults,
            (_, false) => NoticeKind::Error,
        };
        Self {
            kind,
            message: err.user_message(),
        }
    }
}

/// Everything the presentation layer needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ViewSnapshot {
    pub phase: Phase,
    pub query: String,
    pub committed_query: String,
    pub results: Vec<MovieSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_available: Option<u32>,
    pub is_loading: bool,
    pub is_loading_more: bool,
    pub can_load_more: bool,
    pub has_searched: bool,
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[derive(Debug)]
pub struct SearchController {
    phase: Phase,
    raw_text: String,
    committed: String,
    page: u32,
    displayed: Vec<MovieSummary>,
    batch: Vec<MovieSummary>,
    batch_revealed: usize,
    total_available: Option<u32>,
    has_searched: bool,
    is_loading: bool,
    is_loading_more: bool,
    notice: Option<Notice>,
    generation: u64,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            raw_text: String::new(),
            committed: String::new(),
            page: 1,
            displayed: Vec::new(),
            batch: Vec::new(),
            batch_revealed: 0,
            total_available: None,
            has_searched: false,
            is_loading: false,
            is_loading_more: false,
            notice: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn committed_query(&self) -> &str {
        &self.committed
    }

    pub fn displayed(&self) -> &[MovieSummary] {
        &self.displayed
    }

    pub fn total_available(&self) -> Option<u32> {
        self.total_available
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Records a keystroke. Only the committed text drives fetches.
    pub fn set_raw_text(&mut self, text: &str) {
        self.raw_text.clear();
        self.raw_text.push_str(text);
    }

    /// Applies debounced text. Returns the first-page fetch to issue, or
    /// `None` when the text is blank (back to `Idle`) or already showing.
    pub fn commit(&mut self, text: &str) -> Option<FetchRequest> {
        let query = text.trim();
        if query == self.committed && self.is_settled() {
            return None;
        }

        self.generation += 1;
        self.committed = query.to_string();
        self.is_loading_more = false;
        self.notice = None;
        self.batch.clear();
        self.batch_revealed = 0;
        self.page = 1;

        if query.is_empty() {
            debug!(generation = self.generation, "query cleared; returning to showcase");
            self.phase = Phase::Idle;
            self.displayed.clear();
            self.is_loading = true;
            self.has_searched = false;
            self.total_available = None;
            return None;
        }

        info!(query, generation = self.generation, "committing query");
        self.phase = Phase::Searching;
        self.is_loading = true;
        Some(FetchRequest {
            ticket: self.generation,
            query: self.committed.clone(),
            page: 1,
            kind: FetchKind::FirstPage,
        })
    }

    /// Whether the committed query is in flight or showing usable results.
    /// A failed first search is not settled, so the same text can retry it.
    fn is_settled(&self) -> bool {
        match self.phase {
            Phase::Idle => self.committed.is_empty() && !self.displayed.is_empty(),
            Phase::Searching | Phase::LoadingMore => true,
            Phase::Results => !matches!(
                self.notice,
                Some(Notice {
                    kind: NoticeKind::Error | NoticeKind::NoResults,
                    ..
                })
            ),
        }
    }

    /// Marks the showcase as loading while it is being built.
    pub fn begin_showcase(&mut self) {
        if self.phase == Phase::Idle {
            self.is_loading = true;
        }
    }

    /// Shows the default grid. Ignored once a search has been committed.
    pub fn show_showcase(&mut self, movies: &[MovieSummary]) {
        if self.phase != Phase::Idle {
            return;
        }
        self.displayed = movies.to_vec();
        self.total_available = None;
        self.is_loading = false;
    }

    /// Reveals more entries: first from the buffered batch, then by asking
    /// for the next provider page once the batch is used up.
    pub fn load_more(&mut self) -> LoadMore {
        if self.phase != Phase::Results || self.is_loading_more || self.committed.is_empty() {
            return LoadMore::Ignored;
        }
        let Some(total) = self.total_available else {
            return LoadMore::Ignored;
        };
        let remaining_total = (total as usize).saturating_sub(self.displayed.len());
        if remaining_total == 0 {
            return LoadMore::Ignored;
        }

        let buffered = self.batch.len() - self.batch_revealed;
        if buffered > 0 {
            let take = buffered.min(PAGE_INCREMENT).min(remaining_total);
            self.reveal_from_batch(take);
            debug!(revealed = take, shown = self.displayed.len(), "revealed buffered results");
            return LoadMore::Revealed(take);
        }

        self.phase = Phase::LoadingMore;
        self.is_loading_more = true;
        self.notice = None;
        LoadMore::Fetch(FetchRequest {
            ticket: self.generation,
            query: self.committed.clone(),
            page: self.page + 1,
            kind: FetchKind::NextPage,
        })
    }

    /// Folds a completed fetch into state, discarding it if the committed
    /// query has moved on since the request was issued.
    pub fn apply(&mut self, request: &FetchRequest, response: SearchResponse) -> Applied {
        if request.ticket != self.generation || request.query != self.committed {
            debug!(
                query = %request.query,
                ticket = request.ticket,
                current = self.generation,
                "dropping stale response"
            );
            return Applied::Stale;
        }

        match request.kind {
            FetchKind::FirstPage if self.phase == Phase::Searching => {
                self.apply_first_page(response)
            }
            FetchKind::NextPage if self.phase == Phase::LoadingMore => {
                self.apply_next_page(request.page, response)
            }
            _ => return Applied::Stale,
        }
        Applied::Committed
    }

    fn apply_first_page(&mut self, response: SearchResponse) {
        self.phase = Phase::Results;
        self.is_loading = false;
        self.has_searched = true;
        self.page = 1;
        self.displayed.clear();

        match response {
            Ok(page) if !page.results.is_empty() => {
                let total = page.total_available.max(page.results.len() as u32);
                self.total_available = Some(total);
                self.batch = page.results;
                self.batch_revealed = 0;
                self.reveal_from_batch(PAGE_INCREMENT.min(total as usize));
                info!(
                    query = %self.committed,
                    shown = self.displayed.len(),
                    total,
                    "search results ready"
                );
            }
            Ok(_) => {
                self.total_available = Some(0);
                self.notice = Some(Notice::from_error(
                    &CatalogError::ProviderEmpty(String::new()),
                    false,
                ));
            }
            Err(err) => {
                info!(query = %self.committed, error = %err, "search failed");
                self.total_available = None;
                self.notice = Some(Notice::from_error(&err, false));
            }
        }
    }

    fn apply_next_page(&mut self, page_number: u32, response: SearchResponse) {
        self.phase = Phase::Results;
        self.is_loading_more = false;

        match response {
            Ok(page) if !page.results.is_empty() => {
                let total = self.total_available.unwrap_or(0);
                let remaining_total = (total as usize).saturating_sub(self.displayed.len());
                self.batch = page.results;
                self.batch_revealed = 0;
                self.page = page_number;
                self.reveal_from_batch(PAGE_INCREMENT.min(remaining_total));
                debug!(page = page_number, shown = self.displayed.len(), "next page appended");
            }
            // The provider ran dry before reaching its advertised total.
            Ok(_) | Err(CatalogError::ProviderEmpty(_)) => {
                debug!(page = page_number, shown = self.displayed.len(), "no further pages");
                self.total_available = Some(self.displayed.len() as u32);
            }
            Err(err) => {
                info!(query = %self.committed, page = page_number, error = %err, "load more failed");
                self.notice = Some(Notice::from_error(&err, true));
            }
        }
    }

    fn reveal_from_batch(&mut self, count: usize) {
        let end = (self.batch_revealed + count).min(self.batch.len());
        self.displayed
            .extend_from_slice(&self.batch[self.batch_revealed..end]);
        self.batch_revealed = end;
    }

    pub fn can_load_more(&self) -> bool {
        match (self.phase, self.total_available) {
            (Phase::Results | Phase::LoadingMore, Some(total)) => {
                total as usize > PAGE_INCREMENT && self.displayed.len() < total as usize
            }
            _ => false,
        }
    }

    pub fn view(&self) -> ViewSnapshot {
        ViewSnapshot {
            phase: self.phase,
            query: self.raw_text.clone(),
            committed_query: self.committed.clone(),
            results: self.displayed.clone(),
            total_available: match self.phase {
                Phase::Idle => Some(self.displayed.len() as u32),
                _ => self.total_available,
            },
            is_loading: self.is_loading,
            is_loading_more: self.is_loading_more,
            can_load_more: self.can_load_more(),
            has_searched: self.has_searched,
            page: self.page,
            notice: self.notice.clone(),
        }
    }
}
