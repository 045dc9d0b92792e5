//! Client-side browse state.
//!
//! [`BrowseController`] owns the one authoritative [`Filter`] of a page view
//! and the state of the product region. It performs no I/O: handlers return
//! the [`FetchRequest`] to send, and the caller reports completions back via
//! [`BrowseController::on_fetch_complete`]. Each request carries a sequence
//! number and only the completion of the most recently issued request is
//! applied, whatever order the network delivers them in.

use std::time::Instant;

use thiserror::Error;

use crate::domain::filter::Filter;
use crate::domain::types::{CategoryKey, PageNumber, PageSize, SearchText};
use crate::dto::browse::{
    BrowseBootstrap, BrowseDebug, BrowseFailure, BrowsePayload, BrowseRequest, CategoryTab,
    FailureCode,
};

pub mod debounce;
pub mod transport;

use debounce::Debouncer;

/// The one message shown for every failed load.
pub const ERROR_LOADING_PRODUCTS: &str = "Error loading products.";

/// Why a fetch produced no fragment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("network failure: {0}")]
    NetworkFailure(String),
}

impl From<BrowseFailure> for FetchError {
    fn from(failure: BrowseFailure) -> Self {
        match failure.code {
            FailureCode::Unauthorized => FetchError::Unauthorized(failure.message),
            FailureCode::QueryFailed | FailureCode::BadRequest | FailureCode::Internal => {
                FetchError::QueryFailed(failure.message)
            }
        }
    }
}

/// What the product region currently displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    /// Nothing loaded yet.
    Empty,
    /// A request is in flight.
    Loading,
    /// Fragment markup returned by the server.
    Fragment(String),
    /// Static error message.
    Error(&'static str),
}

/// One outgoing request, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub endpoint: String,
    pub filter: Filter,
    pub body: BrowseRequest,
}

#[derive(Debug)]
pub struct BrowseController {
    endpoint: String,
    action: String,
    token: String,
    page_size: PageSize,
    search_enabled: bool,
    tabs: Vec<CategoryTab>,
    filter: Filter,
    search: Debouncer<String>,
    latest_seq: u64,
    region: Region,
    last_debug: Option<BrowseDebug>,
}

impl BrowseController {
    pub fn new(bootstrap: BrowseBootstrap) -> Self {
        Self {
            endpoint: bootstrap.endpoint,
            action: bootstrap.action,
            token: bootstrap.token,
            page_size: PageSize::new(bootstrap.page_size).unwrap_or_default(),
            search_enabled: bootstrap.search_enabled,
            tabs: bootstrap.tabs,
            filter: Filter::default(),
            search: Debouncer::default(),
            latest_seq: 0,
            region: Region::Empty,
            last_debug: None,
        }
    }

    /// Starts from a fragment that was rendered together with the page.
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.region = Region::Fragment(fragment.into());
        self
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn tabs(&self) -> &[CategoryTab] {
        &self.tabs
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn search_enabled(&self) -> bool {
        self.search_enabled
    }

    /// Debug echo of the last applied response.
    pub fn last_debug(&self) -> Option<&BrowseDebug> {
        self.last_debug.as_ref()
    }

    /// Identifier of the single active tab.
    pub fn active_tab(&self) -> &str {
        self.filter.category.as_str()
    }

    pub fn is_tab_active(&self, id: &str) -> bool {
        self.active_tab() == id
    }

    /// The single active page control.
    pub fn active_page(&self) -> PageNumber {
        self.filter.page
    }

    /// Sequence number of the most recently issued request; zero before any.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn is_loading(&self) -> bool {
        self.region == Region::Loading
    }

    /// Fetches the current filter again, e.g. for the first load.
    pub fn refresh(&mut self) -> FetchRequest {
        self.fetch_and_render(self.filter.clone())
    }

    /// Switches to another category tab, keeping the search text and
    /// returning to page one. Ids that are not among the tabs are ignored.
    pub fn on_tab_select(&mut self, id: &str) -> Option<FetchRequest> {
        if !self.tabs.iter().any(|tab| tab.id == id) {
            log::debug!("Ignoring unknown category tab {id:?}");
            return None;
        }
        let category = match CategoryKey::parse(id) {
            Ok(category) => category,
            Err(err) => {
                log::debug!("Ignoring category tab {id:?}: {err}");
                return None;
            }
        };
        let next = self.filter.with_category(category);
        Some(self.fetch_and_render(next))
    }

    /// Records a keystroke; nothing is sent until the input has been quiet
    /// for the debounce window. See [`BrowseController::poll`].
    pub fn on_search_input(&mut self, text: impl Into<String>, now: Instant) {
        if !self.search_enabled {
            return;
        }
        self.search.push(text.into(), now);
    }

    /// When the next debounced search becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Fires the debounced search once its quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<FetchRequest> {
        let text = self.search.poll(now)?;
        let next = self.filter.with_search(SearchText::new(text));
        Some(self.fetch_and_render(next))
    }

    /// Moves to another page of the current result set.
    pub fn on_page_select(&mut self, page: u32) -> FetchRequest {
        let next = self.filter.with_page(PageNumber::coerce(i64::from(page)));
        self.fetch_and_render(next)
    }

    /// Adopts `filter`, shows the loading placeholder and builds the request
    /// for it.
    pub fn fetch_and_render(&mut self, filter: Filter) -> FetchRequest {
        self.latest_seq += 1;
        self.filter = filter;
        self.region = Region::Loading;

        FetchRequest {
            seq: self.latest_seq,
            endpoint: self.endpoint.clone(),
            body: BrowseRequest {
                action: self.action.clone(),
                token: self.token.clone(),
                category: self.filter.category.as_str().to_string(),
                search: self.filter.search.as_str().to_string(),
                page: self.filter.page.get(),
                page_size: self.page_size.get(),
            },
            filter: self.filter.clone(),
        }
    }

    /// Applies the outcome of request `seq` unless a newer request has been
    /// issued since. Returns whether the region changed.
    pub fn on_fetch_complete(
        &mut self,
        seq: u64,
        outcome: Result<BrowsePayload, FetchError>,
    ) -> bool {
        if seq != self.latest_seq {
            log::debug!(
                "Discarding stale browse response {seq} (latest {})",
                self.latest_seq
            );
            return false;
        }

        match outcome {
            Ok(payload) => {
                self.region = Region::Fragment(payload.fragment);
                self.last_debug = Some(payload.debug);
            }
            Err(err) => {
                log::warn!("Failed to load products: {err}");
                self.region = Region::Error(ERROR_LOADING_PRODUCTS);
            }
        }
        true
    }
}
