//! Filtered, paginated job listing
//!
//! `ListingController` is the state behind the job listing: current filters,
//! page position, the jobs and companies fetch states, and the page-change
//! loading flag. It is driven from a single event loop:
//!
//! - user actions call the mutators (`set_location`, `go_to_page`, ...)
//! - search keystrokes go through a [`Debouncer`] first
//! - background fetchers ([`spawn_job_fetcher`], [`spawn_company_fetcher`])
//!   report back through [`ListingEvent`]s passed to [`ListingController::apply`]
//!
//! Filter mutations publish on a `watch` channel the jobs fetcher subscribes
//! to, so the controller never calls the job source directly.

mod debounce;
mod fetch;
mod filter;
mod orchestrator;
mod pagination;

pub use debounce::Debouncer;
pub use fetch::{FetchError, FetchState, FetchStatus};
pub use filter::{FilterState, FilterStore};
pub use orchestrator::{spawn_company_fetcher, spawn_job_fetcher};
pub use pagination::{PageControl, PageState};

use tokio::sync::watch;

use self::filter::FilterField;
use crate::models::{Company, Job};

/// Results and progress reported by the background fetchers
#[derive(Debug)]
pub enum ListingEvent {
    /// A jobs request was issued
    JobsRequested { seq: u64 },

    /// A jobs request resolved
    JobsLoaded {
        seq: u64,
        result: Result<Vec<Job>, FetchError>,
    },

    CompaniesRequested { seq: u64 },

    CompaniesLoaded {
        seq: u64,
        result: Result<Vec<Company>, FetchError>,
    },

    /// The debounce window for search input elapsed
    SearchSettled(String),
}

/// What the results area should show
#[derive(Debug, PartialEq, Eq)]
pub enum ListingView<'a> {
    /// Session not ready, nothing requested yet
    NotReady,
    Loading,
    Failed(&'a FetchError),
    Empty,
    Results(&'a [Job]),
}

/// State behind the job listing
#[derive(Debug)]
pub struct ListingController {
    filters: FilterStore,
    pages: PageState,
    jobs: FetchState<Job>,
    companies: FetchState<Company>,
    page_change_pending: bool,
    scroll_to_top: bool,
    ready: watch::Receiver<bool>,
}

impl ListingController {
    pub fn new(items_per_page: usize, ready: watch::Receiver<bool>) -> Self {
        Self {
            filters: FilterStore::default(),
            pages: PageState::new(items_per_page),
            jobs: FetchState::default(),
            companies: FetchState::default(),
            page_change_pending: false,
            scroll_to_top: false,
            ready,
        }
    }

    /// Subscribe to filter changes (the jobs fetcher's trigger)
    pub fn subscribe_filters(&self) -> watch::Receiver<FilterState> {
        self.filters.subscribe()
    }

    #[must_use]
    pub fn filters(&self) -> FilterState {
        self.filters.current()
    }

    #[must_use]
    pub fn pages(&self) -> &PageState {
        &self.pages
    }

    #[must_use]
    pub fn jobs(&self) -> &FetchState<Job> {
        &self.jobs
    }

    #[must_use]
    pub fn companies(&self) -> &FetchState<Company> {
        &self.companies
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    // ------------------------------------------------------------------
    // Filter mutations. Each resets the page; unchanged values trigger no fetch.
    // ------------------------------------------------------------------

    pub fn set_search(&mut self, text: &str) -> bool {
        self.set_filter(FilterField::Search, text)
    }

    pub fn set_location(&mut self, location: &str) -> bool {
        self.set_filter(FilterField::Location, location)
    }

    pub fn set_company(&mut self, company_id: &str) -> bool {
        self.set_filter(FilterField::Company, company_id)
    }

    fn set_filter(&mut self, field: FilterField, value: &str) -> bool {
        self.pages.reset();
        let changed = self.filters.set(field, value);
        if changed {
            tracing::debug!("Filter {:?} set to {:?}", field, value);
        }
        changed
    }

    /// Reset all filters and the page in one transition
    pub fn clear_all(&mut self) -> bool {
        self.pages.reset();
        self.filters.clear_all()
    }

    /// Re-issue the jobs request with the current filters
    pub fn retry(&mut self) {
        tracing::info!("Retrying jobs request");
        self.filters.republish();
    }

    // ------------------------------------------------------------------
    // Fetch results
    // ------------------------------------------------------------------

    /// Apply an event from a background task. Returns true if visible state changed.
    pub fn apply(&mut self, event: ListingEvent) -> bool {
        match event {
            ListingEvent::JobsRequested { seq } => self.jobs.begin(seq),
            ListingEvent::JobsLoaded { seq, result } => {
                if !self.jobs.complete(seq, result) {
                    return false;
                }
                if let Some(jobs) = self.jobs.data() {
                    self.pages.set_result_count(jobs.len());
                }
                true
            }
            ListingEvent::CompaniesRequested { seq } => self.companies.begin(seq),
            ListingEvent::CompaniesLoaded { seq, result } => self.companies.complete(seq, result),
            ListingEvent::SearchSettled(text) => {
                // A settled value matching the applied query is not a filter change
                if self.filters.current().search_query == text {
                    return false;
                }
                self.set_search(&text)
            }
        }
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Move to page `n`. Out-of-range pages are a no-op. Navigation stays
    /// available while a fetch is in flight or has failed.
    pub fn go_to_page(&mut self, n: usize) -> bool {
        if !self.pages.go_to(n) {
            tracing::debug!(
                "Ignoring page {} (valid range 1..={})",
                n,
                self.pages.total_pages()
            );
            return false;
        }
        self.page_change_pending = true;
        self.scroll_to_top = true;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.pages.current_page() + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        match self.pages.current_page().checked_sub(1) {
            Some(n) => self.go_to_page(n),
            None => false,
        }
    }

    /// Per-render-tick settling: drop the page-change loading flag once the
    /// jobs fetch is not loading. Returns true if the flag was cleared.
    pub fn settle(&mut self) -> bool {
        if self.page_change_pending && !self.jobs.is_loading() {
            self.page_change_pending = false;
            return true;
        }
        false
    }

    /// Loading indicator for page changes
    #[must_use]
    pub fn display_loading(&self) -> bool {
        self.page_change_pending
    }

    /// Take the pending scroll-to-top request, if any
    pub fn take_scroll_to_top(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_top)
    }

    /// Jobs on the current page (empty when nothing is loaded)
    #[must_use]
    pub fn page_items(&self) -> &[Job] {
        self.jobs
            .data()
            .map(|jobs| self.pages.slice(jobs))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn view(&self) -> ListingView<'_> {
        match self.jobs.status() {
            FetchStatus::Idle if !self.is_ready() => ListingView::NotReady,
            FetchStatus::Idle | FetchStatus::Loading => ListingView::Loading,
            FetchStatus::Failure => match self.jobs.error() {
                Some(err) => ListingView::Failed(err),
                None => ListingView::Loading,
            },
            FetchStatus::Success => {
                let items = self.page_items();
                if items.is_empty() {
                    ListingView::Empty
                } else {
                    ListingView::Results(items)
                }
            }
        }
    }

    /// Company filter options, `None` while the companies fetch is loading
    #[must_use]
    pub fn company_options(&self) -> Option<&[Company]> {
        if self.companies.is_loading() {
            None
        } else {
            Some(self.companies.data().unwrap_or_default())
        }
    }

    /// Display name for the active company filter
    #[must_use]
    pub fn company_name(&self, id: &str) -> Option<&str> {
        self.companies
            .data()
            .and_then(|companies| companies.iter().find(|c| c.id == id))
            .map(|c| c.name.as_str())
    }
}
