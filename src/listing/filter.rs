//! Filter state store
//!
//! Holds the search text and the two categorical filters. Changes are
//! published through a `watch` channel; the jobs fetcher subscribes to it and
//! issues one request per published change. Setting a field to the value it
//! already has publishes nothing.

use serde::Serialize;
use tokio::sync::watch;

/// Current filters. An empty string means "no filter", never a literal match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub search_query: String,
    pub location: String,
    pub company_id: String,
}

impl FilterState {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_query.is_empty() && self.location.is_empty() && self.company_id.is_empty()
    }

    /// Search text as a filter, `None` when no search is applied
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        non_empty(&self.search_query)
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    #[must_use]
    pub fn company(&self) -> Option<&str> {
        non_empty(&self.company_id)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

/// Which filter field a mutation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Search,
    Location,
    Company,
}

/// Owner of the filter state and its change channel
#[derive(Debug)]
pub struct FilterStore {
    tx: watch::Sender<FilterState>,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new(FilterState::default())
    }
}

impl FilterStore {
    pub fn new(initial: FilterState) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Snapshot of the current filters
    #[must_use]
    pub fn current(&self) -> FilterState {
        self.tx.borrow().clone()
    }

    /// Subscribe to filter changes. The receiver starts with the current
    /// value marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.tx.subscribe()
    }

    /// Set one field. Returns true if the value changed (and was published).
    pub fn set(&self, field: FilterField, value: &str) -> bool {
        self.tx.send_if_modified(|state| {
            let slot = match field {
                FilterField::Search => &mut state.search_query,
                FilterField::Location => &mut state.location,
                FilterField::Company => &mut state.company_id,
            };
            if *slot == value {
                false
            } else {
                value.clone_into(slot);
                true
            }
        })
    }

    /// Reset every field in a single transition
    pub fn clear_all(&self) -> bool {
        self.tx.send_if_modified(|state| {
            if state.is_empty() {
                false
            } else {
                *state = FilterState::default();
                true
            }
        })
    }

    /// Publish the current filters again, unconditionally
    pub fn republish(&self) {
        self.tx.send_modify(|_| {});
    }
}
