//! Fetch state for one remote collection (jobs or companies)
//!
//! Every request carries a sequence number. Only the completion of the most
//! recently started request is applied; anything older is discarded, so a
//! slow early response can never overwrite newer data.

use thiserror::Error;

/// Failure from a fetch collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("could not read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("could not parse '{path}': {message}")]
    Parse { path: String, message: String },

    /// The request task died before producing a result
    #[error("request aborted: {0}")]
    Aborted(String),
}

/// Where a fetch state is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Failure,
}

/// Data, loading flag and error of one fetch subsystem
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    data: Option<Vec<T>>,
    loading: bool,
    error: Option<FetchError>,
    latest_seq: u64,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            latest_seq: 0,
        }
    }
}

impl<T> FetchState<T> {
    /// Record that request `seq` started. Older sequence numbers are ignored.
    pub fn begin(&mut self, seq: u64) -> bool {
        if seq < self.latest_seq {
            tracing::debug!("Ignoring start of superseded request {}", seq);
            return false;
        }
        self.latest_seq = seq;
        self.data = None;
        self.error = None;
        self.loading = true;
        true
    }

    /// Apply the result of request `seq`. Returns false if it was stale.
    pub fn complete(&mut self, seq: u64, result: Result<Vec<T>, FetchError>) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(
                "Discarding stale response {} (latest request is {})",
                seq,
                self.latest_seq
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("Fetch {} failed: {}", seq, e);
                self.data = None;
                self.error = Some(e);
            }
        }
        true
    }

    #[must_use]
    pub fn status(&self) -> FetchStatus {
        if self.loading {
            FetchStatus::Loading
        } else if self.error.is_some() {
            FetchStatus::Failure
        } else if self.data.is_some() {
            FetchStatus::Success
        } else {
            FetchStatus::Idle
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn data(&self) -> Option<&[T]> {
        self.data.as_deref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }
}
