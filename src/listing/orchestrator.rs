//! Background fetch tasks for the listing controller
//!
//! The jobs fetcher subscribes to the filter store and the session readiness
//! signal. Every published filter change (and readiness turning on) issues
//! exactly one request, tagged with the next sequence number. Requests run in
//! their own tasks so a newer request never waits for an older one; the
//! controller discards responses that are not the latest.
//!
//! The companies fetcher waits for readiness and fetches once.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::filter::FilterState;
use super::{FetchError, ListingEvent};
use crate::source::JobSource;

/// Collapse a request task's join result into a fetch result
fn flatten_join<T>(
    result: Result<Result<T, FetchError>, tokio::task::JoinError>,
) -> Result<T, FetchError> {
    match result {
        Ok(inner) => inner,
        Err(e) => Err(FetchError::Aborted(format!("Task join error: {}", e))),
    }
}

/// Send a listing event, logging if the event loop has gone away
async fn send_event<E>(tx: &mpsc::Sender<E>, event: ListingEvent) -> bool
where
    E: From<ListingEvent>,
{
    if tx.send(E::from(event)).await.is_err() {
        tracing::debug!("Listing event receiver dropped");
        return false;
    }
    true
}

/// Spawn the jobs fetcher task
pub fn spawn_job_fetcher<S, E>(
    source: Arc<S>,
    mut filters: watch::Receiver<FilterState>,
    mut ready: watch::Receiver<bool>,
    tx: mpsc::Sender<E>,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: JobSource,
    E: From<ListingEvent> + Send + 'static,
{
    tokio::spawn(async move {
        let mut seq: u64 = 0;
        let mut is_ready = *ready.borrow_and_update();
        // Fetch immediately if the session is already ready
        let mut pending = is_ready;

        loop {
            if pending && is_ready {
                pending = false;
                seq += 1;
                let request = filters.borrow_and_update().clone();
                tracing::debug!("Issuing jobs request {} for {:?}", seq, request);

                if !send_event(&tx, ListingEvent::JobsRequested { seq }).await {
                    break;
                }
                spawn_jobs_request(seq, request, Arc::clone(&source), tx.clone(), cancel.clone());
            }

            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,

                changed = ready.changed() => {
                    if changed.is_err() {
                        break; // Session dropped
                    }
                    let now_ready = *ready.borrow_and_update();
                    if now_ready && !is_ready {
                        pending = true;
                    }
                    is_ready = now_ready;
                }

                changed = filters.changed() => {
                    if changed.is_err() {
                        break; // Filter store dropped
                    }
                    // Not ready yet: the readiness transition will pick up the latest filters
                    pending = true;
                }
            }
        }
    })
}

fn spawn_jobs_request<S, E>(
    seq: u64,
    request: FilterState,
    source: Arc<S>,
    tx: mpsc::Sender<E>,
    cancel: CancellationToken,
) where
    S: JobSource,
    E: From<ListingEvent> + Send + 'static,
{
    tokio::spawn(async move {
        let fetch = tokio::spawn(async move { source.fetch_jobs(&request).await });
        let abort = fetch.abort_handle();

        tokio::select! {
            _ = cancel.cancelled() => abort.abort(),
            joined = fetch => {
                let result = flatten_join(joined);
                send_event(&tx, ListingEvent::JobsLoaded { seq, result }).await;
            }
        }
    });
}

/// Spawn the companies fetcher task (one request, once the session is ready)
pub fn spawn_company_fetcher<S, E>(
    source: Arc<S>,
    mut ready: watch::Receiver<bool>,
    tx: mpsc::Sender<E>,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: JobSource,
    E: From<ListingEvent> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => return,
            became_ready = async { ready.wait_for(|r| *r).await.map(|_| ()) } => {
                if became_ready.is_err() {
                    return; // Session dropped before it was ready
                }
            }
        }

        if !send_event(&tx, ListingEvent::CompaniesRequested { seq: 1 }).await {
            return;
        }

        let fetch = tokio::spawn(async move { source.fetch_companies().await });
        let abort = fetch.abort_handle();

        tokio::select! {
            _ = cancel.cancelled() => abort.abort(),
            joined = fetch => {
                let result = flatten_join(joined);
                send_event(&tx, ListingEvent::CompaniesLoaded { seq: 1, result }).await;
            }
        }
    })
}
