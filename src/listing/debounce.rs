//! Debounced dispatch of rapidly changing input
//!
//! A `Debouncer` owns one background task for its whole lifetime. Values
//! pushed faster than the quiet window are coalesced and only the last one is
//! forwarded. Dropping the debouncer (or cancelling the parent token) stops
//! the task; a value still waiting for its window is never delivered.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Coalesces values and forwards the last one after a quiet period
#[derive(Debug)]
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debounce task. Emitted values are mapped with `wrap` and
    /// sent on `out`.
    pub fn spawn<E, F>(
        window: Duration,
        out: mpsc::Sender<E>,
        wrap: F,
        parent: &CancellationToken,
    ) -> Self
    where
        E: Send + 'static,
        F: Fn(T) -> E + Send + 'static,
    {
        let (input, rx) = mpsc::unbounded_channel();
        let cancel = parent.child_token();
        let handle = tokio::spawn(run_debounce(window, rx, out, wrap, cancel.clone()));

        Self {
            input,
            cancel,
            handle: Some(handle),
        }
    }

    /// Queue a value. Never blocks; a value pushed after teardown is dropped.
    pub fn push(&self, value: T) {
        if self.input.send(value).is_err() {
            tracing::debug!("Debounce task gone, dropping input");
        }
    }

    /// Stop the task and wait for it to exit
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_debounce<T, E, F>(
    window: Duration,
    mut rx: mpsc::UnboundedReceiver<T>,
    out: mpsc::Sender<E>,
    wrap: F,
    cancel: CancellationToken,
) where
    F: Fn(T) -> E,
{
    let mut pending: Option<T> = None;
    let timer = tokio::time::sleep(window);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => break,

            maybe_value = rx.recv() => match maybe_value {
                Some(value) => {
                    pending = Some(value);
                    timer.as_mut().reset(Instant::now() + window);
                }
                None => break,
            },

            _ = &mut timer, if pending.is_some() => {
                if let Some(value) = pending.take()
                    && out.send(wrap(value)).await.is_err()
                {
                    break; // Receiver dropped
                }
            }
        }
    }
}
