//! Async runtime and task management for the TUI
//!
//! Dual-channel event-driven architecture:
//! - Input channel (priority): user input events that are never dropped
//! - Data channel: fetch results, settled search input and spinner ticks
//!
//! The main loop uses `tokio::select!` with bias toward the input channel
//! to prevent input starvation under heavy data update loads.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::tui::app::App;
use crate::tui::event::{DataEvent, EventResult, InputEvent};

/// Channel capacities
const INPUT_CHANNEL_CAPACITY: usize = 16;
const DATA_CHANNEL_CAPACITY: usize = 32;

const SPINNER_TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Time allowed for background tasks to stop on shutdown
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

/// TUI runtime managing all background tasks
pub struct TuiRuntime {
    cancel_token: CancellationToken,
    task_handles: Vec<JoinHandle<()>>,
}

impl TuiRuntime {
    pub fn new() -> Self {
        Self {
            cancel_token: CancellationToken::new(),
            task_handles: Vec::new(),
        }
    }

    /// Get a clone of the cancellation token for spawning tasks
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Add a task handle to track
    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.task_handles.push(handle);
    }

    /// Signal shutdown and wait for tasks to complete
    pub async fn shutdown(self) {
        self.cancel_token.cancel();

        let shutdown = async {
            for handle in self.task_handles {
                let _ = handle.await;
            }
        };

        tokio::select! {
            _ = shutdown => {}
            _ = tokio::time::sleep(SHUTDOWN_TIMEOUT) => {
                tracing::warn!("Background tasks did not stop within {:?}", SHUTDOWN_TIMEOUT);
            }
        }
    }
}

/// Spawn the input event reader task
pub fn spawn_input_task(tx: mpsc::Sender<InputEvent>, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = EventStream::new();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            let input_event = match event {
                                Event::Key(key) => Some(InputEvent::Key(key)),
                                Event::Resize(..) => Some(InputEvent::Resize),
                                _ => None,
                            };

                            if let Some(evt) = input_event
                                && tx.send(evt).await.is_err()
                            {
                                break; // Receiver dropped
                            }
                        }
                        Some(Err(e)) => {
                            let is_fatal = matches!(
                                e.kind(),
                                std::io::ErrorKind::BrokenPipe
                                    | std::io::ErrorKind::ConnectionReset
                                    | std::io::ErrorKind::UnexpectedEof
                            );

                            if is_fatal {
                                tracing::info!("Terminal disconnected: {:?}", e);
                                break;
                            }
                            tracing::warn!("Terminal event read error: {:?}", e);
                        }
                        None => break, // Stream ended
                    }
                }
            }
        }
    })
}

/// Spawn the spinner tick task. Ticks are dropped when the data channel is full.
pub fn spawn_spinner_tick(tx: mpsc::Sender<DataEvent>, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SPINNER_TICK_INTERVAL);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let _ = tx.try_send(DataEvent::SpinnerTick);
                }
            }
        }
    })
}

/// Run the main TUI event loop
pub async fn run_event_loop(
    mut app: App,
    mut input_rx: mpsc::Receiver<InputEvent>,
    mut data_rx: mpsc::Receiver<DataEvent>,
    mut render_fn: impl FnMut(&App) -> Result<()>,
) -> Result<()> {
    let mut needs_render = true;

    loop {
        if needs_render {
            render_fn(&app)?;
            needs_render = false;
        }

        if !app.running {
            break;
        }

        tokio::select! {
            biased;

            Some(input) = input_rx.recv() => {
                match app.handle_input(input) {
                    EventResult::Continue => needs_render = true,
                    EventResult::Unchanged => {}
                    EventResult::Quit => break,
                }
            }

            Some(data) = data_rx.recv() => {
                match app.handle_data(data) {
                    EventResult::Continue => needs_render = true,
                    EventResult::Unchanged => {}
                    EventResult::Quit => break,
                }
            }

            else => break,
        }
    }

    Ok(())
}

/// Create the dual channels for the TUI
pub fn create_channels() -> (
    mpsc::Sender<InputEvent>,
    mpsc::Receiver<InputEvent>,
    mpsc::Sender<DataEvent>,
    mpsc::Receiver<DataEvent>,
) {
    let (input_tx, input_rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
    let (data_tx, data_rx) = mpsc::channel(DATA_CHANNEL_CAPACITY);
    (input_tx, input_rx, data_tx, data_rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoardConfig;
    use crate::session::SessionProfile;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::sync::watch;

    #[tokio::test(start_paused = true)]
    async fn test_runtime_shutdown_stops_tasks() {
        let mut runtime = TuiRuntime::new();
        let (_, _, data_tx, mut data_rx) = create_channels();
        runtime.track(spawn_spinner_tick(data_tx, runtime.cancel_token()));

        assert!(matches!(data_rx.recv().await, Some(DataEvent::SpinnerTick)));
        runtime.shutdown().await;

        // Drain buffered ticks; the channel closes once the task is gone
        while data_rx.recv().await.is_some() {}
    }

    #[tokio::test]
    async fn test_event_loop_renders_and_quits() {
        let (input_tx, input_rx, data_tx, data_rx) = create_channels();
        let (_ready_tx, ready_rx) = watch::channel(true);
        let cancel = CancellationToken::new();
        let app = App::new(
            BoardConfig::default(),
            Vec::new(),
            SessionProfile::default(),
            ready_rx,
            data_tx,
            &cancel,
        );

        input_tx
            .send(InputEvent::Key(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE)))
            .await
            .unwrap();
        input_tx
            .send(InputEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .await
            .unwrap();
        input_tx
            .send(InputEvent::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)))
            .await
            .unwrap();

        let mut renders = 0;
        run_event_loop(app, input_rx, data_rx, |_| {
            renders += 1;
            Ok(())
        })
        .await
        .unwrap();

        // Initial frame, help open, help closed
        assert_eq!(renders, 3);
    }
}
