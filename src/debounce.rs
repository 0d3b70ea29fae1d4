//! Trailing-edge debouncer
//!
//! Values pushed in quick succession are coalesced: only the last value of a
//! burst is committed, once `delay` has passed without further input. The
//! committed value is published through a `watch` channel so any number of
//! consumers can await changes.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Debounces a stream of values of type `T`.
///
/// Must be created inside a tokio runtime. Dropping the debouncer cancels any
/// pending emission.
#[derive(Debug)]
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    output: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a debouncer whose committed value starts at `initial`.
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input, input_rx) = mpsc::unbounded_channel();
        let (output_tx, output) = watch::channel(initial);
        let task = tokio::spawn(run_debounce(input_rx, output_tx, delay));

        Self {
            input,
            output,
            task,
        }
    }

    /// Feed a new value. Restarts the quiet period.
    pub fn push(&self, value: T) {
        if self.input.send(value).is_err() {
            tracing::debug!("debouncer task has stopped; dropping value");
        }
    }

    /// The last committed value.
    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }

    /// A receiver that observes every committed value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }

    /// Wait for the next committed value.
    ///
    /// Returns `None` once the debouncer can no longer emit.
    pub async fn changed(&mut self) -> Option<T> {
        self.output.changed().await.ok()?;
        Some(self.output.borrow_and_update().clone())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_debounce<T>(
    mut input: mpsc::UnboundedReceiver<T>,
    output: watch::Sender<T>,
    delay: Duration,
) where
    T: PartialEq,
{
    while let Some(mut pending) = input.recv().await {
        // Drain further input until the quiet period elapses
        loop {
            match tokio::time::timeout(delay, input.recv()).await {
                Ok(Some(next)) => pending = next,
                Ok(None) => return,
                Err(_) => break,
            }
        }

        output.send_if_modified(move |current| {
            if *current == pending {
                false
            } else {
                *current = pending;
                true
            }
        });
    }
}
