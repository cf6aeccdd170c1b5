use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::trace;

/// Coalesces bursts of values: only the last value of a burst is emitted, once
/// no new value has arrived for `window`.
///
/// Must be created inside a tokio runtime. Dropping the handle cancels any
/// pending emission.
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(window: Duration, mut emit: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();
        let task = tokio::spawn(async move {
            while let Some(mut latest) = rx.recv().await {
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => latest = value,
                            None => return,
                        },
                        () = tokio::time::sleep(window) => break,
                    }
                }
                emit(latest);
            }
        });

        Self { tx, task }
    }

    pub fn call(&self, value: T) {
        if self.tx.send(value).is_err() {
            trace!("debouncer task has stopped; value dropped");
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
