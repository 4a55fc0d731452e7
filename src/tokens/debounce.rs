/// Quiet-period debouncing of search input
///
/// Every value pushed restarts the timer. When the input stays quiet for the
/// configured delay, only the most recent value is emitted. Dropping the
/// `Debouncer` cancels anything still pending and closes the output.
use crate::config::SearchConfig;
use crate::logger::{self, LogTag};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debounce task on the current tokio runtime
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<T>();
        let (output_tx, output_rx) = mpsc::unbounded_channel::<T>();

        tokio::spawn(async move {
            while let Some(first) = input_rx.recv().await {
                let mut pending = first;
                let mut superseded = 0usize;

                loop {
                    match timeout(delay, input_rx.recv()).await {
                        Ok(Some(next)) => {
                            pending = next;
                            superseded += 1;
                        }
                        Ok(None) => {
                            logger::debug(LogTag::Search, "Debounce input closed, pending value dropped");
                            return;
                        }
                        Err(_) => break,
                    }
                }

                if superseded > 0 {
                    logger::verbose(
                        LogTag::Search,
                        &format!("Debounce collapsed {} superseded inputs", superseded),
                    );
                }
                if output_tx.send(pending).is_err() {
                    return;
                }
            }
        });

        (Self { input: input_tx }, output_rx)
    }

    /// Spawn with the quiet period from `search.debounce_ms`
    pub fn from_config(config: &SearchConfig) -> (Self, mpsc::UnboundedReceiver<T>) {
        Self::spawn(Duration::from_millis(config.debounce_ms))
    }

    /// Push a new value, restarting the quiet period
    ///
    /// Returns false once the output side has gone away.
    pub fn push(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }
}
