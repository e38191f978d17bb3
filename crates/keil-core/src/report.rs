//! Progress reporting sinks
//!
//! The engine never prints. It hands each human-readable message to a
//! [`Reporter`], so a console, a log file or a UI thread can all consume
//! the same stream.

use std::sync::{Arc, Mutex};

/// Receives one human-readable message per call.
///
/// Implementations should return quickly; a sink that feeds a UI thread
/// should queue the message rather than block on the UI.
pub trait Reporter: Send {
    fn report(&self, message: &str);
}

impl<F> Reporter for F
where
    F: Fn(&str) + Send,
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Forwards messages to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, message: &str) {
        tracing::info!(target: "keil_sync", "{message}");
    }
}

/// Buffers messages in memory; clones share the same buffer.
///
/// Useful in tests and for front ends that drain messages on their own thread.
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every message so far.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Remove and return every message so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    /// Whether any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lock().iter().any(|m| m.contains(needle))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_reporter_shares_buffer() {
        let reporter = CollectingReporter::new();
        let clone = reporter.clone();

        clone.report("first");
        reporter.report("second");

        assert_eq!(reporter.messages(), vec!["first", "second"]);
        assert!(reporter.contains("sec"));
        assert_eq!(clone.take().len(), 2);
        assert!(reporter.messages().is_empty());
    }

    #[test]
    fn test_closure_is_a_reporter() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |m: &str| seen.lock().unwrap().push(m.len())
        };

        sink.report("abc");

        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_tracing_reporter_does_not_panic_without_subscriber() {
        TracingReporter.report("no subscriber installed");
    }
}
