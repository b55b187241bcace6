//! Progress reporting and cooperative cancellation for matrix builds.
//!
//! The builder reports an integer percentage in `[0, 100]` as rows complete.
//! Progress is advisory: sinks must not assume anything beyond at most one
//! call per completed row plus a leading 0.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, percent: u8);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _percent: u8) {}
}

impl<F> ProgressSink for F
where
    F: Fn(u8) + Send + Sync,
{
    fn on_progress(&self, percent: u8) {
        self(percent)
    }
}

/// Percentage after `completed_rows` of `total_rows` are done.
///
/// Never divides by `total_rows - 1`; a single-row build reaches 100 as soon
/// as its row completes, and an empty build is complete from the start.
pub(crate) fn row_percent(completed_rows: usize, total_rows: usize) -> u8 {
    if total_rows == 0 {
        return 100;
    }
    ((completed_rows.min(total_rows) * 100) / total_rows) as u8
}

/// Shared flag checked between matrix rows.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_percent() {
        assert_eq!(row_percent(0, 4), 0);
        assert_eq!(row_percent(1, 4), 25);
        assert_eq!(row_percent(4, 4), 100);
        assert_eq!(row_percent(1, 1), 100);
        assert_eq!(row_percent(0, 0), 100);
        assert_eq!(row_percent(2, 3), 66);
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_closure_sink() {
        let seen = std::sync::Mutex::new(Vec::new());
        let sink = |p: u8| seen.lock().unwrap().push(p);
        sink.on_progress(10);
        sink.on_progress(20);
        assert_eq!(*seen.lock().unwrap(), vec![10, 20]);
    }
}
