use std::sync::atomic::{AtomicU64, Ordering};

/// Per-run counters shared by the dispatcher and every user worker.
#[derive(Debug, Default)]
pub struct RunStats {
    lines: AtomicU64,
    skipped: AtomicU64,
    sent: AtomicU64,
    failed: AtomicU64,
}

impl RunStats {
    pub fn record_line(&self) {
        self.lines.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sent(&self) {
        self.sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn lines(&self) -> u64 {
        self.lines.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: u64,
    pub skipped: u64,
    pub sent: u64,
    pub failed: u64,
    pub completed: u64,
    pub users: usize,
    pub deferred_dumplog: bool,
}

impl RunSummary {
    pub fn log(&self) {
        tracing::info!(
            "Run complete: {} line(s), {} skipped, {} sent, {} failed, {} completed, {} user(s){}",
            self.lines,
            self.skipped,
            self.sent,
            self.failed,
            self.completed,
            self.users,
            if self.deferred_dumplog {
                ", DUMPLOG sent last"
            } else {
                ""
            }
        );
    }
}
