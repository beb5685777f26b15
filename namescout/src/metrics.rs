use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Counters shared by every walker task of one search
#[derive(Debug, Default)]
pub struct WalkMetrics {
    dirs_visited: AtomicU64,
    dirs_skipped: AtomicU64,
    entries_skipped: AtomicU64,
    files_scanned: AtomicU64,
    files_scored: AtomicU64,
    matches_sent: AtomicU64,
}

impl WalkMetrics {
    /// Creates a new WalkMetrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a directory whose entries were listed
    pub fn record_dir_visited(&self) {
        self.dirs_visited.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a directory that could not be listed
    pub fn record_dir_skipped(&self) {
        self.dirs_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an entry of a listed directory that was passed over, either
    /// unreadable or with a name that is not valid UTF-8
    pub fn record_entry_skipped(&self) {
        self.entries_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a file considered by the match filter
    pub fn record_file_scanned(&self, scored: bool) {
        self.files_scanned.fetch_add(1, Ordering::Relaxed);
        if scored {
            self.files_scored.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Records a match delivered to the result channel
    pub fn record_match_sent(&self) {
        self.matches_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets a snapshot of the counters
    pub fn get_stats(&self) -> WalkStats {
        WalkStats {
            dirs_visited: self.dirs_visited.load(Ordering::Relaxed),
            dirs_skipped: self.dirs_skipped.load(Ordering::Relaxed),
            entries_skipped: self.entries_skipped.load(Ordering::Relaxed),
            files_scanned: self.files_scanned.load(Ordering::Relaxed),
            files_scored: self.files_scored.load(Ordering::Relaxed),
            matches_sent: self.matches_sent.load(Ordering::Relaxed),
        }
    }

    /// Logs current walk statistics
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Walk stats:\n\
             Directories visited/skipped: {}/{}\n\
             Entries skipped: {}\n\
             Files scanned/scored: {}/{}\n\
             Matches sent: {}",
            stats.dirs_visited,
            stats.dirs_skipped,
            stats.entries_skipped,
            stats.files_scanned,
            stats.files_scored,
            stats.matches_sent
        );
    }
}

/// Statistics about a walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub dirs_visited: u64,
    pub dirs_skipped: u64,
    pub entries_skipped: u64,
    pub files_scanned: u64,
    pub files_scored: u64,
    pub matches_sent: u64,
}
