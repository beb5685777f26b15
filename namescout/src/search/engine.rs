use crossbeam_channel::{bounded, Receiver};
use rayon::ThreadPoolBuilder;
use std::env;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

use super::pending::{PendingWork, WorkUnit};
use super::walker::{self, SearchRun};
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::filters::Query;
use crate::metrics::{WalkMetrics, WalkStats};
use crate::results::{rank, FileMatch};
use crate::roots::RootEnumerator;

/// Searches the tree under each of `roots` concurrently.
///
/// Returns as soon as the walkers are started; matches arrive on the returned
/// [`MatchStream`] in whatever order the walkers find them, and the stream
/// ends once every walker, including all nested subdirectory walkers, has
/// finished.
pub fn search(query: Query, roots: Vec<PathBuf>, config: &SearchConfig) -> SearchResult<MatchStream> {
    start(query, roots, config, Arc::new(PendingWork::new()))
}

/// Starts the walkers against `pending`, which may already hold work of its
/// own; the stream stays open until that work is released too.
fn start(
    query: Query,
    roots: Vec<PathBuf>,
    config: &SearchConfig,
    pending: Arc<PendingWork>,
) -> SearchResult<MatchStream> {
    config.validate()?;

    info!(
        "Starting search for {}.{} in {} root(s)",
        query.base_name(),
        query.extension(),
        roots.len()
    );

    let pool = ThreadPoolBuilder::new()
        .num_threads(num_cpus::get())
        .thread_name(|i| format!("namescout-walker-{}", i))
        .build()
        .map_err(|e| SearchError::thread_pool(e.to_string()))?;

    let (sender, receiver) = bounded(config.channel_capacity);
    let metrics = Arc::new(WalkMetrics::new());
    let cancelled = Arc::new(AtomicBool::new(false));

    let run = Arc::new(SearchRun {
        query,
        extension_wildcard: config.extension_wildcard.clone(),
        sender,
        pending: Arc::clone(&pending),
        pool,
        metrics: Arc::clone(&metrics),
        cancelled: Arc::clone(&cancelled),
    });

    // Register every root before starting any, so an early finisher cannot
    // drive the count to zero while seeding is still in progress
    let units: Vec<WorkUnit> = roots.iter().map(|_| WorkUnit::register(&pending)).collect();
    for (root, unit) in roots.into_iter().zip(units) {
        debug!("Seeding walker at {}", root.display());
        walker::spawn(&run, root, unit);
    }

    let started = Instant::now();
    let monitor_metrics = Arc::clone(&metrics);
    thread::Builder::new()
        .name("namescout-monitor".to_string())
        .spawn(move || {
            run.pending.wait();
            // Last coordinator handle on the sender; the channel closes once
            // the finished walkers have dropped theirs
            drop(run);
            info!(
                "Search complete. Sent {} matches in {}",
                monitor_metrics.get_stats().matches_sent,
                humantime::format_duration(started.elapsed())
            );
        })?;

    Ok(MatchStream {
        receiver,
        pending,
        metrics,
        cancelled,
    })
}

/// Searches the current working directory
pub fn search_current_dir(query: Query, config: &SearchConfig) -> SearchResult<MatchStream> {
    let dir = env::current_dir().map_err(SearchError::WorkingDirectory)?;
    search(query, vec![dir], config)
}

/// Searches every root reported by `roots`
pub fn search_all_roots(
    query: Query,
    roots: &dyn RootEnumerator,
    config: &SearchConfig,
) -> SearchResult<MatchStream> {
    search(query, roots.enumerate_roots(), config)
}

/// Matches in the order the walkers find them.
///
/// Iteration blocks until the next match is available and ends when the whole
/// search has finished. Dropping the stream early stops the walkers: they
/// spawn no further tasks and publish nothing more.
pub struct MatchStream {
    receiver: Receiver<FileMatch>,
    pending: Arc<PendingWork>,
    metrics: Arc<WalkMetrics>,
    cancelled: Arc<AtomicBool>,
}

impl MatchStream {
    /// Counters for the walk so far
    pub fn stats(&self) -> WalkStats {
        self.metrics.get_stats()
    }

    /// Logs the walk counters
    pub fn log_stats(&self) {
        self.metrics.log_stats();
    }

    /// Number of walker tasks still running or queued
    pub fn outstanding(&self) -> usize {
        self.pending.outstanding()
    }

    /// Asks the walkers to stop. Matches already buffered can still be read.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Drains the stream and returns the matches best first
    pub fn collect_ranked(self) -> Vec<FileMatch> {
        let mut matches: Vec<FileMatch> = self.collect();
        rank(&mut matches);
        matches
    }
}

impl Iterator for MatchStream {
    type Item = FileMatch;

    fn next(&mut self) -> Option<FileMatch> {
        self.receiver.recv().ok()
    }
}

impl Drop for MatchStream {
    fn drop(&mut self) {
        self.cancel();
    }
}
