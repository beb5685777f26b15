use crossbeam_channel::Sender;
use rayon::ThreadPool;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

use super::pending::{PendingWork, WorkUnit};
use crate::errors::SearchError;
use crate::filters::{split_file_name, Query};
use crate::metrics::WalkMetrics;
use crate::results::FileMatch;

/// State shared by every walker task of one search
pub(crate) struct SearchRun {
    pub(crate) query: Query,
    pub(crate) extension_wildcard: String,
    pub(crate) sender: Sender<FileMatch>,
    pub(crate) pending: Arc<PendingWork>,
    pub(crate) pool: ThreadPool,
    pub(crate) metrics: Arc<WalkMetrics>,
    pub(crate) cancelled: Arc<AtomicBool>,
}

impl SearchRun {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Sends a match, blocking while the channel is full.
    /// Returns false once nobody is listening any more.
    fn publish(&self, file_match: FileMatch) -> bool {
        if self.is_cancelled() {
            return false;
        }
        match self.sender.send(file_match) {
            Ok(()) => {
                self.metrics.record_match_sent();
                true
            }
            Err(_) => {
                trace!("Result receiver dropped, cancelling search");
                self.cancelled.store(true, Ordering::Relaxed);
                false
            }
        }
    }
}

/// Runs `walk` for `directory` on the worker pool. `unit` is held until the
/// task is done with its own entries.
pub(crate) fn spawn(run: &Arc<SearchRun>, directory: PathBuf, unit: WorkUnit) {
    let task_run = Arc::clone(run);
    run.pool.spawn(move || {
        let _unit = unit;
        walk(&directory, &task_run);
    });
}

/// Lists `directory`, reports matching files and spawns a task per
/// subdirectory. A directory that cannot be listed yields nothing.
pub(crate) fn walk(directory: &Path, run: &Arc<SearchRun>) {
    trace!("Walking {}", directory.display());

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            run.metrics.record_dir_skipped();
            debug!("Skipping directory: {}", SearchError::from_io(directory, e));
            return;
        }
    };
    run.metrics.record_dir_visited();

    for entry in entries {
        if run.is_cancelled() {
            return;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                run.metrics.record_entry_skipped();
                debug!(
                    "Skipping unreadable entry in {}: {}",
                    directory.display(),
                    e
                );
                continue;
            }
        };

        // Symlinks are not followed: a link to a directory is scored like a file
        let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        if is_dir {
            spawn(run, entry.path(), WorkUnit::register(&run.pending));
            continue;
        }

        // A lossy name would point the match at a file that does not exist
        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(name) => {
                run.metrics.record_entry_skipped();
                debug!(
                    "Skipping non UTF-8 name {:?} in {}",
                    name,
                    directory.display()
                );
                continue;
            }
        };
        let (base_name, extension) = split_file_name(&file_name, &run.extension_wildcard);

        run.metrics
            .record_file_scanned(run.query.extension_matches(&extension));
        let Some(score) = run.query.evaluate(&base_name, &extension) else {
            continue;
        };

        if !run.publish(FileMatch::new(base_name, extension, directory, score)) {
            return;
        }
    }
}
