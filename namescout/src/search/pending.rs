//! Outstanding-work counter for a search with dynamic fan-out.
//!
//! Every walker task owns one [`WorkUnit`]. The unit is registered before the
//! task is spawned and released when it is dropped, so a finished (or
//! panicked) task always gives its unit back. [`PendingWork::wait`] returns
//! once the count drops to zero.
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct PendingWork {
    count: Mutex<usize>,
    drained: Condvar,
}

impl PendingWork {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // The count is a plain integer; a panicking holder cannot leave it torn
        self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of units not yet released
    pub fn outstanding(&self) -> usize {
        *self.lock()
    }

    fn register(&self) {
        *self.lock() += 1;
    }

    fn release(&self) {
        let mut count = self.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.drained.notify_all();
        }
    }

    /// Blocks until every registered unit has been released
    pub fn wait(&self) {
        let mut count = self.lock();
        while *count > 0 {
            count = self
                .drained
                .wait(count)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

/// One registered unit of outstanding work, released on drop
#[derive(Debug)]
pub struct WorkUnit {
    pending: Arc<PendingWork>,
}

impl WorkUnit {
    pub fn register(pending: &Arc<PendingWork>) -> Self {
        pending.register();
        Self {
            pending: Arc::clone(pending),
        }
    }
}

impl Drop for WorkUnit {
    fn drop(&mut self) {
        self.pending.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_wait_returns_immediately_when_idle() {
        let pending = PendingWork::new();
        pending.wait();
        assert_eq!(pending.outstanding(), 0);
    }

    #[test]
    fn test_units_register_and_release() {
        let pending = Arc::new(PendingWork::new());
        let a = WorkUnit::register(&pending);
        let b = WorkUnit::register(&pending);
        assert_eq!(pending.outstanding(), 2);
        drop(a);
        assert_eq!(pending.outstanding(), 1);
        drop(b);
        assert_eq!(pending.outstanding(), 0);
    }

    #[test]
    fn test_wait_blocks_until_nested_work_finishes() {
        let pending = Arc::new(PendingWork::new());
        let finished = Arc::new(AtomicBool::new(false));

        let root = WorkUnit::register(&pending);
        let handle = {
            let pending = Arc::clone(&pending);
            let finished = Arc::clone(&finished);
            thread::spawn(move || {
                // Child registered before the parent lets go
                let child = WorkUnit::register(&pending);
                drop(root);
                thread::sleep(Duration::from_millis(100));
                finished.store(true, Ordering::SeqCst);
                drop(child);
            })
        };

        pending.wait();
        assert!(finished.load(Ordering::SeqCst));
        handle.join().unwrap();
    }

    #[test]
    fn test_unit_released_on_panic() {
        let pending = Arc::new(PendingWork::new());
        let unit = WorkUnit::register(&pending);
        let result = thread::spawn(move || {
            let _unit = unit;
            panic!("walker failed");
        })
        .join();
        assert!(result.is_err());
        pending.wait();
        assert_eq!(pending.outstanding(), 0);
    }
}
