//! Concurrent name search across directory trees.
//!
//! # How a search runs
//!
//! A search is a scatter/gather with a fan-out that is only discovered while
//! walking:
//!
//! 1. **Seeding**: the coordinator registers one unit of pending work per
//!    root and spawns a walker task for each on a dedicated Rayon pool.
//! 2. **Walking**: each walker lists one directory. Files go through the
//!    [`Query`](crate::filters::Query) filter and matches are sent on a
//!    bounded crossbeam channel. Every subdirectory registers another unit
//!    and becomes its own task.
//! 3. **Draining**: a monitor thread waits for the pending count to reach
//!    zero and drops the coordinator's sender. When the last walker has
//!    dropped its own, the channel closes and [`MatchStream`] ends.
//!
//! ```rust,ignore
//! let config = SearchConfig::default();
//! let query = Query::from_file_name("report.txt", &config);
//! for file_match in search_current_dir(query, &config)? {
//!     println!("{}", file_match);
//! }
//! ```
//!
//! # Backpressure
//!
//! The channel holds `channel_capacity` matches. A walker that finds a match
//! while the channel is full blocks until the consumer reads one, so a slow
//! consumer throttles the walk instead of buffering without bound.
//!
//! # Failures
//!
//! A directory that cannot be listed (missing, permission denied, not a
//! directory) is logged at `debug` level, counted in [`WalkStats`], and
//! contributes no matches. Siblings and ancestors keep going and the search
//! still ends normally.
//!
//! [`WalkStats`]: crate::metrics::WalkStats
pub mod engine;
mod pending;
mod walker;

pub use engine::{search, search_all_roots, search_current_dir, MatchStream};
