pub mod config;
pub mod errors;
pub mod filters;
pub mod metrics;
pub mod results;
pub mod roots;
pub mod search;
pub mod similarity;

pub use config::SearchConfig;
pub use errors::{SearchError, SearchResult};
pub use filters::{split_file_name, Query};
pub use results::FileMatch;
pub use roots::{FixedRoots, RootEnumerator, SystemRoots};
pub use search::{search, search_all_roots, search_current_dir, MatchStream};
pub use similarity::{edit_distance, similarity};
