use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// A file whose name is close enough to the query to be reported.
///
/// Created by a walker and handed to the consumer through the result channel;
/// it is never modified after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMatch {
    /// File name without the extension
    pub base_name: String,
    /// Extension without the dot, or the wildcard when the file has none
    pub extension: String,
    /// Directory the file was found in
    pub directory: PathBuf,
    /// Similarity to the target name, in `[0, 1]`
    pub score: f64,
}

impl FileMatch {
    pub fn new(
        base_name: impl Into<String>,
        extension: impl Into<String>,
        directory: impl Into<PathBuf>,
        score: f64,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            extension: extension.into(),
            directory: directory.into(),
            score,
        }
    }

    /// `base.extension`, as displayed to the user
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.base_name, self.extension)
    }

    /// Full path of the matched file
    pub fn path(&self) -> PathBuf {
        self.directory.join(self.file_name())
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Score as a whole percentage, rounded to nearest
    pub fn percent(&self) -> u32 {
        (self.score * 100.0).round() as u32
    }

    /// Orders by descending score, then by path so ties are stable
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.directory.cmp(&other.directory))
            .then_with(|| self.base_name.cmp(&other.base_name))
            .then_with(|| self.extension.cmp(&other.extension))
    }
}

impl fmt::Display for FileMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is a {}% match", self.file_name(), self.percent())
    }
}

/// Sorts matches best first
pub fn rank(matches: &mut [FileMatch]) {
    matches.sort_by(FileMatch::rank_cmp);
}
