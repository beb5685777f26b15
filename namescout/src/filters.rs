//! Decides which files are worth reporting.
//!
//! A candidate passes when its extension agrees with the query (unless the
//! query uses the wildcard) and its base name is similar enough to the target.
//! The extension check runs first so mismatched files are never scored.
use crate::config::SearchConfig;
use crate::similarity::similarity;

/// Splits a file name at its last `.` into base name and extension.
///
/// A name without any `.` gets `wildcard` as its extension. A leading dot is
/// still a separator, so `.bashrc` splits into `""` and `"bashrc"`.
pub fn split_file_name(file_name: &str, wildcard: &str) -> (String, String) {
    match file_name.rfind('.') {
        Some(index) => (
            file_name[..index].to_string(),
            file_name[index + 1..].to_string(),
        ),
        None => (file_name.to_string(), wildcard.to_string()),
    }
}

/// What to look for. Built once per search and shared read-only by every walker.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    base_name: String,
    extension: String,
    extension_sensitive: bool,
    threshold: f64,
}

impl Query {
    /// Creates a query for `base_name` with `extension`. Passing the configured
    /// wildcard as the extension accepts files with any extension.
    pub fn new(
        base_name: impl Into<String>,
        extension: impl Into<String>,
        config: &SearchConfig,
    ) -> Self {
        let extension = extension.into();
        Self {
            base_name: base_name.into(),
            extension_sensitive: extension != config.extension_wildcard,
            extension,
            threshold: config.threshold,
        }
    }

    /// Creates a query from a raw file name such as `report.txt` or `report`
    pub fn from_file_name(file_name: &str, config: &SearchConfig) -> Self {
        let (base_name, extension) = split_file_name(file_name, &config.extension_wildcard);
        Self::new(base_name, extension, config)
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn extension_sensitive(&self) -> bool {
        self.extension_sensitive
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Checks the candidate's extension against the query, byte for byte
    pub fn extension_matches(&self, extension: &str) -> bool {
        !self.extension_sensitive || extension == self.extension
    }

    /// Returns the candidate's score if it should be reported
    pub fn evaluate(&self, base_name: &str, extension: &str) -> Option<f64> {
        if !self.extension_matches(extension) {
            return None;
        }
        let score = similarity(base_name, &self.base_name);
        (score >= self.threshold).then_some(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SearchConfig {
        SearchConfig::default()
    }

    #[test]
    fn test_split_file_name() {
        assert_eq!(
            split_file_name("report.txt", "*"),
            ("report".to_string(), "txt".to_string())
        );
        assert_eq!(
            split_file_name("archive.tar.gz", "*"),
            ("archive.tar".to_string(), "gz".to_string())
        );
        assert_eq!(
            split_file_name("Makefile", "*"),
            ("Makefile".to_string(), "*".to_string())
        );
        assert_eq!(
            split_file_name(".bashrc", "*"),
            (String::new(), "bashrc".to_string())
        );
        assert_eq!(
            split_file_name("trailing.", "*"),
            ("trailing".to_string(), String::new())
        );
    }

    #[test]
    fn test_query_from_file_name() {
        let query = Query::from_file_name("report.txt", &config());
        assert_eq!(query.base_name(), "report");
        assert_eq!(query.extension(), "txt");
        assert!(query.extension_sensitive());
        assert_eq!(query.threshold(), 0.75);

        let query = Query::from_file_name("report", &config());
        assert_eq!(query.extension(), "*");
        assert!(!query.extension_sensitive());
    }

    #[test]
    fn test_custom_wildcard() {
        let config = SearchConfig {
            extension_wildcard: "any".to_string(),
            ..SearchConfig::default()
        };
        let query = Query::from_file_name("report", &config);
        assert_eq!(query.extension(), "any");
        assert!(!query.extension_sensitive());

        // "*" is an ordinary extension once the wildcard is something else
        let query = Query::new("report", "*", &config);
        assert!(query.extension_sensitive());
    }

    #[test]
    fn test_rejects_wrong_extension_regardless_of_score() {
        let query = Query::from_file_name("report.txt", &config());
        assert_eq!(query.evaluate("report", "md"), None);
        assert_eq!(query.evaluate("report", "TXT"), None);
        assert_eq!(query.evaluate("report", "*"), None);
    }

    #[test]
    fn test_wildcard_accepts_any_extension() {
        let query = Query::from_file_name("report", &config());
        assert_eq!(query.evaluate("report", "md"), Some(1.0));
        assert_eq!(query.evaluate("report", "*"), Some(1.0));
    }

    #[test]
    fn test_threshold_boundary() {
        let query = Query::new("abcd", "*", &config());
        // 1 - 1/4 is exactly 0.75
        assert_eq!(query.evaluate("abce", "txt"), Some(0.75));

        let strict = SearchConfig {
            threshold: 0.7501,
            ..SearchConfig::default()
        };
        let query = Query::new("abcd", "*", &strict);
        assert_eq!(query.evaluate("abce", "txt"), None);
    }

    #[test]
    fn test_report_candidates() {
        let query = Query::from_file_name("report.txt", &config());
        assert_eq!(query.evaluate("report", "txt"), Some(1.0));

        let score = query.evaluate("reports", "txt").unwrap();
        assert!((score - 6.0 / 7.0).abs() < 1e-9);

        assert_eq!(query.evaluate("repotr", "txt"), None);
    }
}
