//! Where an "all volumes" search starts.
//!
//! Listing storage volumes is platform specific, so the engine only sees the
//! [`RootEnumerator`] trait.
use std::path::PathBuf;
use tracing::debug;

/// Supplies the root directories of an all-volumes search
pub trait RootEnumerator: Send + Sync {
    fn enumerate_roots(&self) -> Vec<PathBuf>;
}

/// The volumes of the machine we are running on.
///
/// On Windows this is every drive letter whose root exists; elsewhere the
/// whole filesystem hangs off `/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRoots;

impl RootEnumerator for SystemRoots {
    #[cfg(windows)]
    fn enumerate_roots(&self) -> Vec<PathBuf> {
        let roots: Vec<PathBuf> = (b'A'..=b'Z')
            .map(|letter| PathBuf::from(format!("{}:\\", letter as char)))
            .filter(|root| root.exists())
            .collect();
        debug!("Found {} drives: {:?}", roots.len(), roots);
        roots
    }

    #[cfg(not(windows))]
    fn enumerate_roots(&self) -> Vec<PathBuf> {
        debug!("Using / as the only root");
        vec![PathBuf::from("/")]
    }
}

/// A caller-supplied list of roots
#[derive(Debug, Clone, Default)]
pub struct FixedRoots(pub Vec<PathBuf>);

impl RootEnumerator for FixedRoots {
    fn enumerate_roots(&self) -> Vec<PathBuf> {
        self.0.clone()
    }
}
