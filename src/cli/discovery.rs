//! Test project discovery
//!
//! Walks a folder depth-first and lazily yields every file whose name ends with the
//! test-project suffix (`Tests.csproj` by default, compared ASCII case-insensitively).
//!
//! ## Ordering
//!
//! Within a directory, files come before subdirectories. Apart from that, entries are
//! visited in whatever order the filesystem lists them, so the run order can differ
//! between machines. Nothing is sorted by name.
//!
//! ## Symlinks
//!
//! Symlinked directories are never descended into, which keeps the walk free of
//! cycles. A symlink pointing at a regular file is treated as that file.

use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::test_interfaces::TestError;

/// Default test-project marker suffix.
pub const DEFAULT_PROJECT_SUFFIX: &str = "Tests.csproj";

/// Returns true if `file_name` ends with `suffix`, ignoring ASCII case.
pub fn is_test_project(file_name: &OsStr, suffix: &str) -> bool {
    let name = file_name.as_encoded_bytes();
    let suffix = suffix.as_bytes();
    name.len() >= suffix.len() && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Lazy iterator over the test projects beneath a root directory.
///
/// The first filesystem error ends the useful part of the walk: callers are expected to
/// stop at the first `Err` item.
pub struct ProjectWalker {
    inner: walkdir::IntoIter,
    suffix: String,
}

impl ProjectWalker {
    pub fn new(root: impl AsRef<Path>, suffix: impl Into<String>) -> Self {
        let inner = WalkDir::new(root)
            .follow_links(false)
            .sort_by(files_first)
            .into_iter();
        Self {
            inner,
            suffix: suffix.into(),
        }
    }
}

impl Iterator for ProjectWalker {
    type Item = Result<PathBuf, TestError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(TestError::from_walk(err))),
            };

            if entry.depth() == 0 {
                if entry.file_type().is_dir() {
                    continue;
                }
                return Some(Err(TestError::NotADirectory(entry.into_path())));
            }

            if entry.file_type().is_dir() || !is_test_project(entry.file_name(), &self.suffix) {
                continue;
            }

            // Dangling links and links to directories are not projects.
            if entry.file_type().is_symlink() && !entry.path().is_file() {
                continue;
            }

            tracing::debug!(project = %entry.path().display(), "discovered test project");
            return Some(Ok(entry.into_path()));
        }
    }
}

/// Stable ordering that moves files ahead of directories and keeps the listing order otherwise.
fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type().is_dir().cmp(&b.file_type().is_dir())
}
