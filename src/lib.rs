//! # foldex
//!
//! Depth-first folder traversal and name search.
//!
//! foldex walks a directory subtree, classifies every node, applies a
//! hidden-entry policy and hands back two ordered records: the nodes it
//! visited and the nodes it could not. Name search, shallow listings and
//! recursive queries are all built on that one walk.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! // Is there anything called "invoice" under /srv/share, in any case?
//! let found = foldex::search("/srv/share", "invoice")
//!     .case_sensitive(false)
//!     .run(true)?;
//!
//! // Every node under the root, plus the ones that could not be read.
//! let result = foldex::walk("/srv/share", true)?.without_root();
//! println!("{} visited, {} failed", result.visited.len(), result.failed.len());
//! # Ok::<(), foldex::FoldexError>(())
//! ```
//!
//! # Hidden entries
//!
//! With `show_hidden = true` non-hidden directories are recorded after their
//! contents, and the root comes last; [`TraversalResult::without_root`] drops
//! it. Files are recorded whether hidden or not. With `show_hidden = false`
//! only files are recorded.
//!
//! # Failures
//!
//! Only a missing or unreadable root is an error. Every other node that
//! cannot be visited lands in [`TraversalResult::failed`] and the walk goes on.
//!
//! # Custom visitors
//!
//! Implement [`Visitor`] and hand it to [`engine::drive`] to receive the raw
//! enter/file/leave/failed events:
//!
//! ```rust,no_run
//! use std::path::Path;
//! use foldex::engine::{drive, WalkConfig};
//! use foldex::{FoldexError, Visitor};
//!
//! #[derive(Default)]
//! struct Counter { files: usize, dirs: usize }
//!
//! impl Visitor for Counter {
//!     fn on_visit_file(&mut self, _file: &Path) { self.files += 1; }
//!     fn on_leave_directory(&mut self, _dir: &Path) { self.dirs += 1; }
//!     fn on_visit_failed(&mut self, _path: &Path, _error: &FoldexError) {}
//! }
//!
//! let mut counter = Counter::default();
//! drive(Path::new("/srv/share"), &WalkConfig::default(), &mut counter)?;
//! # Ok::<(), FoldexError>(())
//! ```

#![forbid(unsafe_code)]

pub mod engine;

mod builder;
mod classifier;
mod entry;
mod error;
mod item;
mod results;
mod search;
mod traits;
mod visitor;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SearchBuilder;
pub use classifier::PlatformClassifier;
pub use entry::{EntryKind, EntryKindFilter};
pub use error::FoldexError;
pub use item::Item;
pub use results::TraversalResult;
pub use search::{NameMatcher, SearchConfig, SearchEngine};
pub use traits::{Classifier, Matcher, Visitor};
pub use visitor::FolderVisitor;

use std::path::Path;

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a [`SearchBuilder`] looking for `key` under `root`.
///
/// Defaults to case-sensitive substring matching on base names.
pub fn search(root: impl Into<std::path::PathBuf>, key: impl Into<String>) -> SearchBuilder {
    SearchBuilder::new(root, key)
}

/// Walk `root` with the platform classifier.
///
/// The result is raw: with `show_hidden` and a non-hidden root, the root is
/// the last visited entry.
///
/// # Errors
///
/// [`FoldexError::RootNotFound`] if `root` is missing or unreadable.
pub fn walk(root: impl AsRef<Path>, show_hidden: bool) -> Result<TraversalResult, FoldexError> {
    engine::walk_tree(root.as_ref(), &engine::WalkConfig::new(show_hidden), &PlatformClassifier)
}
