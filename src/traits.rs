use std::io;
use std::path::Path;

use crate::entry::EntryKind;
use crate::error::FoldexError;

/// Classifies filesystem nodes: what kind they are and whether they are hidden.
///
/// Implement this to change what "hidden" means (e.g. to honour a custom
/// attribute) or to inject failures in tests. The default is
/// [`PlatformClassifier`](crate::PlatformClassifier).
///
/// # Error Handling
///
/// A failed probe is not fatal. The collecting visitor records the node in
/// [`TraversalResult::failed`](crate::TraversalResult::failed) and the walk
/// continues.
///
/// # Example
///
/// ```rust
/// use std::io;
/// use std::path::Path;
/// use foldex::{Classifier, EntryKind, PlatformClassifier};
///
/// /// Treats `~`-suffixed backup files as hidden too.
/// struct BackupsHidden;
///
/// impl Classifier for BackupsHidden {
///     fn kind(&self, path: &Path) -> io::Result<EntryKind> {
///         PlatformClassifier.kind(path)
///     }
///
///     fn is_hidden(&self, path: &Path) -> io::Result<bool> {
///         let backup = path
///             .file_name()
///             .map(|n| n.to_string_lossy().ends_with('~'))
///             .unwrap_or(false);
///         Ok(backup || PlatformClassifier.is_hidden(path)?)
///     }
/// }
/// ```
pub trait Classifier: Send + Sync {
    /// The kind of node at `path`.
    fn kind(&self, path: &Path) -> io::Result<EntryKind>;

    /// Whether the node at `path` is hidden by platform convention.
    fn is_hidden(&self, path: &Path) -> io::Result<bool>;
}

/// Receives the events of a depth-first walk.
///
/// Driven by [`engine::drive`](crate::engine::drive). Directories are entered
/// before their contents and left after them; every other node is a file
/// visit. A node that could not be visited is reported once through
/// `on_visit_failed` and gets no other event.
pub trait Visitor {
    /// Called before a directory's children. No-op by default.
    fn on_enter_directory(&mut self, _dir: &Path) {}

    /// Called for every non-directory node.
    fn on_visit_file(&mut self, file: &Path);

    /// Called once all of a directory's children have been processed.
    fn on_leave_directory(&mut self, dir: &Path);

    /// Called for a node the walker could not visit.
    fn on_visit_failed(&mut self, path: &Path, error: &FoldexError);
}

/// Decides whether a base name matches.
///
/// [`NameMatcher`](crate::NameMatcher) covers exact and substring matching;
/// implement this for globs, regexes, or anything else and hand it to
/// [`SearchEngine::with_matcher`](crate::SearchEngine::with_matcher).
///
/// # Example
///
/// ```rust
/// use foldex::Matcher;
///
/// struct Extension(&'static str);
///
/// impl Matcher for Extension {
///     fn is_match(&self, name: &str) -> bool {
///         name.rsplit_once('.').map(|(_, ext)| ext == self.0).unwrap_or(false)
///     }
/// }
///
/// assert!(Extension("rs").is_match("main.rs"));
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if `name` is a match.
    fn is_match(&self, name: &str) -> bool;
}
