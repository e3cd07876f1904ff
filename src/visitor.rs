use std::path::Path;

use tracing::{trace, warn};

use crate::error::FoldexError;
use crate::results::TraversalResult;
use crate::traits::{Classifier, Visitor};

/// The collecting visitor behind [`walk_tree`](crate::engine::walk_tree).
///
/// Hidden-entry policy:
/// - files are recorded whenever they are visited, hidden or not. With
///   `show_hidden` the hidden probe still runs, and a failing probe diverts
///   the file to `failed`.
/// - directories are recorded on the way out, only with `show_hidden`, and
///   only when they are not hidden.
pub struct FolderVisitor<'c> {
    show_hidden: bool,
    classifier:  &'c dyn Classifier,
    result:      TraversalResult,
}

impl<'c> FolderVisitor<'c> {
    pub fn new(root: &Path, show_hidden: bool, classifier: &'c dyn Classifier) -> Self {
        Self {
            show_hidden,
            classifier,
            result: TraversalResult::new(root.to_path_buf()),
        }
    }

    /// Finish the walk and hand over the collected paths.
    pub fn into_result(self) -> TraversalResult {
        self.result
    }

    fn probe_failed(&mut self, path: &Path, source: std::io::Error) {
        let err = FoldexError::HiddenTest {
            path: path.to_path_buf(),
            source,
        };
        warn!(path = %path.display(), error = %err, "hidden probe failed");
        self.result.failed.push(path.to_path_buf());
    }
}

impl Visitor for FolderVisitor<'_> {
    fn on_visit_file(&mut self, file: &Path) {
        if self.show_hidden {
            match self.classifier.is_hidden(file) {
                Ok(hidden) => trace!(path = %file.display(), hidden, "file"),
                Err(source) => {
                    self.probe_failed(file, source);
                    return;
                }
            }
        }
        self.result.visited.push(file.to_path_buf());
    }

    fn on_leave_directory(&mut self, dir: &Path) {
        if !self.show_hidden {
            return;
        }
        match self.classifier.is_hidden(dir) {
            Ok(false) => self.result.visited.push(dir.to_path_buf()),
            Ok(true)  => trace!(path = %dir.display(), "skipping hidden directory"),
            Err(source) => self.probe_failed(dir, source),
        }
    }

    fn on_visit_failed(&mut self, path: &Path, error: &FoldexError) {
        warn!(path = %path.display(), error = %error, "visit failed");
        self.result.failed.push(path.to_path_buf());
    }
}
