use std::path::{Path, PathBuf};
use std::time::Instant;

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::error::FoldexError;
use crate::results::TraversalResult;
use crate::traits::{Classifier, Visitor};
use crate::visitor::FolderVisitor;

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Traversal parameters for a single walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkConfig {
    /// Record non-hidden directories (post-order) in addition to files, and
    /// run the hidden probe on every node.
    pub show_hidden:  bool,

    /// Enumerate siblings in file-name order instead of the platform's
    /// directory order.
    pub sort_by_name: bool,
}

impl WalkConfig {
    pub fn new(show_hidden: bool) -> Self {
        Self {
            show_hidden,
            sort_by_name: false,
        }
    }
}

// ---------------------------------------------------------------------------
// walk_tree()
// ---------------------------------------------------------------------------

/// Walk `root` depth-first and collect the visited and failed nodes.
///
/// # Errors
///
/// [`FoldexError::RootNotFound`] if `root` does not exist or cannot be read.
/// Failures below the root never surface here; they end up in
/// [`TraversalResult::failed`].
pub fn walk_tree(
    root:       &Path,
    config:     &WalkConfig,
    classifier: &dyn Classifier,
) -> Result<TraversalResult, FoldexError> {
    let start = Instant::now();
    let mut visitor = FolderVisitor::new(root, config.show_hidden, classifier);
    drive(root, config, &mut visitor)?;
    let result = visitor.into_result();

    debug!(
        root = %root.display(),
        show_hidden = config.show_hidden,
        visited = result.visited.len(),
        failed = result.failed.len(),
        elapsed = ?start.elapsed(),
        "walk complete"
    );
    Ok(result)
}

// ---------------------------------------------------------------------------
// drive()
// ---------------------------------------------------------------------------

/// Run a depth-first walk of `root`, feeding every node to `visitor`.
///
/// The walker hands out nodes in pre-order; directory exits are synthesized
/// from a stack of open directories. A directory is left as soon as the next
/// node is not one of its descendants, so `on_leave_directory` always follows
/// the last event below that directory. A directory whose listing fails is
/// reported through `on_visit_failed` only: it is neither entered nor left.
///
/// Symlinks are not followed; they are reported as files.
///
/// # Errors
///
/// [`FoldexError::RootNotFound`] if `root` is missing or its own listing fails.
pub fn drive(
    root:    &Path,
    config:  &WalkConfig,
    visitor: &mut dyn Visitor,
) -> Result<(), FoldexError> {
    if let Err(err) = std::fs::metadata(root) {
        debug!(root = %root.display(), error = %err, "walk root unavailable");
        return Err(FoldexError::RootNotFound(root.to_path_buf()));
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .ignore(false)
        .parents(false)
        .hidden(false)
        .follow_links(false)
        .same_file_system(false);

    if config.sort_by_name {
        builder.sort_by_file_name(|a, b| a.cmp(b));
    }

    let nodes = builder.build().map(|res| -> Result<Node, FoldexError> {
        let entry = res.map_err(map_ignore_error)?;
        match entry.file_type() {
            Some(ft) => Ok(Node {
                is_dir: ft.is_dir(),
                path:   entry.into_path(),
            }),
            None => Err(FoldexError::Io {
                path:   entry.into_path(),
                source: std::io::Error::other("no file type"),
            }),
        }
    });

    dispatch(root, nodes, visitor)
}

// ---------------------------------------------------------------------------
// dispatch()
// ---------------------------------------------------------------------------

/// One pre-order node from the walker.
#[derive(Debug)]
pub(crate) struct Node {
    pub path:   PathBuf,
    pub is_dir: bool,
}

/// Turn a pre-order node stream into visitor events.
///
/// A directory is held back until the next item shows it could be listed;
/// if that item is the directory's own read error it only gets
/// `on_visit_failed`.
pub(crate) fn dispatch<I>(root: &Path, nodes: I, visitor: &mut dyn Visitor) -> Result<(), FoldexError>
where
    I: IntoIterator<Item = Result<Node, FoldexError>>,
{
    let mut open: Vec<PathBuf> = Vec::new();
    let mut pending: Option<PathBuf> = None;

    for res in nodes {
        let node = match res {
            Ok(node) => node,
            Err(err) => {
                // Walker errors carry the failing path; a pathless one has no
                // node to record in `failed`, so it is only logged
                let Some(path) = err.path().cloned() else {
                    warn!(error = %err, "walk error without a path");
                    continue;
                };

                if path == root {
                    warn!(root = %root.display(), error = %err, "cannot read walk root");
                    return Err(FoldexError::RootNotFound(path));
                }

                if pending.as_ref().is_some_and(|dir| *dir == path) {
                    pending = None;
                } else {
                    enter_pending(&mut pending, &mut open, visitor);
                    close_finished(&mut open, &path, visitor);
                }
                visitor.on_visit_failed(&path, &err);
                continue;
            }
        };

        enter_pending(&mut pending, &mut open, visitor);
        close_finished(&mut open, &node.path, visitor);

        if node.is_dir {
            pending = Some(node.path);
        } else {
            visitor.on_visit_file(&node.path);
        }
    }

    enter_pending(&mut pending, &mut open, visitor);
    while let Some(dir) = open.pop() {
        visitor.on_leave_directory(&dir);
    }

    Ok(())
}

fn enter_pending(pending: &mut Option<PathBuf>, open: &mut Vec<PathBuf>, visitor: &mut dyn Visitor) {
    if let Some(dir) = pending.take() {
        visitor.on_enter_directory(&dir);
        open.push(dir);
    }
}

/// Leave every open directory that does not contain `next`.
fn close_finished(open: &mut Vec<PathBuf>, next: &Path, visitor: &mut dyn Visitor) {
    while open.last().is_some_and(|dir| !next.starts_with(dir)) {
        if let Some(dir) = open.pop() {
            visitor.on_leave_directory(&dir);
        }
    }
}

// ---------------------------------------------------------------------------
// Map ignore::Error to FoldexError
// ---------------------------------------------------------------------------

fn map_ignore_error(e: ignore::Error) -> FoldexError {
    match e {
        ignore::Error::WithDepth { err, .. }      => map_ignore_error(*err),
        ignore::Error::WithLineNumber { err, .. } => map_ignore_error(*err),
        ignore::Error::WithPath { path, err } => match *err {
            ignore::Error::Io(io_err) => FoldexError::from_io(path, io_err),
            ignore::Error::Loop { child, .. } => FoldexError::SymlinkLoop(child),
            other => FoldexError::Io {
                path,
                source: std::io::Error::other(other.to_string()),
            },
        },
        ignore::Error::Loop { child, .. } => FoldexError::SymlinkLoop(child),
        other => FoldexError::Walk(other.to_string()),
    }
}
