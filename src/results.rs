use std::path::PathBuf;

/// The output of one completed walk.
///
/// Handed to the caller by value once the walk finishes; nothing else holds
/// on to the collections afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalResult {
    /// The path the walk started from.
    pub root: PathBuf,

    /// Successfully visited nodes, in visit order. Files appear when visited;
    /// directories appear after all of their descendants, and only when the
    /// walk showed hidden entries and the directory is not hidden.
    pub visited: Vec<PathBuf>,

    /// Nodes that could not be visited or classified, in the order they failed.
    /// Never overlaps with `visited`.
    pub failed: Vec<PathBuf>,
}

impl TraversalResult {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            root,
            visited: Vec::new(),
            failed:  Vec::new(),
        }
    }

    /// Drop the root's own post-visit record, leaving only descendants.
    ///
    /// The root is only ever the last entry, and only when it was recorded at
    /// all. Walks that never recorded it are returned unchanged.
    pub fn without_root(mut self) -> Self {
        if self.visited.last().is_some_and(|last| *last == self.root) {
            self.visited.pop();
        }
        self
    }

    /// `true` if no node failed during the walk.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
