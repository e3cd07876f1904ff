use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::classifier::PlatformClassifier;
use crate::engine::{walk_tree, WalkConfig};
use crate::entry::{EntryKind, EntryKindFilter};
use crate::error::FoldexError;
use crate::results::TraversalResult;
use crate::traits::Classifier;

/// A file or folder on disk, with the listing and traversal queries built on
/// top of the walker.
///
/// Paths are made absolute on construction when the working directory can
/// be resolved.
pub struct Item {
    path:       PathBuf,
    classifier: Box<dyn Classifier>,
}

impl Item {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = std::path::absolute(&path).unwrap_or(path);
        Self {
            path,
            classifier: Box::new(PlatformClassifier),
        }
    }

    pub fn with_classifier(mut self, c: impl Classifier + 'static) -> Self {
        self.classifier = Box::new(c);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_folder(&self) -> bool {
        self.path.is_dir()
    }

    fn check_exists(&self) -> Result<(), FoldexError> {
        if fs::symlink_metadata(&self.path).is_err() {
            return Err(FoldexError::RootNotFound(self.path.clone()));
        }
        Ok(())
    }

    /// Whether the path exists and is of the kind `filter` asks for.
    ///
    /// Links are followed, so a dangling link does not exist. `File` means a
    /// regular file here; devices, pipes and sockets only pass `Any`.
    pub fn exists(&self, filter: EntryKindFilter) -> bool {
        match self.classifier.kind(&self.path) {
            Ok(EntryKind::Symlink) | Err(_) => false,
            Ok(kind) => match filter {
                EntryKindFilter::File   => kind == EntryKind::File,
                EntryKindFilter::Folder => kind == EntryKind::Dir,
                EntryKindFilter::Any    => true,
            },
        }
    }

    /// Immediate children of a folder, filtered by kind, sorted by name.
    ///
    /// Hidden children are left out unless `show_hidden` is set. For anything
    /// that is not a folder the result is the path itself, whatever the filter.
    ///
    /// # Errors
    ///
    /// [`FoldexError::RootNotFound`] if the path does not exist or the folder
    /// cannot be listed.
    pub fn list(&self, filter: EntryKindFilter, show_hidden: bool) -> Result<Vec<PathBuf>, FoldexError> {
        self.check_exists()?;
        if !self.is_folder() {
            return Ok(vec![self.path.clone()]);
        }

        let rd = fs::read_dir(&self.path).map_err(|err| {
            debug!(path = %self.path.display(), error = %err, "listing failed");
            FoldexError::RootNotFound(self.path.clone())
        })?;
        let mut rows = keep_readable(&self.path, rd);
        rows.sort_by_key(|entry| entry.file_name());

        let mut content = Vec::with_capacity(rows.len());
        for entry in rows {
            let path = entry.path();

            if !show_hidden {
                match self.classifier.is_hidden(&path) {
                    Ok(false) => {}
                    Ok(true)  => continue,
                    Err(err)  => {
                        debug!(path = %path.display(), error = %err, "hidden probe failed, skipping");
                        continue;
                    }
                }
            }

            let kind = match self.classifier.kind(&path) {
                Ok(kind) => kind,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "cannot classify, skipping");
                    continue;
                }
            };

            if filter.accepts(kind) {
                content.push(path);
            }
        }
        Ok(content)
    }

    /// Every descendant of a folder, without the folder itself.
    ///
    /// Returns `None` when the path is not a folder.
    pub fn walk(&self, show_hidden: bool) -> Result<Option<TraversalResult>, FoldexError> {
        if !self.is_folder() {
            return Ok(None);
        }
        let result = walk_tree(&self.path, &WalkConfig::new(show_hidden), self.classifier.as_ref())?;
        Ok(Some(result.without_root()))
    }

    /// An empty folder, or a zero-length file.
    pub fn is_empty(&self) -> Result<bool, FoldexError> {
        self.check_exists()?;
        if self.is_folder() {
            let mut rd = fs::read_dir(&self.path)
                .map_err(|source| FoldexError::from_io(self.path.clone(), source))?;
            return Ok(rd.next().is_none());
        }
        let meta = fs::metadata(&self.path)
            .map_err(|source| FoldexError::from_io(self.path.clone(), source))?;
        Ok(meta.len() == 0)
    }

    /// Total size in bytes: the file's length, or the sum over every file
    /// recorded in a walk of the folder. Unreadable nodes count as zero.
    pub fn size(&self) -> Result<u64, FoldexError> {
        self.check_exists()?;
        if !self.is_folder() {
            let meta = fs::metadata(&self.path)
                .map_err(|source| FoldexError::from_io(self.path.clone(), source))?;
            return Ok(meta.len());
        }

        // Without the hidden policy only files are recorded
        let result = walk_tree(&self.path, &WalkConfig::new(false), self.classifier.as_ref())?;
        let total = result
            .visited
            .iter()
            .filter_map(|p| fs::symlink_metadata(p).ok())
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len())
            .sum();
        Ok(total)
    }

    /// The kind of this path, if it exists.
    pub fn kind(&self) -> Option<EntryKind> {
        self.classifier.kind(&self.path).ok()
    }
}

/// Drop directory entries that fail to read, keeping the rest.
fn keep_readable<T>(dir: &Path, rows: impl Iterator<Item = std::io::Result<T>>) -> Vec<T> {
    rows.filter_map(|row| match row {
        Ok(entry) => Some(entry),
        Err(err) => {
            debug!(path = %dir.display(), error = %err, "unreadable entry, skipping");
            None
        }
    })
    .collect()
}
