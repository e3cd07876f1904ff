/// The kind of a filesystem node, as reported by a [`Classifier`](crate::Classifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file.
    File,

    /// A directory.
    Dir,

    /// A symbolic link whose target could not be resolved.
    Symlink,

    /// Anything else (device files, pipes, sockets, etc.).
    Other,
}

/// Restricts which entries a shallow listing returns.
///
/// In listings `File` keeps everything that is not a directory, so symlinks
/// and special files are listed alongside regular files.
/// [`Item::exists`](crate::Item::exists) is stricter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryKindFilter {
    File,
    Folder,
    #[default]
    Any,
}

impl EntryKindFilter {
    /// Returns `true` if an entry of `kind` passes this filter.
    pub fn accepts(self, kind: EntryKind) -> bool {
        match self {
            Self::File   => kind != EntryKind::Dir,
            Self::Folder => kind == EntryKind::Dir,
            Self::Any    => true,
        }
    }
}
