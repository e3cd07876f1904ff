use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoldexError {
    // Fatal
    #[error("root not found")]
    RootNotFound(PathBuf),

    // Per-node
    #[error("permission denied")]
    PermissionDenied(PathBuf),

    #[error("symlink loop")]
    SymlinkLoop(PathBuf),

    #[error("hidden attribute probe failed")]
    HiddenTest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Walker failures that carry no path
    #[error("walk error: {0}")]
    Walk(String),
}

impl FoldexError {
    /// The path this error occurred at, if applicable.
    /// Visitors use this to record the failed node without matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::RootNotFound(p)
            | Self::PermissionDenied(p)
            | Self::SymlinkLoop(p)
            | Self::HiddenTest { path: p, .. }
            | Self::Io { path: p, .. } => Some(p),
            Self::Walk(_) => None,
        }
    }

    /// Whether the walk can continue after this error.
    ///
    /// Per-node failures are absorbed into [`TraversalResult::failed`](crate::TraversalResult::failed)
    /// and the walk keeps going. Only a missing or unreadable root halts it.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::RootNotFound(_))
    }

    pub(crate) fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied(path)
        } else {
            Self::Io { path, source }
        }
    }
}
