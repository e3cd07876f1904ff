use std::fs;
use std::io;
use std::path::Path;

use crate::entry::EntryKind;
use crate::traits::Classifier;

/// The host platform's notion of kind and visibility.
///
/// On Unix a node is hidden when its name starts with `.`. On Windows the
/// `FILE_ATTRIBUTE_HIDDEN` bit decides, which needs a metadata call and can
/// therefore fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformClassifier;

impl Classifier for PlatformClassifier {
    fn kind(&self, path: &Path) -> io::Result<EntryKind> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir()  => Ok(EntryKind::Dir),
            Ok(meta) if meta.is_file() => Ok(EntryKind::File),
            Ok(_)                      => Ok(EntryKind::Other),
            // Dangling links still exist as links
            Err(err) => match fs::symlink_metadata(path) {
                Ok(meta) if meta.file_type().is_symlink() => Ok(EntryKind::Symlink),
                _ => Err(err),
            },
        }
    }

    #[cfg(not(windows))]
    fn is_hidden(&self, path: &Path) -> io::Result<bool> {
        Ok(path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(false))
    }

    #[cfg(windows)]
    fn is_hidden(&self, path: &Path) -> io::Result<bool> {
        use std::os::windows::fs::MetadataExt;

        const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

        // Drive roots carry the attribute but are never treated as hidden
        if path.file_name().is_none() {
            return Ok(false);
        }
        let meta = fs::symlink_metadata(path)?;
        Ok(meta.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
    }
}
