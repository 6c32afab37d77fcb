use crate::siblings::Entry;
use std::path::{Path, PathBuf};

/// Read-only view of the filesystem the sibling set is computed from.
pub trait FsProvider {
    /// Directory containing `file`, or `None` for a root or detached path.
    fn parent_dir(&self, file: &Path) -> Option<PathBuf>;
    /// Current contents of `dir`, in no particular order.
    fn list_entries(&self, dir: &Path) -> Vec<Entry>;
}
