use super::provider::FsProvider;
use crate::siblings::Entry;
use std::{
    cell::RefCell,
    path::{Path, PathBuf},
};

#[derive(Default)]
pub struct MockFsProvider {
    pub entries: Vec<Entry>,
    /// When set, `parent_dir` reports that the file has no parent.
    pub detached: bool,
    pub listed_dirs: RefCell<Vec<PathBuf>>,
}

impl MockFsProvider {
    /// Flat directory at `dir` holding the given file names.
    pub fn with_files(dir: &Path, names: &[&str]) -> Self {
        Self {
            entries: names.iter().map(|name| Entry::file(dir.join(name))).collect(),
            ..Default::default()
        }
    }
}

impl FsProvider for MockFsProvider {
    fn parent_dir(&self, file: &Path) -> Option<PathBuf> {
        if self.detached {
            return None;
        }
        file.parent().map(Path::to_path_buf)
    }

    fn list_entries(&self, dir: &Path) -> Vec<Entry> {
        self.listed_dirs.borrow_mut().push(dir.to_path_buf());
        self.entries.clone()
    }
}
