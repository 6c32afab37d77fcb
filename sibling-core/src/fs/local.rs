use super::provider::FsProvider;
use crate::siblings::Entry;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct LocalFsProvider;

impl FsProvider for LocalFsProvider {
    fn parent_dir(&self, file: &Path) -> Option<PathBuf> {
        file.parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }

    fn list_entries(&self, dir: &Path) -> Vec<Entry> {
        let read_dir = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                log::warn!("failed to list {}: {e}", dir.display());
                return Vec::new();
            }
        };

        read_dir
            .filter_map(Result::ok)
            .map(|dir_entry| {
                let path = dir_entry.path();
                // file_type does not follow symlinks; a link to a directory is still a directory
                let is_dir = dir_entry
                    .file_type()
                    .is_ok_and(|ft| ft.is_dir() || (ft.is_symlink() && path.is_dir()));
                Entry {
                    name: dir_entry.file_name().to_string_lossy().into_owned(),
                    path,
                    is_dir,
                }
            })
            .collect()
    }
}
