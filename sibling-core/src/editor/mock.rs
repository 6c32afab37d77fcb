use super::provider::{EditorProvider, SplitOrientation};
use anyhow::Result;
use std::{
    cell::RefCell,
    path::{Path, PathBuf},
};

#[derive(Default)]
pub struct MockEditorProvider {
    /// Whether `open_file_in_split` succeeds.
    pub split_available: bool,
    pub opened: RefCell<Vec<PathBuf>>,
    pub split_opened: RefCell<Vec<(PathBuf, SplitOrientation)>>,
}

impl EditorProvider for MockEditorProvider {
    fn open_file(&self, file: &Path) -> Result<()> {
        self.opened.borrow_mut().push(file.to_path_buf());
        Ok(())
    }

    fn open_file_in_split(&self, file: &Path, orientation: SplitOrientation) -> Result<bool> {
        if !self.split_available {
            return Ok(false);
        }
        self.split_opened
            .borrow_mut()
            .push((file.to_path_buf(), orientation));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::provider::open_in_split_or_primary;

    #[test]
    fn test_split_success_does_not_open_primary() {
        let editor = MockEditorProvider {
            split_available: true,
            ..Default::default()
        };
        open_in_split_or_primary(&editor, Path::new("/d/a.txt"), SplitOrientation::Vertical)
            .unwrap();
        assert_eq!(
            editor.split_opened.borrow().as_slice(),
            [(PathBuf::from("/d/a.txt"), SplitOrientation::Vertical)]
        );
        assert!(editor.opened.borrow().is_empty());
    }

    #[test]
    fn test_split_failure_falls_back_to_primary() {
        let editor = MockEditorProvider::default();
        open_in_split_or_primary(&editor, Path::new("/d/a.txt"), SplitOrientation::Horizontal)
            .unwrap();
        assert!(editor.split_opened.borrow().is_empty());
        assert_eq!(editor.opened.borrow().as_slice(), [PathBuf::from("/d/a.txt")]);
    }
}
