use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a new split pane is laid out relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitOrientation {
    /// New pane below the current one.
    Horizontal,
    /// New pane beside the current one.
    Vertical,
}

impl std::fmt::Display for SplitOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

pub trait EditorProvider {
    /// Bring `file` into focus in the primary editor view.
    fn open_file(&self, file: &Path) -> Result<()>;
    /// Open `file` in a new split. `Ok(false)` means there is nothing to split from.
    fn open_file_in_split(&self, file: &Path, orientation: SplitOrientation) -> Result<bool>;
}

/// Open `file` in a split, falling back to the primary view when no split can be made.
pub fn open_in_split_or_primary<E: EditorProvider + ?Sized>(
    editor: &E,
    file: &Path,
    orientation: SplitOrientation,
) -> Result<()> {
    match editor.open_file_in_split(file, orientation) {
        Ok(true) => return Ok(()),
        Ok(false) => log::info!("no split available, opening {} in place", file.display()),
        Err(e) => log::warn!("split failed, opening {} in place: {e:#}", file.display()),
    }
    editor.open_file(file)
}
