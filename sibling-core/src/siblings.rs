use crate::fs::FsProvider;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One filesystem object inside a directory listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    /// Identity of the entry; also what gets handed to the editor.
    pub path: PathBuf,
    #[serde(skip)]
    pub is_dir: bool,
}

impl Entry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path.into(), false)
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self::new(path.into(), true)
    }

    fn new(path: PathBuf, is_dir: bool) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path, is_dir }
    }
}

/// Whether the current file stays in the ordered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    /// Step navigation needs the current file as its pivot.
    IncludeSelf,
    /// The picker never offers the file that is already open.
    ExcludeSelf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// The ordered, directory-scoped candidate pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingSet {
    pub ordered: Vec<Entry>,
    pub anchor: PathBuf,
}

impl SiblingSet {
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Step from the anchor. Only meaningful for sets built with [`Inclusion::IncludeSelf`].
    pub fn step(&self, direction: Direction) -> Option<&Entry> {
        step(&self.ordered, &self.anchor, direction)
    }
}

/// Drop directories and sort the rest by name.
///
/// Names compare byte-wise (case-sensitive, `B.txt` before `a.txt`). Entries
/// with the same name are ordered by path so the result is deterministic, and
/// repeated handles are collapsed.
pub fn compute_siblings(listing: Vec<Entry>, current: &Path, inclusion: Inclusion) -> SiblingSet {
    let mut ordered: Vec<Entry> = listing
        .into_iter()
        .filter(|entry| !entry.is_dir)
        .filter(|entry| inclusion == Inclusion::IncludeSelf || entry.path != current)
        .collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
    ordered.dedup_by(|a, b| a.path == b.path);

    SiblingSet {
        ordered,
        anchor: current.to_path_buf(),
    }
}

/// The neighbour of `current` in `ordered`, wrapping at both ends.
///
/// Returns `None` when `current` is not in the list. A single-entry list steps onto itself.
pub fn step<'a>(ordered: &'a [Entry], current: &Path, direction: Direction) -> Option<&'a Entry> {
    let index = ordered.iter().position(|entry| entry.path == current)?;
    let last = ordered.len() - 1;
    let target = match direction {
        Direction::Next if index == last => 0,
        Direction::Next => index + 1,
        Direction::Previous if index == 0 => last,
        Direction::Previous => index - 1,
    };
    ordered.get(target)
}

/// Resolve the next/previous sibling of `current` through the filesystem.
pub fn adjacent_sibling<F: FsProvider + ?Sized>(
    fs: &F,
    current: &Path,
    direction: Direction,
) -> Option<PathBuf> {
    let Some(dir) = fs.parent_dir(current) else {
        log::debug!("{} has no parent directory", current.display());
        return None;
    };
    let set = compute_siblings(fs.list_entries(&dir), current, Inclusion::IncludeSelf);
    let found = set.step(direction).map(|entry| entry.path.clone());
    if found.is_none() {
        log::debug!(
            "{} is not listed in {}; nothing to step to",
            current.display(),
            dir.display()
        );
    }
    found
}

/// Siblings to offer in the picker: everything in the directory except `current`.
pub fn picker_siblings<F: FsProvider + ?Sized>(fs: &F, current: &Path) -> Option<SiblingSet> {
    let dir = fs.parent_dir(current)?;
    Some(compute_siblings(
        fs.list_entries(&dir),
        current,
        Inclusion::ExcludeSelf,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFsProvider;

    fn names(set: &SiblingSet) -> Vec<&str> {
        set.ordered.iter().map(|e| e.name.as_str()).collect()
    }

    fn abc_listing() -> Vec<Entry> {
        vec![
            Entry::file("/d/c.txt"),
            Entry::dir("/d/sub"),
            Entry::file("/d/a.txt"),
            Entry::file("/d/b.txt"),
        ]
    }

    #[test]
    fn test_compute_including_self() {
        let set = compute_siblings(abc_listing(), Path::new("/d/b.txt"), Inclusion::IncludeSelf);
        assert_eq!(names(&set), vec!["a.txt", "b.txt", "c.txt"]);
        assert_eq!(set.anchor, PathBuf::from("/d/b.txt"));
    }

    #[test]
    fn test_compute_excluding_self() {
        let set = compute_siblings(abc_listing(), Path::new("/d/b.txt"), Inclusion::ExcludeSelf);
        assert_eq!(names(&set), vec!["a.txt", "c.txt"]);
    }

    #[test]
    fn test_compute_never_includes_directories() {
        let listing = vec![Entry::dir("/d/x"), Entry::dir("/d/y")];
        let set = compute_siblings(listing, Path::new("/d/x"), Inclusion::IncludeSelf);
        assert!(set.is_empty());
    }

    #[test]
    fn test_compute_sorts_bytewise() {
        let listing = vec![
            Entry::file("/d/b.txt"),
            Entry::file("/d/B.txt"),
            Entry::file("/d/a.txt"),
            Entry::file("/d/_x"),
        ];
        let set = compute_siblings(listing, Path::new("/d/a.txt"), Inclusion::IncludeSelf);
        assert_eq!(names(&set), vec!["B.txt", "_x", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_compute_drops_duplicate_handles() {
        let listing = vec![
            Entry::file("/d/a.txt"),
            Entry::file("/d/b.txt"),
            Entry::file("/d/a.txt"),
        ];
        let set = compute_siblings(listing, Path::new("/d/b.txt"), Inclusion::IncludeSelf);
        assert_eq!(names(&set), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_current_file_need_not_be_listed() {
        let set = compute_siblings(abc_listing(), Path::new("/d/gone.txt"), Inclusion::ExcludeSelf);
        assert_eq!(names(&set), vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_step_scenario_with_wraparound() {
        let set = compute_siblings(abc_listing(), Path::new("/d/b.txt"), Inclusion::IncludeSelf);
        let next = set.step(Direction::Next).unwrap();
        assert_eq!(next.name, "c.txt");

        let wrapped = step(&set.ordered, &next.path, Direction::Next).unwrap();
        assert_eq!(wrapped.name, "a.txt");

        let prev = set.step(Direction::Previous).unwrap();
        assert_eq!(prev.name, "a.txt");

        let first = Path::new("/d/a.txt");
        assert_eq!(
            step(&set.ordered, first, Direction::Previous).unwrap().name,
            "c.txt"
        );
    }

    #[test]
    fn test_step_next_then_previous_is_identity() {
        let set = compute_siblings(abc_listing(), Path::new("/d/a.txt"), Inclusion::IncludeSelf);
        for entry in &set.ordered {
            let there = step(&set.ordered, &entry.path, Direction::Next).unwrap();
            let back = step(&set.ordered, &there.path, Direction::Previous).unwrap();
            assert_eq!(back.path, entry.path);
        }
    }

    #[test]
    fn test_step_n_times_returns_to_start() {
        let listing: Vec<Entry> = (0..7)
            .map(|i| Entry::file(format!("/d/file-{i}.rs")))
            .collect();
        let set = compute_siblings(listing, Path::new("/d/file-3.rs"), Inclusion::IncludeSelf);
        let mut current = set.anchor.clone();
        for _ in 0..set.len() {
            current = step(&set.ordered, &current, Direction::Next).unwrap().path.clone();
        }
        assert_eq!(current, set.anchor);
    }

    #[test]
    fn test_step_lone_file_returns_itself() {
        let listing = vec![Entry::file("/d/only.txt")];
        let set = compute_siblings(listing, Path::new("/d/only.txt"), Inclusion::IncludeSelf);
        assert_eq!(set.step(Direction::Next).unwrap().name, "only.txt");
        assert_eq!(set.step(Direction::Previous).unwrap().name, "only.txt");
    }

    #[test]
    fn test_step_missing_current_is_none() {
        let set = compute_siblings(abc_listing(), Path::new("/d/gone.txt"), Inclusion::IncludeSelf);
        assert!(set.step(Direction::Next).is_none());
        assert!(step(&[], Path::new("/d/gone.txt"), Direction::Previous).is_none());
    }

    #[test]
    fn test_adjacent_sibling_through_provider() {
        let fs = MockFsProvider::with_files(Path::new("/d"), &["b.txt", "a.txt", "c.txt"]);
        let next = adjacent_sibling(&fs, Path::new("/d/c.txt"), Direction::Next);
        assert_eq!(next, Some(PathBuf::from("/d/a.txt")));
        assert_eq!(fs.listed_dirs.borrow().as_slice(), [PathBuf::from("/d")]);
    }

    #[test]
    fn test_adjacent_sibling_without_parent_is_inert() {
        let fs = MockFsProvider {
            detached: true,
            ..MockFsProvider::with_files(Path::new("/d"), &["a.txt"])
        };
        assert_eq!(
            adjacent_sibling(&fs, Path::new("/d/a.txt"), Direction::Next),
            None
        );
        assert!(fs.listed_dirs.borrow().is_empty());
    }

    #[test]
    fn test_listing_is_read_on_every_call() {
        let fs = MockFsProvider::with_files(Path::new("/d"), &["a.txt", "b.txt"]);
        adjacent_sibling(&fs, Path::new("/d/a.txt"), Direction::Next);
        picker_siblings(&fs, Path::new("/d/a.txt"));
        assert_eq!(fs.listed_dirs.borrow().len(), 2);
    }

    #[test]
    fn test_picker_siblings_excludes_current() {
        let fs = MockFsProvider::with_files(Path::new("/d"), &["b.txt", "a.txt", "c.txt"]);
        let set = picker_siblings(&fs, Path::new("/d/b.txt")).unwrap();
        assert_eq!(names(&set), vec!["a.txt", "c.txt"]);
    }

    #[test]
    fn test_picker_siblings_lone_file_is_empty() {
        let fs = MockFsProvider::with_files(Path::new("/d"), &["only.txt"]);
        let set = picker_siblings(&fs, Path::new("/d/only.txt")).unwrap();
        assert!(set.is_empty());
    }
}
