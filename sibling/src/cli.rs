use sibling_core::{
    Direction, EditorProvider, FsProvider, Inclusion, SplitOrientation,
    editor::provider::open_in_split_or_primary,
    siblings::{adjacent_sibling, compute_siblings},
};
use sibling_tui::PickerOutcome;
use serde::Serialize;
use std::{
    fmt::Write as _,
    io::Write,
    path::{Path, PathBuf},
};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Clone)]
pub struct CliError {
    message: String,
    code: i32,
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 1,
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 2,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(value: anyhow::Error) -> Self {
        Self::system(format!("{value:#}"))
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::system(value.to_string())
    }
}

/// What to do with the sibling a command lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Open,
    Print,
    Json,
}

impl Delivery {
    pub fn from_flags(print: bool, json: bool) -> Self {
        if json {
            Self::Json
        } else if print {
            Self::Print
        } else {
            Self::Open
        }
    }
}

#[derive(Debug, Serialize)]
struct PathOutput<'a> {
    path: &'a Path,
    split: Option<SplitOrientation>,
}

#[derive(Debug, Serialize)]
struct EntryOutput {
    name: String,
    path: PathBuf,
}

/// Canonical absolute form of FILE.
///
/// A FILE that has been deleted or renamed still resolves through its directory, so
/// navigation from it is inert rather than an error. Only an unresolvable directory fails.
pub fn resolve_file(file: &Path) -> CliResult<PathBuf> {
    let error = match dunce::canonicalize(file) {
        Ok(path) => return Ok(path),
        Err(error) => error,
    };
    let unresolved = || CliError::user(format!("cannot resolve {}: {error}", file.display()));

    let name = file.file_name().ok_or_else(unresolved)?;
    let parent = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let dir = dunce::canonicalize(parent).map_err(|_| unresolved())?;
    log::debug!("{} does not exist; resolved through {}", file.display(), dir.display());
    Ok(dir.join(name))
}

pub fn cmd_step(
    fs: &dyn FsProvider,
    editor: &dyn EditorProvider,
    file: &Path,
    direction: Direction,
    delivery: Delivery,
    out: &mut dyn Write,
) -> CliResult<()> {
    let Some(target) = adjacent_sibling(fs, file, direction) else {
        return Ok(());
    };
    deliver(editor, &target, None, delivery, out)
}

pub fn cmd_list(
    fs: &dyn FsProvider,
    file: &Path,
    include_self: bool,
    json: bool,
    out: &mut dyn Write,
) -> CliResult<()> {
    let inclusion = if include_self {
        Inclusion::IncludeSelf
    } else {
        Inclusion::ExcludeSelf
    };
    let entries = fs
        .parent_dir(file)
        .map(|dir| compute_siblings(fs.list_entries(&dir), file, inclusion).ordered)
        .unwrap_or_default();
    let output: Vec<EntryOutput> = entries
        .into_iter()
        .map(|entry| EntryOutput {
            name: entry.name,
            path: entry.path,
        })
        .collect();

    if json {
        write_json(out, &output)?;
    } else {
        write!(out, "{}", format_entry_table(&output))?;
    }
    Ok(())
}

/// Act on whatever the picker returned. A dismissed picker does nothing.
pub fn cmd_picked(
    editor: &dyn EditorProvider,
    outcome: PickerOutcome,
    delivery: Delivery,
    out: &mut dyn Write,
) -> CliResult<()> {
    match outcome {
        PickerOutcome::Open(path) => deliver(editor, &path, None, delivery, out),
        PickerOutcome::OpenInSplit(path, orientation) => {
            deliver(editor, &path, Some(orientation), delivery, out)
        }
        PickerOutcome::Dismissed => Ok(()),
    }
}

fn deliver(
    editor: &dyn EditorProvider,
    path: &Path,
    split: Option<SplitOrientation>,
    delivery: Delivery,
    out: &mut dyn Write,
) -> CliResult<()> {
    match delivery {
        Delivery::Open => {
            match split {
                Some(orientation) => open_in_split_or_primary(editor, path, orientation)?,
                None => editor.open_file(path)?,
            }
            Ok(())
        }
        Delivery::Print => {
            writeln!(out, "{}", path.display())?;
            Ok(())
        }
        Delivery::Json => write_json(out, &PathOutput { path, split }),
    }
}

fn format_entry_table(entries: &[EntryOutput]) -> String {
    let name_header = "name";
    let path_header = "path";
    let name_width = entries
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(name_header.len())
        .max(name_header.len());

    let mut out = String::new();
    let _ = writeln!(out, "{name_header:<name_width$}  {path_header}");
    for entry in entries {
        let _ = writeln!(out, "{:<name_width$}  {}", entry.name, entry.path.display());
    }
    out
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string(value).map_err(|e| CliError::system(e.to_string()))?;
    writeln!(out, "{rendered}")?;
    Ok(())
}

pub fn print_error(error: &CliError, json: bool) {
    if json {
        let payload = serde_json::json!({ "error": error.message() });
        eprintln!("{payload}");
    } else {
        eprintln!("{}", error.message());
    }
}
