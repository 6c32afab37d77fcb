use std::path::PathBuf;

const APP_NAME: &str = "sibling";
const LOG_FILE_NAME: &str = "sibling.log";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Per-user cache directory for sibling: `$XDG_CACHE_HOME/sibling` on unix when set,
/// otherwise `~/.cache/sibling`, falling back to the temp dir without a home.
pub fn cache_dir() -> PathBuf {
    #[cfg(unix)]
    let base = std::env::var_os("XDG_CACHE_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")));
    #[cfg(windows)]
    let base = dirs::cache_dir();

    base.unwrap_or_else(std::env::temp_dir).join(APP_NAME)
}

pub fn default_log_file() -> PathBuf {
    cache_dir().join(LOG_FILE_NAME)
}

/// Send `log` records to the cache log file. Returns the file in use.
///
/// Nothing goes to the terminal: the picker draws over it, and `--print`/`--json`
/// output must stay clean for editor integrations.
pub fn setup_logging(level: log::LevelFilter) -> anyhow::Result<PathBuf> {
    let log_file = default_log_file();
    if let Some(dir) = log_file.parent() {
        std::fs::create_dir_all(dir)?;
    }
    simple_log::file(log_file.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!(e))?;
    log::debug!(
        "sibling {} started: {}",
        env!("CARGO_PKG_VERSION"),
        std::env::args().collect::<Vec<_>>().join(" ")
    );
    Ok(log_file)
}
