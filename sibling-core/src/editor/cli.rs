use super::provider::{EditorProvider, SplitOrientation};
use anyhow::{Context, Result, bail};
use std::{path::Path, process::Command};

const FALLBACK_EDITOR: &str = "vi";

/// Launches the user's editor as a child process and splits through tmux.
pub struct CliEditorProvider {
    command: Vec<String>,
}

impl CliEditorProvider {
    /// `configured` wins over `$VISUAL`, which wins over `$EDITOR`.
    pub fn new(configured: Option<&str>) -> Self {
        let command = resolve_editor_command(
            configured,
            std::env::var("VISUAL").ok().as_deref(),
            std::env::var("EDITOR").ok().as_deref(),
        );
        Self { command }
    }

    fn is_inside_tmux() -> bool {
        std::env::var("TMUX").is_ok_and(|v| !v.is_empty())
    }
}

pub(crate) fn resolve_editor_command(
    configured: Option<&str>,
    visual: Option<&str>,
    editor: Option<&str>,
) -> Vec<String> {
    let raw = [configured, visual, editor]
        .into_iter()
        .flatten()
        .find(|cmd| !cmd.trim().is_empty())
        .unwrap_or(FALLBACK_EDITOR);
    raw.split_whitespace().map(String::from).collect()
}

impl EditorProvider for CliEditorProvider {
    fn open_file(&self, file: &Path) -> Result<()> {
        let (program, args) = self
            .command
            .split_first()
            .context("editor command is empty")?;
        log::info!("opening {} with {program}", file.display());

        let status = Command::new(program)
            .args(args)
            .arg(file)
            .status()
            .with_context(|| format!("failed to launch editor '{program}'"))?;
        if !status.success() {
            bail!("editor '{program}' exited with {status}");
        }
        Ok(())
    }

    fn open_file_in_split(&self, file: &Path, orientation: SplitOrientation) -> Result<bool> {
        if !Self::is_inside_tmux() {
            return Ok(false);
        }

        // tmux -v stacks panes top/bottom, -h places them side by side
        let flag = match orientation {
            SplitOrientation::Horizontal => "-v",
            SplitOrientation::Vertical => "-h",
        };
        let dir = file.parent().unwrap_or(file).to_string_lossy().into_owned();

        let output = Command::new("tmux")
            .args(["split-window", flag, "-c", &dir])
            .args(&self.command)
            .arg(file)
            .output();
        match output {
            Ok(output) if output.status.success() => Ok(true),
            Ok(output) => {
                log::warn!(
                    "tmux split-window failed: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                Ok(false)
            }
            Err(e) => {
                log::warn!("failed to run tmux: {e}");
                Ok(false)
            }
        }
    }
}
