mod cli;
mod logging;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cli::{CliError, CliResult, Delivery};
use sibling_core::{
    Direction,
    config::{self, Config},
    editor::CliEditorProvider,
    fs::LocalFsProvider,
    siblings::picker_siblings,
    state::AppState,
};
use sibling_tui::{PickerOutcome, Theme};
use std::{
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

#[derive(Parser)]
#[command(version, about = "Jump to the next, previous or any sibling of the file you are editing")]
struct Cli {
    /// Override path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Level written to the log file (off, error, warn, info, debug, trace)
    #[arg(long, default_value = logging::DEFAULT_LOG_LEVEL)]
    log_level: log::LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TargetArgs {
    /// The file currently being edited
    file: PathBuf,
    /// Print the chosen path instead of opening it
    #[arg(long)]
    print: bool,
    /// Print the chosen path and split as JSON instead of opening it
    #[arg(long)]
    json: bool,
}

impl TargetArgs {
    fn delivery(&self) -> Delivery {
        Delivery::from_flags(self.print, self.json)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Open the sibling after FILE, wrapping to the first
    Next(TargetArgs),
    /// Open the sibling before FILE, wrapping to the last
    Prev(TargetArgs),
    /// Choose a sibling of FILE in an interactive picker
    Pick(TargetArgs),
    /// List the siblings of FILE in order
    List {
        file: PathBuf,
        /// Keep FILE itself in the listing
        #[arg(long)]
        include_self: bool,
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_errors = command_wants_json(&cli.command);

    if let Err(error) = logging::setup_logging(cli.log_level) {
        eprintln!("sibling: logging disabled: {error:#}");
    }

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            let cli_error = CliError::from(error);
            cli::print_error(&cli_error, json_errors);
            return ExitCode::from(2);
        }
    };

    match run_command(&cli.command, &config) {
        Ok(()) => ExitCode::from(0),
        Err(error) => {
            log::error!("{error}");
            cli::print_error(&error, json_errors);
            let code: u8 = match error.code() {
                1 => 1,
                _ => 2,
            };
            ExitCode::from(code)
        }
    }
}

fn run_command(command: &Commands, config: &Config) -> CliResult<()> {
    let fs = LocalFsProvider;
    let editor = CliEditorProvider::new(config.editor.command.as_deref());

    match command {
        Commands::Next(args) => step(&fs, &editor, args, Direction::Next),
        Commands::Prev(args) => step(&fs, &editor, args, Direction::Previous),
        Commands::Pick(args) => {
            let file = cli::resolve_file(&args.file)?;
            let outcome = run_picker(&fs, &file, config)?;
            cli::cmd_picked(&editor, outcome, args.delivery(), &mut io::stdout())
        }
        Commands::List {
            file,
            include_self,
            json,
        } => {
            let file = cli::resolve_file(file)?;
            cli::cmd_list(&fs, &file, *include_self, *json, &mut io::stdout())
        }
    }
}

fn step(
    fs: &LocalFsProvider,
    editor: &CliEditorProvider,
    args: &TargetArgs,
    direction: Direction,
) -> CliResult<()> {
    let file = cli::resolve_file(&args.file)?;
    cli::cmd_step(
        fs,
        editor,
        &file,
        direction,
        args.delivery(),
        &mut io::stdout(),
    )
}

fn run_picker(fs: &LocalFsProvider, file: &Path, config: &Config) -> Result<PickerOutcome> {
    let Some(siblings) = picker_siblings(fs, file) else {
        log::debug!("{} has no parent directory; nothing to pick", file.display());
        return Ok(PickerOutcome::Dismissed);
    };
    let mut state = AppState::new(file.to_path_buf(), siblings);
    let theme = Theme::from_config(&config.theme);

    let mut terminal = if should_disable_alt_screen() {
        ratatui::init_with_options(ratatui::TerminalOptions {
            viewport: ratatui::Viewport::Inline(20),
        })
    } else {
        ratatui::init()
    };
    let result = sibling_tui::run(
        &mut terminal,
        &mut state,
        &theme,
        &config.keys,
        &config.chord,
    );
    ratatui::restore();
    result
}

fn command_wants_json(command: &Commands) -> bool {
    match command {
        Commands::Next(args) | Commands::Prev(args) | Commands::Pick(args) => args.json,
        Commands::List { json, .. } => *json,
    }
}

fn should_disable_alt_screen() -> bool {
    match std::env::var("SIBLING_NO_ALT_SCREEN") {
        Ok(value) => {
            let value = value.trim().to_ascii_lowercase();
            !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn log_level_defaults_to_warn() {
        let cli = Cli::try_parse_from(["sibling", "next", "a.txt"]).unwrap();
        assert_eq!(cli.log_level, log::LevelFilter::Warn);
    }

    #[test]
    fn json_flag_routes_errors_as_json() {
        let cli = Cli::try_parse_from(["sibling", "pick", "a.txt", "--json"]).unwrap();
        assert!(command_wants_json(&cli.command));
        let cli = Cli::try_parse_from(["sibling", "list", "a.txt"]).unwrap();
        assert!(!command_wants_json(&cli.command));
    }

    #[test]
    fn list_accepts_include_self() {
        let cli = Cli::try_parse_from(["sibling", "list", "--include-self", "a.txt"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::List {
                include_self: true,
                ..
            }
        ));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(Cli::try_parse_from(["sibling", "--log-level", "loud", "next", "a.txt"]).is_err());
    }
}
