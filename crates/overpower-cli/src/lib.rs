// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod commands;
mod helpers;
mod logging;

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Generator, Shell};
use overpower_core::{ExitCode, MachineError};
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

const OVERPOWER_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "overpower")]
#[command(version)]
#[command(about = "Overpower deck checker")]
#[command(help_template = OVERPOWER_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  OVERPOWER_CATALOG_PATH  Card catalog JSON (default data/catalog.json)\n  OVERPOWER_RULES_PATH    Deck rules JSON (default configs/rules.json)\n  OVERPOWER_LOG           Log filter, falls back to RUST_LOG\n  OVERPOWER_LOG_JSON      Emit logs as JSON lines"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Card catalog file; overrides the workspace default.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Deck rules file; overrides the workspace default.
    #[arg(long, global = true)]
    rules: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a deck against every construction rule.
    Validate { deck: PathBuf },
    /// Card counts, stat maxima, icon totals and threat.
    Stats { deck: PathBuf },
    /// Total threat including reserve adjustments.
    Threat { deck: PathBuf },
    /// Deal an opening hand from the draw pile.
    Draw {
        deck: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write the portable export document.
    Export {
        deck: PathBuf,
        #[arg(long, default_value = "overpower")]
        exported_by: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Resolve an export document back into a deck.
    Import {
        export: PathBuf,
        #[arg(long, default_value = "imported-deck")]
        deck_id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Content hash of the deck's card list.
    Fingerprint { deck: PathBuf },
    /// Encode a deck as a compact share code.
    Share { deck: PathBuf },
    /// Decode a share code into a deck.
    Unshare {
        code: String,
        #[arg(long, default_value = "shared-deck")]
        deck_id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum RulesCommand {
    /// Print the active rules.
    Show,
    /// Validate the active rules file.
    Check,
}

#[derive(Subcommand)]
enum CatalogCommand {
    /// Report catalog integrity issues.
    Check,
}

#[derive(Clone, Copy)]
struct LogFlags {
    quiet: bool,
    verbose: u8,
}

#[derive(Clone, Copy)]
struct OutputMode {
    json: bool,
}

/// Where catalog and rules come from for this invocation.
struct Sources {
    root: PathBuf,
    catalog: Option<PathBuf>,
    rules: Option<PathBuf>,
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code as u8)
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError {
                    exit_code: ExitCode::Usage,
                    machine: MachineError::new("usage_error", "invalid command line arguments")
                        .with_detail("error", &err.to_string()),
                });
            }
        },
    };
    logging::init_tracing(LogFlags {
        quiet: cli.quiet,
        verbose: cli.verbose,
    });
    let output_mode = OutputMode { json: cli.json };
    let command = cli.command.ok_or_else(|| CliError {
        exit_code: ExitCode::Usage,
        machine: MachineError::new("usage_error", "missing command; see --help"),
    })?;
    let root = std::env::current_dir().map_err(|e| CliError::internal(e.to_string()))?;
    let sources = Sources {
        root,
        catalog: cli.catalog,
        rules: cli.rules,
    };

    match command {
        Commands::Validate { deck } => commands::validate(&sources, &deck, output_mode),
        Commands::Stats { deck } => commands::stats(&sources, &deck, output_mode),
        Commands::Threat { deck } => commands::threat(&sources, &deck, output_mode),
        Commands::Draw { deck, seed } => commands::draw(&sources, &deck, seed, output_mode),
        Commands::Export {
            deck,
            exported_by,
            out,
        } => commands::export(&sources, &deck, &exported_by, out.as_deref(), output_mode),
        Commands::Import {
            export,
            deck_id,
            out,
        } => commands::import(&sources, &export, &deck_id, out.as_deref(), output_mode),
        Commands::Fingerprint { deck } => commands::fingerprint(&deck, output_mode),
        Commands::Share { deck } => commands::share(&deck, output_mode),
        Commands::Unshare { code, deck_id, out } => {
            commands::unshare(&code, &deck_id, out.as_deref(), output_mode)
        }
        Commands::Rules { command } => match command {
            RulesCommand::Show => commands::rules_show(&sources, output_mode),
            RulesCommand::Check => commands::rules_check(&sources, output_mode),
        },
        Commands::Catalog { command } => match command {
            CatalogCommand::Check => commands::catalog_check(&sources, output_mode),
        },
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
    }
}

fn print_completion<G: Generator>(generator: G) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(generator, &mut command, name, &mut std::io::stdout());
}

#[derive(Debug)]
struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    fn internal(message: String) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", &message),
        }
    }

    fn dependency(message: String) -> Self {
        Self {
            exit_code: ExitCode::DependencyFailure,
            machine: MachineError::new("dependency_failure", &message),
        }
    }

    /// Unreadable or malformed user input files.
    fn input(code: &str, message: String) -> Self {
        Self {
            exit_code: ExitCode::DependencyFailure,
            machine: MachineError::new(code, &message),
        }
    }

    fn validation(code: &str, message: String) -> Self {
        Self {
            exit_code: ExitCode::Validation,
            machine: MachineError::new(code, &message),
        }
    }
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
    }
}
