//! # cardlang CLI Library
//!
//! Command-line front end for the cardlang engine: runs sequence files,
//! estimates scenario probabilities and shows the supported deck types.
//!
//! ## Main Entry Point
//!
//! [`run`] parses arguments, dispatches to a subcommand and returns the
//! process exit code.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["cardlang", "prob", "--input", "red_card.json", "--iterations", "15000"];
//! let code = cardlang_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `run`: Execute a sequence file and print the ledger
//! - `prob`: Repeat a scenario and report its success rate
//! - `decks`: List deck types
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod logging;
pub mod scenario;
pub mod ui;

use cli::{CardlangCli, Commands};
use commands::{
    handle_cfg_command, handle_decks_command, handle_prob_command, handle_run_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["run", "prob", "decks", "cfg"];

/// Main entry point for the CLI application.
///
/// Returns `0` on success and `2` on any error; errors are written to `err`.
///
/// ```
/// use std::io;
/// let mut out = Vec::new();
/// let code = cardlang_cli::run(["cardlang", "decks"], &mut out, &mut io::stderr());
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("canasta_deck"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CardlangCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };
    logging::init_logging(cli.verbose);

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Decks => handle_decks_command(out),
        Commands::Run {
            input,
            seed,
            format,
        } => config::load()
            .map_err(|e| CliError::Config(e.to_string()))
            .and_then(|cfg| {
                handle_run_command(
                    &input,
                    seed.or(cfg.seed),
                    format.unwrap_or(cfg.format),
                    out,
                )
            }),
        Commands::Prob {
            input,
            iterations,
            seed,
        } => config::load()
            .map_err(|e| CliError::Config(e.to_string()))
            .and_then(|cfg| {
                let iterations = iterations.map_or(cfg.iterations, |n| n as usize);
                handle_prob_command(&input, iterations, seed.or(cfg.seed), out)
            }),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = writeln!(err, "{}", e);
    let _ = writeln!(err, "\nUsage: cardlang <command> [options]\n\nCommands:");
    for c in COMMANDS {
        let _ = writeln!(err, "  {}", c);
    }
    let _ = writeln!(err, "\nFor full help, run: cardlang --help");
    exit_code::ERROR
}
