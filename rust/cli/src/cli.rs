use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "cardlang",
    version,
    about = "Run deck manipulation sequences and estimate card probabilities"
)]
pub struct CardlangCli {
    /// Log every executed step to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a sequence file and print every step's result
    Run {
        #[arg(long)]
        input: String,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Repeat a scenario and report how often its check succeeds
    Prob {
        #[arg(long)]
        input: String,
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        iterations: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the deck types `init_deck` accepts
    Decks,
    /// Show the resolved configuration and where each value came from
    Cfg,
}
