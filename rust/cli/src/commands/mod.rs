//! Command handler modules for the cardlang CLI.
//!
//! Each subcommand lives in its own module and exposes
//! `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`, taking its
//! output streams as `&mut dyn Write` so tests can capture them.

mod cfg;
mod decks;
mod prob;
mod run;

pub use cfg::handle_cfg_command;
pub use decks::handle_decks_command;
pub use prob::handle_prob_command;
pub use run::handle_run_command;

use cardlang_engine::language::{Language, Step};

fn build_language(steps: Vec<Step>, seed: Option<u64>) -> Language {
    match seed {
        Some(seed) => Language::with_seed(steps, seed),
        None => Language::new(steps),
    }
}
