//! Run command handler: execute one sequence file and print its ledger.

use std::io::Write;
use std::path::Path;

use cardlang_engine::language::{Ledger, StepResult};
use tracing::info;

use super::build_language;
use crate::config::OutputFormat;
use crate::error::CliError;
use crate::scenario;
use crate::ui::format_cards;

/// Handle the run command.
///
/// Loads the steps from `input`, checks every command name up front, runs
/// the sequence once and prints the ledger in `format`.
///
/// # Errors
///
/// `CliError::Io` / `CliError::InvalidInput` when the file cannot be read or
/// parsed, `CliError::Engine` when a step fails.
pub fn handle_run_command(
    input: &str,
    seed: Option<u64>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let steps = scenario::read_sequence(Path::new(input))?;
    let mut lang = build_language(steps, seed);
    lang.validate()?;
    let ledger = lang.execute()?;
    info!(steps = ledger.len(), "sequence executed");

    match format {
        OutputFormat::Text => write_ledger_text(ledger, out)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(ledger).map_err(std::io::Error::other)?;
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}

fn write_ledger_text(ledger: &Ledger, out: &mut dyn Write) -> std::io::Result<()> {
    for (sequence, result) in ledger.iter() {
        match result {
            StepResult::Deck(deck) => writeln!(
                out,
                "#{} deck {} ({} cards): {}",
                sequence,
                deck.variant().name().unwrap_or("custom"),
                deck.len(),
                format_cards(deck.cards())
            )?,
            StepResult::Cards(cards) => writeln!(
                out,
                "#{} cards ({}): {}",
                sequence,
                cards.len(),
                format_cards(cards)
            )?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardlang_engine::errors::SequenceError;

    fn sequence_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn prints_one_line_per_step() {
        let file = sequence_file(
            r#"[
                {"command": "init_deck", "meta": {"deck_type": "standard_deck"}},
                {"command": "pick_specific_cards", "meta": {
                    "cards": [{"value": 13, "suit": "hearts"}, {"value": 3, "suit": "spades"}],
                    "from_sequence": 1
                }}
            ]"#,
        );
        let mut out = Vec::new();
        handle_run_command(
            file.path().to_str().unwrap(),
            Some(1),
            OutputFormat::Text,
            &mut out,
        )
        .unwrap();

        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#1 deck standard_deck (50 cards): A♠ 2♠"));
        assert_eq!(lines[1], "#2 cards (2): K♥ 3♠");
    }

    #[test]
    fn json_output_is_the_serialized_ledger() {
        let file = sequence_file(
            r#"[
                {"command": "init_deck", "meta": {"deck_type": "empty_deck"}}
            ]"#,
        );
        let mut out = Vec::new();
        handle_run_command(
            file.path().to_str().unwrap(),
            None,
            OutputFormat::Json,
            &mut out,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["results"]["1"]["kind"], "deck");
    }

    #[test]
    fn unknown_command_is_rejected_before_running() {
        let file = sequence_file(
            r#"[
                {"command": "init_deck", "meta": {"deck_type": "standard_deck"}},
                {"command": "deal"}
            ]"#,
        );
        let mut out = Vec::new();
        let result = handle_run_command(
            file.path().to_str().unwrap(),
            None,
            OutputFormat::Text,
            &mut out,
        );
        assert!(matches!(
            result,
            Err(CliError::Engine(SequenceError::UnsupportedCommand { .. }))
        ));
        assert!(out.is_empty());
    }
}
