//! Probability command handler.
//!
//! Repeats a scenario's steps and judges the configured ledger entry after
//! every run. Any failing run aborts the batch.

use std::io::Write;
use std::path::Path;

use cardlang_engine::probability::try_run_probability_test;
use tracing::info;

use super::build_language;
use crate::error::CliError;
use crate::scenario::{self, Scenario};

pub fn handle_prob_command(
    input: &str,
    iterations: usize,
    seed: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if iterations == 0 {
        return Err(CliError::InvalidInput("iterations must be >= 1".into()));
    }
    let Scenario { steps, check } = scenario::read_scenario(Path::new(input))?;
    let mut lang = build_language(steps, seed);
    lang.validate()?;

    let rate = try_run_probability_test(iterations, || {
        lang.execute().and_then(|ledger| check.evaluate(ledger))
    })?;
    info!(iterations, rate, "probability scenario finished");

    writeln!(out, "Success rate: {:.2}% ({} iterations)", rate, iterations)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    const ALWAYS_RED: &str = r#"{
        "steps": [
            {"command": "init_deck", "meta": {"deck_type": "standard_deck"}},
            {"command": "pick_specific_cards", "meta": {
                "cards": [{"value": 1, "suit": "hearts"}], "from_sequence": 1
            }}
        ],
        "check": {"mode": "all_match", "colours": ["red"]}
    }"#;

    #[test]
    fn certain_scenario_reports_100() {
        let file = scenario_file(ALWAYS_RED);
        let mut out = Vec::new();
        handle_prob_command(file.path().to_str().unwrap(), 20, None, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Success rate: 100.00% (20 iterations)\n"
        );
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let file = scenario_file(
            r#"{
                "steps": [
                    {"command": "init_deck", "meta": {"deck_type": "standard_deck"}},
                    {"command": "pick_random_cards", "meta": {"count": 5}}
                ],
                "check": {"mode": "any_match", "values": [1, 13, 12, 11, 10]}
            }"#,
        );
        let path = file.path().to_str().unwrap();
        let mut a = Vec::new();
        let mut b = Vec::new();
        handle_prob_command(path, 500, Some(9), &mut a).unwrap();
        handle_prob_command(path, 500, Some(9), &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn failing_run_aborts() {
        let file = scenario_file(
            r#"{
                "steps": [
                    {"command": "init_deck", "meta": {"deck_type": "empty_deck"}},
                    {"command": "pick_random_cards", "meta": {"count": 1}}
                ],
                "check": {"mode": "any_match", "colours": ["red"]}
            }"#,
        );
        let mut out = Vec::new();
        let result = handle_prob_command(file.path().to_str().unwrap(), 10, None, &mut out);
        assert!(matches!(result, Err(CliError::Engine(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn zero_iterations_rejected() {
        let file = scenario_file(ALWAYS_RED);
        let mut out = Vec::new();
        assert!(matches!(
            handle_prob_command(file.path().to_str().unwrap(), 0, None, &mut out),
            Err(CliError::InvalidInput(_))
        ));
    }
}
