//! Reading sequence and scenario files.
//!
//! A sequence file is a JSON array of steps (or an object with a `steps`
//! array). A scenario file adds the `check` a probability run judges:
//!
//! ```json
//! {
//!   "steps": [
//!     {"command": "init_deck", "meta": {"deck_type": "standard_deck"}},
//!     {"command": "pick_random_cards", "meta": {"count": 1, "from_sequence": 1}}
//!   ],
//!   "check": {"from_sequence": 2, "mode": "any_match", "colours": ["red"]}
//! }
//! ```

use std::path::Path;

use cardlang_engine::language::Step;
use cardlang_engine::matcher::PickCheck;
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub steps: Vec<Step>,
    pub check: PickCheck,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SequenceFile {
    Steps(Vec<Step>),
    Wrapped { steps: Vec<Step> },
}

pub fn read_sequence(path: &Path) -> Result<Vec<Step>, CliError> {
    let text = read_text(path)?;
    let file: SequenceFile = serde_json::from_str(&text).map_err(|e| {
        CliError::InvalidInput(format!("{}: not a sequence file: {}", path.display(), e))
    })?;
    Ok(match file {
        SequenceFile::Steps(steps) | SequenceFile::Wrapped { steps } => steps,
    })
}

pub fn read_scenario(path: &Path) -> Result<Scenario, CliError> {
    let text = read_text(path)?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::InvalidInput(format!("{}: not a scenario file: {}", path.display(), e)))
}

fn read_text(path: &Path) -> Result<String, CliError> {
    let text = std::fs::read_to_string(path)?;
    // tolerate a UTF-8 BOM left by some editors
    Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
}
