use std::io::Write;

use cardlang_engine::variant::DECK_TYPES;

use crate::error::CliError;

/// Prints the deck types `init_deck` accepts with their composition.
pub fn handle_decks_command(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(
        out,
        "{:<28} {:>6} {:>12} {:>7}",
        "deck_type", "cards", "occurrences", "jokers"
    )?;
    for (name, variant) in DECK_TYPES {
        writeln!(
            out,
            "{:<28} {:>6} {:>12} {:>7}",
            name, variant.non_joker_cards, variant.occurrences_per_card, variant.jokers
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_deck_type() {
        let mut out = Vec::new();
        handle_decks_command(&mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.lines().count(), 5);
        for name in ["standard_deck", "standard_deck_with_jokers", "canasta_deck", "empty_deck"] {
            assert!(output.contains(name), "missing {}", name);
        }
        let canasta = output.lines().find(|l| l.starts_with("canasta_deck")).unwrap();
        let cols: Vec<&str> = canasta.split_whitespace().collect();
        assert_eq!(cols, ["canasta_deck", "104", "2", "4"]);
    }
}
