//! The `flashcoach validate` command.

use std::path::PathBuf;

use anyhow::Result;

use flashcoach_core::parser;

pub fn execute(deck_path: PathBuf) -> Result<()> {
    let decks = if deck_path.is_dir() {
        parser::load_deck_directory(&deck_path)?
    } else {
        vec![parser::parse_deck(&deck_path)?]
    };

    anyhow::ensure!(!decks.is_empty(), "no deck files found");

    let mut warning_count = 0;
    for deck in &decks {
        println!("Deck: {} ({} cards)", deck.name, deck.cards.len());
        for warning in parser::validate_deck(deck) {
            match &warning.card_id {
                Some(id) => println!("  warning [{id}]: {}", warning.message),
                None => println!("  warning: {}", warning.message),
            }
            warning_count += 1;
        }
    }

    if warning_count == 0 {
        println!("All decks valid.");
    } else {
        println!("{warning_count} warning(s) found.");
    }

    Ok(())
}
