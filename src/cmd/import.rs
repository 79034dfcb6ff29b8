// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::Fallible;
use crate::error::fail;
use crate::library::Library;
use crate::parser::parse_cards;

/// Import plain text deck files into the library. `path` may be a single
/// file or a directory, which is walked recursively. Each `.md` or `.txt`
/// file becomes one deck, named after the file stem.
pub fn import_decks(directory: Option<String>, path: &str) -> Fallible<()> {
    let library: Library = Library::open(directory)?;
    let path = Path::new(path);
    if !path.exists() {
        return fail("path does not exist.");
    }
    let mut deck_count: usize = 0;
    let mut card_count: usize = 0;
    for entry in WalkDir::new(path) {
        let entry = entry?;
        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == "md" || ext == "txt")
        {
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let contents = std::fs::read_to_string(path)?;
            let cards = parse_cards(&contents);
            if cards.is_empty() {
                log::warn!("no cards in {}, skipping.", path.display());
                continue;
            }
            if library.db.find_deck(name)?.is_some() {
                log::warn!("deck {name} already exists, skipping.");
                continue;
            }
            let deck = library.db.create_deck(name)?;
            for card in &cards {
                library.db.add_card(deck.id, &card.front, &card.back)?;
            }
            deck_count += 1;
            card_count += cards.len();
        }
    }
    println!("Imported {card_count} cards into {deck_count} decks.");
    Ok(())
}
