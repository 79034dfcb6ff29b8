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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;

use crate::db::Database;
use crate::error::Fallible;
use crate::library::Library;
use crate::store::CardFilter;
use crate::store::CardStore;
use crate::types::mastery::MasteryTally;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Plain text output.
    Plain,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Plain => write!(f, "plain"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LibraryStats {
    decks: Vec<DeckStats>,
    card_count: usize,
    review_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckStats {
    name: String,
    card_count: usize,
    review_count: usize,
    mastery: MasteryTally,
}

pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let library: Library = Library::open(directory)?;
    let stats: LibraryStats = collect_stats(&library.db)?;
    match format {
        StatsFormat::Plain => {
            for deck in &stats.decks {
                println!(
                    "{}: {} cards, {} reviews ({} new, {} learning, {} almost-done, {} mastered)",
                    deck.name,
                    deck.card_count,
                    deck.review_count,
                    deck.mastery.new,
                    deck.mastery.learning,
                    deck.mastery.almost_done,
                    deck.mastery.mastered
                );
            }
            println!(
                "total: {} cards, {} reviews",
                stats.card_count, stats.review_count
            );
        }
        StatsFormat::Json => {
            let json: String = serde_json::to_string_pretty(&stats)?;
            println!("{json}");
        }
    }
    Ok(())
}

fn collect_stats(db: &Database) -> Fallible<LibraryStats> {
    let mut decks: Vec<DeckStats> = Vec::new();
    let mut card_count: usize = 0;
    let mut review_count: usize = 0;
    for deck in db.decks()? {
        let cards = db.list_cards(&CardFilter::deck(deck.id))?;
        let reviews: usize = cards.iter().map(|card| card.review_count).sum();
        card_count += cards.len();
        review_count += reviews;
        decks.push(DeckStats {
            name: deck.name,
            card_count: cards.len(),
            review_count: reviews,
            mastery: MasteryTally::of_cards(&cards),
        });
    }
    Ok(LibraryStats {
        decks,
        card_count,
        review_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_library_dir;
    use crate::helper::seed_library;
    use crate::types::timestamp::Timestamp;

    #[test]
    fn test_collect_stats() -> Fallible<()> {
        let dir = create_tmp_library_dir()?;
        let db = seed_library(
            &dir,
            "greek",
            &[("logos", "word"), ("kosmos", "world"), ("polis", "city")],
        )?;
        let cards = db.list_cards(&CardFilter::all())?;
        db.record_review(cards[0].id, Timestamp::now())?;

        let stats = collect_stats(&db)?;
        assert_eq!(stats.card_count, 3);
        assert_eq!(stats.review_count, 1);
        assert_eq!(stats.decks.len(), 1);
        assert_eq!(stats.decks[0].name, "greek");
        assert_eq!(stats.decks[0].card_count, 3);
        assert_eq!(stats.decks[0].mastery.new, 2);
        assert_eq!(stats.decks[0].mastery.learning, 1);
        Ok(())
    }

    #[test]
    fn test_empty_library() -> Fallible<()> {
        let dir = create_tmp_library_dir()?;
        let db = seed_library(&dir, "greek", &[])?;
        let stats = collect_stats(&db)?;
        assert_eq!(stats.card_count, 0);
        assert_eq!(stats.review_count, 0);
        assert_eq!(stats.decks[0].card_count, 0);
        Ok(())
    }

    #[test]
    fn test_json_keys_are_camel_case() -> Fallible<()> {
        let dir = create_tmp_library_dir()?;
        let db = seed_library(&dir, "greek", &[("logos", "word")])?;
        let stats = collect_stats(&db)?;
        let value = serde_json::to_value(&stats)?;
        assert_eq!(value["cardCount"], 1);
        assert_eq!(value["reviewCount"], 0);
        assert_eq!(value["decks"][0]["mastery"]["almostDone"], 0);
        Ok(())
    }
}
