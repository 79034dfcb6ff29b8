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

use serde::Serialize;

use crate::db::Database;
use crate::error::Fallible;
use crate::library::Library;
use crate::store::CardFilter;
use crate::store::CardStore;
use crate::types::id::CardId;
use crate::types::mastery::MasteryLevel;
use crate::types::mastery::classify;
use crate::types::timestamp::Timestamp;

pub fn export_library(directory: Option<String>) -> Fallible<()> {
    let library: Library = Library::open(directory)?;
    let export: Export = collect_export(&library.db)?;
    let json: String = serde_json::to_string_pretty(&export)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export {
    decks: Vec<DeckExport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeckExport {
    name: String,
    created_at: Timestamp,
    cards: Vec<CardExport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardExport {
    id: CardId,
    front: String,
    back: String,
    review_count: usize,
    mastery_level: MasteryLevel,
    last_reviewed_at: Option<Timestamp>,
    created_at: Timestamp,
}

fn collect_export(db: &Database) -> Fallible<Export> {
    let mut decks: Vec<DeckExport> = Vec::new();
    for deck in db.decks()? {
        let cards: Vec<CardExport> = db
            .list_cards(&CardFilter::deck(deck.id))?
            .into_iter()
            .map(|card| CardExport {
                id: card.id,
                front: card.front,
                back: card.back,
                review_count: card.review_count,
                mastery_level: classify(card.review_count),
                last_reviewed_at: card.last_reviewed_at,
                created_at: card.created_at,
            })
            .collect();
        decks.push(DeckExport {
            name: deck.name,
            created_at: deck.created_at,
            cards,
        });
    }
    Ok(Export { decks })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_library_dir;
    use crate::helper::seed_library;

    #[test]
    fn test_collect_export() -> Fallible<()> {
        let dir = create_tmp_library_dir()?;
        let db = seed_library(&dir, "greek", &[("logos", "word"), ("kosmos", "world")])?;
        let cards = db.list_cards(&CardFilter::all())?;
        db.record_review(cards[0].id, Timestamp::now())?;

        let export = collect_export(&db)?;
        assert_eq!(export.decks.len(), 1);
        assert_eq!(export.decks[0].cards.len(), 2);

        let value = serde_json::to_value(&export)?;
        let first = &value["decks"][0]["cards"][0];
        assert_eq!(first["front"], "logos");
        assert_eq!(first["reviewCount"], 1);
        assert_eq!(first["masteryLevel"], "learning");
        assert!(first["lastReviewedAt"].is_string());
        let second = &value["decks"][0]["cards"][1];
        assert_eq!(second["masteryLevel"], "new");
        assert!(second["lastReviewedAt"].is_null());
        Ok(())
    }
}
