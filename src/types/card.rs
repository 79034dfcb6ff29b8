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

use crate::types::id::CardId;
use crate::types::id::DeckId;
use crate::types::timestamp::Timestamp;

/// A deck of cards.
#[derive(Clone, Debug)]
pub struct Deck {
    pub id: DeckId,
    /// The deck's name. Unique within a library.
    pub name: String,
    pub created_at: Timestamp,
}

/// A flashcard. Owned by the store: the session engine treats cards as
/// read-only and never mutates one, it only queues review events by id.
#[derive(Clone, Debug)]
pub struct Card {
    pub id: CardId,
    /// The deck this card belongs to.
    pub deck_id: DeckId,
    /// The front (question) text, in Markdown.
    pub front: String,
    /// The back (answer) text, in Markdown.
    pub back: String,
    /// The number of times this card has been reviewed. Incremented only by
    /// the persistence layer.
    pub review_count: usize,
    /// When the card was last reviewed, if ever.
    pub last_reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Card {
    #[cfg(test)]
    pub fn sample(id: i64, review_count: usize) -> Self {
        use chrono::TimeZone;
        use chrono::Utc;

        Self {
            id: CardId::new(id),
            deck_id: DeckId::new(1),
            front: format!("front {id}"),
            back: format!("back {id}"),
            review_count,
            last_reviewed_at: None,
            created_at: Timestamp::new(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()),
        }
    }
}
