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

use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::id::CardId;
use crate::types::id::DeckId;
use crate::types::mastery::MasteryLevel;
use crate::types::timestamp::Timestamp;

/// What the study surface needs from persistence. The session engine itself
/// never touches the store: it emits review events, and the recorder worker
/// calls `record_review` on its behalf.
pub trait CardStore {
    /// All cards matching the filter, in stable (insertion) order.
    fn list_cards(&self, filter: &CardFilter) -> Fallible<Vec<Card>>;

    /// Apply a partial update. Fails if the card does not exist.
    fn update_card(&self, id: CardId, patch: &CardPatch) -> Fallible<()>;

    /// Fails if the card does not exist.
    fn delete_card(&self, id: CardId) -> Fallible<()>;

    /// Count one review of the card: a single in-place increment of its
    /// review count, plus the review timestamp. Two reviews in quick
    /// succession both count. Fails if the card does not exist (e.g. it was
    /// deleted mid-session).
    fn record_review(&self, id: CardId, reviewed_at: Timestamp) -> Fallible<()>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CardFilter {
    pub deck_id: Option<DeckId>,
    /// Keep only cards whose review count classifies to this level.
    pub level: Option<MasteryLevel>,
}

impl CardFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn deck(deck_id: DeckId) -> Self {
        Self {
            deck_id: Some(deck_id),
            ..Self::all()
        }
    }
}

/// A partial update to a card's text. `None` fields are left as they are.
#[derive(Clone, Debug)]
pub struct CardPatch {
    pub front: Option<String>,
    pub back: Option<String>,
}
