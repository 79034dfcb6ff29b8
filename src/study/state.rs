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

use std::sync::Arc;
use std::sync::Mutex;

use tokio::sync::oneshot;

use crate::carousel::Carousel;
use crate::db::Database;
use crate::error::Fallible;
use crate::recorder::ReviewQueue;
use crate::session::Session;
use crate::store::CardFilter;
use crate::store::CardStore;
use crate::types::card::Card;
use crate::types::card::Deck;
use crate::types::mastery::MasteryLevel;

#[derive(Clone)]
pub struct ServerState {
    /// The deck this server is scoped to.
    pub deck: Deck,
    /// Whether plain `Study` shuffles.
    pub shuffle: bool,
    /// Restrict the server to cards at this mastery level.
    pub level: Option<MasteryLevel>,
    pub lock_millis: u64,
    pub db: Database,
    pub queue: ReviewQueue,
    pub mutable: Arc<Mutex<MutableState>>,
    /// Taken by the `Quit` action to stop the server.
    pub shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

pub struct MutableState {
    /// The cards shown while browsing. Refreshed from the database on every
    /// render of the browse view, so edits and recorded reviews show up.
    pub cards: Vec<Card>,
    pub carousel: Carousel,
    /// `Some` while a study session is running. The session holds its own
    /// snapshot of the deck; `cards` is not touched until it ends.
    pub session: Option<Session>,
}

impl ServerState {
    pub fn filter(&self) -> CardFilter {
        CardFilter {
            deck_id: Some(self.deck.id),
            level: self.level,
        }
    }

    /// Reload the browse card list from the database. The carousel keeps its
    /// position unless it no longer points at a card.
    pub fn refresh_browse(&self, mutable: &mut MutableState) -> Fallible<()> {
        mutable.cards = self.db.list_cards(&self.filter())?;
        mutable.carousel.resize(mutable.cards.len());
        Ok(())
    }
}
