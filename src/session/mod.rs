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

pub mod cursor;
pub mod score;
pub mod snapshot;

use crate::recorder::ReviewEvent;
use crate::recorder::ReviewQueue;
use crate::session::cursor::Cursor;
use crate::session::score::Score;
use crate::session::snapshot::Snapshot;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// A study session over a snapshot of a deck.
///
/// The session walks its snapshot strictly forward, one answer per card,
/// and is complete when every card has been answered. Cards are read-only
/// here: answering queues a review event for the recorder and that is the
/// only trace a session leaves outside itself.
///
/// All transitions are synchronous. Methods take the current time as an
/// argument so the transition lock can be tested without sleeping.
pub struct Session {
    snapshot: Snapshot,
    cursor: Cursor,
    score: Score,
    queue: ReviewQueue,
    lock_millis: u64,
}

impl Session {
    /// Start a session over a copy of `cards`, optionally shuffled. A
    /// session over zero cards is complete from the start; it is never
    /// active, not even transiently.
    pub fn start(cards: &[Card], shuffle: bool, queue: ReviewQueue, lock_millis: u64) -> Self {
        let snapshot = if shuffle {
            Snapshot::shuffled(cards)
        } else {
            Snapshot::ordered(cards)
        };
        if snapshot.is_empty() {
            log::debug!("Starting session over an empty deck.");
        } else {
            log::debug!("Starting session over {} cards.", snapshot.len());
        }
        Self {
            snapshot,
            cursor: Cursor::new(),
            score: Score::zero(),
            queue,
            lock_millis,
        }
    }

    /// The card waiting for an answer, or `None` once the session is
    /// complete.
    pub fn current(&self) -> Option<&Card> {
        if self.is_complete() {
            None
        } else {
            self.snapshot.get(self.cursor.index())
        }
    }

    pub fn is_complete(&self) -> bool {
        self.score.progress() == self.snapshot.len()
    }

    /// The number of cards in the snapshot.
    pub fn total(&self) -> usize {
        self.snapshot.len()
    }

    /// The number of cards answered so far.
    pub fn progress(&self) -> usize {
        self.score.progress()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn flipped(&self) -> bool {
        self.cursor.flipped()
    }

    /// Answer the current card. Tallies the answer, queues a review event
    /// for the recorder, and moves on: to the next card through a locked
    /// transition window, or to completion if this was the last card (the
    /// cursor never steps past the end of the snapshot). A silent no-op
    /// while locked or once complete.
    pub fn answer(&mut self, correct: bool, now: Timestamp) {
        if self.is_complete() || self.cursor.locked(now) {
            return;
        }
        let card_id = match self.snapshot.get(self.cursor.index()) {
            Some(card) => card.id,
            None => return,
        };
        self.score.record(correct);
        self.queue.push(ReviewEvent {
            card_id,
            reviewed_at: now,
        });
        if self.is_complete() {
            log::debug!(
                "Session complete: {} correct, {} incorrect.",
                self.score.correct,
                self.score.incorrect
            );
        } else {
            self.cursor.advance();
            self.cursor.lock(now, self.lock_millis);
        }
    }

    /// Show the other side of the current card, through the same locked
    /// transition window as an answer. A silent no-op while locked or once
    /// complete.
    pub fn flip(&mut self, now: Timestamp) {
        if self.is_complete() || self.cursor.locked(now) {
            return;
        }
        self.cursor.flip();
        self.cursor.lock(now, self.lock_millis);
    }

    /// Start over: zero the score, rewind the cursor, and either keep the
    /// snapshot's order or replace it with a freshly shuffled one. Reset
    /// does not wait for the transition lock. Reviews already queued stay
    /// queued; a reset does not un-record them.
    pub fn reset(&mut self, reshuffle: bool) {
        if reshuffle {
            self.snapshot = self.snapshot.reshuffled();
        }
        self.cursor = Cursor::new();
        self.score = Score::zero();
    }
}
