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

use crate::session::cursor::Cursor;
use crate::types::timestamp::Timestamp;

/// Free browsing over the cards of a deck.
///
/// Unlike a study session, the carousel wraps around at both ends and never
/// finishes. It only tracks a position into the live card list, which the
/// server keeps alongside it; navigation goes through the same transition
/// lock as the session so a held-down key cannot skip cards invisibly.
pub struct Carousel {
    len: usize,
    cursor: Cursor,
    lock_millis: u64,
}

impl Carousel {
    pub fn new(len: usize, lock_millis: u64) -> Self {
        Self {
            len,
            cursor: Cursor::new(),
            lock_millis,
        }
    }

    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    pub fn flipped(&self) -> bool {
        self.cursor.flipped()
    }

    /// Move to the next card, wrapping from the last back to the first. A
    /// no-op while locked or when there are no cards.
    pub fn next(&mut self, now: Timestamp) {
        if self.len == 0 || self.cursor.locked(now) {
            return;
        }
        self.cursor.advance_wrapping(self.len);
        self.cursor.lock(now, self.lock_millis);
    }

    /// Move to the previous card, wrapping from the first to the last.
    pub fn prev(&mut self, now: Timestamp) {
        if self.len == 0 || self.cursor.locked(now) {
            return;
        }
        self.cursor.retreat_wrapping(self.len);
        self.cursor.lock(now, self.lock_millis);
    }

    /// Show the other side of the current card.
    pub fn flip(&mut self, now: Timestamp) {
        if self.len == 0 || self.cursor.locked(now) {
            return;
        }
        self.cursor.flip();
        self.cursor.lock(now, self.lock_millis);
    }

    /// Tell the carousel the card list changed size. The position is kept if
    /// it still points at a card, and rewound to the start otherwise.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        if self.cursor.index() >= len {
            self.cursor = Cursor::new();
        }
    }
}
