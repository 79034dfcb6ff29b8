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

use crate::types::timestamp::Timestamp;

/// Position within a card sequence: the current index, whether the card is
/// showing its back, and the transition lock.
///
/// The lock is a time window, not a completion signal: it opens
/// `lock_millis` after it was engaged, whether or not any animation on the
/// other side of the wire actually finished. Callers check `locked` before
/// every transition and treat a locked cursor as a silent no-op.
#[derive(Clone, Debug)]
pub struct Cursor {
    index: usize,
    flipped: bool,
    locked_until: Option<Timestamp>,
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            index: 0,
            flipped: false,
            locked_until: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// Whether `now` falls inside the transition lock window.
    pub fn locked(&self, now: Timestamp) -> bool {
        match self.locked_until {
            Some(until) => now < until,
            None => false,
        }
    }

    /// Engage the lock for `millis` milliseconds starting at `now`.
    pub fn lock(&mut self, now: Timestamp, millis: u64) {
        self.locked_until = Some(now.plus_millis(millis));
    }

    /// Move forward one card. Flip state does not carry across cards.
    pub fn advance(&mut self) {
        self.index += 1;
        self.flipped = false;
    }

    /// Move forward one card, wrapping at `len`. Callers guarantee `len > 0`.
    pub fn advance_wrapping(&mut self, len: usize) {
        self.index = (self.index + 1) % len;
        self.flipped = false;
    }

    /// Move back one card, wrapping at `len`. Callers guarantee `len > 0`.
    pub fn retreat_wrapping(&mut self, len: usize) {
        self.index = (self.index + len - 1) % len;
        self.flipped = false;
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn t0() -> Timestamp {
        Timestamp::new(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_new_cursor_is_unlocked() {
        let cursor = Cursor::new();
        assert_eq!(cursor.index(), 0);
        assert!(!cursor.flipped());
        assert!(!cursor.locked(t0()));
    }

    #[test]
    fn test_lock_window() {
        let mut cursor = Cursor::new();
        cursor.lock(t0(), 250);
        assert!(cursor.locked(t0()));
        assert!(cursor.locked(t0().plus_millis(249)));
        // The window is half-open: the lock expires exactly at the boundary.
        assert!(!cursor.locked(t0().plus_millis(250)));
        assert!(!cursor.locked(t0().plus_millis(1000)));
    }

    #[test]
    fn test_zero_width_lock() {
        let mut cursor = Cursor::new();
        cursor.lock(t0(), 0);
        assert!(!cursor.locked(t0()));
    }

    #[test]
    fn test_advance_resets_flip() {
        let mut cursor = Cursor::new();
        cursor.flip();
        assert!(cursor.flipped());
        cursor.advance();
        assert_eq!(cursor.index(), 1);
        assert!(!cursor.flipped());
    }

    #[test]
    fn test_wrapping() {
        let mut cursor = Cursor::new();
        cursor.retreat_wrapping(3);
        assert_eq!(cursor.index(), 2);
        cursor.advance_wrapping(3);
        assert_eq!(cursor.index(), 0);
        cursor.advance_wrapping(3);
        cursor.advance_wrapping(3);
        assert_eq!(cursor.index(), 2);
        cursor.advance_wrapping(3);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_wrapping_resets_flip() {
        let mut cursor = Cursor::new();
        cursor.flip();
        cursor.advance_wrapping(1);
        assert_eq!(cursor.index(), 0);
        assert!(!cursor.flipped());
    }
}
