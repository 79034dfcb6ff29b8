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

use rand::rng;
use rand::seq::SliceRandom;

use crate::types::card::Card;

/// The cards of a study session, copied from the live deck when the session
/// starts. Edits to the live deck never reach a snapshot: a session studies
/// exactly the cards it started with.
///
/// A snapshot is never reordered in place. Reshuffling produces a fresh
/// snapshot and leaves the original untouched.
#[derive(Clone, Debug)]
pub struct Snapshot {
    cards: Vec<Card>,
}

impl Snapshot {
    /// Copy `cards` in their current order.
    pub fn ordered(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }

    /// Copy `cards` in uniformly random order (Fisher-Yates).
    pub fn shuffled(cards: &[Card]) -> Self {
        let mut cards = cards.to_vec();
        cards.shuffle(&mut rng());
        Self { cards }
    }

    /// A new snapshot over the same cards in a fresh random order.
    pub fn reshuffled(&self) -> Self {
        Self::shuffled(&self.cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    #[cfg(test)]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::CardId;

    fn sample_cards(n: usize) -> Vec<Card> {
        (0..n).map(|i| Card::sample(i as i64, 0)).collect()
    }

    fn ids(cards: &[Card]) -> Vec<CardId> {
        cards.iter().map(|card| card.id).collect()
    }

    #[test]
    fn test_ordered_preserves_order() {
        let source = sample_cards(4);
        let snapshot = Snapshot::ordered(&source);
        assert_eq!(snapshot.len(), 4);
        assert_eq!(ids(snapshot.cards()), ids(&source));
    }

    #[test]
    fn test_shuffled_is_a_permutation() {
        let source = sample_cards(32);
        let snapshot = Snapshot::shuffled(&source);
        assert_eq!(snapshot.len(), source.len());
        let mut expected = ids(&source);
        let mut actual = ids(snapshot.cards());
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_reshuffled_leaves_original_untouched() {
        let source = sample_cards(16);
        let snapshot = Snapshot::ordered(&source);
        let order_before = ids(snapshot.cards());
        let reshuffled = snapshot.reshuffled();
        assert_eq!(ids(snapshot.cards()), order_before);
        let mut expected = order_before;
        let mut actual = ids(reshuffled.cards());
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_snapshot_ignores_later_edits() {
        let mut source = sample_cards(2);
        let snapshot = Snapshot::ordered(&source);
        source[0].front = "edited".to_string();
        source.push(Card::sample(99, 0));
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(0).unwrap().front, "front 0");
    }

    #[test]
    fn test_empty() {
        let snapshot = Snapshot::ordered(&[]);
        assert!(snapshot.is_empty());
        assert!(snapshot.get(0).is_none());
        assert!(snapshot.reshuffled().is_empty());
    }
}
