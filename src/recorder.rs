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

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::store::CardStore;
use crate::types::id::CardId;
use crate::types::timestamp::Timestamp;

/// One "this card was reviewed" fact, queued by the session engine when an
/// answer is given.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ReviewEvent {
    pub card_id: CardId,
    pub reviewed_at: Timestamp,
}

/// The sending half of the review queue. Pushing never blocks and never
/// fails from the caller's point of view: if the recorder worker is gone,
/// the event is dropped.
#[derive(Clone)]
pub struct ReviewQueue {
    tx: mpsc::UnboundedSender<ReviewEvent>,
}

impl ReviewQueue {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ReviewEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn push(&self, event: ReviewEvent) {
        let _ = self.tx.send(event);
    }
}

/// Start the background worker that drains review events into the store,
/// in queue order. Persistence is best-effort: a failed write is logged and
/// dropped, and the session that queued it is never told. The worker exits
/// once every `ReviewQueue` handle has been dropped and the queue is empty,
/// so awaiting the returned handle drains outstanding events.
pub fn spawn_recorder<S>(store: S) -> (ReviewQueue, JoinHandle<()>)
where
    S: CardStore + Send + Sync + 'static,
{
    let (queue, mut rx) = ReviewQueue::new();
    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            log::debug!("Recording review of card {}.", event.card_id);
            if let Err(e) = store.record_review(event.card_id, event.reviewed_at) {
                log::warn!("Dropping review of card {}: {e}", event.card_id);
            }
        }
    });
    (queue, handle)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::error::Fallible;
    use crate::error::fail;
    use crate::store::CardFilter;
    use crate::store::CardPatch;
    use crate::types::card::Card;

    /// A store that remembers every recorded review, and can be told to
    /// reject reviews of specific cards.
    #[derive(Clone, Default)]
    struct MemoryStore {
        reviews: Arc<Mutex<Vec<CardId>>>,
        reject: Vec<CardId>,
    }

    impl CardStore for MemoryStore {
        fn list_cards(&self, _filter: &CardFilter) -> Fallible<Vec<Card>> {
            Ok(Vec::new())
        }

        fn update_card(&self, _id: CardId, _patch: &CardPatch) -> Fallible<()> {
            Ok(())
        }

        fn delete_card(&self, _id: CardId) -> Fallible<()> {
            Ok(())
        }

        fn record_review(&self, id: CardId, _reviewed_at: Timestamp) -> Fallible<()> {
            if self.reject.contains(&id) {
                return fail("no such card.");
            }
            self.reviews.lock().unwrap().push(id);
            Ok(())
        }
    }

    fn event(id: i64) -> ReviewEvent {
        ReviewEvent {
            card_id: CardId::new(id),
            reviewed_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn test_drains_in_queue_order() {
        let store = MemoryStore::default();
        let reviews = store.reviews.clone();
        let (queue, worker) = spawn_recorder(store);
        queue.push(event(1));
        queue.push(event(2));
        queue.push(event(3));
        drop(queue);
        worker.await.unwrap();
        let recorded = reviews.lock().unwrap().clone();
        assert_eq!(
            recorded,
            vec![CardId::new(1), CardId::new(2), CardId::new(3)]
        );
    }

    #[tokio::test]
    async fn test_store_failures_are_swallowed() {
        let store = MemoryStore {
            reject: vec![CardId::new(2)],
            ..MemoryStore::default()
        };
        let reviews = store.reviews.clone();
        let (queue, worker) = spawn_recorder(store);
        queue.push(event(1));
        queue.push(event(2));
        queue.push(event(3));
        drop(queue);
        // The worker outlives the failure and keeps draining.
        worker.await.unwrap();
        let recorded = reviews.lock().unwrap().clone();
        assert_eq!(recorded, vec![CardId::new(1), CardId::new(3)]);
    }

    #[test]
    fn test_push_to_dead_worker_is_silent() {
        let (queue, rx) = ReviewQueue::new();
        drop(rx);
        queue.push(event(1));
    }
}
