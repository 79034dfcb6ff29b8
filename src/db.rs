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
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::Fallible;
use crate::error::fail;
use crate::store::CardFilter;
use crate::store::CardPatch;
use crate::store::CardStore;
use crate::types::card::Card;
use crate::types::card::Deck;
use crate::types::id::CardId;
use crate::types::id::DeckId;
use crate::types::mastery::classify;
use crate::types::timestamp::Timestamp;

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    /// Create a deck with the given name. The name must be unused.
    pub fn create_deck(&self, name: &str) -> Fallible<Deck> {
        log::debug!("Creating deck: {name}");
        let created_at = Timestamp::now();
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        let deck_id = insert_deck(&tx, name, created_at)?;
        tx.commit()?;
        Ok(Deck {
            id: deck_id,
            name: name.to_string(),
            created_at,
        })
    }

    /// Find a deck by its name.
    pub fn find_deck(&self, name: &str) -> Fallible<Option<Deck>> {
        let conn = self.acquire();
        let sql = "select deck_id, name, created_at from decks where name = ?;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            Ok(Some(read_deck(row)?))
        } else {
            Ok(None)
        }
    }

    /// Return all decks, sorted by name.
    pub fn decks(&self) -> Fallible<Vec<Deck>> {
        let mut decks = Vec::new();
        let conn = self.acquire();
        let sql = "select deck_id, name, created_at from decks order by name;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            decks.push(read_deck(row)?);
        }
        Ok(decks)
    }

    /// Add a new card to a deck.
    pub fn add_card(&self, deck_id: DeckId, front: &str, back: &str) -> Fallible<Card> {
        log::debug!("Adding new card to deck {deck_id}.");
        let created_at = Timestamp::now();
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        let card_id = insert_card(&tx, deck_id, front, back, created_at)?;
        tx.commit()?;
        Ok(Card {
            id: card_id,
            deck_id,
            front: front.to_string(),
            back: back.to_string(),
            review_count: 0,
            last_reviewed_at: None,
            created_at,
        })
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}

impl CardStore for Database {
    fn list_cards(&self, filter: &CardFilter) -> Fallible<Vec<Card>> {
        let mut cards = Vec::new();
        let conn = self.acquire();
        match filter.deck_id {
            Some(deck_id) => {
                let sql = "select card_id, deck_id, front, back, review_count, last_reviewed_at, created_at from cards where deck_id = ? order by card_id;";
                let mut stmt = conn.prepare(sql)?;
                let mut rows = stmt.query([deck_id])?;
                while let Some(row) = rows.next()? {
                    cards.push(read_card(row)?);
                }
            }
            None => {
                let sql = "select card_id, deck_id, front, back, review_count, last_reviewed_at, created_at from cards order by card_id;";
                let mut stmt = conn.prepare(sql)?;
                let mut rows = stmt.query([])?;
                while let Some(row) = rows.next()? {
                    cards.push(read_card(row)?);
                }
            }
        }
        // The mastery level is derived from the review count, so it is
        // filtered here rather than in SQL.
        if let Some(level) = filter.level {
            cards.retain(|card| classify(card.review_count) == level);
        }
        Ok(cards)
    }

    fn update_card(&self, id: CardId, patch: &CardPatch) -> Fallible<()> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        if !probe_card_exists(&tx, id)? {
            return fail("no such card.");
        }
        if let Some(front) = &patch.front {
            tx.execute("update cards set front = ? where card_id = ?;", (front, id))?;
        }
        if let Some(back) = &patch.back {
            tx.execute("update cards set back = ? where card_id = ?;", (back, id))?;
        }
        tx.commit()?;
        Ok(())
    }

    fn delete_card(&self, id: CardId) -> Fallible<()> {
        log::debug!("Deleting card {id}.");
        let conn = self.acquire();
        let rows = conn.execute("delete from cards where card_id = ?;", [id])?;
        if rows == 0 {
            return fail("no such card.");
        }
        Ok(())
    }

    fn record_review(&self, id: CardId, reviewed_at: Timestamp) -> Fallible<()> {
        let conn = self.acquire();
        // A single in-place increment, so reviews arriving in quick
        // succession all land.
        let sql =
            "update cards set review_count = review_count + 1, last_reviewed_at = ? where card_id = ?;";
        let rows = conn.execute(sql, (reviewed_at, id))?;
        if rows == 0 {
            return fail("no such card.");
        }
        Ok(())
    }
}

fn insert_deck(tx: &Transaction, name: &str, created_at: Timestamp) -> Fallible<DeckId> {
    let sql = "insert into decks (name, created_at) values (?, ?) returning deck_id;";
    let deck_id: DeckId = tx.query_row(sql, (name, created_at), |row| row.get(0))?;
    Ok(deck_id)
}

fn insert_card(
    tx: &Transaction,
    deck_id: DeckId,
    front: &str,
    back: &str,
    created_at: Timestamp,
) -> Fallible<CardId> {
    let sql = "insert into cards (deck_id, front, back, created_at) values (?, ?, ?, ?) returning card_id;";
    let card_id: CardId =
        tx.query_row(sql, (deck_id, front, back, created_at), |row| row.get(0))?;
    Ok(card_id)
}

fn read_deck(row: &Row) -> Fallible<Deck> {
    let id: DeckId = row.get(0)?;
    let name: String = row.get(1)?;
    let created_at: Timestamp = row.get(2)?;
    Ok(Deck {
        id,
        name,
        created_at,
    })
}

fn read_card(row: &Row) -> Fallible<Card> {
    let id: CardId = row.get(0)?;
    let deck_id: DeckId = row.get(1)?;
    let front: String = row.get(2)?;
    let back: String = row.get(3)?;
    let review_count: usize = row.get::<_, i64>(4)? as usize;
    let last_reviewed_at: Option<Timestamp> = row.get(5)?;
    let created_at: Timestamp = row.get(6)?;
    Ok(Card {
        id,
        deck_id,
        front,
        back,
        review_count,
        last_reviewed_at,
        created_at,
    })
}

fn probe_card_exists(tx: &Transaction, id: CardId) -> Fallible<bool> {
    let sql = "select count(*) from cards where card_id = ?;";
    let count: i64 = tx.query_row(sql, [id], |row| row.get(0))?;
    Ok(count > 0)
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["decks"], |row| row.get(0))?;
    Ok(count > 0)
}
