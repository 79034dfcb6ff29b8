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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::session::Session;
use crate::store::CardPatch;
use crate::store::CardStore;
use crate::study::state::MutableState;
use crate::study::state::ServerState;
use crate::types::id::CardId;
use crate::types::timestamp::Timestamp;

/// The actions the study surface understands. Values match the submit
/// buttons in the views.
#[derive(Debug, Deserialize)]
enum Action {
    Flip,
    Next,
    Prev,
    Study,
    #[serde(rename = "Study Shuffled")]
    StudyShuffled,
    Correct,
    Incorrect,
    Restart,
    Reshuffle,
    Exit,
    Quit,
}

#[derive(Deserialize)]
pub struct ActionForm {
    action: Action,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<ActionForm>,
) -> Redirect {
    match action_handler(&state, form.action) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: &ServerState, action: Action) -> Fallible<()> {
    let mut mutable = state.mutable.lock().unwrap();
    let now = Timestamp::now();
    match action {
        Action::Flip => match &mut mutable.session {
            Some(session) => session.flip(now),
            None => mutable.carousel.flip(now),
        },
        Action::Next => {
            if mutable.session.is_none() {
                mutable.carousel.next(now);
            }
        }
        Action::Prev => {
            if mutable.session.is_none() {
                mutable.carousel.prev(now);
            }
        }
        Action::Study => {
            start_session(state, &mut mutable, state.shuffle)?;
        }
        Action::StudyShuffled => {
            start_session(state, &mut mutable, true)?;
        }
        Action::Correct => {
            if let Some(session) = &mut mutable.session {
                session.answer(true, now);
            }
        }
        Action::Incorrect => {
            if let Some(session) = &mut mutable.session {
                session.answer(false, now);
            }
        }
        Action::Restart => {
            if let Some(session) = &mut mutable.session {
                session.reset(false);
            }
        }
        Action::Reshuffle => {
            if let Some(session) = &mut mutable.session {
                session.reset(true);
            }
        }
        Action::Exit => {
            if mutable.session.take().is_some() {
                log::debug!("Exiting session.");
            }
            state.refresh_browse(&mut mutable)?;
        }
        Action::Quit => {
            log::debug!("Shutting down.");
            let sender = state.shutdown_tx.lock().unwrap().take();
            if let Some(sender) = sender {
                let _ = sender.send(());
            }
        }
    }
    Ok(())
}

/// Start a study session over the deck as it is right now. Ignored if a
/// session is already running.
fn start_session(state: &ServerState, mutable: &mut MutableState, shuffle: bool) -> Fallible<()> {
    if mutable.session.is_some() {
        return Ok(());
    }
    let cards = state.db.list_cards(&state.filter())?;
    log::debug!("Starting session over {} cards.", cards.len());
    mutable.session = Some(Session::start(
        &cards,
        shuffle,
        state.queue.clone(),
        state.lock_millis,
    ));
    Ok(())
}

#[derive(Deserialize)]
pub struct AddCardForm {
    front: String,
    back: String,
}

pub async fn add_card_handler(
    State(state): State<ServerState>,
    Form(form): Form<AddCardForm>,
) -> Redirect {
    match add_card(&state, &form) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

fn add_card(state: &ServerState, form: &AddCardForm) -> Fallible<()> {
    let front = form.front.trim();
    let back = form.back.trim();
    if front.is_empty() || back.is_empty() {
        return fail("front and back must not be empty.");
    }
    state.db.add_card(state.deck.id, front, back)?;
    Ok(())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCardForm {
    card_id: i64,
    front: String,
    back: String,
}

pub async fn edit_card_handler(
    State(state): State<ServerState>,
    Form(form): Form<EditCardForm>,
) -> Redirect {
    match edit_card(&state, &form) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

fn edit_card(state: &ServerState, form: &EditCardForm) -> Fallible<()> {
    let front = form.front.trim();
    let back = form.back.trim();
    if front.is_empty() || back.is_empty() {
        return fail("front and back must not be empty.");
    }
    let patch = CardPatch {
        front: Some(front.to_string()),
        back: Some(back.to_string()),
    };
    state.db.update_card(CardId::new(form.card_id), &patch)?;
    Ok(())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCardForm {
    card_id: i64,
}

pub async fn delete_card_handler(
    State(state): State<ServerState>,
    Form(form): Form<DeleteCardForm>,
) -> Redirect {
    match state.db.delete_card(CardId::new(form.card_id)) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use tokio::sync::oneshot;

    use super::*;
    use crate::carousel::Carousel;
    use crate::db::Database;
    use crate::recorder::ReviewQueue;

    fn test_state(cards: &[(&str, &str)]) -> Fallible<ServerState> {
        let db = Database::new(":memory:")?;
        let deck = db.create_deck("greek")?;
        for (front, back) in cards {
            db.add_card(deck.id, front, back)?;
        }
        let (queue, _rx) = ReviewQueue::new();
        let state = ServerState {
            deck,
            shuffle: false,
            level: None,
            lock_millis: 0,
            db,
            queue,
            mutable: Arc::new(Mutex::new(MutableState {
                cards: Vec::new(),
                carousel: Carousel::new(0, 0),
                session: None,
            })),
            shutdown_tx: Arc::new(Mutex::new(None)),
        };
        {
            let mut mutable = state.mutable.lock().unwrap();
            state.refresh_browse(&mut mutable)?;
        }
        Ok(state)
    }

    #[test]
    fn test_action_names() {
        let action: Action = serde_json::from_str("\"Study Shuffled\"").unwrap();
        assert!(matches!(action, Action::StudyShuffled));
        let action: Action = serde_json::from_str("\"Flip\"").unwrap();
        assert!(matches!(action, Action::Flip));
        assert!(serde_json::from_str::<Action>("\"Grade\"").is_err());
    }

    #[test]
    fn test_browse_navigation() -> Fallible<()> {
        let state = test_state(&[("a", "1"), ("b", "2")])?;
        action_handler(&state, Action::Next)?;
        assert_eq!(state.mutable.lock().unwrap().carousel.index(), 1);
        action_handler(&state, Action::Flip)?;
        assert!(state.mutable.lock().unwrap().carousel.flipped());
        action_handler(&state, Action::Prev)?;
        assert_eq!(state.mutable.lock().unwrap().carousel.index(), 0);
        Ok(())
    }

    #[test]
    fn test_study_flow() -> Fallible<()> {
        let state = test_state(&[("a", "1"), ("b", "2")])?;
        action_handler(&state, Action::Study)?;
        assert!(state.mutable.lock().unwrap().session.is_some());
        action_handler(&state, Action::Flip)?;
        action_handler(&state, Action::Correct)?;
        action_handler(&state, Action::Incorrect)?;
        {
            let mutable = state.mutable.lock().unwrap();
            let session = mutable.session.as_ref().unwrap();
            assert!(session.is_complete());
            assert_eq!(session.score().correct, 1);
            assert_eq!(session.score().incorrect, 1);
        }
        action_handler(&state, Action::Exit)?;
        assert!(state.mutable.lock().unwrap().session.is_none());
        Ok(())
    }

    #[test]
    fn test_study_while_active_is_ignored() -> Fallible<()> {
        let state = test_state(&[("a", "1"), ("b", "2")])?;
        action_handler(&state, Action::Study)?;
        action_handler(&state, Action::Correct)?;
        action_handler(&state, Action::Study)?;
        let mutable = state.mutable.lock().unwrap();
        assert_eq!(mutable.session.as_ref().unwrap().progress(), 1);
        Ok(())
    }

    #[test]
    fn test_restart_and_reshuffle() -> Fallible<()> {
        let state = test_state(&[("a", "1"), ("b", "2")])?;
        action_handler(&state, Action::Study)?;
        action_handler(&state, Action::Correct)?;
        action_handler(&state, Action::Correct)?;
        action_handler(&state, Action::Restart)?;
        {
            let mutable = state.mutable.lock().unwrap();
            let session = mutable.session.as_ref().unwrap();
            assert!(!session.is_complete());
            assert_eq!(session.progress(), 0);
        }
        action_handler(&state, Action::Reshuffle)?;
        assert_eq!(
            state
                .mutable
                .lock()
                .unwrap()
                .session
                .as_ref()
                .unwrap()
                .total(),
            2
        );
        Ok(())
    }

    #[test]
    fn test_quit_fires_the_shutdown_channel() -> Fallible<()> {
        let state = test_state(&[])?;
        let (tx, mut rx) = oneshot::channel();
        *state.shutdown_tx.lock().unwrap() = Some(tx);
        action_handler(&state, Action::Quit)?;
        assert!(rx.try_recv().is_ok());
        // A second quit finds the sender already taken.
        action_handler(&state, Action::Quit)?;
        Ok(())
    }

    #[test]
    fn test_add_card_rejects_blank_sides() -> Fallible<()> {
        let state = test_state(&[])?;
        let form = AddCardForm {
            front: "   ".to_string(),
            back: "city".to_string(),
        };
        let result = add_card(&state, &form);
        assert_eq!(
            result.unwrap_err().to_string(),
            "error: front and back must not be empty."
        );
        let form = AddCardForm {
            front: "polis".to_string(),
            back: "city".to_string(),
        };
        add_card(&state, &form)?;
        Ok(())
    }

    #[test]
    fn test_edit_card_trims_and_saves() -> Fallible<()> {
        use crate::store::CardFilter;

        let state = test_state(&[("logos", "word")])?;
        let card_id = {
            let mutable = state.mutable.lock().unwrap();
            mutable.cards[0].id
        };
        let form = EditCardForm {
            card_id: card_id.to_string().parse().unwrap(),
            front: "  Logos  ".to_string(),
            back: "word, reason".to_string(),
        };
        edit_card(&state, &form)?;
        let cards = state.db.list_cards(&CardFilter::all())?;
        assert_eq!(cards[0].front, "Logos");
        assert_eq!(cards[0].back, "word, reason");
        Ok(())
    }
}
