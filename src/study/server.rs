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
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::carousel::Carousel;
use crate::error::Fallible;
use crate::error::fail;
use crate::library::Library;
use crate::recorder::spawn_recorder;
use crate::study::get::get_handler;
use crate::study::post::add_card_handler;
use crate::study::post::delete_card_handler;
use crate::study::post::edit_card_handler;
use crate::study::post::post_handler;
use crate::study::state::MutableState;
use crate::study::state::ServerState;
use crate::types::mastery::MasteryLevel;

pub struct StudyOptions {
    pub port: u16,
    pub shuffle: bool,
    pub level: Option<MasteryLevel>,
    pub lock_millis: u64,
}

/// Serve the study UI for one deck of the library, blocking until the user
/// quits or the process is interrupted.
pub async fn start_server(library: Library, deck_name: &str, options: StudyOptions) -> Fallible<()> {
    let deck = match library.db.find_deck(deck_name)? {
        Some(deck) => deck,
        None => return fail("deck does not exist."),
    };

    let db = library.db.clone();
    let (queue, recorder) = spawn_recorder(db.clone());
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let state = ServerState {
        deck,
        shuffle: options.shuffle,
        level: options.level,
        lock_millis: options.lock_millis,
        db,
        queue: queue.clone(),
        mutable: Arc::new(Mutex::new(MutableState {
            cards: Vec::new(),
            carousel: Carousel::new(0, options.lock_millis),
            session: None,
        })),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    {
        let mut mutable = state.mutable.lock().unwrap();
        state.refresh_browse(&mut mutable)?;
        log::debug!("Browsing {} cards.", mutable.cards.len());
    }

    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/cards", post(add_card_handler));
    let app = app.route("/cards/edit", post(edit_card_handler));
    let app = app.route("/cards/delete", post(delete_card_handler));
    let app = app.route("/script.js", get(script));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let port = options.port;
    let bind = format!("0.0.0.0:{port}");

    // Start a separate task to open the browser.
    let url = format!("http://localhost:{port}/");
    {
        let bind = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&bind).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    // Start the server.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = shutdown_rx => {}
                _ = tokio::signal::ctrl_c() => {}
            }
        })
        .await?;

    // Closing the queue lets the recorder drain what is left and stop.
    drop(queue);
    if let Err(e) = recorder.await {
        log::error!("{e}");
    }
    Ok(())
}

async fn script() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
