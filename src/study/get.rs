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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::PreEscaped;
use maud::html;

use crate::markdown::markdown_to_html;
use crate::session::Session;
use crate::study::state::MutableState;
use crate::study::state::ServerState;
use crate::study::template::page_template;
use crate::types::card::Card;
use crate::types::mastery::MasteryTally;
use crate::types::mastery::classify;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut mutable = state.mutable.lock().unwrap();
    if mutable.session.is_none() {
        // Browsing shows the live deck.
        if let Err(e) = state.refresh_browse(&mut mutable) {
            log::error!("{e}");
        }
    }
    let body = match &mutable.session {
        Some(session) if session.is_complete() => complete_view(&state, session),
        Some(session) => study_view(&state, session),
        None => browse_view(&state, &mutable),
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

fn browse_view(state: &ServerState, mutable: &MutableState) -> Markup {
    let cards = &mutable.cards;
    let position = if cards.is_empty() {
        "0 / 0".to_string()
    } else {
        format!("{} / {}", mutable.carousel.index() + 1, cards.len())
    };
    let tally = MasteryTally::of_cards(cards);
    html! {
        div.root {
            div.card {
                div.header {
                    h1 {
                        (state.deck.name)
                    }
                    div.progress {
                        (position)
                    }
                }
                (tally_bar(&tally))
                (browse_content(mutable))
                div.controls {
                    (browse_controls(cards.is_empty()))
                }
            }
            (card_editor(mutable.cards.get(mutable.carousel.index())))
        }
    }
}

fn browse_content(mutable: &MutableState) -> Markup {
    let card = mutable.cards.get(mutable.carousel.index());
    match card {
        None => html! {
            div.content {
                div.empty {
                    "This deck has no cards."
                }
            }
        },
        Some(card) => {
            let level = classify(card.review_count);
            let front = markdown_to_html(&card.front);
            let back = markdown_to_html(&card.back);
            html! {
                div.content {
                    span class={ "badge " (level.as_str()) } {
                        (level)
                    }
                    div .front .rich-text {
                        (PreEscaped(front))
                    }
                    @if mutable.carousel.flipped() {
                        div .back .rich-text {
                            (PreEscaped(back))
                        }
                    } @else {
                        div .back .rich-text {}
                    }
                }
            }
        }
    }
}

fn browse_controls(empty: bool) -> Markup {
    html! {
        form action="/" method="post" {
            @if empty {
                input id="prev" type="submit" name="action" value="Prev" disabled;
                input id="flip" type="submit" name="action" value="Flip" disabled;
                input id="next" type="submit" name="action" value="Next" disabled;
                div.spacer {}
                input id="study" type="submit" name="action" value="Study" disabled;
                input id="study-shuffled" type="submit" name="action" value="Study Shuffled" disabled;
            } @else {
                input id="prev" type="submit" name="action" value="Prev";
                input id="flip" type="submit" name="action" value="Flip";
                input id="next" type="submit" name="action" value="Next";
                div.spacer {}
                input id="study" type="submit" name="action" value="Study";
                input id="study-shuffled" type="submit" name="action" value="Study Shuffled";
            }
            div.spacer {}
            input id="quit" type="submit" name="action" value="Quit";
        }
    }
}

fn card_editor(card: Option<&Card>) -> Markup {
    html! {
        div.editor {
            @if let Some(card) = card {
                form action="/cards/edit" method="post" {
                    input type="hidden" name="cardId" value=(card.id);
                    input type="text" name="front" value=(card.front);
                    input type="text" name="back" value=(card.back);
                    input type="submit" value="Save";
                }
                form action="/cards/delete" method="post" {
                    input type="hidden" name="cardId" value=(card.id);
                    input type="submit" value="Delete";
                }
            }
            form action="/cards" method="post" {
                input type="text" name="front" placeholder="Front";
                input type="text" name="back" placeholder="Back";
                input type="submit" value="Add Card";
            }
        }
    }
}

fn tally_bar(tally: &MasteryTally) -> Markup {
    html! {
        div.tally {
            span.new {
                (tally.new) " new"
            }
            span.learning {
                (tally.learning) " learning"
            }
            span.almost-done {
                (tally.almost_done) " almost done"
            }
            span.mastered {
                (tally.mastered) " mastered"
            }
        }
    }
}

fn study_view(state: &ServerState, session: &Session) -> Markup {
    let progress = format!("{} / {}", session.progress(), session.total());
    let card_content: Markup = match session.current() {
        Some(card) => {
            let front = markdown_to_html(&card.front);
            let back = markdown_to_html(&card.back);
            if session.flipped() {
                html! {
                    div.content {
                        div .front .rich-text {
                            (PreEscaped(front))
                        }
                        div .back .rich-text {
                            (PreEscaped(back))
                        }
                    }
                }
            } else {
                html! {
                    div.content {
                        div .front .rich-text {
                            (PreEscaped(front))
                        }
                        div .back .rich-text {}
                    }
                }
            }
        }
        None => html! {},
    };
    let card_controls = if session.flipped() {
        html! {
            form action="/" method="post" {
                input id="incorrect" type="submit" name="action" value="Incorrect";
                input id="correct" type="submit" name="action" value="Correct";
                div.spacer {}
                input id="exit" type="submit" name="action" value="Exit";
            }
        }
    } else {
        html! {
            form action="/" method="post" {
                input id="flip" type="submit" name="action" value="Flip";
                div.spacer {}
                input id="exit" type="submit" name="action" value="Exit";
            }
        }
    };
    html! {
        div.root {
            div.card {
                div.header {
                    h1 {
                        (state.deck.name)
                    }
                    div.progress {
                        (progress)
                    }
                }
                (card_content)
                div.controls {
                    (card_controls)
                }
            }
        }
    }
}

fn complete_view(state: &ServerState, session: &Session) -> Markup {
    html! {
        div.root {
            div.card {
                div.header {
                    h1 {
                        (state.deck.name)
                    }
                }
                div.finished {
                    h1 {
                        "Session Complete"
                    }
                    p {
                        (session.score().correct) " of " (session.total()) " correct."
                    }
                }
                div.controls {
                    form action="/" method="post" {
                        input id="restart" type="submit" name="action" value="Restart";
                        input id="reshuffle" type="submit" name="action" value="Reshuffle";
                        div.spacer {}
                        input id="exit" type="submit" name="action" value="Exit";
                    }
                }
            }
        }
    }
}
