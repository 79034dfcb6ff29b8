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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::types::card::Card;

/// How well a card is known, derived solely from its review count.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MasteryLevel {
    /// Never reviewed.
    New,
    /// Reviewed once or twice.
    Learning,
    /// Reviewed three or four times.
    AlmostDone,
    /// Reviewed five or more times.
    Mastered,
}

/// Classify a review count into a mastery level. Total: every count maps to
/// exactly one level.
pub fn classify(review_count: usize) -> MasteryLevel {
    match review_count {
        0 => MasteryLevel::New,
        1..=2 => MasteryLevel::Learning,
        3..=4 => MasteryLevel::AlmostDone,
        _ => MasteryLevel::Mastered,
    }
}

impl MasteryLevel {
    pub fn as_str(&self) -> &str {
        match self {
            MasteryLevel::New => "new",
            MasteryLevel::Learning => "learning",
            MasteryLevel::AlmostDone => "almost-done",
            MasteryLevel::Mastered => "mastered",
        }
    }
}

impl Display for MasteryLevel {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for MasteryLevel {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "new" => Ok(MasteryLevel::New),
            "learning" => Ok(MasteryLevel::Learning),
            "almost-done" => Ok(MasteryLevel::AlmostDone),
            "mastered" => Ok(MasteryLevel::Mastered),
            _ => fail(format!("invalid mastery level: {}", value)),
        }
    }
}

/// Per-level card counts over a deck, for the browse progress bar and the
/// `stats` command.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryTally {
    pub new: usize,
    pub learning: usize,
    pub almost_done: usize,
    pub mastered: usize,
}

impl MasteryTally {
    pub fn of_cards(cards: &[Card]) -> Self {
        let mut tally = MasteryTally {
            new: 0,
            learning: 0,
            almost_done: 0,
            mastered: 0,
        };
        for card in cards {
            match classify(card.review_count) {
                MasteryLevel::New => tally.new += 1,
                MasteryLevel::Learning => tally.learning += 1,
                MasteryLevel::AlmostDone => tally.almost_done += 1,
                MasteryLevel::Mastered => tally.mastered += 1,
            }
        }
        tally
    }
}
