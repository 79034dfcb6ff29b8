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

/// Running tally of answers in a study session.
///
/// Progress is derived, not stored: a card is answered exactly once, so the
/// number of answered cards is always `correct + incorrect`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Score {
    pub correct: usize,
    pub incorrect: usize,
}

impl Score {
    pub fn zero() -> Self {
        Self {
            correct: 0,
            incorrect: 0,
        }
    }

    pub fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    /// The number of cards answered so far.
    pub fn progress(&self) -> usize {
        self.correct + self.incorrect
    }
}
