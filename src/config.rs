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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::types::mastery::MasteryLevel;

pub const CONFIG_FILE: &str = "studycards.toml";

/// Per-library settings, read from `studycards.toml` in the library
/// directory. Every field is optional; command-line flags override these.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// The port the study server listens on.
    pub port: u16,
    /// Whether study sessions shuffle their cards.
    pub shuffle: bool,
    /// How long transitions stay locked, in milliseconds.
    pub lock_millis: u64,
    /// Restrict study sessions to cards at this mastery level.
    pub level: Option<MasteryLevel>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            shuffle: false,
            lock_millis: 250,
            level: None,
        }
    }
}

impl Config {
    /// Load the config from a library directory. A missing file means
    /// defaults; a malformed file is an error.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
