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

use clap::Parser;

use crate::cmd::export::export_library;
use crate::cmd::import::import_decks;
use crate::cmd::new::create_deck;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;
use crate::library::Library;
use crate::study::server::StudyOptions;
use crate::study::server::start_server;
use crate::types::mastery::MasteryLevel;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Study a deck in the browser.
    Study {
        /// The name of the deck to study.
        deck: String,
        /// Optional path to the library directory.
        #[arg(long)]
        directory: Option<String>,
        /// Shuffle the cards when a session starts.
        #[arg(long)]
        shuffle: bool,
        /// Only study cards at this mastery level.
        #[arg(long)]
        level: Option<MasteryLevel>,
        /// Port to serve on.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create an empty deck.
    New {
        /// The name of the deck to create.
        deck: String,
        /// Optional path to the library directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Import decks from plain text files.
    Import {
        /// A deck file, or a directory of deck files.
        path: String,
        /// Optional path to the library directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Print library statistics.
    Stats {
        /// Optional path to the library directory.
        #[arg(long)]
        directory: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Plain)]
        format: StatsFormat,
    },
    /// Dump the whole library as JSON.
    Export {
        /// Optional path to the library directory.
        #[arg(long)]
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Study {
            deck,
            directory,
            shuffle,
            level,
            port,
        } => {
            let library: Library = Library::open(directory)?;
            println!("Studying in {}.", library.directory.display());
            // Flags override the config file.
            let options = StudyOptions {
                port: port.unwrap_or(library.config.port),
                shuffle: shuffle || library.config.shuffle,
                level: level.or(library.config.level),
                lock_millis: library.config.lock_millis,
            };
            start_server(library, &deck, options).await
        }
        Command::New { deck, directory } => create_deck(directory, &deck),
        Command::Import { path, directory } => import_decks(directory, &path),
        Command::Stats { directory, format } => print_stats(directory, format),
        Command::Export { directory } => export_library(directory),
    }
}
