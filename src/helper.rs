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

use std::fs::create_dir_all;
use std::path::Path;
use std::path::PathBuf;

use tempfile::tempdir;

use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;

/// Create an empty directory to use as a library in tests.
pub fn create_tmp_library_dir() -> Fallible<PathBuf> {
    let target: PathBuf = tempdir()?.path().to_path_buf();
    create_dir_all(&target)?;
    Ok(target)
}

/// Create the library database in `directory` and fill it with one deck of
/// the given cards.
pub fn seed_library(
    directory: &Path,
    deck_name: &str,
    cards: &[(&str, &str)],
) -> Fallible<Database> {
    let db_path: PathBuf = directory.join("studycards.db");
    let db_path: &str = db_path
        .to_str()
        .ok_or_else(|| ErrorReport::new("invalid path"))?;
    let db = Database::new(db_path)?;
    let deck = db.create_deck(deck_name)?;
    for (front, back) in cards {
        db.add_card(deck.id, front, back)?;
    }
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CardFilter;
    use crate::store::CardStore;

    #[test]
    fn test_seed_library() -> Fallible<()> {
        let dir = create_tmp_library_dir()?;
        assert!(dir.exists());
        let db = seed_library(&dir, "greek", &[("logos", "word"), ("kosmos", "world")])?;
        assert!(dir.join("studycards.db").exists());
        assert!(db.find_deck("greek")?.is_some());
        assert_eq!(db.list_cards(&CardFilter::all())?.len(), 2);
        Ok(())
    }
}
