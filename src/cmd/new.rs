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

use crate::error::Fallible;
use crate::error::fail;
use crate::library::Library;

pub fn create_deck(directory: Option<String>, name: &str) -> Fallible<()> {
    let library: Library = Library::open(directory)?;
    if library.db.find_deck(name)?.is_some() {
        return fail("deck already exists.");
    }
    library.db.create_deck(name)?;
    println!("Created deck {name}.");
    Ok(())
}
