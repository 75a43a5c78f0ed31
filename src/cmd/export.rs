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
use std::fs::write;
use std::path::Path;

use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;

/// Export the database as the people JSON resource. Without an output path,
/// the JSON is printed to stdout.
pub fn export_people(database: &Path, output: Option<&Path>) -> Fallible<()> {
    if !database.exists() {
        return fail("database does not exist.");
    }
    let db = Database::open(database)?;
    let people = db.people()?;
    let json = serde_json::to_string_pretty(&people)?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    create_dir_all(parent)?;
                }
            }
            write(path, json)?;
            println!("Exported {} people to {}", people.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
