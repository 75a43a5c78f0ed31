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

use std::io::Write;
use std::path::PathBuf;

use roster_core::preference::Preferences;
use roster_core::sort::SortController;
use roster_core::sort::SortKey;
use roster_core::types::date::Date;
use roster_core::types::person::Person;
use roster_core::types::timestamp::Timestamp;

use crate::error::Fallible;
use crate::error::fail;
use crate::source::load_people;
use crate::store::FileStore;

pub struct ListConfig {
    /// Path or URL of the people JSON resource.
    pub source: String,
    /// The preference file.
    pub preferences: PathBuf,
    /// A sort picked on the command line, as a key and an optional label.
    pub sort: Option<(String, Option<String>)>,
    /// The day the daily shuffle is keyed on.
    pub today: Date,
}

/// Print the people, ordered by the chosen sort or the saved preference.
pub async fn list_people(config: ListConfig, out: &mut impl Write) -> Fallible<()> {
    let people = match load_people(&config.source).await {
        Ok(people) => people,
        Err(e) => {
            log::error!("Error loading people data: {e}");
            write!(out, "{}", format_card(&fallback_card()))?;
            return fail("unable to load people data.");
        }
    };

    let controller = SortController::new(people)?;
    let prefs = Preferences::new(FileStore::new(config.preferences));
    let (label, order) = match config.sort {
        Some((key, label)) => {
            let label = label.unwrap_or_else(|| default_label(&key));
            let order = controller.select(&prefs, &key, &label, Timestamp::now(), config.today);
            (label, order)
        }
        None => {
            let (preference, order) = controller.restore(&prefs, config.today);
            (preference.label, order)
        }
    };
    // An unrecognized key leaves the listing as loaded.
    let order: Vec<&Person> = order.unwrap_or_else(|| controller.original().iter().collect());

    writeln!(out, "Sorted by: {label}")?;
    for person in order {
        writeln!(out)?;
        write!(out, "{}", format_card(person))?;
    }
    Ok(())
}

fn default_label(key: &str) -> String {
    match key.parse::<SortKey>() {
        Ok(key) => key.label().to_string(),
        Err(_) => key.to_string(),
    }
}

/// Shown in place of the listing when the people could not be loaded.
fn fallback_card() -> Person {
    Person {
        id: 0,
        first_name: "Error".to_string(),
        last_name: "Loading Data".to_string(),
        email: None,
        position: "System Message".to_string(),
        description: "Unable to load people data. Please check the database connection."
            .to_string(),
        links: Vec::new(),
    }
}

fn format_card(person: &Person) -> String {
    let mut card = format!("{}\n", person.full_name());
    if !person.position.is_empty() {
        card.push_str(&format!("  {}\n", person.position));
    }
    for line in person.description.lines() {
        card.push_str(&format!("  {line}\n"));
    }
    for link in &person.links {
        card.push_str(&format!("  - {} <{}>\n", link.display_text(), link.url));
    }
    card
}
