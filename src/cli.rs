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

use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use roster_core::types::date::Date;

use crate::cmd::add::add_person;
use crate::cmd::export::export_people;
use crate::cmd::list::ListConfig;
use crate::cmd::list::list_people;
use crate::cmd::preference::show_preference;
use crate::config::Config;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// List people, in the saved sort order or the one given.
    List {
        /// Path or http(s) URL of the people JSON. Overrides `source` in roster.toml.
        #[arg(long)]
        source: Option<String>,
        /// Sort by this key and remember the choice: random, firstName, firstNameDesc, lastName, lastNameDesc, position, positionDesc.
        #[arg(long)]
        sort: Option<String>,
        /// Label to remember with the sort. Defaults to the key's own label.
        #[arg(long, requires = "sort")]
        label: Option<String>,
        /// Day to key the daily shuffle on (YYYY-MM-DD). Default is today.
        #[arg(long)]
        date: Option<String>,
        /// Preference file. Overrides `preferences` in roster.toml.
        #[arg(long)]
        preferences: Option<PathBuf>,
    },
    /// Show the saved sort preference.
    Preference {
        /// Preference file. Overrides `preferences` in roster.toml.
        #[arg(long)]
        preferences: Option<PathBuf>,
    },
    /// Add a person to the database.
    Add {
        /// Path to the SQLite database. Overrides `database` in roster.toml.
        #[arg(long)]
        database: Option<PathBuf>,
    },
    /// Export the database as the people JSON.
    Export {
        /// Path to the SQLite database. Overrides `database` in roster.toml.
        #[arg(long)]
        database: Option<PathBuf>,
        /// Path to the output file. Defaults to `source` in roster.toml; printed to stdout if that is a URL.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let config = Config::from_cwd()?;
    match cli {
        Command::List {
            source,
            sort,
            label,
            date,
            preferences,
        } => {
            let today = match date {
                Some(date) => Date::try_from(date)?,
                None => Date::today(),
            };
            let config = ListConfig {
                source: source.unwrap_or(config.source),
                preferences: preferences.unwrap_or(config.preferences),
                sort: sort.map(|key| (key, label)),
                today,
            };
            list_people(config, &mut stdout()).await
        }
        Command::Preference { preferences } => {
            show_preference(preferences.unwrap_or(config.preferences), &mut stdout())
        }
        Command::Add { database } => add_person(&database.unwrap_or(config.database)),
        Command::Export { database, output } => {
            let output = output.or_else(|| config.export_path());
            export_people(&database.unwrap_or(config.database), output.as_deref())
        }
    }
}
