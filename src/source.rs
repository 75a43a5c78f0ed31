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

//! Loading the people JSON resource.

use roster_core::types::person::Person;
use roster_core::types::person::parse_people;

use crate::error::Fallible;

/// Load people from a file path or an `http(s)://` URL. A single attempt is
/// made.
pub async fn load_people(source: &str) -> Fallible<Vec<Person>> {
    let text = if is_url(source) {
        log::debug!("Fetching people from {source}");
        reqwest::get(source)
            .await?
            .error_for_status()?
            .text()
            .await?
    } else {
        log::debug!("Reading people from {source}");
        tokio::fs::read_to_string(source).await?
    };
    let people = parse_people(&text)?;
    log::debug!("Loaded {} people", people.len());
    Ok(people)
}

pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
