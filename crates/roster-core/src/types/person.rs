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

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::error::Fallible;

/// A person, as stored in the exported JSON resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "present_links")]
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub label: String,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Link {
    /// The text shown for this link. Personal links show the address itself,
    /// without the scheme.
    pub fn display_text(&self) -> &str {
        if self.label != "personal" {
            return &self.label;
        }
        for scheme in ["https://", "http://"] {
            if let Some(prefix) = self.url.get(..scheme.len()) {
                if prefix.eq_ignore_ascii_case(scheme) {
                    return &self.url[scheme.len()..];
                }
            }
        }
        &self.url
    }
}

/// Parse the people JSON resource.
pub fn parse_people(json: &str) -> Fallible<Vec<Person>> {
    let people: Vec<Person> = serde_json::from_str(json)?;
    Ok(people)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A person without links is exported with a single all-null link. Drop those.
fn present_links<'de, D>(deserializer: D) -> Result<Vec<Link>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct RawLink {
        url: Option<String>,
        label: Option<String>,
    }

    let raw: Option<Vec<RawLink>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|link| {
            link.url.map(|url| Link {
                url,
                label: link.label.unwrap_or_default(),
            })
        })
        .collect())
}
