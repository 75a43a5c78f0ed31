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

//! WASM bindings for roster - orders the people list in the browser.
//!
//! JavaScript owns the page: it renders the cards and reorders them by the
//! ids these bindings return.

use roster_core::preference::Preferences;
use roster_core::sort::SortController;
use roster_core::sort::SortKey;
use roster_core::types::date::Date;
use roster_core::types::person::Person;
use roster_core::types::person::parse_people;
use roster_core::types::timestamp::Timestamp;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

mod logger;
mod storage;

use storage::Storage;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init();
    log::info!("roster WASM initialized");
}

/// Fetch the people JSON resource. One attempt, no retries.
#[wasm_bindgen]
pub async fn fetch_people_json(url: String) -> Result<JsValue, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let response = JsFuture::from(window.fetch_with_str(&url)).await?;
    let response: Response = response.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "Failed to fetch {url}: HTTP {}",
            response.status()
        )));
    }
    JsFuture::from(response.text()?).await
}

/// The application state managed from JavaScript.
#[wasm_bindgen]
pub struct RosterApp {
    /// Set once the people have been loaded.
    controller: Option<SortController<Person>>,
    /// Sort preference, in localStorage.
    prefs: Preferences<Storage>,
}

#[derive(Serialize)]
struct SortOption {
    key: &'static str,
    label: &'static str,
}

#[wasm_bindgen]
impl RosterApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            controller: None,
            prefs: Preferences::new(Storage::new()),
        }
    }

    /// Load people from the JSON resource, capturing their order as the
    /// original order. Returns the number of people.
    #[wasm_bindgen]
    pub fn load_people(&mut self, json: &str) -> Result<usize, JsValue> {
        let people = parse_people(json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse people: {}", e)))?;
        let count = people.len();
        let controller = SortController::new(people)
            .map_err(|e| JsValue::from_str(&format!("Failed to set up sorting: {}", e)))?;
        self.controller = Some(controller);
        Ok(count)
    }

    /// The people in their original order, as JSON.
    #[wasm_bindgen]
    pub fn people_json(&self) -> Result<String, JsValue> {
        let controller = self.controller()?;
        serde_json::to_string(controller.original())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize people: {}", e)))
    }

    /// The available sort options, as a JSON array of `{key, label}`.
    #[wasm_bindgen]
    pub fn sort_options(&self) -> String {
        let options: Vec<SortOption> = SortKey::ALL
            .into_iter()
            .map(|key| SortOption {
                key: key.as_str(),
                label: key.label(),
            })
            .collect();
        serde_json::to_string(&options).unwrap_or_else(|_| "[]".to_string())
    }

    /// The active sort preference as JSON.
    #[wasm_bindgen]
    pub fn current_preference(&self) -> String {
        serde_json::to_string(&self.prefs.load()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Apply the saved (or default) preference. Returns the person ids in
    /// display order, or nothing when the saved key is not recognized.
    #[wasm_bindgen]
    pub fn restore(&self, today_str: &str) -> Result<Option<String>, JsValue> {
        let today = parse_date(today_str)?;
        let (_, order) = self.controller()?.restore(&self.prefs, today);
        Ok(order.map(|order| ids_json(&order)))
    }

    /// Handle a sort option being picked: save it, then apply it. Returns the
    /// person ids in display order, or nothing for an unknown key.
    #[wasm_bindgen]
    pub fn select(
        &self,
        sort_key: &str,
        label: &str,
        today_str: &str,
    ) -> Result<Option<String>, JsValue> {
        let today = parse_date(today_str)?;
        let now = Timestamp::from_millis(js_sys::Date::now() as i64);
        let order = self
            .controller()?
            .select(&self.prefs, sort_key, label, now, today);
        Ok(order.map(|order| ids_json(&order)))
    }
}

impl RosterApp {
    fn controller(&self) -> Result<&SortController<Person>, JsValue> {
        self.controller
            .as_ref()
            .ok_or_else(|| JsValue::from_str("People have not been loaded"))
    }
}

impl Default for RosterApp {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_date(s: &str) -> Result<Date, JsValue> {
    Date::try_from(s.to_string()).map_err(|e| JsValue::from_str(&format!("Invalid date: {}", e)))
}

fn ids_json(order: &[&Person]) -> String {
    let ids: Vec<i64> = order.iter().map(|p| p.id).collect();
    serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
}

/// Get today's date as a string (YYYY-MM-DD), in the browser's time zone.
#[wasm_bindgen]
pub fn today_date() -> String {
    let date = js_sys::Date::new_0();
    let year = date.get_full_year();
    let month = date.get_month() + 1;
    let day = date.get_date();
    format!("{:04}-{:02}-{:02}", year, month, day)
}
