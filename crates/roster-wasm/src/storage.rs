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

//! Browser localStorage as a [`KeyValueStore`].

use roster_core::error::ErrorReport;
use roster_core::error::Fallible;
use roster_core::store::KeyValueStore;
use wasm_bindgen::prelude::*;
use web_sys::Storage as WebStorage;

pub struct Storage {
    inner: Option<WebStorage>,
}

impl Storage {
    pub fn new() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        Self { inner }
    }

    fn backend(&self) -> Fallible<&WebStorage> {
        self.inner
            .as_ref()
            .ok_or_else(|| ErrorReport::new("localStorage is not available"))
    }
}

impl KeyValueStore for Storage {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        self.backend()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        self.backend()?.set_item(key, value).map_err(js_error)
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

fn js_error(value: JsValue) -> ErrorReport {
    ErrorReport::new(format!("localStorage error: {value:?}"))
}
