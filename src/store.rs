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

//! A file-backed key-value store: the command-line counterpart of browser
//! localStorage.

use std::collections::BTreeMap;
use std::fs::create_dir_all;
use std::fs::read_to_string;
use std::fs::write;
use std::path::PathBuf;

use roster_core::error::Fallible;
use roster_core::store::KeyValueStore;

/// All entries live in one JSON object. Every write rewrites the file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_all(&self) -> Fallible<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = read_to_string(&self.path)?;
        let entries: BTreeMap<String, String> = serde_json::from_str(&text)?;
        Ok(entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Fallible<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            create_dir_all(parent)?;
        }
        write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}
