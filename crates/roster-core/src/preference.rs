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
use serde::Serialize;

use crate::error::Fallible;
use crate::sort::SortKey;
use crate::store::KeyValueStore;
use crate::types::timestamp::Timestamp;

/// The store key the sort preference is saved under. Shared with earlier
/// versions of the page, whose values use `sortBy` for the key.
pub const SORT_PREFERENCE_KEY: &str = "peopleGallerySortPreference";

/// The user's last sort choice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortPreference {
    #[serde(rename = "sortKey")]
    pub sort_key: String,
    pub label: String,
    /// Absent only for the built-in default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

impl Default for SortPreference {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Random.as_str().to_string(),
            label: SortKey::Random.label().to_string(),
            timestamp: None,
        }
    }
}

/// What might be found in the store. Anything that does not parse into this
/// shape is malformed.
#[derive(Deserialize)]
struct StoredPreference {
    #[serde(rename = "sortKey", alias = "sortBy")]
    sort_key: Option<String>,
    label: Option<String>,
    /// Informational only, so anything unreadable is dropped rather than
    /// spoiling the preference.
    timestamp: Option<serde_json::Value>,
}

fn lenient_timestamp(value: &serde_json::Value) -> Option<Timestamp> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|millis| millis as i64))
        .map(Timestamp::from_millis)
}

/// Reads and writes the sort preference. Store failures never escape: they
/// are logged, and reads fall back to the default preference.
pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a sort choice. Sorting goes ahead in memory whether or not this
    /// succeeds.
    pub fn save(&self, sort_key: &str, label: &str, now: Timestamp) {
        let preference = SortPreference {
            sort_key: sort_key.to_string(),
            label: label.to_string(),
            timestamp: Some(now),
        };
        if let Err(e) = self.write(&preference) {
            log::warn!("Failed to save sort preference: {e}");
        }
    }

    /// The stored preference, or the default when there is none or it is
    /// unusable.
    pub fn load(&self) -> SortPreference {
        match self.read() {
            Ok(Some(preference)) => preference,
            Ok(None) => SortPreference::default(),
            Err(e) => {
                log::warn!("Failed to load sort preference: {e}");
                SortPreference::default()
            }
        }
    }

    fn write(&self, preference: &SortPreference) -> Fallible<()> {
        let json = serde_json::to_string(preference)?;
        self.store.set(SORT_PREFERENCE_KEY, &json)
    }

    fn read(&self) -> Fallible<Option<SortPreference>> {
        let Some(json) = self.store.get(SORT_PREFERENCE_KEY)? else {
            return Ok(None);
        };
        let stored: StoredPreference = serde_json::from_str(&json)?;
        match (stored.sort_key, stored.label) {
            (Some(sort_key), Some(label)) if !sort_key.is_empty() && !label.is_empty() => {
                Ok(Some(SortPreference {
                    sort_key,
                    label,
                    timestamp: stored.timestamp.as_ref().and_then(lenient_timestamp),
                }))
            }
            _ => {
                log::debug!("Ignoring malformed sort preference: {json}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::fail;
    use crate::store::MemoryStore;

    /// A store that fails every operation, like storage disabled in a browser.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Fallible<Option<String>> {
            fail("storage unavailable")
        }

        fn set(&self, _key: &str, _value: &str) -> Fallible<()> {
            fail("quota exceeded")
        }
    }

    fn default_preference() -> SortPreference {
        SortPreference {
            sort_key: "random".to_string(),
            label: "Daily Random".to_string(),
            timestamp: None,
        }
    }

    #[test]
    fn test_load_without_save() {
        let prefs = Preferences::new(MemoryStore::new());
        assert_eq!(prefs.load(), default_preference());
    }

    #[test]
    fn test_save_then_load() {
        let prefs = Preferences::new(MemoryStore::new());
        prefs.save("lastName", "Last Name", Timestamp::from_millis(1_700_000_000_000));
        let loaded = prefs.load();
        assert_eq!(loaded.sort_key, "lastName");
        assert_eq!(loaded.label, "Last Name");
        assert_eq!(loaded.timestamp, Some(Timestamp::from_millis(1_700_000_000_000)));
    }

    #[test]
    fn test_stored_format() -> Fallible<()> {
        let store = MemoryStore::new();
        let prefs = Preferences::new(&store);
        prefs.save("position", "Position (A-Z)", Timestamp::from_millis(5));
        let raw = store.get(SORT_PREFERENCE_KEY)?.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        assert_eq!(value["sortKey"], "position");
        assert_eq!(value["label"], "Position (A-Z)");
        assert_eq!(value["timestamp"], 5);
        Ok(())
    }

    #[test]
    fn test_corrupted_json() -> Fallible<()> {
        let store = MemoryStore::new();
        store.set(SORT_PREFERENCE_KEY, "{not json")?;
        assert_eq!(Preferences::new(&store).load(), default_preference());
        Ok(())
    }

    #[test]
    fn test_malformed_shapes() -> Fallible<()> {
        let store = MemoryStore::new();
        let prefs = Preferences::new(&store);
        for raw in [
            "null",
            "42",
            "[]",
            "{}",
            r#"{"sortKey": "lastName"}"#,
            r#"{"label": "Last Name"}"#,
            r#"{"sortKey": "", "label": "Last Name"}"#,
            r#"{"sortKey": "lastName", "label": ""}"#,
            r#"{"sortKey": 3, "label": "Last Name"}"#,
        ] {
            store.set(SORT_PREFERENCE_KEY, raw)?;
            assert_eq!(prefs.load(), default_preference(), "stored: {raw}");
        }
        Ok(())
    }

    #[test]
    fn test_value_written_by_earlier_page() -> Fallible<()> {
        let store = MemoryStore::new();
        store.set(
            "peopleGallerySortPreference",
            r#"{"sortBy": "firstNameDesc", "label": "First Name (Z-A)", "timestamp": 1}"#,
        )?;
        let loaded = Preferences::new(&store).load();
        assert_eq!(loaded.sort_key, "firstNameDesc");
        assert_eq!(loaded.timestamp, Some(Timestamp::from_millis(1)));
        Ok(())
    }

    #[test]
    fn test_odd_timestamps_do_not_spoil_preference() -> Fallible<()> {
        let store = MemoryStore::new();
        let prefs = Preferences::new(&store);
        for (raw, expected) in [
            (r#"{"sortKey": "lastName", "label": "Last Name", "timestamp": 1700000000000.0}"#, Some(1_700_000_000_000)),
            (r#"{"sortKey": "lastName", "label": "Last Name", "timestamp": 12.9}"#, Some(12)),
            (r#"{"sortKey": "lastName", "label": "Last Name", "timestamp": "yesterday"}"#, None),
            (r#"{"sortKey": "lastName", "label": "Last Name", "timestamp": null}"#, None),
            (r#"{"sortKey": "lastName", "label": "Last Name"}"#, None),
        ] {
            store.set(SORT_PREFERENCE_KEY, raw)?;
            let loaded = prefs.load();
            assert_eq!(loaded.sort_key, "lastName", "stored: {raw}");
            assert_eq!(loaded.label, "Last Name", "stored: {raw}");
            assert_eq!(loaded.timestamp, expected.map(Timestamp::from_millis), "stored: {raw}");
        }
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_kept() {
        let prefs = Preferences::new(MemoryStore::new());
        prefs.save("shoeSize", "Shoe Size", Timestamp::from_millis(1));
        assert_eq!(prefs.load().sort_key, "shoeSize");
    }

    #[test]
    fn test_broken_store() {
        let prefs = Preferences::new(BrokenStore);
        prefs.save("lastName", "Last Name", Timestamp::from_millis(1));
        assert_eq!(prefs.load(), default_preference());
    }
}
