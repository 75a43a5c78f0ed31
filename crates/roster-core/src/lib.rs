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

//! roster-core: Core library for the roster people listing.
//!
//! This library provides WASM-compatible types and algorithms for:
//! - Parsing the people JSON resource
//! - The deterministic, date-seeded daily shuffle
//! - Sorting a fixed snapshot of people by name or position
//! - Persisting the user's sort preference in a key-value store

pub mod error;
pub mod preference;
pub mod rng;
pub mod sort;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use preference::{Preferences, SortPreference};
pub use rng::{ParkMiller, daily_shuffle, shuffle};
pub use sort::{SortController, SortField, SortKey, Sortable};
pub use store::{KeyValueStore, MemoryStore};
pub use types::date::Date;
pub use types::person::{Link, Person, parse_people};
pub use types::timestamp::Timestamp;
