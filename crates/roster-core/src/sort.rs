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

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use icu_collator::Collator;
use icu_collator::CollatorBorrowed;
use icu_collator::options::CollatorOptions;
use icu_collator::options::Strength;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::preference::Preferences;
use crate::preference::SortPreference;
use crate::rng::daily_shuffle;
use crate::store::KeyValueStore;
use crate::types::date::Date;
use crate::types::person::Person;
use crate::types::timestamp::Timestamp;

/// A text field items can be sorted on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    FirstName,
    LastName,
    Position,
}

/// Items the controller can order.
pub trait Sortable {
    fn sort_field(&self, field: SortField) -> &str;
}

impl Sortable for Person {
    fn sort_field(&self, field: SortField) -> &str {
        match field {
            SortField::FirstName => &self.first_name,
            SortField::LastName => &self.last_name,
            SortField::Position => &self.position,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    /// The daily shuffle.
    Random,
    FirstName,
    FirstNameDesc,
    LastName,
    LastNameDesc,
    Position,
    PositionDesc,
}

enum Order {
    Shuffle,
    Ascending(SortField),
    Descending(SortField),
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Random,
        SortKey::FirstName,
        SortKey::FirstNameDesc,
        SortKey::LastName,
        SortKey::LastNameDesc,
        SortKey::Position,
        SortKey::PositionDesc,
    ];

    /// The identifier stored in preferences.
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Random => "random",
            SortKey::FirstName => "firstName",
            SortKey::FirstNameDesc => "firstNameDesc",
            SortKey::LastName => "lastName",
            SortKey::LastNameDesc => "lastNameDesc",
            SortKey::Position => "position",
            SortKey::PositionDesc => "positionDesc",
        }
    }

    /// The label shown for this option.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Random => "Daily Random",
            SortKey::FirstName => "First Name (A-Z)",
            SortKey::FirstNameDesc => "First Name (Z-A)",
            SortKey::LastName => "Last Name (A-Z)",
            SortKey::LastNameDesc => "Last Name (Z-A)",
            SortKey::Position => "Position (A-Z)",
            SortKey::PositionDesc => "Position (Z-A)",
        }
    }

    fn order(self) -> Order {
        match self {
            SortKey::Random => Order::Shuffle,
            SortKey::FirstName => Order::Ascending(SortField::FirstName),
            SortKey::FirstNameDesc => Order::Descending(SortField::FirstName),
            SortKey::LastName => Order::Ascending(SortField::LastName),
            SortKey::LastNameDesc => Order::Descending(SortField::LastName),
            SortKey::Position => Order::Ascending(SortField::Position),
            SortKey::PositionDesc => Order::Descending(SortField::Position),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ErrorReport::new(format!("Unknown sort type: {s}")))
    }
}

/// Unicode collation for the root locale. Secondary strength: accents are
/// significant, case is not.
fn collator() -> Fallible<CollatorBorrowed<'static>> {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Secondary);
    Collator::try_new(Default::default(), options)
        .map_err(|e| ErrorReport::new(format!("Failed to load collation data: {e}")))
}

/// Orders a fixed snapshot of items.
///
/// The snapshot is taken once, when the controller is built, and every sort
/// starts again from it. Results never depend on what was displayed before.
pub struct SortController<T> {
    original: Vec<T>,
    collator: CollatorBorrowed<'static>,
}

impl<T: Sortable> SortController<T> {
    pub fn new(original: Vec<T>) -> Fallible<Self> {
        Ok(Self {
            original,
            collator: collator()?,
        })
    }

    /// The items in the order they were captured.
    pub fn original(&self) -> &[T] {
        &self.original
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// The full ordering for `key`. Field sorts are stable.
    pub fn sorted(&self, key: SortKey, today: Date) -> Vec<&T> {
        let mut items: Vec<&T> = self.original.iter().collect();
        match key.order() {
            Order::Shuffle => daily_shuffle(&items, today),
            Order::Ascending(field) => {
                items.sort_by(|a, b| self.compare(*a, *b, field));
                items
            }
            Order::Descending(field) => {
                items.sort_by(|a, b| self.compare(*a, *b, field).reverse());
                items
            }
        }
    }

    fn compare(&self, a: &T, b: &T, field: SortField) -> Ordering {
        self.collator.compare(a.sort_field(field), b.sort_field(field))
    }

    /// Like [`SortController::sorted`], from a key identifier. Unknown
    /// identifiers are logged and produce no ordering, so whatever is on
    /// display stays as it is.
    pub fn apply(&self, key: &str, today: Date) -> Option<Vec<&T>> {
        match key.parse::<SortKey>() {
            Ok(key) => Some(self.sorted(key, today)),
            Err(e) => {
                log::error!("{}", e.message());
                None
            }
        }
    }

    /// A selection made by the user: remember it, then apply it.
    pub fn select<S: KeyValueStore>(
        &self,
        prefs: &Preferences<S>,
        key: &str,
        label: &str,
        now: Timestamp,
        today: Date,
    ) -> Option<Vec<&T>> {
        prefs.save(key, label, now);
        self.apply(key, today)
    }

    /// Apply the stored preference, or the default one. Returns the
    /// preference alongside the ordering so the caller can show its label.
    pub fn restore<S: KeyValueStore>(
        &self,
        prefs: &Preferences<S>,
        today: Date,
    ) -> (SortPreference, Option<Vec<&T>>) {
        let preference = prefs.load();
        let order = self.apply(&preference.sort_key, today);
        (preference, order)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::store::MemoryStore;

    fn person(id: i64, first: &str, last: &str, position: &str) -> Person {
        Person {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: None,
            position: position.to_string(),
            description: String::new(),
            links: Vec::new(),
        }
    }

    fn roster() -> Vec<Person> {
        vec![
            person(1, "ada", "Lovelace", "Engineer"),
            person(2, "Alan", "turing", "researcher"),
            person(3, "Grace", "Hopper", "Admiral"),
            person(4, "Barbara", "Liskov", "Professor"),
        ]
    }

    fn new_controller(people: Vec<Person>) -> SortController<Person> {
        SortController::new(people).unwrap()
    }

    fn ids(items: &[&Person]) -> Vec<i64> {
        items.iter().map(|p| p.id).collect()
    }

    fn today() -> Date {
        Date::new(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
    }

    #[test]
    fn test_parse_keys() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert!("FirstName".parse::<SortKey>().is_err());
        assert!("".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_ascending_case_insensitive() {
        let controller = new_controller(roster());
        assert_eq!(ids(&controller.sorted(SortKey::FirstName, today())), vec![1, 2, 4, 3]);
        assert_eq!(ids(&controller.sorted(SortKey::LastName, today())), vec![3, 4, 1, 2]);
        assert_eq!(ids(&controller.sorted(SortKey::Position, today())), vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_descending_reverses_ascending() {
        let controller = new_controller(roster());
        for (asc, desc) in [
            (SortKey::FirstName, SortKey::FirstNameDesc),
            (SortKey::LastName, SortKey::LastNameDesc),
            (SortKey::Position, SortKey::PositionDesc),
        ] {
            let mut forward = ids(&controller.sorted(asc, today()));
            forward.reverse();
            assert_eq!(forward, ids(&controller.sorted(desc, today())));
        }
    }

    #[test]
    fn test_accented_names_sort_with_base_letter() {
        let controller = new_controller(vec![
            person(1, "Zoe", "Z", "x"),
            person(2, "Émile", "E", "x"),
            person(3, "Eve", "E", "x"),
            person(4, "Ángel", "A", "x"),
            person(5, "Bob", "B", "x"),
        ]);
        let names = |order: Vec<&Person>| -> Vec<String> {
            order.iter().map(|p| p.first_name.clone()).collect()
        };
        assert_eq!(
            names(controller.sorted(SortKey::FirstName, today())),
            vec!["Ángel", "Bob", "Émile", "Eve", "Zoe"]
        );
        assert_eq!(
            names(controller.sorted(SortKey::FirstNameDesc, today())),
            vec!["Zoe", "Eve", "Émile", "Bob", "Ángel"]
        );
    }

    #[test]
    fn test_accents_matter_case_does_not() {
        let controller = new_controller(vec![
            person(1, "x", "Öztürk", "x"),
            person(2, "x", "émile", "x"),
            person(3, "x", "oscar", "x"),
            person(4, "x", "Emile", "x"),
            person(5, "x", "Ólafsson", "x"),
        ]);
        let ascending = ids(&controller.sorted(SortKey::LastName, today()));
        assert_eq!(ascending, vec![4, 2, 5, 3, 1]);
        let mut descending = ids(&controller.sorted(SortKey::LastNameDesc, today()));
        descending.reverse();
        assert_eq!(descending, ascending);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let controller = new_controller(vec![
            person(1, "Sam", "B", "x"),
            person(2, "sam", "A", "x"),
            person(3, "Ann", "C", "x"),
        ]);
        assert_eq!(ids(&controller.sorted(SortKey::FirstName, today())), vec![3, 1, 2]);
        assert_eq!(ids(&controller.sorted(SortKey::FirstNameDesc, today())), vec![1, 2, 3]);
    }

    #[test]
    fn test_random_is_daily_shuffle_of_original() {
        let controller = new_controller(roster());
        assert_eq!(ids(&controller.sorted(SortKey::Random, today())), vec![4, 1, 3, 2]);
    }

    #[test]
    fn test_idempotent_from_snapshot() {
        let controller = new_controller(roster());
        for key in SortKey::ALL {
            let once = ids(&controller.sorted(key, today()));
            let _ = controller.sorted(SortKey::LastNameDesc, today());
            let twice = ids(&controller.sorted(key, today()));
            assert_eq!(once, twice, "{key}");
        }
        assert_eq!(ids(&controller.original().iter().collect::<Vec<_>>()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let controller = new_controller(roster());
        assert!(controller.apply("shoeSize", today()).is_none());
        assert!(controller.apply("lastName", today()).is_some());
    }

    #[test]
    fn test_select_saves_and_applies() {
        let controller = new_controller(roster());
        let prefs = Preferences::new(MemoryStore::new());
        let order = controller
            .select(&prefs, "lastName", "Last Name", Timestamp::from_millis(10), today())
            .unwrap();
        assert_eq!(ids(&order), vec![3, 4, 1, 2]);
        let (preference, order) = controller.restore(&prefs, today());
        assert_eq!(preference.label, "Last Name");
        assert_eq!(ids(&order.unwrap()), vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_select_unknown_key_still_saves() {
        let controller = new_controller(roster());
        let prefs = Preferences::new(MemoryStore::new());
        let order = controller.select(&prefs, "shoeSize", "Shoe Size", Timestamp::from_millis(1), today());
        assert!(order.is_none());
        let (preference, order) = controller.restore(&prefs, today());
        assert_eq!(preference.sort_key, "shoeSize");
        assert!(order.is_none());
    }

    #[test]
    fn test_restore_defaults_to_random() {
        let controller = new_controller(roster());
        let prefs = Preferences::new(MemoryStore::new());
        let (preference, order) = controller.restore(&prefs, today());
        assert_eq!(preference, SortPreference::default());
        assert_eq!(ids(&order.unwrap()), vec![4, 1, 3, 2]);
    }

    #[test]
    fn test_empty_controller() {
        let controller = new_controller(Vec::new());
        assert!(controller.is_empty());
        for key in SortKey::ALL {
            assert!(controller.sorted(key, today()).is_empty());
        }
    }
}
