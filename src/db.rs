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

use std::collections::HashMap;
use std::fs::create_dir_all;
use std::path::Path;

use roster_core::types::person::Link;
use roster_core::types::person::Person;
use rusqlite::Connection;
use rusqlite::params;

use crate::error::Fallible;

const SCHEMA: &str = "
create table if not exists people (
    id integer primary key autoincrement,
    first_name text,
    last_name text,
    email text,
    position text,
    description text
);

create table if not exists links (
    id integer primary key autoincrement,
    person_id integer not null references people (id) on delete cascade,
    url text not null,
    label text
);
";

/// A person who has not been inserted yet. Empty answers are `None`.
#[derive(Debug, Default)]
pub struct NewPerson {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub description: Option<String>,
}

/// The SQLite database the people JSON resource is exported from.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database, creating the file and tables as needed.
    pub fn open(path: &Path) -> Fallible<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Fallible<Self> {
        conn.execute_batch("pragma foreign_keys = on;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert a person, returning their id.
    pub fn insert_person(&self, person: &NewPerson) -> Fallible<i64> {
        self.conn.execute(
            "insert into people (first_name, last_name, email, position, description) values (?1, ?2, ?3, ?4, ?5)",
            params![
                person.first_name,
                person.last_name,
                person.email,
                person.position,
                person.description
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_link(&self, person_id: i64, url: &str, label: &str) -> Fallible<()> {
        self.conn.execute(
            "insert into links (person_id, url, label) values (?1, ?2, ?3)",
            params![person_id, url, label],
        )?;
        Ok(())
    }

    /// Every person, by id, with their links ordered by label (ignoring case).
    pub fn people(&self) -> Fallible<Vec<Person>> {
        let mut links: HashMap<i64, Vec<Link>> = HashMap::new();
        let mut stmt = self
            .conn
            .prepare("select person_id, url, label from links order by label collate nocase, id")?;
        let rows = stmt.query_map([], |row| {
            let person_id: i64 = row.get(0)?;
            let link = Link {
                url: row.get(1)?,
                label: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            };
            Ok((person_id, link))
        })?;
        for row in rows {
            let (person_id, link) = row?;
            links.entry(person_id).or_default().push(link);
        }

        let mut stmt = self.conn.prepare(
            "select id, first_name, last_name, email, position, description from people order by id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Person {
                id: row.get(0)?,
                first_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                last_name: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                email: row.get(3)?,
                position: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                description: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                links: Vec::new(),
            })
        })?;
        let mut people = Vec::new();
        for row in rows {
            let mut person = row?;
            person.links = links.remove(&person.id).unwrap_or_default();
            people.push(person);
        }
        Ok(people)
    }
}
