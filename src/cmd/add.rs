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

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::path::Path;

use crate::db::Database;
use crate::db::NewPerson;
use crate::error::Fallible;

/// Interactively add a person, and their links, to the database.
pub fn add_person(database: &Path) -> Fallible<()> {
    let db = Database::open(database)?;
    let mut input = stdin().lock();
    let mut out = stdout();
    prompt_person(&db, &mut input, &mut out)?;
    Ok(())
}

fn prompt_person(db: &Database, input: &mut impl BufRead, out: &mut impl Write) -> Fallible<i64> {
    writeln!(out, "Add a new person")?;
    let first_name = prompt(input, out, "First name")?;
    let last_name = prompt(input, out, "Last name")?;
    let email = prompt(input, out, "Email")?;
    let position = prompt(input, out, "Position")?;
    writeln!(out, "Description (end with a line containing only '.', or EOF):")?;
    out.flush()?;
    let description = read_description(input)?;
    let person = NewPerson {
        first_name,
        last_name,
        email,
        position,
        description,
    };
    let id = db.insert_person(&person)?;
    writeln!(out, "Added person {id}.")?;

    writeln!(out, "Links (leave the URL empty to finish)")?;
    let mut count = 0;
    while let Some(url) = prompt(input, out, "URL")? {
        let label = prompt(input, out, "Label (e.g. personal, GitHub, LinkedIn)")?;
        db.insert_link(id, &url, label.as_deref().unwrap_or_default())?;
        count += 1;
    }
    writeln!(out, "Added {count} link(s).")?;
    Ok(id)
}

/// One trimmed line of input. Empty answers and EOF are `None`.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Fallible<Option<String>> {
    write!(out, "{label}: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(non_empty(line.trim()))
}

fn read_description(input: &mut impl BufRead) -> Fallible<Option<String>> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line == "." {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(non_empty(lines.join("\n").trim()))
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
