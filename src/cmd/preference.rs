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

use std::io::Write;
use std::path::PathBuf;

use roster_core::preference::Preferences;
use roster_core::sort::SortKey;

use crate::error::Fallible;
use crate::store::FileStore;

/// Print the active sort preference and the available options.
pub fn show_preference(preferences: PathBuf, out: &mut impl Write) -> Fallible<()> {
    let preference = Preferences::new(FileStore::new(preferences)).load();
    writeln!(out, "Sort: {} ({})", preference.label, preference.sort_key)?;
    match preference.timestamp {
        Some(ts) => writeln!(out, "Saved at: {ts}")?,
        None => writeln!(out, "Saved at: never (default)")?,
    }
    writeln!(out)?;
    writeln!(out, "Options:")?;
    for key in SortKey::ALL {
        writeln!(out, "  {:<14} {}", key.as_str(), key.label())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use roster_core::types::timestamp::Timestamp;

    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_default() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let mut out = Vec::new();
        show_preference(dir.join("prefs.json"), &mut out)?;
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Sort: Daily Random (random)\nSaved at: never (default)\n"));
        assert!(out.contains("  positionDesc   Position (Z-A)\n"));
        Ok(())
    }

    #[test]
    fn test_saved() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        Preferences::new(FileStore::new(dir.join("prefs.json"))).save(
            "lastName",
            "Last Name",
            Timestamp::from_millis(1_709_640_000_123),
        );
        let mut out = Vec::new();
        show_preference(dir.join("prefs.json"), &mut out)?;
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Sort: Last Name (lastName)\nSaved at: 2024-03-05T12:00:00.123Z\n"));
        Ok(())
    }
}
