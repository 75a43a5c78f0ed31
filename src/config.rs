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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Fallible;
use crate::source::is_url;

/// Name of the optional configuration file, looked up in the working
/// directory.
pub const CONFIG_FILE: &str = "roster.toml";

/// Where things live. Every field may be overridden from the command line.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path or `http(s)://` URL of the people JSON resource.
    pub source: String,
    /// The SQLite database people are added to and exported from.
    pub database: PathBuf,
    /// The file the sort preference is kept in.
    pub preferences: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: "backend/database.json".to_string(),
            database: PathBuf::from("backend/database.db"),
            preferences: PathBuf::from(".roster/preferences.json"),
        }
    }
}

impl Config {
    /// Read `roster.toml` from `directory`, or use the defaults if there is
    /// none.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE} in {}, using defaults", directory.display());
            return Ok(Self::default());
        }
        let text = read_to_string(&path)?;
        let config: Config = toml::from_str(&text)?;
        Ok(config)
    }

    pub fn from_cwd() -> Fallible<Self> {
        Self::load(Path::new("."))
    }

    /// Where `export` writes when no output is given: the file `list` reads.
    /// `None` when the source is a URL.
    pub fn export_path(&self) -> Option<PathBuf> {
        if is_url(&self.source) {
            None
        } else {
            Some(PathBuf::from(&self.source))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_defaults_without_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        assert_eq!(Config::load(&dir)?, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(
            dir.join(CONFIG_FILE),
            "source = \"https://example.com/people.json\"\n",
        )?;
        let config = Config::load(&dir)?;
        assert_eq!(config.source, "https://example.com/people.json");
        assert_eq!(config.database, PathBuf::from("backend/database.db"));
        Ok(())
    }

    #[test]
    fn test_export_path() {
        let config = Config::default();
        assert_eq!(
            config.export_path(),
            Some(PathBuf::from("backend/database.json"))
        );
        let config = Config {
            source: "https://example.com/people.json".to_string(),
            ..Config::default()
        };
        assert_eq!(config.export_path(), None);
    }

    #[test]
    fn test_unknown_key() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(dir.join(CONFIG_FILE), "colour = \"blue\"\n")?;
        assert!(Config::load(&dir).is_err());
        Ok(())
    }
}
