//! `KEY=VALUE` env-file reading
//!
//! Line-oriented parser for dotenv-style files: `#` lines are comments,
//! blank lines are skipped, everything else splits on the first `=`. A
//! line with no `=` parses as a key with an empty value. The reader is
//! strictly read-only; feeding values back into an accessor goes through
//! [`EnvFile::into_source`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::env::source::MapSource;
use crate::Result;

/// A parsed env file
#[derive(Debug, Clone)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
    /// Path the file was loaded from; empty for in-memory parses
    pub path: PathBuf,
}

impl EnvFile {
    /// Parse env-file content from a string
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| {
                let mut split = line.splitn(2, '=');
                let key = split.next().unwrap_or_default().to_string();
                let value = split.next().unwrap_or_default().to_string();
                (key, value)
            })
            .collect();

        Self {
            entries,
            path: PathBuf::new(),
        }
    }

    /// Read and parse an env file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            ..Self::parse(&content)
        })
    }

    /// Value for `key`, if the file defines it
    ///
    /// The first definition wins when a key appears more than once.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `key` is defined with a non-empty value
    pub fn has_value(&self, key: &str) -> bool {
        self.lookup(key).is_some_and(|value| !value.is_empty())
    }

    /// Iterate over `(key, value)` pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert the file into an environment source
    pub fn into_source(self) -> MapSource {
        self.entries.into_iter().collect()
    }
}
