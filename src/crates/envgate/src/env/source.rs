//! Environment sources
//!
//! A source is the seam between the accessor and whatever actually holds
//! the variables. Production code reads the live process environment;
//! tests inject a synthetic map instead of mutating global state.

use std::collections::BTreeMap;
use std::env;

/// A read-only provider of environment variable values
///
/// Implementations must answer lookups from current state on every call;
/// the accessor never caches what a source returns.
pub trait EnvSource {
    /// Look up a variable by name
    ///
    /// # Returns
    ///
    /// * `Some(value)` if the variable is set (the value may be empty)
    /// * `None` if the variable is unset
    fn lookup(&self, name: &str) -> Option<String>;
}

/// The live process environment
///
/// Every lookup reads `std::env::var` directly. Values that are not valid
/// UTF-8 are treated as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// An owned map of variables
///
/// Used to back accessors in tests and to expose parsed env files as a
/// source. Lookups never touch the process environment.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    vars: BTreeMap<String, String>,
}

impl MapSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, replacing any existing value
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Number of variables in the map
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the map holds no variables
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for MapSource {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl FromIterator<(String, String)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}
