//! Startup usage audit
//!
//! Scans the project's own source tree for accessor usages and checks each
//! referenced variable against the live environment before the application
//! does anything else. Required variables that are unset (and numeric
//! variables that do not parse) end the process immediately with a single
//! diagnostic line; a missing variable surfaces at startup instead of deep
//! inside a request handler hours later.
//!
//! The scan is best effort on its own behalf: unreadable files or
//! directories and unparseable usage lines are logged and skipped. Only an
//! unsatisfiable required variable is fatal.
//!
//! # Example
//!
//! ```rust,ignore
//! fn main() {
//!     envgate::validate();
//!
//!     // Past this point every `ENV.` reference found in the source tree
//!     // is known to be satisfiable.
//! }
//! ```

mod pattern;
mod scan;

pub use pattern::{Modifier, Usage, UsagePattern};
pub use scan::{collect_source_files, resolve_scan_root};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::env::{leading_integer, EnvSource, ProcessEnv};
use crate::Result;

/// Configuration for the startup usage audit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Token used to reference the accessor in source code
    pub accessor_token: String,
    /// Preferred source subdirectory under the scan root
    pub source_dir: String,
    /// File extensions included in the scan
    pub extensions: Vec<String>,
    /// Scan root; the current working directory when unset
    pub root: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            accessor_token: "ENV".to_string(),
            source_dir: "src".to_string(),
            extensions: vec!["js".to_string(), "ts".to_string()],
            root: None,
        }
    }
}

impl AuditConfig {
    /// Create the default audit configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accessor reference token
    pub fn with_accessor_token(mut self, token: impl Into<String>) -> Self {
        self.accessor_token = token.into();
        self
    }

    /// Set the preferred source subdirectory name
    pub fn with_source_dir(mut self, dir: impl Into<String>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Set the scanned file extensions
    pub fn with_extensions<I, T>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the scan root
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }
}

/// A fatal audit finding
///
/// A required usage the live environment cannot satisfy: the variable is
/// unset, or a numeric variable holds a value with no leading integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Lookup discipline of the offending usage
    pub modifier: Modifier,
    /// Referenced variable name
    pub name: String,
    /// The unusable value, for numeric variables that are set but do not parse
    pub value: Option<String>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(
                f,
                "{} environment variable {} is not parseable (got {:?})",
                self.modifier, self.name, value
            ),
            None => write!(
                f,
                "{} environment variable {} is not set",
                self.modifier, self.name
            ),
        }
    }
}

/// Validate every accessor usage in the source tree
///
/// The zero-argument startup gate: scans with the default configuration
/// against the live process environment. On the first unsatisfiable
/// required usage it prints one diagnostic line to stdout and terminates
/// the process with a non-zero exit status. A scan that cannot run at all
/// is logged and does not block startup.
pub fn validate() {
    match run_audit(&AuditConfig::default(), &ProcessEnv) {
        Ok(None) => {}
        Ok(Some(violation)) => {
            println!("{}", violation);
            std::process::exit(1);
        }
        Err(e) => warn!("environment usage audit did not run: {}", e),
    }
}

/// Run the usage audit and report the first violation
///
/// Identical logic to [`validate`], but the outcome is returned to the
/// caller instead of terminating the process, so embedders and tests can
/// audit synthetic trees against synthetic environments.
///
/// # Returns
///
/// * `Ok(None)` when every required usage is satisfiable
/// * `Ok(Some(violation))` for the first unsatisfiable usage, in scan order
/// * `Err` only when the usage pattern itself cannot be compiled
pub fn run_audit<S: EnvSource>(config: &AuditConfig, env: &S) -> Result<Option<Violation>> {
    let usage = UsagePattern::new(&config.accessor_token)?;

    let base = config.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let root = resolve_scan_root(&base, &config.source_dir);
    let files = collect_source_files(&root, &config.extensions);
    debug!(
        "auditing {} source files under {}",
        files.len(),
        root.display()
    );

    for path in &files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("skipping unreadable source file {}: {}", path.display(), e);
                continue;
            }
        };

        if let Some(violation) = audit_lines(env, &usage, path, content.lines()) {
            return Ok(Some(violation));
        }
    }

    Ok(None)
}

/// Audit the lines of one file, in order
///
/// Returns the first violation. A candidate line that defeats strict
/// extraction is logged (truncated to 100 characters) and aborts the rest
/// of this file only.
fn audit_lines<'a, S: EnvSource>(
    env: &S,
    usage: &UsagePattern,
    origin: &Path,
    lines: impl Iterator<Item = &'a str>,
) -> Option<Violation> {
    for line in lines {
        if line.is_empty() || !usage.is_candidate(line) {
            continue;
        }

        let Some(found) = usage.extract(line) else {
            let snippet: String = line.chars().take(100).collect();
            warn!(
                "unparseable accessor usage in {}: {}",
                origin.display(),
                snippet
            );
            return None;
        };

        if let Some(violation) = check_usage(env, &found) {
            return Some(violation);
        }
    }

    None
}

/// Check one usage against the live environment
fn check_usage<S: EnvSource>(env: &S, usage: &Usage) -> Option<Violation> {
    let missing = |value: Option<String>| {
        Some(Violation {
            modifier: usage.modifier,
            name: usage.name.clone(),
            value,
        })
    };

    match usage.modifier {
        Modifier::Optional => None,
        Modifier::Required => match env.lookup(&usage.name) {
            Some(value) if !value.is_empty() => None,
            _ => missing(None),
        },
        Modifier::Numeric => match env.lookup(&usage.name) {
            Some(value) if value.is_empty() => missing(None),
            Some(value) => {
                if leading_integer(&value).is_some() {
                    None
                } else {
                    missing(Some(value))
                }
            }
            None => missing(None),
        },
    }
}
