//! Accessor usage patterns
//!
//! Two regexes cooperate per line of source: a broad candidate pattern
//! (the recursive-search pattern, word-boundary safe on the left) decides
//! whether a line references the accessor at all, and a strict extraction
//! pattern pulls the `(modifier, name)` pair out of it. A line the broad
//! pattern accepts but the strict pattern cannot parse is a scan anomaly,
//! handled by the audit loop.

use regex::Regex;

use crate::Result;

/// Lookup discipline of a single accessor usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Plain usage: the variable must be set and non-empty
    Required,
    /// `opt.` usage: the variable may be absent
    Optional,
    /// `num.` usage: the variable must be set and integer-parseable
    Numeric,
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Numeric => "numeric",
        };
        write!(f, "{}", label)
    }
}

/// One extracted accessor usage: a `(modifier, name)` pair
///
/// Produced from a single line of source and consumed immediately by the
/// audit loop; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage {
    /// Lookup discipline of the usage
    pub modifier: Modifier,
    /// Referenced variable name
    pub name: String,
}

/// Compiled pattern pair for one accessor token
#[derive(Debug)]
pub struct UsagePattern {
    broad: Regex,
    strict: Regex,
}

impl UsagePattern {
    /// Compile the pattern pair for the given accessor token
    pub fn new(token: &str) -> Result<Self> {
        let token = regex::escape(token);
        let broad = Regex::new(&format!(
            r"(^|[^\w]){}\.(opt\.|num\.)?[a-zA-Z0-9_]+",
            token
        ))?;
        let strict = Regex::new(&format!(
            r"{}\.(?:(opt|num)\.)?([A-Za-z_][A-Za-z0-9_]*)",
            token
        ))?;
        Ok(Self { broad, strict })
    }

    /// Whether the line references the accessor at all
    pub fn is_candidate(&self, line: &str) -> bool {
        self.broad.is_match(line)
    }

    /// Extract the first usage from a candidate line
    ///
    /// # Returns
    ///
    /// * `Some(usage)` for a well-formed reference
    /// * `None` when the line cannot be parsed (a scan anomaly when the
    ///   broad pattern already accepted it)
    pub fn extract(&self, line: &str) -> Option<Usage> {
        let caps = self.strict.captures(line)?;
        let name = caps.get(2)?;

        let modifier = match caps.get(1).map(|m| m.as_str()) {
            Some("opt") => Modifier::Optional,
            Some("num") => Modifier::Numeric,
            _ => Modifier::Required,
        };

        // A modifier whose name part is malformed (e.g. `.num.2X`) must not
        // degrade into a required lookup of the modifier token itself.
        if modifier == Modifier::Required
            && matches!(name.as_str(), "opt" | "num")
            && line[name.end()..].starts_with('.')
        {
            return None;
        }

        Some(Usage {
            modifier,
            name: name.as_str().to_string(),
        })
    }
}
