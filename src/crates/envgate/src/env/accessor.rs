//! Read-only environment accessor
//!
//! The accessor wraps an [`EnvSource`] and enforces the three lookup
//! disciplines. Required paths treat a variable that is set to the empty
//! string the same as one that is unset. The accessor is read-only by
//! contract: every write attempt fails with
//! [`EnvGateError::ImmutableAccess`].

use crate::env::source::{EnvSource, ProcessEnv};
use crate::{EnvGateError, Result};

/// Typed, fail-fast view over an environment source
#[derive(Debug, Clone)]
pub struct EnvAccessor<S: EnvSource = ProcessEnv> {
    source: S,
}

impl EnvAccessor<ProcessEnv> {
    /// Create an accessor over the live process environment
    pub fn process() -> Self {
        Self::new(ProcessEnv)
    }
}

impl<S: EnvSource> EnvAccessor<S> {
    /// Create an accessor over the given source
    ///
    /// # Arguments
    ///
    /// * `source` - Where lookups are answered from; injected so tests can
    ///   supply a synthetic map
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Read a required string variable
    ///
    /// # Returns
    ///
    /// * `Ok(value)` if the variable is set to a non-empty string
    /// * `Err(MissingVar)` if the variable is unset or empty
    pub fn get(&self, name: &str) -> Result<String> {
        match self.source.lookup(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(EnvGateError::MissingVar(name.to_string())),
        }
    }

    /// Read an optional string variable
    ///
    /// # Returns
    ///
    /// * `Some(value)` if the variable is set, including `Some("")` for a
    ///   present-but-empty value
    /// * `None` if the variable is unset
    pub fn get_optional(&self, name: &str) -> Option<String> {
        self.source.lookup(name)
    }

    /// Read a required numeric variable
    ///
    /// Applies lenient leading-integer parsing: leading whitespace and an
    /// optional sign are accepted, trailing non-digit characters are
    /// ignored, so `"42abc"` parses as `42`.
    ///
    /// # Returns
    ///
    /// * `Ok(number)` if the variable is set and starts with an integer
    /// * `Err(MissingVar)` if the variable is unset or empty
    /// * `Err(InvalidNumeric)` if the value has no leading integer
    pub fn get_numeric(&self, name: &str) -> Result<i64> {
        let value = self.get(name)?;
        leading_integer(&value).ok_or_else(|| EnvGateError::InvalidNumeric {
            name: name.to_string(),
            value,
        })
    }

    /// The optional-lookup view
    pub fn opt(&self) -> OptView<'_, S> {
        OptView { accessor: self }
    }

    /// The numeric-lookup view
    pub fn num(&self) -> NumView<'_, S> {
        NumView { accessor: self }
    }

    /// Attempt to write a variable
    ///
    /// Always fails: the accessor is a read-only view and never mutates
    /// its source.
    pub fn set(&self, name: &str, _value: &str) -> Result<()> {
        Err(EnvGateError::ImmutableAccess(name.to_string()))
    }
}

/// Optional-lookup view of an accessor
///
/// Mirrors the `opt` namespace: lookups never fail, writes always do.
#[derive(Debug, Clone, Copy)]
pub struct OptView<'a, S: EnvSource> {
    accessor: &'a EnvAccessor<S>,
}

impl<S: EnvSource> OptView<'_, S> {
    /// Read an optional variable; `None` when unset
    pub fn get(&self, name: &str) -> Option<String> {
        self.accessor.get_optional(name)
    }

    /// Attempt to write a variable; always fails
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        self.accessor.set(name, value)
    }
}

/// Numeric-lookup view of an accessor
///
/// Mirrors the `num` namespace: lookups require a parseable integer,
/// writes always fail.
#[derive(Debug, Clone, Copy)]
pub struct NumView<'a, S: EnvSource> {
    accessor: &'a EnvAccessor<S>,
}

impl<S: EnvSource> NumView<'_, S> {
    /// Read a required numeric variable
    pub fn get(&self, name: &str) -> Result<i64> {
        self.accessor.get_numeric(name)
    }

    /// Attempt to write a variable; always fails
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        self.accessor.set(name, value)
    }
}

/// Parse the leading integer of a string, if any
///
/// Accepts leading whitespace and an optional `+`/`-` sign, then consumes
/// ASCII digits until the first non-digit. Returns `None` when no digits
/// follow the sign.
pub(crate) fn leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
