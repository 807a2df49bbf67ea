//! Fail-fast environment variable access for envgate
//!
//! This crate provides typed, validated access to process environment
//! variables, plus a startup audit that scans a source tree for accessor
//! usages and verifies every required variable is satisfiable before the
//! application gets any further.
//!
//! # Modules
//!
//! - `env` - Read-only environment accessor with required, optional, and
//!   numeric lookup disciplines, and `KEY=VALUE` env-file loading
//! - `audit` - Startup usage audit: source scan, usage extraction, and
//!   fail-fast validation against the live environment

pub mod audit;
pub mod env;

use thiserror::Error;

/// Errors that can occur in the envgate crate
#[derive(Debug, Error)]
pub enum EnvGateError {
    /// A required environment variable is unset (or set to the empty string)
    #[error("required environment variable {0} is not set")]
    MissingVar(String),

    /// A numeric environment variable is set but has no leading integer
    #[error("environment variable {name} is not numeric (got {value:?})")]
    InvalidNumeric {
        /// Variable name
        name: String,
        /// The unusable value found in the environment
        value: String,
    },

    /// Write attempted through the read-only accessor
    #[error("environment accessor is read-only: cannot set {0}")]
    ImmutableAccess(String),

    /// Usage pattern failed to compile
    #[error("invalid usage pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for envgate operations
pub type Result<T> = std::result::Result<T, EnvGateError>;

pub use audit::{run_audit, validate, AuditConfig, Violation};
pub use env::{EnvAccessor, EnvFile, EnvSource, MapSource, ProcessEnv};
