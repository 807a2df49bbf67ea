//! Environment accessor
//!
//! This module provides read-only, fail-fast access to environment
//! variables with three lookup disciplines:
//!
//! - required string: [`EnvAccessor::get`]
//! - optional string: [`EnvAccessor::get_optional`]
//! - required numeric: [`EnvAccessor::get_numeric`]
//!
//! Lookups are live: nothing is cached, so two reads of the same name can
//! observe an environment change in between. Values come from an injected
//! [`EnvSource`], which is the process environment in production and a
//! plain map in tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use envgate::env::EnvAccessor;
//!
//! let env = EnvAccessor::process();
//!
//! let database_url = env.get("DATABASE_URL")?;        // fails if unset
//! let region = env.opt().get("AWS_REGION");           // None if unset
//! let port = env.num().get("PORT")?;                  // fails if unset or non-numeric
//! ```

mod accessor;
mod file;
mod source;

pub(crate) use accessor::leading_integer;
pub use accessor::{EnvAccessor, NumView, OptView};
pub use file::EnvFile;
pub use source::{EnvSource, MapSource, ProcessEnv};
