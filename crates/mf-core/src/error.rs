//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where core parsing or calendar arithmetic can fail.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid country code {0:?}: expected three ASCII letters or digits")]
    InvalidCountryCode(String),

    #[error("invalid calendar month {month} of year {year}")]
    InvalidMonth { month: u32, year: i32 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `mf-core`.
pub type CoreResult<T> = Result<T, CoreError>;
