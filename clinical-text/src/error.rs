//! Typed error for the clinical-text crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    /// A table entry could not be compiled into a regex.
    #[error("invalid pattern in {table} table: `{pattern}`: {source}")]
    InvalidPattern {
        table: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A table that the pipeline cannot work without is empty.
    #[error("{0} table must not be empty")]
    EmptyTable(&'static str),
}
