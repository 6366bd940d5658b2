//! All error types for the l10nsheet crate.
//!
//! These are returned from every fallible operation (reading the source, extracting, writing the sheet).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not find the `{locale}` dictionary block followed by another locale block")]
    BlockNotFound { locale: String },

    #[error("CSV error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid table: {0}")]
    InvalidTable(String),
}
