//! Turns the default-locale dictionary of a Dart localization file into a CSV sheet.
//!
//! The sheet has one row per key and one column per target locale. Only the `pt_BR` column is
//! filled in, so translators can complete the rest.

pub mod codec;
pub mod config;
pub mod error;
pub mod formats;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{Outcome, extract_to_sheet},
    config::Settings,
    error::Error,
    formats::dart::extract_catalog,
    types::{Catalog, DEFAULT_LOCALE, DEFAULT_SECTION, LOCALES, TranslationEntry},
};
