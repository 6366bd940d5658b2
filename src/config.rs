//! Built-in run settings.
//!
//! The tool takes no flags; `Settings::default()` is what the binary runs with.

use std::path::PathBuf;

use crate::types::{DEFAULT_LOCALE, LOCALES};

/// Where the Dart dictionary lives, relative to the working directory.
pub const INPUT_PATH: &str = "lib/utils/localization.dart";

/// Where the sheet is written, relative to the working directory.
pub const OUTPUT_PATH: &str = "all_translation_keys.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub default_locale: &'static str,
    pub locales: &'static [&'static str],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(INPUT_PATH),
            output_path: PathBuf::from(OUTPUT_PATH),
            default_locale: DEFAULT_LOCALE,
            locales: &LOCALES,
        }
    }
}

impl Settings {
    /// Default settings reading and writing the given paths.
    pub fn with_paths(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            ..Self::default()
        }
    }
}
