//! The end-to-end run: read the Dart source, extract the default-locale block and write the
//! translation sheet.
use std::path::PathBuf;

use tracing::{info, warn};

use crate::{
    config::Settings,
    error::Error,
    formats::{DartFormat, SheetFormat},
    traits::Writer,
    types::Catalog,
};

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The sheet was written with `keys` rows, possibly none.
    Written { path: PathBuf, keys: usize },

    /// The default-locale block was not found; no file was written.
    BlockNotFound { locale: String },
}

impl Outcome {
    pub fn key_count(&self) -> usize {
        match self {
            Outcome::Written { keys, .. } => *keys,
            Outcome::BlockNotFound { .. } => 0,
        }
    }

    /// A run that yields no keys counts as failed, even if a header-only sheet was written.
    pub fn is_failure(&self) -> bool {
        self.key_count() == 0
    }
}

/// Runs one extraction with `settings`, overwriting any previous sheet.
///
/// I/O failures on either file are returned as errors. A missing dictionary block is not an
/// error; it is reported through [`Outcome::BlockNotFound`].
pub fn extract_to_sheet(settings: &Settings) -> Result<Outcome, Error> {
    info!(path = %settings.input_path.display(), "reading localization source");
    let content = std::fs::read_to_string(&settings.input_path)?;

    let Some(source) = DartFormat::extract(&content, settings.default_locale) else {
        warn!(
            locale = settings.default_locale,
            path = %settings.input_path.display(),
            "dictionary block not found, no sheet written"
        );
        return Ok(Outcome::BlockNotFound {
            locale: settings.default_locale.to_string(),
        });
    };
    info!(pairs = source.pairs.len(), "scanned dictionary block");

    let catalog = Catalog::from(source);
    let sheet = SheetFormat::from_catalog(&catalog, settings.locales, settings.default_locale);
    sheet.write_to(&settings.output_path)?;
    info!(
        path = %settings.output_path.display(),
        keys = catalog.len(),
        "sheet written"
    );

    Ok(Outcome::Written {
        path: settings.output_path.clone(),
        keys: catalog.len(),
    })
}
