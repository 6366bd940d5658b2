//! The translation sheet: one row per key, one column per locale.
//!
//! Only the default-locale column is filled in; the rest are left empty for translators.
//! Fields are quoted the RFC 4180 way and records end with CRLF.
use std::io::BufRead;

use crate::{
    error::Error,
    traits::{Parser, Writer},
    types::{Catalog, DEFAULT_SECTION},
};

pub const KEY_COLUMN: &str = "key";
pub const SECTION_COLUMN: &str = "section";

/// One row of the sheet. `values` lines up with [`Format::locales`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    pub section: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub locales: Vec<String>,
    pub records: Vec<Record>,
}

impl Format {
    /// Builds the sheet for `catalog`, with rows sorted by key.
    ///
    /// The column of `default_locale` gets each entry's value; every other locale column is empty.
    pub fn from_catalog(catalog: &Catalog, locales: &[&str], default_locale: &str) -> Self {
        let records = catalog
            .sorted()
            .into_iter()
            .map(|(key, entry)| Record {
                key: key.clone(),
                section: if entry.section.is_empty() {
                    DEFAULT_SECTION.to_string()
                } else {
                    entry.section.clone()
                },
                values: locales
                    .iter()
                    .map(|locale| {
                        if *locale == default_locale {
                            entry.default_value.clone()
                        } else {
                            String::new()
                        }
                    })
                    .collect(),
            })
            .collect();

        Format {
            locales: locales.iter().map(|locale| locale.to_string()).collect(),
            records,
        }
    }

    pub fn header(&self) -> Vec<&str> {
        let mut header = vec![KEY_COLUMN, SECTION_COLUMN];
        header.extend(self.locales.iter().map(String::as_str));
        header
    }

    /// Looks up the cell of `key` in the `locale` column.
    pub fn value(&self, key: &str, locale: &str) -> Option<&str> {
        let column = self.locales.iter().position(|l| l == locale)?;
        self.records
            .iter()
            .find(|record| record.key == key)
            .and_then(|record| record.values.get(column))
            .map(String::as_str)
    }
}

impl Parser for Format {
    /// Parse a sheet, header included.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if headers.get(0) != Some(KEY_COLUMN) || headers.get(1) != Some(SECTION_COLUMN) {
            return Err(Error::InvalidTable(format!(
                "header must start with `{KEY_COLUMN},{SECTION_COLUMN}`, found `{}`",
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }
        let locales = headers.iter().skip(2).map(str::to_string).collect();

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result?;
            records.push(Record {
                key: row[0].to_string(),
                section: row[1].to_string(),
                values: row.iter().skip(2).map(str::to_string).collect(),
            });
        }

        Ok(Format { locales, records })
    }
}

impl Writer for Format {
    /// Write the header and every record. An empty sheet still gets its header.
    fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(writer);

        wtr.write_record(self.header())?;
        for record in &self.records {
            wtr.write_record(
                [record.key.as_str(), record.section.as_str()]
                    .into_iter()
                    .chain(record.values.iter().map(String::as_str)),
            )?;
        }
        wtr.flush()?;
        Ok(())
    }
}
