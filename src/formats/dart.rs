//! Extraction of the default-locale dictionary from a Dart localization file.
//!
//! The source is expected to hold one map literal per locale, one after another:
//!
//! ```text
//! static const Map<String, Map<String, String>> _localizedValues = {
//!   'pt_BR': {
//!     // Home
//!     'home.title': 'Início',
//!     'home.greeting': "Olá, \"visitante\"",
//!   },
//!   'en': {
//!     'home.title': 'Home',
//!   },
//! };
//! ```
//!
//! Only the block of the requested locale is read. It ends where the next locale block starts,
//! so a block that is the last one in the file is never found.
use std::io::BufRead;

use regex::Regex;
use tracing::{debug, warn};

use crate::{
    error::Error,
    traits::Parser,
    types::{Catalog, DEFAULT_LOCALE, TranslationEntry},
};

/// The pairs of one locale block, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub language: String,
    pub pairs: Vec<Pair>,
}

/// A `'key': 'value'` entry with the value already unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Format {
    /// Finds the block of `locale` in `content` and scans its entries.
    ///
    /// Returns `None` when the block cannot be located.
    pub fn extract(content: &str, locale: &str) -> Option<Self> {
        let block = locate_block(content, locale)?;
        Some(Format {
            language: locale.to_string(),
            pairs: scan_pairs(block),
        })
    }
}

impl Parser for Format {
    /// Reads the whole source and extracts the default-locale block.
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Format::extract(&content, DEFAULT_LOCALE).ok_or_else(|| Error::BlockNotFound {
            locale: DEFAULT_LOCALE.to_string(),
        })
    }
}

impl From<Format> for Catalog {
    fn from(value: Format) -> Self {
        value
            .pairs
            .into_iter()
            .map(|pair| (pair.key, TranslationEntry::new(pair.value)))
            .collect()
    }
}

/// Extracts the default-locale catalog, or an empty one if its block is missing.
pub fn extract_catalog(content: &str) -> Catalog {
    match Format::extract(content, DEFAULT_LOCALE) {
        Some(format) => Catalog::from(format),
        None => {
            warn!(locale = DEFAULT_LOCALE, "dictionary block not found");
            Catalog::new()
        }
    }
}

/// Returns the body of the `locale` map literal, between its `{` and the `}` that closes it
/// right before the next locale label. Line comments may sit between the two blocks.
pub fn locate_block<'a>(content: &'a str, locale: &str) -> Option<&'a str> {
    let pattern = format!(
        r#"(?s)['"]{}['"]\s*:\s*\{{(.*?)\}}(?:\s|//[^\n]*)*,(?:\s|//[^\n]*)*['"][^'"\s]+['"]\s*:"#,
        regex::escape(locale)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str())
}

#[derive(Debug, thiserror::Error)]
enum Malformed {
    #[error("unterminated string literal")]
    Unterminated,

    #[error("value of `{0}` is not a string literal")]
    NonStringValue(String),
}

/// Walks a block body and collects every `'key': 'value'` pair.
///
/// Anything that does not fit that shape is skipped and logged.
fn scan_pairs(block: &str) -> Vec<Pair> {
    let mut scanner = Scanner::new(block);
    let mut pairs = Vec::new();

    while let Some(c) = scanner.peek() {
        let start = scanner.pos;
        match c {
            c if c.is_whitespace() || c == ',' => scanner.bump(),
            '/' if scanner.starts_with("//") => scanner.skip_line(),
            '/' if scanner.starts_with("/*") => scanner.skip_block_comment(),
            '\'' | '"' => match scanner.entry() {
                Ok(Some(pair)) if pair.key.is_empty() => {
                    debug!(offset = start, "skipping entry with an empty key");
                }
                Ok(Some(pair)) => pairs.push(pair),
                Ok(None) => {
                    debug!(
                        offset = start,
                        text = &block[start..scanner.pos],
                        "skipping string not followed by a colon"
                    );
                }
                Err(reason) => {
                    debug!(offset = start, %reason, "skipping malformed entry");
                }
            },
            _ => {
                scanner.skip_token();
                debug!(
                    offset = start,
                    text = &block[start..scanner.pos],
                    "skipping unrecognized text"
                );
            }
        }
    }

    pairs
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Scanner { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.src[self.pos..].starts_with(prefix)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Moves to the next line break, leaving it unconsumed.
    fn skip_line(&mut self) {
        self.pos = self.src[self.pos..]
            .find('\n')
            .map_or(self.src.len(), |offset| self.pos + offset);
    }

    fn skip_block_comment(&mut self) {
        self.pos = self.src[self.pos + 2..]
            .find("*/")
            .map_or(self.src.len(), |offset| self.pos + 2 + offset + 2);
    }

    /// Skips at least one character, then up to the next separator or string.
    fn skip_token(&mut self) {
        self.bump();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ',' | '\'' | '"') {
                break;
            }
            self.bump();
        }
    }

    /// Reads a quoted literal starting at its opening quote and returns the raw body.
    ///
    /// Only an unescaped quote of the opening kind closes the literal. A raw line break
    /// means the literal was never closed; the scanner stops in front of it.
    fn quoted(&mut self) -> Result<&'a str, Malformed> {
        let Some(quote) = self.peek() else {
            return Err(Malformed::Unterminated);
        };
        self.bump();
        let start = self.pos;
        let mut escaped = false;

        while let Some(c) = self.peek() {
            if c == '\n' {
                return Err(Malformed::Unterminated);
            } else if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                let body = &self.src[start..self.pos];
                self.bump();
                return Ok(body);
            }
            self.bump();
        }

        Err(Malformed::Unterminated)
    }

    /// Reads `'key': 'value'` starting at the key's opening quote.
    ///
    /// `Ok(None)` means the string was not a key.
    fn entry(&mut self) -> Result<Option<Pair>, Malformed> {
        let key = self.quoted()?;
        self.skip_whitespace();
        if self.peek() != Some(':') {
            return Ok(None);
        }
        self.bump();
        self.skip_whitespace();

        match self.peek() {
            Some('\'' | '"') => {
                let raw = self.quoted()?;
                Ok(Some(Pair {
                    key: key.to_string(),
                    value: unescape(raw),
                }))
            }
            _ => Err(Malformed::NonStringValue(key.to_string())),
        }
    }
}

/// Resolves `\"`, `\'` and `\n`. Other backslash sequences are kept as written.
fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some(quote @ ('"' | '\'')) => result.push(quote),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    const SOURCE: &str = indoc! {r#"
        class AppLocalizations {
          static const Map<String, Map<String, String>> _localizedValues = {
            'pt_BR': {
              // Home
              'home.title': 'Início',
              'home.greeting': "Olá, \"visitante\"",
              /* Settings */
              'settings.help': 'Linha 1\nLinha 2',
              'settings.quote': 'It\'s fine',
            },
            'en': {
              'home.title': 'Home',
            },
          };
        }
    "#};

    #[test]
    fn test_locate_block_stops_at_next_locale() {
        let block = locate_block(SOURCE, "pt_BR").unwrap();
        assert!(block.contains("'home.title': 'Início'"));
        assert!(!block.contains("'Home'"));
    }

    #[test]
    fn test_locate_block_missing_locale() {
        assert!(locate_block(SOURCE, "fr").is_none());
    }

    #[test]
    fn test_locate_block_last_block_is_not_found() {
        // `en` has no sibling after it.
        assert!(locate_block(SOURCE, "en").is_none());
    }

    #[test]
    fn test_extract_pairs_in_source_order() {
        let format = Format::extract(SOURCE, "pt_BR").unwrap();
        assert_eq!(format.language, "pt_BR");
        let keys: Vec<&str> = format.pairs.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "home.title",
                "home.greeting",
                "settings.help",
                "settings.quote"
            ]
        );
    }

    #[test]
    fn test_escapes_are_resolved() {
        let catalog = extract_catalog(SOURCE);
        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.get("home.greeting").unwrap().default_value,
            r#"Olá, "visitante""#
        );
        assert_eq!(
            catalog.get("settings.help").unwrap().default_value,
            "Linha 1\nLinha 2"
        );
        assert_eq!(
            catalog.get("settings.quote").unwrap().default_value,
            "It's fine"
        );
    }

    #[test]
    fn test_every_entry_gets_general_section() {
        let catalog = extract_catalog(SOURCE);
        for (_, entry) in catalog.sorted() {
            assert_eq!(entry.section, "General");
        }
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let source = indoc! {"
            'pt_BR': {
              'a.b': 'first',
              'a.b': 'second',
            },
            'en': {},
        "};
        let format = Format::extract(source, "pt_BR").unwrap();
        assert_eq!(format.pairs.len(), 2);
        let catalog = Catalog::from(format);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a.b").unwrap().default_value, "second");
    }

    #[test]
    fn test_missing_block_yields_empty_catalog() {
        let catalog = extract_catalog("const x = {'en': {'a': 'b'}, 'es': {}};");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_unterminated_value_is_skipped() {
        let source = indoc! {"
            'pt_BR': {
              'good.one': 'ok',
              'broken': 'no end,
              'good.two': 'also ok',
            },
            'en': {},
        "};
        let catalog = extract_catalog(source);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("broken").is_none());
        assert_eq!(catalog.get("good.two").unwrap().default_value, "also ok");
    }

    #[test]
    fn test_trailing_backslash_does_not_swallow_next_line() {
        let source = indoc! {r"
            'pt_BR': {
              'bad': 'x\
              'next': 'N',
              'after': 'A',
            },
            'en': {},
        "};
        let catalog = extract_catalog(source);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("bad").is_none());
        assert_eq!(catalog.get("next").unwrap().default_value, "N");
        assert_eq!(catalog.get("after").unwrap().default_value, "A");
    }

    #[test]
    fn test_comment_between_locale_blocks() {
        let source = indoc! {"
            'pt_BR': {
              'home.title': 'Início',
            },
            // English
            'en': {
              'home.title': 'Home',
            },
        "};
        let catalog = extract_catalog(source);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("home.title").unwrap().default_value, "Início");
    }

    #[test]
    fn test_skipped_entry_is_logged() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer({
                let logs = logs.clone();
                move || logs.clone()
            })
            .finish();
        let source = indoc! {"
            'pt_BR': {
              'broken': 'no end,
              'count': 3,
            },
            'en': {},
        "};

        let catalog = tracing::subscriber::with_default(subscriber, || extract_catalog(source));
        assert!(catalog.is_empty());

        let output = logs.contents();
        assert!(output.contains("skipping malformed entry"));
        assert!(output.contains("unterminated string literal"));
        assert!(output.contains("value of `count` is not a string literal"));
        assert!(output.contains("offset="));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_non_string_value_is_skipped() {
        let source = indoc! {"
            'pt_BR': {
              'count': 3,
              'label': 'Rótulo',
            },
            'en': {},
        "};
        let catalog = extract_catalog(source);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("label").unwrap().default_value, "Rótulo");
    }

    #[test]
    fn test_quotes_inside_comments_are_ignored() {
        let source = indoc! {"
            'pt_BR': {
              // don't panic: 'not.a': 'key'
              'real': 'value',
            },
            'en': {},
        "};
        let catalog = extract_catalog(source);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("real").is_some());
    }

    #[test]
    fn test_mixed_quote_styles() {
        let source = indoc! {r#"
            "pt_BR": {
              "double": 'single value with "inner" quotes',
              'single': "double value with 'inner' quotes",
            },
            "en": {},
        "#};
        let catalog = extract_catalog(source);
        assert_eq!(
            catalog.get("double").unwrap().default_value,
            r#"single value with "inner" quotes"#
        );
        assert_eq!(
            catalog.get("single").unwrap().default_value,
            "double value with 'inner' quotes"
        );
    }

    #[test]
    fn test_empty_block() {
        let format = Format::extract("'pt_BR': {},\n'en': {},", "pt_BR").unwrap();
        assert!(format.pairs.is_empty());
    }

    #[test]
    fn test_unescape_keeps_unknown_sequences() {
        assert_eq!(unescape(r"a\tb"), r"a\tb");
        assert_eq!(unescape(r"\\n"), r"\\n");
        assert_eq!(unescape(r"trailing\"), r"trailing\");
    }

    #[test]
    fn test_parser_reports_missing_block() {
        let err = Format::from_reader(Cursor::new("nothing here")).unwrap_err();
        assert!(matches!(err, Error::BlockNotFound { ref locale } if locale == "pt_BR"));
    }

    #[test]
    fn test_parser_reads_default_locale() {
        let format = Format::from_reader(Cursor::new(SOURCE)).unwrap();
        assert_eq!(format.pairs.len(), 4);
    }
}
