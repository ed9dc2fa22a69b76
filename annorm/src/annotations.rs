//! Annotation parsing for doc-comment metadata blocks.
//!
//! A metadata block is free-form text (typically the doc comment of a struct
//! or field) in which annotations of the following shapes may appear anywhere:
//!
//! ```text
//! @pkey                     flag, no value
//! @table=guestbook          bare value, no whitespace or quotes
//! @label="Say \"hi\"\n"     quoted value with \\ \" \n \t escapes
//! ```
//!
//! Everything outside recognized annotation syntax is ignored, so parsing
//! never fails.

use once_cell::sync::Lazy;
use regex::Regex;

static ANNOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@([A-Za-z_][A-Za-z0-9_]*)(?:=(?:"((?:[^"\\]|\\["\\nt])*)"|([^"\s]*)))?"#)
        .expect("annotation pattern is valid")
});

/// Parsed key/value annotations of a single declaration.
///
/// Keys keep the position of their first occurrence; a repeated key takes the
/// value of its last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBlock {
    entries: Vec<(String, Option<String>)>,
}

impl MetadataBlock {
    /// Parse a raw metadata block. Absent or empty input yields an empty block.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut block = Self::default();
        let Some(text) = raw.filter(|text| !text.is_empty()) else {
            return block;
        };

        for caps in ANNOTATION.captures_iter(text) {
            let name = &caps[1];
            let value = if let Some(quoted) = caps.get(2) {
                Some(unescape(quoted.as_str()))
            } else if let Some(bare) = caps.get(3) {
                // `@key="...` without a closing quote leaves the bare branch
                // matching nothing right before the opening quote.
                let whole = caps.get(0).map_or(bare.end(), |m| m.end());
                if bare.as_str().is_empty() && text[whole..].starts_with('"') {
                    continue;
                }
                Some(bare.as_str().to_string())
            } else {
                None
            };
            block.insert(name, value);
        }

        block
    }

    fn insert(&mut self, name: &str, value: Option<String>) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Value of `key`, or `None` when the key is absent or is a bare flag.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Value of `key`, falling back to `default` only when the key is absent.
    ///
    /// A present flag yields `None` rather than the default.
    pub fn get_or<'a>(&'a self, key: &str, default: Option<&'a str>) -> Option<&'a str> {
        match self.entries.iter().find(|(name, _)| name == key) {
            Some((_, value)) => value.as_deref(),
            None => default,
        }
    }

    /// Whether `key` occurred in the block, with or without a value.
    pub fn has(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate annotations in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }
}

impl From<&str> for MetadataBlock {
    fn from(raw: &str) -> Self {
        Self::parse(Some(raw))
    }
}

/// Resolve `\\`, `\"`, `\n` and `\t` escapes of a quoted annotation value.
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Inverse of [`unescape`]: produce the body of a quoted annotation value.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}
