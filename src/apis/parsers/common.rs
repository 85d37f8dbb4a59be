//! Helpers shared by the document-feed parsers.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

use crate::domain::{Entity, Source};
use crate::error::{MergeError, Result};

/// A feed pattern compiled on first use.
pub type Pattern = Lazy<std::result::Result<Regex, regex::Error>>;

pub fn compiled(pattern: &'static Pattern) -> Result<&'static Regex> {
    Lazy::force(pattern)
        .as_ref()
        .map_err(|e| MergeError::Config(format!("invalid feed pattern: {}", e)))
}

/// Trimmed text of a named group, empty when the group did not participate.
pub fn group<'t>(captures: &Captures<'t>, name: &str) -> &'t str {
    captures.name(name).map(|m| m.as_str().trim()).unwrap_or("")
}

/// Numeric group; `None` when absent or not a number.
pub fn number<T: std::str::FromStr>(captures: &Captures<'_>, name: &str) -> Option<T> {
    group(captures, name).parse().ok()
}

/// Records in the document feeds are numbered 1, 2, 3... A gap usually means a record
/// was lost to a line wrap, so it is logged and the count resynchronised.
pub struct SequenceCheck {
    source: Source,
    expected: u32,
}

impl SequenceCheck {
    pub fn new(source: Source) -> Self {
        Self { source, expected: 0 }
    }

    pub fn observe(&mut self, code: u32) {
        self.expected += 1;
        if code != self.expected {
            warn!("{} | Counting: {} | Code: {}", self.source, self.expected, code);
            self.expected = code;
        }
    }
}

/// Walks `text` line by line. Lines that do not match `pattern` are accumulated; the
/// accumulated text is parsed when the next matching line arrives (or, with
/// `flush_after`, once that many continuation lines have piled up).
pub fn splice_lines<F>(text: &str, pattern: &Regex, flush_after: Option<usize>, mut parse: F) -> Vec<Entity>
where
    F: FnMut(&str) -> Option<Entity>,
{
    let mut entities = Vec::new();
    let mut spliced = String::new();
    let mut continuations = 0;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let matched = pattern.is_match(line);
        if !matched {
            spliced.push(' ');
            spliced.push_str(line);
            continuations += 1;
            match flush_after {
                Some(limit) if continuations >= limit => {}
                _ => continue,
            }
        }

        let pending = spliced.trim();
        if !pending.is_empty() {
            if let Some(entity) = parse(pending) {
                entities.push(entity);
            }
        }
        spliced.clear();
        continuations = 0;

        if !matched {
            continue;
        }
        if let Some(entity) = parse(line) {
            entities.push(entity);
        }
    }

    entities
}

/// Parses every line independently.
pub fn each_line<F>(text: &str, mut parse: F) -> Vec<Entity>
where
    F: FnMut(&str) -> Option<Entity>,
{
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| parse(line))
        .collect()
}

/// Splits a delimited line, honouring double quotes around fields.
pub fn split_quoted(line: &str, separator: char) -> Vec<String> {
    let mut columns = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                current.push(c);
            }
            c if c == separator && !quoted => {
                columns.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    columns.push(current);
    columns
}

pub fn unquote(field: &str) -> &str {
    field.trim().trim_matches('"').trim()
}
