//! Line sanitizing and section tokenizing.
//!
//! Turns manifest text into an ordered map of section name to [`ValueBag`].
//! Values are encoded (see [`crate::encode`]) as they are read.

use crate::encode::encode_value;
use crate::keys::KeyClass;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

/// Raw sections in the order their headers first appeared.
pub type RawSections = IndexMap<String, ValueBag>;

/// Key to ordered values. Repeated keys accumulate or replace according to
/// their [`KeyClass`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValueBag {
    entries: IndexMap<String, Vec<String>>,
}

impl ValueBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one value under `key`: append for accumulating keys,
    /// replace for everything else.
    pub fn insert(&mut self, key: &str, value: String) {
        if KeyClass::of(key).accumulates() {
            self.entries.entry(key.to_owned()).or_default().push(value);
        } else {
            self.entries.insert(key.to_owned(), vec![value]);
        }
    }

    /// Merge every value list of `other` into this bag: accumulating keys are
    /// appended in order, the rest are overwritten.
    pub fn merge(&mut self, other: &ValueBag) {
        for (key, values) in other.iter() {
            self.merge_values(key, values);
        }
    }

    /// Merge one key's value list into this bag.
    pub fn merge_values(&mut self, key: &str, values: &[String]) {
        if KeyClass::of(key).accumulates() {
            self.entries
                .entry(key.to_owned())
                .or_default()
                .extend(values.iter().cloned());
        } else {
            self.entries.insert(key.to_owned(), values.to_vec());
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// The last value written for `key`.
    pub fn last(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strip tabs, comments, and trailing whitespace from one physical line.
pub fn sanitize_line(line: &str) -> String {
    let mut line = line.replace('\t', " ");

    if line.starts_with('#') {
        line.clear();
    }

    // A `]` followed anywhere later by `#` cuts the line at the bracket.
    if let Some(hash) = line.rfind('#') {
        if let Some(bracket) = line[..hash].find(']') {
            line.truncate(bracket);
        }
    }

    if let Some(comment) = line.find(" #") {
        line.truncate(comment);
    }

    line.truncate(line.trim_end().len());
    line
}

fn section_name(header: &str) -> String {
    header
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ' '))
        .collect()
}

/// Tokenize manifest text into raw sections.
///
/// Lines before the first header and lines without `=` are ignored. A header
/// that repeats an earlier name replaces that section's bag in place.
pub fn tokenize(text: &str) -> RawSections {
    let mut sections = RawSections::new();
    let mut current: Option<(String, ValueBag)> = None;

    for raw_line in text.lines() {
        let line = sanitize_line(raw_line);
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            if let Some((name, bag)) = current.take() {
                sections.insert(name, bag);
            }
            let name = section_name(&line);
            trace!("section header [{name}]");
            current = Some((name, ValueBag::new()));
            continue;
        }

        let Some((_, bag)) = current.as_mut() else {
            continue;
        };
        let Some((raw_key, value)) = line.split_once('=') else {
            continue;
        };

        let key: String = raw_key.chars().filter(|c| *c != ' ').collect();
        bag.insert(&key, encode_value(KeyClass::of(&key), value));
    }

    if let Some((name, bag)) = current {
        sections.insert(name, bag);
    }

    debug!("tokenized {} manifest section(s)", sections.len());
    sections
}
