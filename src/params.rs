//! Section Parameters
//!
//! [`Params`] is an owned copy of one section, handed out by
//! [`Pool::section`](crate::pool::Pool::section). It carries the typed
//! accessors; changing it never affects the pool it came from.

use crate::convert;
use crate::error::Result;
use crate::options::{resolve, Options};
use crate::types::Section;
use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

/// Key/value pairs of a single section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    values: Section,
}

impl Params {
    pub fn new(values: Section) -> Self {
        Self { values }
    }

    /// Raw value for `key`, without option processing.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &Section {
        &self.values
    }

    pub fn into_inner(self) -> Section {
        self.values
    }

    /// Resolved string value. Absent, non-required keys without a default
    /// resolve to `""`.
    pub fn string(&self, key: &str, options: &Options) -> Result<String> {
        match self.values.get(key) {
            Some(value) => resolve(key, value, true, options),
            None => resolve(key, "", false, options),
        }
    }

    /// Resolved value split on `separator`. Validation applies to the whole
    /// value before splitting; an empty value yields an empty list.
    pub fn strings(&self, key: &str, separator: &str, options: &Options) -> Result<Vec<String>> {
        let value = self.string(key, options)?;
        Ok(convert::to_strings(&value, separator))
    }

    pub fn int(&self, key: &str, options: &Options) -> Result<Option<i64>> {
        convert::to_int(key, &self.string(key, options)?)
    }

    pub fn float(&self, key: &str, options: &Options) -> Result<Option<f64>> {
        convert::to_float(key, &self.string(key, options)?)
    }

    /// See [`convert::to_bool`] for the accepted tokens.
    pub fn bool(&self, key: &str, options: &Options) -> Result<Option<bool>> {
        convert::to_bool(key, &self.string(key, options)?)
    }

    pub fn duration(&self, key: &str, options: &Options) -> Result<Option<Duration>> {
        convert::to_duration(key, &self.string(key, options)?)
    }

    /// Timestamp parsed with `format` (chrono strftime syntax), or RFC 3339
    /// when `format` is empty.
    pub fn time(
        &self,
        key: &str,
        format: &str,
        options: &Options,
    ) -> Result<Option<DateTime<FixedOffset>>> {
        convert::to_time(key, &self.string(key, options)?, format)
    }
}

impl From<Section> for Params {
    fn from(values: Section) -> Self {
        Self::new(values)
    }
}

impl From<Params> for Section {
    fn from(params: Params) -> Self {
        params.values
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
