//! Configuration Pool
//!
//! Thread-safe container of named sections. Every operation takes the pool
//! lock for its whole read or write, including the deep copies handed back
//! to callers, so no caller ever holds a reference into shared state.

use crate::convert;
use crate::diff::diff;
use crate::error::{BoxError, Error, Result};
use crate::extract;
use crate::merge::{merge, Strategy};
use crate::options::{resolve, Options};
use crate::params::Params;
use crate::pretty::pretty_print;
use crate::types::Sections;
use chrono::{DateTime, Duration, FixedOffset};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Pool of configuration data, divided into named sections.
#[derive(Default)]
pub struct Pool {
    sections: Mutex<Sections>,
}

impl Pool {
    /// Create a pool owning `initial`. Equivalent to an Overwrite merge into
    /// an empty pool, so it cannot fail.
    pub fn new(initial: Sections) -> Self {
        debug!(sections = initial.len(), "Creating configuration pool");
        Self {
            sections: Mutex::new(initial),
        }
    }

    /// Deep copy of the entire pool.
    pub fn raw(&self) -> Sections {
        self.sections.lock().clone()
    }

    /// Section names in sorted order.
    pub fn sections(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sections.lock().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.sections.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.lock().is_empty()
    }

    /// Copy of the named section, or `None` if it doesn't exist.
    pub fn section(&self, name: &str) -> Option<Params> {
        self.sections.lock().get(name).cloned().map(Params::new)
    }

    /// Alias of [`Pool::section`].
    pub fn params(&self, name: &str) -> Option<Params> {
        self.section(name)
    }

    /// Raw value for a key, bypassing option processing.
    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections
            .lock()
            .get(section)
            .and_then(|params| params.get(key))
            .cloned()
    }

    /// Store `value` under `key` in an existing section. Setting an empty
    /// value keeps the key present; use [`Pool::unset`] to remove it.
    pub fn set(&self, section: &str, key: &str, value: impl Into<String>) -> Result<()> {
        let mut sections = self.sections.lock();
        let params = sections
            .get_mut(section)
            .ok_or_else(|| Error::NoSection(section.to_string()))?;
        params.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Remove `key` from `section`, or the whole section when `key` is
    /// empty. Returns whether anything was removed.
    pub fn unset(&self, section: &str, key: &str) -> bool {
        let mut sections = self.sections.lock();
        let removed = if key.is_empty() {
            sections.remove(section).is_some()
        } else {
            sections
                .get_mut(section)
                .map(|params| params.remove(key).is_some())
                .unwrap_or(false)
        };
        debug!(section, key, removed, "Unset");
        removed
    }

    /// Merge `incoming` into the pool. On failure the pool is unchanged.
    pub fn merge(&self, incoming: &Sections, strategy: Strategy) -> Result<()> {
        let mut sections = self.sections.lock();
        match merge(&sections, incoming, strategy) {
            Ok(merged) => {
                debug!(
                    %strategy,
                    incoming = incoming.len(),
                    sections = merged.len(),
                    "Merged configuration"
                );
                *sections = merged;
                Ok(())
            }
            Err(err) => {
                warn!(%strategy, error = %err, "Merge rejected");
                Err(err)
            }
        }
    }

    /// Sections, keys and values of `other` that this pool lacks or holds
    /// with a different value.
    ///
    /// Two pools are identical if and only if comparing in both directions
    /// yields an empty map.
    pub fn compare(&self, other: &Pool) -> Sections {
        if std::ptr::eq(self, other) {
            return Sections::new();
        }
        // Snapshot first so the two locks are never held together.
        let theirs = other.raw();
        let ours = self.sections.lock();
        let result = diff(&theirs, &ours);
        debug!(differences = result.len(), "Compared pools");
        result
    }

    pub fn pretty_print(&self, indent: &str) -> String {
        pretty_print(&self.sections.lock(), indent)
    }

    /// Resolved string value for a key. See [`Params::string`].
    pub fn string(&self, section: &str, key: &str, options: &Options) -> Result<String> {
        match self.get(section, key) {
            Some(value) => resolve(key, &value, true, options),
            None => resolve(key, "", false, options),
        }
    }

    pub fn strings(
        &self,
        section: &str,
        key: &str,
        separator: &str,
        options: &Options,
    ) -> Result<Vec<String>> {
        let value = self.string(section, key, options)?;
        Ok(convert::to_strings(&value, separator))
    }

    pub fn int(&self, section: &str, key: &str, options: &Options) -> Result<Option<i64>> {
        convert::to_int(key, &self.string(section, key, options)?)
    }

    pub fn float(&self, section: &str, key: &str, options: &Options) -> Result<Option<f64>> {
        convert::to_float(key, &self.string(section, key, options)?)
    }

    pub fn bool(&self, section: &str, key: &str, options: &Options) -> Result<Option<bool>> {
        convert::to_bool(key, &self.string(section, key, options)?)
    }

    pub fn duration(
        &self,
        section: &str,
        key: &str,
        options: &Options,
    ) -> Result<Option<Duration>> {
        convert::to_duration(key, &self.string(section, key, options)?)
    }

    pub fn time(
        &self,
        section: &str,
        key: &str,
        format: &str,
        options: &Options,
    ) -> Result<Option<DateTime<FixedOffset>>> {
        convert::to_time(key, &self.string(section, key, options)?, format)
    }

    /// Decode a section into `T`.
    ///
    /// With a non-empty `prefix`, only keys starting with it are used, with
    /// the prefix stripped. Keys match field names case-insensitively and
    /// values are weakly typed (`"3306"` fills an integer field).
    pub fn extract<T: DeserializeOwned>(&self, section: &str, prefix: &str) -> Result<T> {
        let params = self.prefixed(section, prefix)?;
        extract::decode(params)
    }

    /// Like [`Pool::extract`], with hooks around decoding.
    ///
    /// `pre` sees the (prefix-stripped) parameters before decoding and may
    /// rewrite them or abort with its own error. `post` runs only after a
    /// successful decode.
    pub fn extract_with_hooks<T, Pre, Post>(
        &self,
        section: &str,
        prefix: &str,
        pre: Pre,
        post: Post,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        Pre: FnOnce(&mut Params) -> std::result::Result<(), BoxError>,
        Post: FnOnce(&T),
    {
        let mut params = self.prefixed(section, prefix)?;
        pre(&mut params).map_err(Error::Validation)?;
        let out = extract::decode(params)?;
        post(&out);
        Ok(out)
    }

    fn prefixed(&self, section: &str, prefix: &str) -> Result<Params> {
        let params = self
            .section(section)
            .ok_or_else(|| Error::NoSection(section.to_string()))?;
        Ok(extract::strip_prefix(params, prefix))
    }
}

impl From<Sections> for Pool {
    fn from(sections: Sections) -> Self {
        Self::new(sections)
    }
}

impl Clone for Pool {
    fn clone(&self) -> Self {
        Self::new(self.raw())
    }
}

impl PartialEq for Pool {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other).is_empty() && other.compare(self).is_empty()
    }
}

impl Eq for Pool {}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("sections", &*self.sections.lock())
            .finish()
    }
}

/// Renders the pool with a two-space indent.
impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_print("  "))
    }
}

/// Serializes a sorted snapshot, so output is stable across runs.
impl Serialize for Pool {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let snapshot = self.raw();
        let sorted: BTreeMap<&String, BTreeMap<&String, &String>> = snapshot
            .iter()
            .map(|(name, params)| (name, params.iter().collect()))
            .collect();
        sorted.serialize(serializer)
    }
}
