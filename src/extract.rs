//! Section extraction into typed records.
//!
//! Decoding goes through the `config` crate's value deserializer, which
//! gives weakly typed input for free: string values fill integer, float and
//! boolean fields when they parse as such.

use crate::error::Result;
use crate::params::Params;
use config::{Map, Value};
use serde::de::DeserializeOwned;

/// Keep only keys starting with `prefix`, with the prefix removed. An empty
/// prefix keeps everything.
pub fn strip_prefix(params: Params, prefix: &str) -> Params {
    if prefix.is_empty() {
        return params;
    }
    params
        .into_iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(prefix)
                .map(|stripped| (stripped.to_string(), value))
        })
        .collect()
}

/// Decode `params` into `T`. Keys are lowercased first, so `Host`, `HOST`
/// and `host` all fill a field named `host`.
///
/// Because of the lowercasing, a field only matches when its serialized
/// name is all lowercase: `#[serde(rename = "MaxConns")]` never matches,
/// `#[serde(rename = "maxconns")]` matches `MaxConns` in the section.
///
/// An empty value is a string like any other, so it fails to decode into a
/// numeric or boolean field instead of becoming `0` or `false`. Use
/// `Option<_>` with a `pre` hook that removes empty keys, or
/// `#[serde(default)]`, when blank values should fall back.
pub fn decode<T: DeserializeOwned>(params: Params) -> Result<T> {
    let table: Map<String, Value> = params
        .into_iter()
        .map(|(key, value)| (key.to_lowercase(), Value::from(value)))
        .collect();
    Ok(Value::from(table).try_deserialize()?)
}
