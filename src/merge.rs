//! Section merge logic
//!
//! Combines two section maps key by key:
//! - Sections: union (a section missing on either side is copied whole)
//! - Keys: union within a section
//! - Conflicting keys: resolved by [`Strategy`]

use crate::error::{Error, Result};
use crate::types::{Section, Sections};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a merge treats a key that already holds a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Abort the merge on the first key already holding a different value.
    #[default]
    Report,
    /// Incoming values replace existing ones.
    Overwrite,
    /// Existing values are kept and incoming ones discarded.
    Keep,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Report => "report",
            Strategy::Overwrite => "overwrite",
            Strategy::Keep => "keep",
        };
        f.write_str(name)
    }
}

/// Merge `incoming` into a copy of `base`.
///
/// Neither input is modified. Under [`Strategy::Report`] a key present on
/// both sides with different values fails with [`Error::Conflict`]; equal
/// values are not a conflict. Iteration order is unspecified, so with
/// several conflicts any one of them may be reported.
pub fn merge(base: &Sections, incoming: &Sections, strategy: Strategy) -> Result<Sections> {
    if base.is_empty() {
        return Ok(incoming.clone());
    }
    if incoming.is_empty() {
        return Ok(base.clone());
    }

    let mut result = Sections::with_capacity(base.len().max(incoming.len()));
    for (name, section) in base {
        result.insert(name.clone(), section.clone());
    }

    for (name, params) in incoming {
        let Some(existing) = result.get_mut(name) else {
            result.insert(name.clone(), params.clone());
            continue;
        };
        merge_section(name, existing, params, strategy)?;
    }

    Ok(result)
}

fn merge_section(
    name: &str,
    existing: &mut Section,
    incoming: &Section,
    strategy: Strategy,
) -> Result<()> {
    for (key, value) in incoming {
        match existing.get_mut(key) {
            None => {
                existing.insert(key.clone(), value.clone());
            }
            Some(current) => match strategy {
                Strategy::Overwrite => *current = value.clone(),
                Strategy::Keep => {}
                Strategy::Report if *current == *value => {}
                Strategy::Report => {
                    return Err(Error::Conflict {
                        section: name.to_string(),
                        key: key.clone(),
                    })
                }
            },
        }
    }
    Ok(())
}

/// Merge multiple layers in order (first is the base, each later layer is
/// merged on top of the result so far).
pub fn merge_all(layers: &[Sections], strategy: Strategy) -> Result<Sections> {
    layers
        .iter()
        .try_fold(Sections::new(), |acc, layer| merge(&acc, layer, strategy))
}
