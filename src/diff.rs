//! One-directional difference between two section maps.

use crate::types::{Section, Sections};

/// Returns every section, key and value of `from` that is missing from `to`
/// or holds a different value there.
///
/// A section absent from `to` is copied whole, so an empty section shows up
/// as an empty entry. Values are compared as exact strings.
pub fn diff(from: &Sections, to: &Sections) -> Sections {
    let mut result = Sections::new();

    for (name, params) in from {
        let Some(other) = to.get(name) else {
            result.insert(name.clone(), params.clone());
            continue;
        };

        let changed: Section = params
            .iter()
            .filter(|(key, value)| other.get(*key) != Some(*value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if !changed.is_empty() {
            result.insert(name.clone(), changed);
        }
    }

    result
}

/// True when neither side holds anything the other lacks.
pub fn is_equivalent(a: &Sections, b: &Sections) -> bool {
    diff(a, b).is_empty() && diff(b, a).is_empty()
}
