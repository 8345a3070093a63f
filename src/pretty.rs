//! Deterministic text rendering of section maps.
//!
//! Output format (sections and keys sorted lexicographically):
//!
//! ```text
//! [Section one]
//!   Field one: Value one
//!
//! [Section two]
//!   Field one: Value two
//! ```

use crate::types::Sections;

/// Renders `sections` with each key/value line prefixed by `indent`.
///
/// Leading and trailing newlines are trimmed, so an empty map renders as
/// the empty string.
pub fn pretty_print(sections: &Sections, indent: &str) -> String {
    let mut names: Vec<&String> = sections.keys().collect();
    names.sort();

    let mut out = String::new();
    for name in names {
        let section = &sections[name];
        let mut keys: Vec<&String> = section.keys().collect();
        keys.sort();

        out.push_str("\n[");
        out.push_str(name);
        out.push_str("]\n");
        for key in keys {
            out.push_str(indent);
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&section[key]);
            out.push('\n');
        }
    }

    out.trim_matches('\n').to_string()
}
