//! Shared type aliases for sectioned configuration data.

use std::collections::HashMap;

/// Key/value pairs belonging to one named section.
pub type Section = HashMap<String, String>;

/// Section name to section contents. This is the raw shape handed to a
/// [`Pool`](crate::pool::Pool) and returned by its snapshot accessors.
pub type Sections = HashMap<String, Section>;

/// Builds a [`Sections`] map from literal data.
///
/// ```
/// let data = confpool::sections! {
///     "Database" => { "host" => "localhost", "port" => "3306" },
///     "Empty" => {},
/// };
/// assert_eq!(data["Database"]["port"], "3306");
/// assert!(data["Empty"].is_empty());
/// ```
#[macro_export]
macro_rules! sections {
    () => {
        $crate::types::Sections::new()
    };
    ($($name:expr => { $($key:expr => $value:expr),* $(,)? }),+ $(,)?) => {{
        let mut sections = $crate::types::Sections::new();
        $(
            #[allow(unused_mut)]
            let mut section = $crate::types::Section::new();
            $(
                section.insert(
                    ::std::string::String::from($key),
                    ::std::string::String::from($value),
                );
            )*
            sections.insert(::std::string::String::from($name), section);
        )+
        sections
    }};
}
