//! Confpool: Sectioned Configuration Pool
//!
//! Stores configuration as named sections of key/value strings and provides
//! typed access, merging with conflict strategies, one-directional diffing
//! and deterministic pretty-printing. [`Pool`] is safe to share between
//! threads.
//!
//! ```
//! use confpool::{sections, Options, Pool, Strategy};
//!
//! let pool = Pool::new(sections! {
//!     "Database" => { "host" => "localhost", "port" => "3306" },
//! });
//! pool.merge(&sections! { "Database" => { "port" => "5432" } }, Strategy::Overwrite)
//!     .unwrap();
//!
//! let port = pool.int("Database", "port", &Options::new().require()).unwrap();
//! assert_eq!(port, Some(5432));
//! ```

pub mod convert;
pub mod diff;
pub mod error;
pub mod extract;
pub mod merge;
pub mod options;
pub mod params;
pub mod pool;
pub mod pretty;
pub mod source;
pub mod types;

pub use diff::{diff, is_equivalent};
pub use error::{BoxError, Error, Result};
pub use merge::{merge, merge_all, Strategy};
pub use options::{resolve, Options, Validator};
pub use params::Params;
pub use pool::Pool;
pub use pretty::pretty_print;
pub use source::sections_from_config;
pub use types::{Section, Sections};
