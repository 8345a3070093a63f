//! Option Resolution
//!
//! Per-key retrieval options (default value, required flag, validation) and
//! the resolver that applies them to a single raw value. Options are an
//! immutable settings record assembled at the call site:
//!
//! ```
//! use confpool::options::{Options, Validator};
//!
//! let opts = Options::new()
//!     .default_value("3306")
//!     .validate(Validator::integral());
//! let port = confpool::options::resolve("port", "", false, &opts).unwrap();
//! assert_eq!(port, "3306");
//! ```

use crate::error::{BoxError, Error, Result};
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::trace;

/// Pattern shared by every integral validator.
static INTEGRAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]*$").expect("integral pattern is a valid regular expression")
});

/// Signature of a caller-supplied validation function: `(key, value)`.
pub type ValidateFn = dyn Fn(&str, &str) -> std::result::Result<(), BoxError> + Send + Sync;

/// Validation rule applied to a resolved, non-empty value.
#[derive(Clone)]
pub enum Validator {
    /// The value must match the pattern. Anchoring is up to the pattern.
    Regex(Regex),
    /// The function must return `Ok`; its error is surfaced unchanged.
    Func(Arc<ValidateFn>),
    /// The value must equal one of the allowed strings. An empty set allows
    /// everything.
    Enum(Vec<String>),
}

impl Validator {
    /// Validator accepting only ASCII digits.
    pub fn integral() -> Self {
        Validator::Regex(INTEGRAL.clone())
    }

    /// Wraps a validation function.
    pub fn func<F, E>(f: F) -> Self
    where
        F: Fn(&str, &str) -> std::result::Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let check = move |key: &str, value: &str| -> std::result::Result<(), BoxError> {
            f(key, value).map_err(Into::into)
        };
        Validator::Func(Arc::new(check))
    }

    /// Builds an enumeration validator from anything yielding strings.
    pub fn one_of<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Validator::Enum(allowed.into_iter().map(Into::into).collect())
    }

    fn check(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Validator::Regex(re) => {
                if re.is_match(value) {
                    Ok(())
                } else {
                    Err(Error::RegexValidation(key.to_string()))
                }
            }
            Validator::Func(f) => f(key, value).map_err(Error::Validation),
            Validator::Enum(allowed) => {
                if allowed.is_empty() || allowed.iter().any(|a| a == value) {
                    Ok(())
                } else {
                    Err(Error::EnumValidation(key.to_string()))
                }
            }
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
            Validator::Func(_) => f.write_str("Func(..)"),
            Validator::Enum(allowed) => f.debug_tuple("Enum").field(allowed).finish(),
        }
    }
}

/// Retrieval options for a single key.
///
/// There is one validator slot: each `validate*` call replaces the validator
/// set before it.
#[derive(Debug, Clone, Default)]
pub struct Options {
    default_value: Option<String>,
    require: bool,
    validator: Option<Validator>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value used when the key is absent or empty. An empty default is the
    /// same as no default.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Absent or empty values fail with [`Error::NoKey`]. A default value
    /// does not satisfy this requirement.
    pub fn require(mut self) -> Self {
        self.require = true;
        self
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn validate_regex(self, re: Regex) -> Self {
        self.validate(Validator::Regex(re))
    }

    pub fn validate_integral(self) -> Self {
        self.validate(Validator::integral())
    }

    pub fn validate_fn<F, E>(self, f: F) -> Self
    where
        F: Fn(&str, &str) -> std::result::Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.validate(Validator::func(f))
    }

    pub fn validate_enum<I, S>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validate(Validator::one_of(allowed))
    }

    pub fn is_required(&self) -> bool {
        self.require
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    fn effective_default(&self) -> Option<&str> {
        self.default_value.as_deref().filter(|d| !d.is_empty())
    }
}

/// Resolves the final value for `key`.
///
/// `present` tells whether the key exists in its section at all. An empty
/// value counts as absent. Absent keys fail when required, fall back to the
/// default otherwise, and resolve to `""` when neither applies. Whatever
/// value remains (original or default) is then validated.
pub fn resolve(key: &str, value: &str, present: bool, options: &Options) -> Result<String> {
    let mut value = value;
    let mut present = present && !value.is_empty();

    loop {
        if !present && options.require {
            return Err(Error::NoKey(key.to_string()));
        }
        if !present {
            match options.effective_default() {
                Some(default) => {
                    trace!(key, default, "Substituting default value");
                    value = default;
                    present = true;
                    continue;
                }
                None => return Ok(String::new()),
            }
        }
        break;
    }

    if let Some(validator) = &options.validator {
        validator.check(key, value)?;
    }

    Ok(value.to_string())
}
