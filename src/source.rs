//! Interop with the `config` crate.
//!
//! Applications that already assemble their configuration with
//! `config::Config` (files, environment, overrides) can turn it into a pool
//! here. Every top-level table becomes a section; scalar values are
//! stringified.

use crate::error::Result;
use crate::pool::Pool;
use crate::types::Sections;
use config::Config;
use tracing::debug;

/// Decode the top-level tables of `config` into sections.
pub fn sections_from_config(config: &Config) -> Result<Sections> {
    let sections: Sections = config.clone().try_deserialize()?;
    debug!(sections = sections.len(), "Decoded sections from config");
    Ok(sections)
}

impl Pool {
    /// Build a pool from an already loaded `config::Config`.
    pub fn from_config(config: &Config) -> Result<Pool> {
        sections_from_config(config).map(Pool::new)
    }
}
