mod memory;
mod vars;

pub use memory::MemoryEnv;
pub use vars::ProcessEnv;

use std::ffi::OsString;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("invalid variable name: '{0}'")]
    InvalidName(String),
    #[error("invalid value for {0}: contains a NUL byte")]
    InvalidValue(String),
}

/// Key/value store shared with spawned children.
///
/// The shell never touches `std::env` directly; everything goes through this
/// accessor so a session can run against the real process environment or an
/// isolated map.
pub trait Environment {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError>;
    fn unset(&mut self, name: &str) -> Result<(), EnvError>;
    /// All entries, sorted by name.
    fn list(&self) -> Vec<(String, String)>;

    /// What a spawned child inherits, including entries that are not UTF-8.
    fn snapshot(&self) -> Vec<(OsString, OsString)> {
        self.list()
            .into_iter()
            .map(|(k, v)| (OsString::from(k), OsString::from(v)))
            .collect()
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), EnvError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(EnvError::InvalidName(name.to_string()));
    }
    Ok(())
}

pub(crate) fn validate_value(name: &str, value: &str) -> Result<(), EnvError> {
    if value.contains('\0') {
        return Err(EnvError::InvalidValue(name.to_string()));
    }
    Ok(())
}
