use std::{io, path::PathBuf};

use thiserror::Error;

mod loader;
mod paths;

pub use loader::{ConfigLoader, LineError, LoadReport};
pub use paths::{ConfigPaths, HISTORY_FILE_NAME, RC_FILE_NAME};

use super::env::EnvError;
use super::Session;

/// Prompt installed when there is no rc file and `PS1` is unset.
pub const DEFAULT_PS1: &str = "DLSH >> ";
/// Prompt used when `PS1` is unset.
pub const FALLBACK_PROMPT: &str = "$ ";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    ConfigFileNotFound(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Env(#[from] EnvError),
}

/// Set `PS1` to [`DEFAULT_PS1`] unless something already did.
pub fn ensure_prompt(session: &mut Session) -> Result<(), ConfigError> {
    if session.env.get("PS1").is_none() {
        session.env.set("PS1", DEFAULT_PS1)?;
    }
    Ok(())
}

/// The prompt text for the next line.
pub fn prompt(session: &Session) -> String {
    session
        .env
        .get("PS1")
        .unwrap_or_else(|| FALLBACK_PROMPT.to_string())
}
