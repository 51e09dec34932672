use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod executor;

pub use executor::{FallbackShell, ProcessExecutor, SystemLauncher};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("command not found: {0}")]
    CommandNotFound(String),
    #[error("{program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl ProcessError {
    /// Classify a spawn failure: a missing executable is reported
    /// differently from every other launch problem.
    pub fn from_spawn(program: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            ProcessError::CommandNotFound(program.to_string())
        } else {
            ProcessError::Launch {
                program: program.to_string(),
                source: err,
            }
        }
    }
}

/// One blocking program launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Environment snapshot handed to the child as its complete environment.
    pub env: Vec<(OsString, OsString)>,
}

pub trait Launcher {
    /// Run the program to completion. Returns its exit code, or `None` when
    /// it was terminated by a signal.
    fn spawn(&self, request: &SpawnRequest) -> Result<Option<i32>, ProcessError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_spawn_classification() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "no such file");
        assert!(matches!(
            ProcessError::from_spawn("nope", missing),
            ProcessError::CommandNotFound(ref p) if p == "nope"
        ));

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = ProcessError::from_spawn("locked", denied);
        assert!(matches!(err, ProcessError::Launch { .. }));
        assert_eq!(err.to_string(), "locked: denied");
    }
}
