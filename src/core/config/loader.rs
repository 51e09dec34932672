use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use super::ConfigError;
use crate::core::{CommandError, Dispatcher, Session};

/// A command from the rc file that failed.
#[derive(Debug)]
pub struct LineError {
    pub line: usize,
    pub error: CommandError,
}

#[derive(Debug)]
pub struct LoadReport {
    pub path: PathBuf,
    /// Number of lines that were dispatched.
    pub lines: usize,
    pub errors: Vec<LineError>,
}

/// Runs an rc file through the normal dispatch pipeline, one line at a time.
pub struct ConfigLoader<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn source(&self, path: &Path, session: &mut Session) -> Result<LoadReport, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::ConfigFileNotFound(path.to_path_buf()),
            _ => ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        info!(path = %path.display(), "loading rc file");
        let (lines, errors) = self.source_str(&content, session);
        Ok(LoadReport {
            path: path.to_path_buf(),
            lines,
            errors,
        })
    }

    /// Dispatch every non-blank, non-comment line. Never stops early.
    pub fn source_str(&self, content: &str, session: &mut Session) -> (usize, Vec<LineError>) {
        let mut dispatched = 0;
        let mut errors = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            dispatched += 1;
            debug!(line = index + 1, command = line, "rc");
            let report = self.dispatcher.dispatch(line, session);
            if let Some(code) = report.exit {
                warn!(line = index + 1, code, "exit ignored in rc file");
            }
            errors.extend(report.errors.into_iter().map(|error| LineError {
                line: index + 1,
                error,
            }));
        }

        (dispatched, errors)
    }
}
