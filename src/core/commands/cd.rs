use super::{Builtin, CommandError, Flow};
use crate::core::Session;
use std::path::MAIN_SEPARATOR_STR;
use tracing::debug;

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    fn directory_error(path: &str, reason: impl ToString) -> CommandError {
        CommandError::Directory {
            command: "cd",
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Builtin for CdCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        let target = match args.first() {
            Some(path) => path.clone(),
            None => session
                .home()
                .map(|h| h.to_string_lossy().into_owned())
                .unwrap_or_else(|| MAIN_SEPARATOR_STR.to_string()),
        };

        let resolved = session.resolve(&target)?;
        let canonical = resolved
            .canonicalize()
            .map_err(|e| Self::directory_error(&target, e))?;

        if !canonical.is_dir() {
            return Err(Self::directory_error(&target, "Not a directory"));
        }

        debug!(from = %session.cwd().display(), to = %canonical.display(), "changing directory");
        session
            .env
            .set("PWD", &canonical.to_string_lossy())?;
        session.set_cwd(canonical);
        Ok(Flow::Continue)
    }
}
