use super::{Builtin, CommandError, Flow};
use crate::core::Session;

#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for ExitCommand {
    /// Unparsable or missing codes mean 0.
    fn execute(&self, args: &[String], _session: &mut Session) -> Result<Flow, CommandError> {
        let code = args
            .first()
            .and_then(|s| s.parse::<i32>().ok())
            .unwrap_or(0);
        Ok(Flow::Exit(code))
    }
}
