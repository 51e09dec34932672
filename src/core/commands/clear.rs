use super::{Builtin, CommandError, Flow};
use crate::core::Session;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

#[derive(Clone, Default)]
pub struct ClearCommand;

impl ClearCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for ClearCommand {
    fn execute(&self, _args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        let out = session.out();
        out.write_all(CLEAR_SCREEN.as_bytes())?;
        out.flush()?;
        Ok(Flow::Continue)
    }
}
