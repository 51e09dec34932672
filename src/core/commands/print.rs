use super::{Builtin, CommandError, Flow};
use crate::core::Session;

#[derive(Clone, Default)]
pub struct PrintCommand;

impl PrintCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Builtin for PrintCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        let words: Vec<String> = args
            .iter()
            .map(|arg| match arg.strip_prefix('$') {
                Some(name) => session.env.get(name).unwrap_or_default(),
                None => arg.clone(),
            })
            .collect();

        writeln!(session.out(), "{}", words.join(" "))?;
        Ok(Flow::Continue)
    }
}
