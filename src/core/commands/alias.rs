use super::{Builtin, CommandError, Flow};
use crate::core::Session;
use tracing::debug;

#[derive(Clone, Default)]
pub struct AliasCommand;

impl AliasCommand {
    pub fn new() -> Self {
        Self
    }

    fn list(&self, session: &mut Session) -> Result<Flow, CommandError> {
        let lines: Vec<String> = session
            .aliases
            .iter()
            .map(|(name, command)| format!("{}={}", name, command))
            .collect();

        let out = session.out();
        if lines.is_empty() {
            writeln!(out, "No aliases.")?;
        }
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        Ok(Flow::Continue)
    }

    /// `alias add NAME=VALUE...`, split on the first `=`.
    fn add(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        let declaration = args.join(" ");
        let (name, value) = declaration
            .split_once('=')
            .ok_or_else(|| CommandError::Usage("alias add name=value".to_string()))?;

        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(CommandError::Usage("alias add name=value".to_string()));
        }

        let value = value.trim();
        debug!(name, value, "alias added");
        session.aliases.add(name, value);
        writeln!(session.out(), "Alias added: '{}' -> '{}'", name, value)?;
        Ok(Flow::Continue)
    }

    fn delete(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        let name = args
            .first()
            .ok_or_else(|| CommandError::Usage("alias del NAME".to_string()))?;

        if session.aliases.remove(name).is_some() {
            debug!(name = %name, "alias removed");
        }
        writeln!(session.out(), "Alias removed: {}", name)?;
        Ok(Flow::Continue)
    }
}

impl Builtin for AliasCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        match args.first().map(String::as_str) {
            None | Some("list") => self.list(session),
            Some("add") => self.add(&args[1..], session),
            Some("del") => self.delete(&args[1..], session),
            Some("clear") => {
                session.aliases.clear();
                Ok(Flow::Continue)
            }
            Some(other) => Err(CommandError::Usage(format!(
                "alias [list | add NAME=VALUE | del NAME | clear], got '{}'",
                other
            ))),
        }
    }
}
