use super::{Builtin, CommandError, Flow};
use crate::core::Session;
use tracing::debug;

const USAGE: &str = "var [NAME = VALUE | NAME=VALUE | del NAME | match NAME = EXPR]";

#[derive(Clone, Default)]
pub struct VarCommand;

impl VarCommand {
    pub fn new() -> Self {
        Self
    }

    fn list(&self, session: &mut Session) -> Result<Flow, CommandError> {
        let vars = session.env.list();
        let out = session.out();
        for (name, value) in vars {
            writeln!(out, "{}={}", name, value)?;
        }
        Ok(Flow::Continue)
    }

    fn delete(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        let name = args
            .first()
            .ok_or_else(|| CommandError::Usage("var del NAME".to_string()))?;
        session.env.unset(name)?;
        Ok(Flow::Continue)
    }

    /// `var match NAME = EXPR...`
    fn evaluate(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        let (name, expression) = match args {
            [name, eq, rest @ ..] if eq == "=" && !rest.is_empty() => (name, rest.join(" ")),
            _ => return Err(CommandError::Usage("var match NAME = EXPR".to_string())),
        };

        let expression = expression.trim().trim_end_matches([';', ' ']).to_string();
        let value = session
            .evaluator
            .evaluate(&expression)
            .map_err(|source| CommandError::Evaluator {
                expression: expression.clone(),
                source,
            })?;

        debug!(name = %name, %expression, %value, "evaluated expression");
        session.env.set(name, &value)?;
        Ok(Flow::Continue)
    }

    fn assign(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        let full = args.join(" ");
        let (name, value) = full
            .split_once('=')
            .ok_or_else(|| CommandError::Usage(USAGE.to_string()))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(CommandError::Usage(USAGE.to_string()));
        }
        session.env.set(name, value.trim())?;
        Ok(Flow::Continue)
    }
}

/// `match NAME = EXPR...`; anything shorter is an assignment to `match`.
fn is_match_form(args: &[String]) -> bool {
    args.len() >= 4 && args[2] == "="
}

impl Builtin for VarCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        match args.first().map(String::as_str) {
            None => self.list(session),
            Some("del") => self.delete(&args[1..], session),
            Some("match") if is_match_form(args) => self.evaluate(&args[1..], session),
            Some(_) => self.assign(args, session),
        }
    }
}
