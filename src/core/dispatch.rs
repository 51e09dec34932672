//! Line dispatch: tokenize, resolve aliases, route to a builtin or a program.

use tracing::{debug, warn};

use super::commands::{Builtins, CommandError, Flow};
use super::tokenizer::{split_commands, Command};
use super::Session;
use crate::process::ProcessExecutor;

/// Maximum number of chained alias substitutions for one sub-command.
pub const MAX_ALIAS_DEPTH: usize = 20;

/// Everything that happened while dispatching one line.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Failures, in the order they occurred. None of them stopped the line.
    pub errors: Vec<CommandError>,
    /// Set when `exit` ran; nothing after it was executed.
    pub exit: Option<i32>,
}

pub struct Dispatcher {
    builtins: Builtins,
    processes: ProcessExecutor,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(ProcessExecutor::new())
    }
}

impl Dispatcher {
    pub fn new(processes: ProcessExecutor) -> Self {
        Self {
            builtins: Builtins::new(),
            processes,
        }
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    pub fn dispatch(&self, line: &str, session: &mut Session) -> DispatchReport {
        let mut report = DispatchReport::default();
        if let Flow::Exit(code) = self.dispatch_at(line, 0, session, &mut report) {
            report.exit = Some(code);
        }
        report
    }

    /// Dispatch `text` reached through `depth` alias substitutions.
    ///
    /// Each expansion re-enters here with `depth + 1`, so the replacement
    /// text may itself hold several `;`-separated commands or more aliases.
    fn dispatch_at(
        &self,
        text: &str,
        depth: usize,
        session: &mut Session,
        report: &mut DispatchReport,
    ) -> Flow {
        if depth > MAX_ALIAS_DEPTH {
            warn!(command = text.trim(), "alias recursion limit exceeded");
            report.errors.push(CommandError::RecursionLimit {
                command: text.trim().to_string(),
                limit: MAX_ALIAS_DEPTH,
            });
            return Flow::Continue;
        }

        for segment in split_commands(text) {
            let Some(command) = Command::parse(segment) else {
                continue;
            };

            let replacement = session.aliases.get(&command.verb).map(|r| r.into_owned());
            let flow = match replacement {
                Some(replacement) => {
                    let expanded = command.substitute_verb(&replacement);
                    debug!(alias = %command.verb, %expanded, depth = depth + 1, "expanding alias");
                    self.dispatch_at(&expanded, depth + 1, session, report)
                }
                None => match self.route(&command, session) {
                    Ok(flow) => flow,
                    Err(e) => {
                        debug!(verb = %command.verb, error = %e, "command failed");
                        report.errors.push(e);
                        Flow::Continue
                    }
                },
            };

            if let Flow::Exit(_) = flow {
                return flow;
            }
        }
        Flow::Continue
    }

    fn route(&self, command: &Command, session: &mut Session) -> Result<Flow, CommandError> {
        if let Some(result) = self.builtins.execute(&command.verb, &command.args, session) {
            debug!(verb = %command.verb, "builtin");
            return result;
        }

        self.processes
            .spawn_process(&command.verb, &command.args, session)?;
        Ok(Flow::Continue)
    }
}
