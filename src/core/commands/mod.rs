use std::collections::BTreeMap;

use thiserror::Error;

mod alias;
mod cd;
mod clear;
mod exit;
mod ls;
mod print;
mod var;

pub use alias::AliasCommand;
pub use cd::CdCommand;
pub use clear::ClearCommand;
pub use exit::ExitCommand;
pub use ls::LsCommand;
pub use print::PrintCommand;
pub use var::VarCommand;

use super::env::EnvError;
use super::eval::EvalError;
use super::Session;
use crate::path::PathError;
use crate::process::ProcessError;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("alias recursion limit ({limit}) exceeded while expanding '{command}'")]
    RecursionLimit { command: String, limit: usize },
    #[error("command not found: {0}")]
    NotFound(String),
    #[error("{command}: {path}: {reason}")]
    Directory {
        command: &'static str,
        path: String,
        reason: String,
    },
    #[error("usage: {0}")]
    Usage(String),
    #[error("math error in '{expression}': {source}")]
    Evaluator {
        expression: String,
        #[source]
        source: EvalError,
    },
    #[error("{0}")]
    Launch(ProcessError),
    #[error("{0}")]
    Env(#[from] EnvError),
    #[error("{0}")]
    Path(#[from] PathError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::CommandNotFound(cmd) => CommandError::NotFound(cmd),
            other => CommandError::Launch(other),
        }
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

pub trait Builtin {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Ls(LsCommand),
    Exit(ExitCommand),
    Clear(ClearCommand),
    Var(VarCommand),
    Print(PrintCommand),
    Alias(AliasCommand),
}

impl Builtin for CommandType {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, session),
            CommandType::Ls(cmd) => cmd.execute(args, session),
            CommandType::Exit(cmd) => cmd.execute(args, session),
            CommandType::Clear(cmd) => cmd.execute(args, session),
            CommandType::Var(cmd) => cmd.execute(args, session),
            CommandType::Print(cmd) => cmd.execute(args, session),
            CommandType::Alias(cmd) => cmd.execute(args, session),
        }
    }
}

/// Exact, case-sensitive lookup table of builtin verbs.
#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();

        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("ls", CommandType::Ls(LsCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("clear", CommandType::Clear(ClearCommand::new()));
        commands.insert("clr", CommandType::Clear(ClearCommand::new()));
        commands.insert("var", CommandType::Var(VarCommand::new()));
        commands.insert("print", CommandType::Print(PrintCommand::new()));
        commands.insert("alias", CommandType::Alias(AliasCommand::new()));

        Self { commands }
    }

    /// Run `verb` if it names a builtin; `None` means it does not.
    pub fn execute(
        &self,
        verb: &str,
        args: &[String],
        session: &mut Session,
    ) -> Option<Result<Flow, CommandError>> {
        self.commands
            .get(verb)
            .map(|cmd| cmd.execute(args, session))
    }

    pub fn is_builtin(&self, verb: &str) -> bool {
        self.commands.contains_key(verb)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}
