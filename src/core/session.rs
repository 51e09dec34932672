use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::aliases::AliasTable;
use super::env::{Environment, ProcessEnv};
use super::eval::{ArithmeticEvaluator, Evaluator};
use crate::path::{PathError, PathExpander};

/// Everything one shell session owns.
///
/// Builtins and the dispatcher receive the session by `&mut`, so a test can
/// build as many isolated sessions as it likes.
pub struct Session {
    pub aliases: AliasTable,
    pub env: Box<dyn Environment>,
    pub evaluator: Box<dyn Evaluator>,
    paths: PathExpander,
    cwd: PathBuf,
    out: Box<dyn Write>,
}

impl Session {
    /// Session bound to the real process: its environment, working directory
    /// and stdout.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            aliases: AliasTable::new(),
            env: Box::new(ProcessEnv::new()),
            evaluator: Box::new(ArithmeticEvaluator::new()),
            paths: PathExpander::new(),
            cwd: std::env::current_dir()?,
            out: Box::new(io::stdout()),
        })
    }

    pub fn with_env(mut self, env: impl Environment + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    pub fn with_evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    pub fn with_output(mut self, out: impl Write + 'static) -> Self {
        self.out = Box::new(out);
        self
    }

    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.paths = PathExpander::with_home(home);
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub(crate) fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }

    pub fn home(&self) -> Option<&Path> {
        self.paths.home()
    }

    pub fn paths(&self) -> &PathExpander {
        &self.paths
    }

    pub fn out(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    /// Expand `~`, normalize separators and anchor relative paths at the
    /// session's working directory.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, PathError> {
        let expanded = self.paths.expand(raw)?;
        Ok(if expanded.is_absolute() {
            expanded
        } else {
            self.cwd.join(expanded)
        })
    }
}
