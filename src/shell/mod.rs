use std::{
    env,
    io::{self, Write},
};

use rustyline::{error::ReadlineError, history::FileHistory, Config, Editor};
use tracing::{debug, info, warn};

mod hooks;

pub use hooks::{HookError, InputHook};

use crate::{
    core::{
        config::{self, ConfigError, ConfigLoader, ConfigPaths},
        Dispatcher, Session,
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::ShellHelper,
};

pub struct Shell {
    session: Session,
    dispatcher: Dispatcher,
    paths: ConfigPaths,
    flags: Flags,
    hook: Option<Box<dyn InputHook>>,
    highlighter: SyntaxHighlighter,
    errors: Box<dyn Write>,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let session = Session::new()?;
        Ok(Self::with_session(flags, session))
    }

    pub fn with_session(flags: Flags, session: Session) -> Self {
        let mut paths = ConfigPaths::new(session.home())
            .with_rc_path(flags.config.clone())
            .with_history_path(flags.history.clone());
        if flags.no_rc {
            paths = paths.without_rc();
        }

        Self {
            session,
            dispatcher: Dispatcher::default(),
            paths,
            flags,
            hook: None,
            highlighter: SyntaxHighlighter::new(),
            errors: Box::new(io::stderr()),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_hook(mut self, hook: impl InputHook + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn with_error_output(mut self, errors: impl Write + 'static) -> Self {
        self.errors = Box::new(errors);
        self.highlighter = SyntaxHighlighter::plain();
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Run the rc file, or install the default prompt when there is none.
    pub fn load_config(&mut self) {
        let mut sourced = false;

        if let Some(rc_path) = self.paths.rc_path.clone() {
            let loader = ConfigLoader::new(&self.dispatcher);
            match loader.source(&rc_path, &mut self.session) {
                Ok(report) => {
                    info!(path = %report.path.display(), lines = report.lines, "rc file loaded");
                    sourced = true;
                    for failure in report.errors {
                        self.report(&format!(
                            "{}:{}: {}",
                            report.path.display(),
                            failure.line,
                            failure.error
                        ));
                    }
                }
                Err(ConfigError::ConfigFileNotFound(_)) if !self.paths.rc_explicit => {
                    debug!(path = %rc_path.display(), "no rc file");
                }
                Err(e) => self.report(&e.to_string()),
            }
        }

        if !sourced {
            if let Err(e) = config::ensure_prompt(&mut self.session) {
                self.report(&e.to_string());
            }
        }
    }

    /// Hand one line to the hook or the dispatcher and report what failed.
    ///
    /// Returns the exit code when `exit` ran.
    pub fn handle_line(&mut self, line: &str) -> Option<i32> {
        if let Some(hook) = self.hook.as_mut() {
            match hook.on_input(line, &mut self.session) {
                Ok(true) => return None,
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "input hook failed, dispatching line");
                    self.report(&e.to_string());
                }
            }
        }

        let report = self.dispatcher.dispatch(line, &mut self.session);
        for error in &report.errors {
            self.report(&error.to_string());
        }
        if let Err(e) = self.session.out().flush() {
            debug!(error = %e, "flush failed");
        }
        report.exit
    }

    /// Non-interactive mode: one line, then the exit code.
    pub fn run_command(&mut self, line: &str) -> i32 {
        self.load_config();
        self.handle_line(line).unwrap_or(0)
    }

    pub fn run(&mut self) -> Result<i32, ShellError> {
        ctrlc::set_handler(|| debug!("interrupt received"))?;

        let editor_config = Config::builder()
            .auto_add_history(true)
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .build();
        let mut editor = Editor::<ShellHelper, FileHistory>::with_config(editor_config)?;
        editor.set_helper(Some(ShellHelper::new(self.dispatcher.builtins())));

        if let Some(path) = &self.paths.history_path {
            if let Err(e) = editor.load_history(path) {
                debug!(path = %path.display(), error = %e, "no history loaded");
            }
        }

        self.load_config();
        if !self.flags.quiet {
            writeln!(
                self.session.out(),
                "dlsh {} -- type 'exit' to leave",
                env!("CARGO_PKG_VERSION")
            )?;
        }

        loop {
            if let Some(hook) = self.hook.as_mut() {
                hook.before_prompt(&mut self.session);
            }
            if let Some(helper) = editor.helper_mut() {
                helper.sync(&self.session);
            }

            let prompt = config::prompt(&self.session);
            match editor.readline(&prompt) {
                Ok(line) => {
                    let exit = self.handle_line(&line);
                    self.sync_process_cwd();
                    self.save_history(&mut editor);
                    if let Some(code) = exit {
                        info!(code, "exit");
                        return Ok(code);
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(0),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn sync_process_cwd(&self) {
        let cwd = self.session.cwd();
        if env::current_dir().is_ok_and(|current| current == cwd) {
            return;
        }
        if let Err(e) = env::set_current_dir(cwd) {
            warn!(path = %cwd.display(), error = %e, "could not change process directory");
        }
    }

    fn save_history(&self, editor: &mut Editor<ShellHelper, FileHistory>) {
        if let Some(path) = &self.paths.history_path {
            if let Err(e) = editor.save_history(path) {
                warn!(path = %path.display(), error = %e, "could not save history");
            }
        }
    }

    fn report(&mut self, message: &str) {
        if self.flags.quiet {
            return;
        }
        let line = self.highlighter.highlight_error(message);
        if let Err(e) = writeln!(self.errors, "{}", line) {
            debug!(error = %e, "error report dropped");
        }
    }
}
