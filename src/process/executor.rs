use std::process::{Command, Stdio};

use tracing::{debug, info};

use super::{Launcher, ProcessError, SpawnRequest};
use crate::core::Session;

/// Launches programs with `std::process`, inheriting the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn spawn(&self, request: &SpawnRequest) -> Result<Option<i32>, ProcessError> {
        // A vanished working directory would otherwise surface as "not found".
        if !request.cwd.is_dir() {
            return Err(ProcessError::Launch {
                program: request.program.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("working directory {} does not exist", request.cwd.display()),
                ),
            });
        }

        let mut child = Command::new(&request.program)
            .args(&request.args)
            .current_dir(&request.cwd)
            .env_clear()
            .envs(request.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| ProcessError::from_spawn(&request.program, e))?;

        let status = child.wait().map_err(|e| ProcessError::Launch {
            program: request.program.clone(),
            source: e,
        })?;

        Ok(status.code())
    }
}

/// System command interpreter used when a program cannot be found directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackShell {
    pub program: String,
    pub flag: String,
}

impl FallbackShell {
    pub fn new(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }

    /// `cmd.exe /c` on Windows, nothing elsewhere.
    pub fn platform_default() -> Option<Self> {
        if cfg!(windows) {
            Some(Self::new("cmd.exe", "/c"))
        } else {
            None
        }
    }
}

pub struct ProcessExecutor {
    launcher: Box<dyn Launcher>,
    fallback: Option<FallbackShell>,
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self {
            launcher: Box::new(SystemLauncher),
            fallback: FallbackShell::platform_default(),
        }
    }

    pub fn with_launcher(mut self, launcher: impl Launcher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    pub fn with_fallback(mut self, fallback: Option<FallbackShell>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Run `program` synchronously in the session's working directory.
    ///
    /// The child's exit code is only logged; it never becomes the shell's.
    pub fn spawn_process(
        &self,
        program: &str,
        args: &[String],
        session: &Session,
    ) -> Result<(), ProcessError> {
        let args: Vec<String> = args
            .iter()
            .map(|arg| session.paths().expand_arg(arg))
            .collect();

        let request = SpawnRequest {
            program: program.to_string(),
            args,
            cwd: session.cwd().to_path_buf(),
            env: session.env.snapshot(),
        };

        debug!(program, args = ?request.args, "launching");
        match self.launcher.spawn(&request) {
            Ok(code) => {
                log_exit(program, code);
                Ok(())
            }
            Err(ProcessError::CommandNotFound(_)) => self.spawn_fallback(request),
            Err(e) => Err(e),
        }
    }

    fn spawn_fallback(&self, request: SpawnRequest) -> Result<(), ProcessError> {
        let Some(fallback) = &self.fallback else {
            return Err(ProcessError::CommandNotFound(request.program));
        };

        let program = request.program.clone();
        let mut line = program.clone();
        for arg in &request.args {
            line.push(' ');
            line.push_str(arg);
        }

        info!(program = %program, shell = %fallback.program, "falling back to system interpreter");
        let retry = SpawnRequest {
            program: fallback.program.clone(),
            args: vec![fallback.flag.clone(), line],
            ..request
        };

        match self.launcher.spawn(&retry) {
            Ok(code) => {
                log_exit(&retry.program, code);
                Ok(())
            }
            Err(e) => {
                debug!(error = %e, "fallback interpreter failed");
                Err(ProcessError::CommandNotFound(program))
            }
        }
    }
}

fn log_exit(program: &str, code: Option<i32>) {
    match code {
        Some(0) => {}
        Some(code) => debug!(program, code, "process exited with non-zero status"),
        None => debug!(program, "process terminated by signal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::{Environment, MemoryEnv};
    use crate::core::testing::RecordingLauncher;
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn session() -> Session {
        let mut env = MemoryEnv::new();
        env.set("GREETING", "hi").unwrap();
        Session::new()
            .unwrap()
            .with_env(env)
            .with_cwd("/work")
            .with_home(Some(PathBuf::from("/home/test")))
    }

    #[test]
    fn test_spawn_passes_cwd_env_and_args() {
        let launcher = RecordingLauncher::new();
        let executor = ProcessExecutor::new()
            .with_launcher(launcher.clone())
            .with_fallback(None);

        executor
            .spawn_process("git", &["status".into(), "~/repo".into()], &session())
            .unwrap();

        let calls = launcher.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "git");
        assert_eq!(
            calls[0].args,
            vec![
                "status".to_string(),
                PathBuf::from("/home/test").join("repo").to_string_lossy().into_owned()
            ]
        );
        assert_eq!(calls[0].cwd, PathBuf::from("/work"));
        assert_eq!(
            calls[0].env,
            vec![(OsString::from("GREETING"), OsString::from("hi"))]
        );
    }

    #[test]
    fn test_not_found_without_fallback() {
        let launcher = RecordingLauncher::new().missing("nope");
        let executor = ProcessExecutor::new()
            .with_launcher(launcher.clone())
            .with_fallback(None);

        let result = executor.spawn_process("nope", &[], &session());
        assert!(matches!(result, Err(ProcessError::CommandNotFound(ref p)) if p == "nope"));
        assert_eq!(launcher.calls().len(), 1);
    }

    #[test]
    fn test_fallback_interpreter_receives_joined_line() {
        let launcher = RecordingLauncher::new().missing("dir");
        let executor = ProcessExecutor::new()
            .with_launcher(launcher.clone())
            .with_fallback(Some(FallbackShell::new("cmd.exe", "/c")));

        executor
            .spawn_process("dir", &["/w".into(), "C:".into()], &session())
            .unwrap();

        let calls = launcher.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].program, "cmd.exe");
        assert_eq!(calls[1].args, vec!["/c".to_string(), "dir /w C:".to_string()]);
    }

    #[test]
    fn test_fallback_failure_reports_not_found() {
        let launcher = RecordingLauncher::new().missing("dir").missing("cmd.exe");
        let executor = ProcessExecutor::new()
            .with_launcher(launcher)
            .with_fallback(Some(FallbackShell::new("cmd.exe", "/c")));

        let result = executor.spawn_process("dir", &[], &session());
        assert!(matches!(result, Err(ProcessError::CommandNotFound(ref p)) if p == "dir"));
    }

    #[test]
    fn test_other_launch_errors_skip_fallback() {
        let launcher = RecordingLauncher::new().denied("locked");
        let executor = ProcessExecutor::new()
            .with_launcher(launcher.clone())
            .with_fallback(Some(FallbackShell::new("cmd.exe", "/c")));

        let result = executor.spawn_process("locked", &[], &session());
        assert!(matches!(result, Err(ProcessError::Launch { .. })));
        assert_eq!(launcher.calls().len(), 1);
    }

    #[test]
    fn test_platform_default() {
        assert_eq!(FallbackShell::platform_default().is_some(), cfg!(windows));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_launcher_runs_real_program() {
        let dir = tempfile::tempdir().unwrap();
        let request = SpawnRequest {
            program: "sh".into(),
            args: vec!["-c".into(), "exit 3".into()],
            cwd: dir.path().to_path_buf(),
            env: vec![("PATH".into(), std::env::var_os("PATH").unwrap_or_default())],
        };
        assert_eq!(SystemLauncher.spawn(&request).unwrap(), Some(3));
    }

    #[test]
    fn test_system_launcher_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let request = SpawnRequest {
            program: "dlsh-definitely-not-a-program".into(),
            args: vec![],
            cwd: dir.path().to_path_buf(),
            env: vec![],
        };
        assert!(matches!(
            SystemLauncher.spawn(&request),
            Err(ProcessError::CommandNotFound(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_child_inherits_non_utf8_value() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let request = SpawnRequest {
            program: "sh".into(),
            args: vec!["-c".into(), "test \"${DLSH_RAW+set}\" = set".into()],
            cwd: dir.path().to_path_buf(),
            env: vec![
                ("PATH".into(), std::env::var_os("PATH").unwrap_or_default()),
                ("DLSH_RAW".into(), OsStr::from_bytes(b"\xff\xfe").to_os_string()),
            ],
        };
        assert_eq!(SystemLauncher.spawn(&request).unwrap(), Some(0));
    }

    #[cfg(unix)]
    #[test]
    #[serial_test::serial]
    fn test_process_env_snapshot_reaches_launcher() {
        use crate::core::env::ProcessEnv;
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"\xff\xfe");
        std::env::set_var("DLSH_TEST_SPAWN_RAW", raw);

        let launcher = RecordingLauncher::new();
        let executor = ProcessExecutor::new()
            .with_launcher(launcher.clone())
            .with_fallback(None);
        let session = Session::new()
            .unwrap()
            .with_env(ProcessEnv::new())
            .with_cwd("/work");

        executor.spawn_process("env", &[], &session).unwrap();
        std::env::remove_var("DLSH_TEST_SPAWN_RAW");

        let calls = launcher.calls();
        assert!(calls[0]
            .env
            .contains(&(OsString::from("DLSH_TEST_SPAWN_RAW"), raw.to_os_string())));
    }
}
