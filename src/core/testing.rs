//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use super::env::MemoryEnv;
use super::Session;
use crate::process::{Launcher, ProcessError, SpawnRequest};

#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Records every launch instead of running anything.
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    calls: Rc<RefCell<Vec<SpawnRequest>>>,
    missing: Vec<String>,
    denied: Vec<String>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `program` is not installed.
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    /// Pretend `program` exists but cannot be executed.
    pub fn denied(mut self, program: &str) -> Self {
        self.denied.push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<SpawnRequest> {
        self.calls.borrow().clone()
    }

    /// Each launch as `program arg1 arg2 ...`.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|c| {
                std::iter::once(c.program.as_str())
                    .chain(c.args.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

impl Launcher for RecordingLauncher {
    fn spawn(&self, request: &SpawnRequest) -> Result<Option<i32>, ProcessError> {
        self.calls.borrow_mut().push(request.clone());

        if self.missing.contains(&request.program) {
            return Err(ProcessError::from_spawn(
                &request.program,
                io::Error::new(io::ErrorKind::NotFound, "not found"),
            ));
        }
        if self.denied.contains(&request.program) {
            return Err(ProcessError::from_spawn(
                &request.program,
                io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            ));
        }
        Ok(Some(0))
    }
}

/// Session with an in-memory environment, rooted (cwd and home) at `dir`.
pub fn session_in(dir: &Path) -> (Session, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let session = Session::new()
        .expect("current dir")
        .with_env(MemoryEnv::new())
        .with_home(Some(dir.to_path_buf()))
        .with_cwd(dir)
        .with_output(buffer.clone());
    (session, buffer)
}
