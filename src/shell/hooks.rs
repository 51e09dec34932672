use thiserror::Error;

use crate::core::Session;

#[derive(Debug, Error)]
#[error("input hook failed: {0}")]
pub struct HookError(pub String);

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Optional per-line override installed on the [`Shell`](super::Shell).
pub trait InputHook {
    /// Runs at the top of every loop iteration, before the prompt is shown.
    fn before_prompt(&mut self, _session: &mut Session) {}

    /// Return `Ok(true)` when the line was handled and must not be dispatched.
    fn on_input(&mut self, line: &str, session: &mut Session) -> Result<bool, HookError>;
}
