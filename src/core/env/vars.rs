use super::{validate_name, validate_value, EnvError, Environment};
use std::env;
use std::ffi::OsString;

/// The real process environment.
#[derive(Clone, Debug, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    pub fn new() -> Self {
        Self
    }
}

impl Environment for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        validate_name(name)?;
        validate_value(name, value)?;
        env::set_var(name, value);
        Ok(())
    }

    fn unset(&mut self, name: &str) -> Result<(), EnvError> {
        validate_name(name)?;
        env::remove_var(name);
        Ok(())
    }

    fn list(&self) -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        vars.sort();
        vars
    }

    fn snapshot(&self) -> Vec<(OsString, OsString)> {
        let mut vars: Vec<(OsString, OsString)> = env::vars_os().collect();
        vars.sort();
        vars
    }
}
