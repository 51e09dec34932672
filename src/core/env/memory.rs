use super::{validate_name, validate_value, EnvError, Environment};
use std::collections::BTreeMap;

/// Environment kept in a map, detached from the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Environment for MemoryEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        validate_name(name)?;
        validate_value(name, value)?;
        self.vars.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn unset(&mut self, name: &str) -> Result<(), EnvError> {
        validate_name(name)?;
        self.vars.remove(name);
        Ok(())
    }

    fn list(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
