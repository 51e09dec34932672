use std::{
    collections::BTreeSet,
    env, fs,
};

use rustyline::completion::Pair;

/// Completes the verb position: builtins, aliases and programs on `PATH`.
#[derive(Clone, Default)]
pub struct CommandCompleter {
    builtins: BTreeSet<String>,
    aliases: BTreeSet<String>,
    programs: BTreeSet<String>,
    scanned_path: Option<String>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_builtins<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.builtins = names.into_iter().map(String::from).collect();
    }

    pub fn set_aliases(&mut self, names: impl IntoIterator<Item = String>) {
        self.aliases = names.into_iter().collect();
    }

    /// Rescan `PATH` if it changed since the last scan.
    pub fn refresh_programs(&mut self, path_var: Option<&str>) {
        if self.scanned_path.as_deref() == path_var && !self.programs.is_empty() {
            return;
        }

        self.programs.clear();
        self.scanned_path = path_var.map(String::from);
        let Some(path_var) = path_var else {
            return;
        };

        for dir in env::split_paths(path_var) {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                let is_file = entry
                    .file_type()
                    .is_ok_and(|t| t.is_file() || t.is_symlink());
                if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
                    self.programs.insert(name.to_string());
                }
            }
        }
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        let mut seen = BTreeSet::new();
        let mut matches = Vec::new();

        for builtin in self.builtins.iter().filter(|b| b.starts_with(input)) {
            seen.insert(builtin.as_str());
            matches.push(Pair {
                display: builtin.clone(),
                replacement: format!("{} ", builtin),
            });
        }

        for alias in self.aliases.iter().filter(|a| a.starts_with(input)) {
            seen.insert(alias.as_str());
            matches.push(Pair {
                display: format!("{} (alias)", alias),
                replacement: format!("{} ", alias),
            });
        }

        for program in self
            .programs
            .iter()
            .filter(|p| p.starts_with(input) && !seen.contains(p.as_str()))
        {
            matches.push(Pair {
                display: program.clone(),
                replacement: format!("{} ", program),
            });
        }

        matches
    }
}
