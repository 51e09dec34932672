use std::{
    fs,
    path::{PathBuf, MAIN_SEPARATOR},
};

use rustyline::completion::Pair;

use crate::path::PathExpander;

/// Completes filesystem paths relative to the session directory.
#[derive(Clone, Default)]
pub struct PathCompleter {
    cwd: PathBuf,
    expander: PathExpander,
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

impl PathCompleter {
    pub fn new(cwd: PathBuf, expander: PathExpander) -> Self {
        Self { cwd, expander }
    }

    pub fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }

    pub fn set_expander(&mut self, expander: PathExpander) {
        self.expander = expander;
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (typed_dir, prefix) = match incomplete.rfind(is_separator) {
            Some(i) => incomplete.split_at(i + 1),
            None => ("", incomplete),
        };

        let Some(search_dir) = self.search_dir(typed_dir) else {
            return Vec::new();
        };
        let Ok(entries) = fs::read_dir(&search_dir) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(prefix) || (name.starts_with('.') && !prefix.starts_with('.')) {
                    return None;
                }

                let path = format!("{}{}", typed_dir, name);
                Some(if entry.path().is_dir() {
                    Pair {
                        display: format!("{}{}", name, MAIN_SEPARATOR),
                        replacement: format!("{}{}", path, MAIN_SEPARATOR),
                    }
                } else {
                    Pair {
                        display: name,
                        replacement: format!("{} ", path),
                    }
                })
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn search_dir(&self, typed_dir: &str) -> Option<PathBuf> {
        if typed_dir.is_empty() {
            return Some(self.cwd.clone());
        }
        let expanded = self.expander.expand(typed_dir).ok()?;
        Some(if expanded.is_absolute() {
            expanded
        } else {
            self.cwd.join(expanded)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src").join("main.rs"), "").unwrap();
        fs::write(dir.path().join("readme.txt"), "").unwrap();
        fs::write(dir.path().join(".secret"), "").unwrap();
        dir
    }

    #[test]
    fn test_complete_in_cwd() {
        let dir = fixture();
        let completer = PathCompleter::new(dir.path().to_path_buf(), PathExpander::with_home(None));

        let matches = completer.complete_path("");
        let replacements: Vec<&str> = matches.iter().map(|p| p.replacement.as_str()).collect();
        assert_eq!(replacements, vec!["readme.txt ", format!("src{}", MAIN_SEPARATOR).as_str()]);

        assert_eq!(completer.complete_path("s").len(), 1);
    }

    #[test]
    fn test_complete_nested_keeps_typed_prefix() {
        let dir = fixture();
        let completer = PathCompleter::new(dir.path().to_path_buf(), PathExpander::with_home(None));

        let matches = completer.complete_path("src/m");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].replacement, "src/main.rs ");
        assert_eq!(matches[0].display, "main.rs");
    }

    #[test]
    fn test_hidden_only_with_dot_prefix() {
        let dir = fixture();
        let completer = PathCompleter::new(dir.path().to_path_buf(), PathExpander::with_home(None));

        assert!(completer.complete_path("").iter().all(|p| !p.display.starts_with('.')));
        assert_eq!(completer.complete_path(".s")[0].replacement, ".secret ");
    }

    #[test]
    fn test_tilde_prefix() {
        let dir = fixture();
        let completer = PathCompleter::new(
            PathBuf::from("/"),
            PathExpander::with_home(Some(dir.path().to_path_buf())),
        );

        let matches = completer.complete_path("~/re");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].replacement, "~/readme.txt ");
    }
}
