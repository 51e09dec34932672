use super::PathError;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Expands a leading `~` and normalizes separators.
#[derive(Debug, Clone, Default)]
pub struct PathExpander {
    home: Option<PathBuf>,
}

impl PathExpander {
    /// Home taken from `HOME`, falling back to the platform lookup.
    pub fn new() -> Self {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir);
        Self { home }
    }

    pub fn with_home(home: Option<PathBuf>) -> Self {
        Self { home }
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn get_home_dir(&self) -> Result<PathBuf, PathError> {
        self.home.clone().ok_or(PathError::HomeDirNotFound)
    }

    pub fn expand(&self, path: &str) -> Result<PathBuf, PathError> {
        let path = normalize_separators(path);
        if path.starts_with('~') {
            self.expand_tilde(&path)
        } else {
            Ok(PathBuf::from(path))
        }
    }

    /// Best-effort expansion for process arguments: anything that cannot be
    /// expanded is passed through untouched.
    pub fn expand_arg(&self, arg: &str) -> String {
        if !self.is_home_path(arg) {
            return arg.to_owned();
        }
        match self.expand_tilde(arg) {
            Ok(p) => p.to_string_lossy().into_owned(),
            Err(_) => arg.to_owned(),
        }
    }

    pub fn is_home_path(&self, path: &str) -> bool {
        path == "~" || path.starts_with("~/") || path.starts_with("~\\")
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, PathError> {
        let without_tilde = &path[1..];
        if without_tilde.is_empty() {
            return self.get_home_dir();
        }

        match without_tilde.strip_prefix(['/', '\\']) {
            Some(stripped) => {
                let mut home_path = self.get_home_dir()?;
                for part in stripped.split(['/', '\\']) {
                    if !part.is_empty() {
                        home_path.push(part);
                    }
                }
                Ok(home_path)
            }
            // ~user is left alone
            None => Ok(PathBuf::from(path)),
        }
    }
}

/// Rewrite both `/` and `\` to the platform separator.
pub fn normalize_separators(path: &str) -> String {
    path.chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expander() -> PathExpander {
        PathExpander::with_home(Some(PathBuf::from("/home/test")))
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expander().expand("~").unwrap(), PathBuf::from("/home/test"));
        assert_eq!(
            expander().expand("~/src/dlsh").unwrap(),
            PathBuf::from("/home/test").join("src").join("dlsh")
        );
    }

    #[test]
    fn test_plain_path_untouched() {
        let expanded = expander().expand("relative").unwrap();
        assert_eq!(expanded, PathBuf::from("relative"));
    }

    #[test]
    fn test_missing_home() {
        let expander = PathExpander::with_home(None);
        assert_eq!(expander.expand("~"), Err(PathError::HomeDirNotFound));
        assert_eq!(expander.expand_arg("~/x"), "~/x");
    }

    #[test]
    fn test_tilde_user_left_alone() {
        assert_eq!(expander().expand("~bob").unwrap(), PathBuf::from("~bob"));
        assert_eq!(expander().expand_arg("~bob"), "~bob");
    }

    #[test]
    fn test_normalize_separators() {
        let sep = MAIN_SEPARATOR.to_string();
        assert_eq!(normalize_separators("a/b\\c"), format!("a{sep}b{sep}c"));
    }
}
