use std::path::{Path, PathBuf};

pub const RC_FILE_NAME: &str = ".dlshrc";
pub const HISTORY_FILE_NAME: &str = ".dlsh_history";

/// Where the startup file and the history file live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPaths {
    pub rc_path: Option<PathBuf>,
    pub history_path: Option<PathBuf>,
    /// The rc path came from the command line, so a missing file is an error.
    pub rc_explicit: bool,
}

impl ConfigPaths {
    pub fn new(home: Option<&Path>) -> Self {
        Self {
            rc_path: home.map(|h| h.join(RC_FILE_NAME)),
            history_path: home.map(|h| h.join(HISTORY_FILE_NAME)),
            rc_explicit: false,
        }
    }

    pub fn with_rc_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.rc_path = Some(path);
            self.rc_explicit = true;
        }
        self
    }

    pub fn without_rc(mut self) -> Self {
        self.rc_path = None;
        self.rc_explicit = false;
        self
    }

    pub fn with_history_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_path = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_paths() {
        let paths = ConfigPaths::new(Some(Path::new("/home/testuser")));

        assert_eq!(paths.rc_path, Some(PathBuf::from("/home/testuser/.dlshrc")));
        assert_eq!(
            paths.history_path,
            Some(PathBuf::from("/home/testuser/.dlsh_history"))
        );
        assert!(!paths.rc_explicit);
    }

    #[test]
    fn test_missing_home() {
        let paths = ConfigPaths::new(None);
        assert_eq!(paths, ConfigPaths::default());
    }

    #[test]
    fn test_overrides() {
        let paths = ConfigPaths::new(Some(Path::new("/home/u")))
            .with_rc_path(Some(PathBuf::from("/etc/dlshrc")))
            .with_history_path(None);

        assert_eq!(paths.rc_path, Some(PathBuf::from("/etc/dlshrc")));
        assert!(paths.rc_explicit);
        assert_eq!(paths.history_path, Some(PathBuf::from("/home/u/.dlsh_history")));

        let paths = paths.without_rc();
        assert!(paths.rc_path.is_none());
        assert!(!paths.rc_explicit);
    }
}
