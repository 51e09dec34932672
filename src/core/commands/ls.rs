use super::{Builtin, CommandError, Flow};
use crate::core::Session;
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct LsOptions {
    show_hidden: bool,
    long_format: bool,
}

impl LsOptions {
    /// Only `-`-prefixed tokens are treated as flag bundles.
    fn parse(args: &[String]) -> Self {
        let mut options = Self::default();
        for flag in args.iter().filter(|a| a.starts_with('-')) {
            options.show_hidden |= flag.contains('a');
            options.long_format |= flag.contains('l');
        }
        options
    }
}

struct Entry {
    name: String,
    is_dir: bool,
    modified: Option<DateTime<Local>>,
}

#[derive(Clone, Default)]
pub struct LsCommand;

impl LsCommand {
    pub fn new() -> Self {
        Self
    }

    fn read_entries(dir: &Path, show_hidden: bool) -> std::io::Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !show_hidden && is_hidden(&name, &entry) {
                continue;
            }

            let metadata = entry.metadata().ok();
            entries.push(Entry {
                name,
                is_dir: metadata.as_ref().is_some_and(|m| m.is_dir()),
                modified: metadata
                    .and_then(|m| m.modified().ok())
                    .map(DateTime::<Local>::from),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

impl Builtin for LsCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        let target = args
            .iter()
            .find(|a| !a.starts_with('-'))
            .map(String::as_str)
            .unwrap_or(".");
        let options = LsOptions::parse(args);

        let dir = session.resolve(target)?;
        if !dir.is_dir() {
            return Err(CommandError::Directory {
                command: "ls",
                path: target.to_string(),
                reason: "No such directory".to_string(),
            });
        }

        let entries = Self::read_entries(&dir, options.show_hidden).map_err(|e| {
            CommandError::Directory {
                command: "ls",
                path: target.to_string(),
                reason: e.to_string(),
            }
        })?;

        let out = session.out();
        if options.long_format {
            for entry in &entries {
                let kind = if entry.is_dir { "d" } else { "-" };
                let time = entry
                    .modified
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "????-??-?? ??:??".to_string());
                writeln!(out, "{}  {}  {}", kind, time, entry.name)?;
            }
        } else {
            let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
            writeln!(out, "{}", names.join("  "))?;
        }
        Ok(Flow::Continue)
    }
}

#[cfg(windows)]
fn is_hidden(name: &str, entry: &fs::DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    name.starts_with('.')
        || entry
            .metadata()
            .is_ok_and(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
}

#[cfg(not(windows))]
fn is_hidden(name: &str, _entry: &fs::DirEntry) -> bool {
    name.starts_with('.')
}
