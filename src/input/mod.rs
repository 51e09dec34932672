mod completer;

pub use completer::{CommandCompleter, PathCompleter, ShellHelper};
