use std::borrow::Cow;

use super::{command::CommandCompleter, path::PathCompleter};
use crate::core::{tokenizer::COMMAND_SEPARATOR, Builtins, Session};
use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// rustyline helper: completion plus verb highlighting.
#[derive(Clone, Default)]
pub struct ShellHelper {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellHelper {
    pub fn new(builtins: &Builtins) -> Self {
        let mut command_completer = CommandCompleter::new();
        command_completer.set_builtins(builtins.names());

        Self {
            command_completer,
            path_completer: PathCompleter::default(),
            highlighter: SyntaxHighlighter::new(),
        }
    }

    /// Pick up alias, directory and `PATH` changes made by the last line.
    pub fn sync(&mut self, session: &Session) {
        self.command_completer.set_aliases(session.aliases.names());
        self.command_completer
            .refresh_programs(session.env.get("PATH").as_deref());
        self.path_completer.set_cwd(session.cwd().to_path_buf());
        self.path_completer.set_expander(session.paths().clone());
    }

    fn complete_at(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let before_cursor = &line[..pos];
        let segment_start = before_cursor
            .rfind(COMMAND_SEPARATOR)
            .map(|i| i + 1)
            .unwrap_or(0);
        let segment = &before_cursor[segment_start..];

        let word_start = segment
            .char_indices()
            .rfind(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let word = &segment[word_start..];
        let start = segment_start + word_start;

        if segment[..word_start].trim().is_empty() {
            (start, self.command_completer.complete_command(word))
        } else {
            (start, self.path_completer.complete_path(word))
        }
    }
}

impl Helper for ShellHelper {}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Validator for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.complete_at(line, pos))
    }
}
