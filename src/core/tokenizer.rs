/// Separator between independent sub-commands on one line.
pub const COMMAND_SEPARATOR: char = ';';

/// One sub-command split into its verb and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: String,
    pub args: Vec<String>,
}

impl Command {
    /// Parse a single sub-command. Returns `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let mut tokens = input.split_whitespace().map(String::from);
        let verb = tokens.next()?;

        Some(Self {
            verb,
            args: tokens.collect(),
        })
    }

    /// Text of the alias replacement followed by this command's arguments.
    pub fn substitute_verb(&self, replacement: &str) -> String {
        format!("{} {}", replacement, self.args.join(" "))
    }
}

/// Split a raw line into sub-command strings, dropping empty segments.
pub fn split_commands(line: &str) -> impl Iterator<Item = &str> {
    line.split(COMMAND_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}
