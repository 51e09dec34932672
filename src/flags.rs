use std::path::PathBuf;

use clap::Parser;

/// dlsh -- a small interactive command shell with recursive aliases.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dlsh", version, about)]
pub struct Flags {
    /// Startup file to run instead of ~/.dlshrc
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip the startup file entirely
    #[arg(long, conflicts_with = "config")]
    pub no_rc: bool,

    /// History file to use instead of ~/.dlsh_history
    #[arg(long, value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Run a single line and exit
    #[arg(short = 'C', long = "command", value_name = "LINE")]
    pub command: Option<String>,

    /// Suppress error reports and the banner
    #[arg(short, long, conflicts_with = "debug")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Flags, clap::Error> {
        Flags::try_parse_from(std::iter::once("dlsh").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let flags = parse(&[]).unwrap();
        assert!(flags.command.is_none());
        assert!(!flags.quiet && !flags.debug && !flags.no_rc);
        assert!(flags.config.is_none());
    }

    #[test]
    fn test_short_and_long_forms() {
        let flags = parse(&["-c", "/tmp/rc", "-C", "exit 3", "-q"]).unwrap();
        assert_eq!(flags.config, Some(PathBuf::from("/tmp/rc")));
        assert_eq!(flags.command.as_deref(), Some("exit 3"));
        assert!(flags.quiet);
        assert!(flags.command.is_some());

        let flags = parse(&["--history", "/tmp/h", "--debug", "--no-rc"]).unwrap();
        assert_eq!(flags.history, Some(PathBuf::from("/tmp/h")));
        assert!(flags.debug && flags.no_rc);
    }

    #[test]
    fn test_conflicts() {
        assert!(parse(&["--quiet", "--debug"]).is_err());
        assert!(parse(&["--no-rc", "--config", "x"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }
}
