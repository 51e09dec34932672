use clap::Parser;
use dlsh::flags::Flags;
use dlsh::logging;
use dlsh::shell::Shell;

fn main() -> Result<(), dlsh::error::ShellError> {
    let flags = Flags::parse();
    logging::init(&flags);

    let command = flags.command.clone();
    let mut shell = Shell::new(flags)?;

    let code = match command {
        Some(line) => shell.run_command(&line),
        None => shell.run()?,
    };
    std::process::exit(code)
}
