use tracing_subscriber::EnvFilter;

use crate::flags::Flags;

/// Default filter when `RUST_LOG` is not set.
pub fn default_directive(flags: &Flags) -> &'static str {
    if flags.debug {
        "debug"
    } else if flags.quiet {
        "error"
    } else {
        "warn"
    }
}

/// Install the stderr fmt subscriber. `RUST_LOG` wins over the flags.
pub fn init(flags: &Flags) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(flags)));

    // Ignore a second init.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
