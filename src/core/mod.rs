pub mod aliases;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod env;
pub mod eval;
pub mod session;
pub mod tokenizer;

#[cfg(test)]
pub(crate) mod testing;

pub use aliases::AliasTable;
pub use commands::{Builtins, CommandError, Flow};
pub use dispatch::{DispatchReport, Dispatcher, MAX_ALIAS_DEPTH};
pub use session::Session;
