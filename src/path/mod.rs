mod expander;

pub use expander::{normalize_separators, PathExpander};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("home directory not found")]
    HomeDirNotFound,
}
