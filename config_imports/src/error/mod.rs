//! Error types produced while resolving and merging imports.

mod constructors;
mod types;

pub use types::{ImportError, ImportResult};

pub(crate) use constructors::{document_error, read_error};
