//! Episode data model and library loading

mod library;
mod models;

pub use library::{Library, LibraryError};
pub use models::{Episode, LibraryFile};
