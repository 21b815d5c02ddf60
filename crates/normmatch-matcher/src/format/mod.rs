//! Text serialization of cluster prototype tables.
//!
//! The reader side is split into a whitespace token [`scanner`] and the
//! record grammar in [`records`]; [`writer`] is its exact inverse.

pub mod records;
pub mod scanner;
pub mod writer;

pub use scanner::{Scanner, Token};
pub use writer::{table_to_string, write_table};
