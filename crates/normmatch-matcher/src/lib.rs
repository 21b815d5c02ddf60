//! # normmatch-matcher
//!
//! Character normalization matcher: reads per-class cluster prototypes from
//! a text table and rates how well a normalization feature fits a class.
//!
//! ```text
//! rating = 1 - 1 / (1 + (d / midpoint)^curl)
//! ```
//!
//! where `d` is the weighted squared distance to the nearest prototype of
//! the class (or a fixed noise penalty for the noise pseudo-class).

pub mod evidence;
pub mod format;
pub mod loader;
pub mod matcher;
pub mod scorer;
pub mod table;
pub mod tunables;

pub use evidence::{evidence, rating};
pub use loader::{load_table, load_table_from_reader, parse_table, BlockScanPolicy};
pub use matcher::NormMatcher;
pub use scorer::{compute_match, explain_match, MatchBreakdown, ProtoMatch};
pub use table::{LoadReport, PrototypeTable};
pub use tunables::Tunables;
