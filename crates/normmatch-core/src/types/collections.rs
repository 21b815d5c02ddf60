//! Re-exports of performance-oriented collection types.

pub use rustc_hash::FxHashMap;
pub use smallvec::SmallVec;

/// SmallVec optimized for per-class prototype lists (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
