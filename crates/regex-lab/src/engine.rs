//! Match engine module.
//!
//! This module provides the pattern validation and execution pipeline,
//! the matching primitive it drives, and the compiled-regex cache that
//! backs the native primitive.

mod cache;
mod primitive;
mod run;

pub use cache::{CacheStats, DEFAULT_CACHE_SIZE, RegexCache, cache_key};
pub use primitive::{CompiledMatcher, NativeRegex, RawMatch, RegexPrimitive};
pub use run::{Match, MatchEngine, MatchRun, RunState};
