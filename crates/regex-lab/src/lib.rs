//! regex-lab: interactive regular expression testing
//!
//! This crate provides the engine behind a live regex tester: flag parsing,
//! match execution with safe global iteration, highlight rendering, a
//! cursor-aware pattern editor with undo history, and a persistent pattern
//! library.
//!
//! # Features
//!
//! - **Flag codec** between flag strings like `"gi"` and a typed [`FlagSet`]
//! - **Match engine** over an injectable [`RegexPrimitive`], backed by the
//!   `regex` crate with a compiled-regex cache
//! - **Highlight rendering** of a match list onto the sample text
//! - **Pattern editor** that splices tokens at the remembered caret
//! - **Pattern library** of built-in and user patterns with JSON import/export
//! - **Debounced sessions** that evaluate only settled input
//!
//! # Example
//!
//! ```
//! use regex_lab::prelude::*;
//!
//! let engine = MatchEngine::default();
//! let run = engine.run(r"\d+", FlagSet::decode("g"), "a12b34");
//! assert_eq!(run.len(), 2);
//!
//! let spans = render_run("a12b34", &run);
//! assert_eq!(spans.iter().filter(|s| s.is_match()).count(), 2);
//! ```

pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod flags;
pub mod highlight;
pub mod library;
pub mod logging;
pub mod prelude;
pub mod schedule;
pub mod session;
pub mod share;

pub use config::{
    EditorConfig, EngineConfig, EnvConfig, LabConfig, LibraryConfig, LogFormat, LoggingConfig,
    SessionConfig,
};
pub use editor::{CaretEvent, CaretRange, EditHistory, PALETTE, PatternEditor, Token, TokenGroup};
pub use engine::{
    CacheStats, CompiledMatcher, Match, MatchEngine, MatchRun, NativeRegex, RawMatch, RegexCache,
    RegexPrimitive, RunState,
};
pub use error::{LabError, Result};
pub use flags::{Flag, FlagSet};
pub use highlight::{Span, SpanKind, render, render_run};
pub use library::{
    CategoryGroup, FileStore, KeyValueStore, MemoryStore, PatternEntry, PatternFields, PatternId,
    PatternLibrary,
};
pub use schedule::{Debouncer, Ticket};
pub use session::{Evaluation, RunInput, TesterSession};
pub use share::SharedPattern;
