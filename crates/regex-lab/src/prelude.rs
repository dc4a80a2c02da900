//! Convenient re-exports for common regex-lab usage.
//!
//! ```
//! use regex_lab::prelude::*;
//!
//! let mut editor = PatternEditor::new("ab");
//! editor.observe_caret(CaretEvent::Focus, CaretRange::at(1));
//! editor.insert_token(r"\d");
//! assert_eq!(editor.pattern(), r"a\db");
//! ```

// Configuration
pub use crate::config::{LabConfig, LogFormat, LoggingConfig};

// Error handling
pub use crate::error::{LabError, Result};

// Flags and matching
pub use crate::engine::{Match, MatchEngine, MatchRun, RegexPrimitive, RunState};
pub use crate::flags::{Flag, FlagSet};
pub use crate::highlight::{Span, SpanKind, render, render_run};

// Editing
pub use crate::editor::{CaretEvent, CaretRange, PALETTE, PatternEditor, Token};

// Library
pub use crate::library::{MemoryStore, PatternEntry, PatternFields, PatternId, PatternLibrary};

// Sessions
pub use crate::session::{Evaluation, TesterSession};
pub use crate::share::SharedPattern;
