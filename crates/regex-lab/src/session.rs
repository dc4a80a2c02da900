//! Interactive testing session.
//!
//! A [`TesterSession`] ties the pattern editor, the flag set and the sample
//! text to the match engine. Every change schedules an evaluation through a
//! [`Debouncer`]; only the input that stays quiet for the debounce window is
//! evaluated. Its progress ([`RunState::Validating`], then
//! [`RunState::Executing`]) and its terminal state are published as
//! [`Evaluation`]s on a watch channel. A superseded evaluation stops
//! publishing as soon as newer input arrives.
//!
//! Sessions spawn Tokio tasks and must be driven from within a runtime.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::config::LabConfig;
use crate::editor::{CaretEvent, CaretRange, PatternEditor};
use crate::engine::{MatchEngine, RunState};
use crate::error::Result;
use crate::flags::{Flag, FlagSet};
use crate::highlight::{Span, render_run};
use crate::library::PatternEntry;
use crate::schedule::Debouncer;
use crate::share::SharedPattern;

/// The input of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunInput {
    /// Pattern source.
    pub pattern: String,
    /// Flags.
    pub flags: FlagSet,
    /// Sample text.
    pub sample: String,
}

/// A published evaluation result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Evaluation {
    /// Number of evaluations started, including this one. Progress and
    /// terminal states of the same evaluation share a sequence number.
    pub sequence: u64,
    /// What was evaluated.
    pub input: RunInput,
    /// The outcome.
    pub state: RunState,
}

impl Evaluation {
    /// Highlight spans for this evaluation's sample, if it finished with a run.
    #[must_use]
    pub fn spans(&self) -> Option<Vec<Span<'_>>> {
        self.state
            .run()
            .map(|run| render_run(&self.input.sample, run))
    }
}

/// Editor, flags and sample text wired to debounced match evaluation.
#[derive(Debug)]
pub struct TesterSession {
    editor: PatternEditor,
    flags: FlagSet,
    sample: String,
    engine: MatchEngine,
    debouncer: Debouncer,
    results: Arc<watch::Sender<Arc<Evaluation>>>,
}

impl TesterSession {
    /// Create a session over the native engine.
    #[must_use]
    pub fn new(config: &LabConfig) -> Self {
        Self::with_engine(MatchEngine::native(&config.engine), config)
    }

    /// Create a session over a given engine.
    #[must_use]
    pub fn with_engine(engine: MatchEngine, config: &LabConfig) -> Self {
        let flags = config.session.flags();
        let initial = Evaluation {
            input: RunInput {
                flags,
                ..RunInput::default()
            },
            ..Evaluation::default()
        };
        let (results, _) = watch::channel(Arc::new(initial));

        Self {
            editor: PatternEditor::with_config(String::new(), &config.editor),
            flags,
            sample: String::new(),
            engine,
            debouncer: Debouncer::new(config.session.debounce()),
            results: Arc::new(results),
        }
    }

    /// The current pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.editor.pattern()
    }

    /// The current flags.
    #[must_use]
    pub const fn flags(&self) -> FlagSet {
        self.flags
    }

    /// The current sample text.
    #[must_use]
    pub fn sample(&self) -> &str {
        &self.sample
    }

    /// The pattern editor.
    #[must_use]
    pub const fn editor(&self) -> &PatternEditor {
        &self.editor
    }

    /// The current input triple.
    #[must_use]
    pub fn input(&self) -> RunInput {
        RunInput {
            pattern: self.pattern().to_string(),
            flags: self.flags,
            sample: self.sample.clone(),
        }
    }

    /// Check the current pattern compiles, without waiting for a run.
    ///
    /// # Errors
    ///
    /// Returns the compile error for the current pattern and flags.
    pub fn validate(&self) -> Result<()> {
        self.engine.validate(self.pattern(), self.flags)
    }

    /// Subscribe to published evaluations.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Evaluation>> {
        self.results.subscribe()
    }

    /// The most recently published evaluation.
    #[must_use]
    pub fn latest(&self) -> Arc<Evaluation> {
        Arc::clone(&self.results.borrow())
    }

    /// Check if an evaluation is scheduled but not yet published.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Record a typed pattern value.
    pub fn set_pattern(&mut self, value: impl Into<String>) {
        if self.editor.set_pattern(value) {
            self.schedule();
        }
    }

    /// Apply a raw edit from the input surface.
    pub fn edit(&mut self, value: impl Into<String>, caret: CaretRange) {
        if self.editor.edit(value, caret) {
            self.schedule();
        }
    }

    /// Refresh the remembered caret. Does not trigger evaluation.
    pub fn observe_caret(&mut self, event: CaretEvent, range: CaretRange) {
        self.editor.observe_caret(event, range);
    }

    /// Insert a token at the remembered caret.
    pub fn insert_token(&mut self, token: &str) {
        self.editor.insert_token(token);
        if !token.is_empty() {
            self.schedule();
        }
    }

    /// Undo the last pattern change.
    pub fn undo(&mut self) -> bool {
        let moved = self.editor.undo().is_some();
        if moved {
            self.schedule();
        }
        moved
    }

    /// Redo the next pattern change.
    pub fn redo(&mut self) -> bool {
        let moved = self.editor.redo().is_some();
        if moved {
            self.schedule();
        }
        moved
    }

    /// Replace the flag set.
    pub fn set_flags(&mut self, flags: FlagSet) {
        if flags != self.flags {
            self.flags = flags;
            self.schedule();
        }
    }

    /// Flip one flag.
    pub fn toggle_flag(&mut self, flag: Flag) {
        self.flags.toggle(flag);
        self.schedule();
    }

    /// Replace the sample text.
    pub fn set_sample(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.sample {
            self.sample = text;
            self.schedule();
        }
    }

    /// Load a library entry's pattern as a full replacement.
    pub fn load_entry(&mut self, entry: &PatternEntry) {
        if self.editor.replace_pattern(entry.pattern.clone()) {
            self.schedule();
        }
    }

    /// Load a pattern and flags decoded from a shared link.
    pub fn load_shared(&mut self, shared: SharedPattern) {
        let changed = self.editor.replace_pattern(shared.pattern);
        if changed || shared.flags != self.flags {
            self.flags = shared.flags;
            self.schedule();
        }
    }

    /// The current pattern and flags, ready for a shared link.
    #[must_use]
    pub fn share(&self) -> SharedPattern {
        SharedPattern::new(self.pattern(), self.flags)
    }

    /// Evaluate the current input immediately, superseding any pending run.
    pub fn evaluate_now(&mut self) -> Arc<Evaluation> {
        self.debouncer.cancel();
        let input = self.input();
        let state = self
            .engine
            .evaluate_observed(&input.pattern, input.flags, &input.sample, |progress| {
                publish(&self.results, input.clone(), progress.clone());
            });
        publish(&self.results, input, state);
        self.latest()
    }

    fn schedule(&mut self) {
        let input = self.input();
        debug!(
            pattern = %input.pattern,
            flags = %input.flags,
            sample_len = input.sample.len(),
            "Scheduling evaluation"
        );
        let engine = self.engine.clone();
        let results = Arc::clone(&self.results);

        let progress = Arc::clone(&results);

        self.debouncer.schedule(
            move |ticket| {
                let state = engine.evaluate_observed(
                    &input.pattern,
                    input.flags,
                    &input.sample,
                    |state| {
                        ticket.run_if_current(|| {
                            publish(&progress, input.clone(), state.clone());
                        });
                    },
                );
                (input, state)
            },
            move |(input, state)| publish(&results, input, state),
        );
    }
}

/// Replace the published evaluation. Entering [`RunState::Validating`]
/// starts a new evaluation and bumps the sequence number.
fn publish(results: &watch::Sender<Arc<Evaluation>>, input: RunInput, state: RunState) {
    results.send_modify(|current| {
        let sequence = if matches!(state, RunState::Validating) {
            current.sequence + 1
        } else {
            current.sequence
        };
        *current = Arc::new(Evaluation {
            sequence,
            input,
            state,
        });
    });
}
