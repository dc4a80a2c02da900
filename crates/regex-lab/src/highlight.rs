//! Projection of a match list onto sample text.
//!
//! [`render`] splits the sample into alternating plain and match spans.
//! Concatenating the spans reproduces the sample exactly. Zero-length matches
//! produce no span of their own, and a sample with nothing highlighted comes
//! back as a single plain span.

use std::ops::Range;

use crate::engine::{Match, MatchRun};

/// What a span represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Text outside any match.
    Plain,
    /// Text covered by the match at this index in the match list.
    Match(usize),
}

/// A slice of the sample text tagged for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    /// Plain or highlighted.
    pub kind: SpanKind,
    /// Byte range within the sample.
    pub range: Range<usize>,
    /// The text of the span.
    pub text: &'a str,
}

impl Span<'_> {
    /// Check if this span is highlighted.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self.kind, SpanKind::Match(_))
    }
}

/// Split `sample` into plain and match spans.
///
/// `matches` must be sorted by start offset and non-overlapping, which is
/// what [`MatchEngine`](crate::engine::MatchEngine) produces.
#[must_use]
pub fn render<'a>(sample: &'a str, matches: &[Match]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(matches.len() * 2 + 1);
    let mut cursor = 0;

    for (index, m) in matches.iter().enumerate() {
        if m.is_empty() {
            continue;
        }
        if m.start_index > cursor {
            spans.push(span(sample, SpanKind::Plain, cursor..m.start_index));
        }
        spans.push(span(sample, SpanKind::Match(index), m.start_index..m.end_index));
        cursor = m.end_index;
    }

    if cursor < sample.len() || spans.is_empty() {
        spans.push(span(sample, SpanKind::Plain, cursor..sample.len()));
    }

    spans
}

/// [`render`] over the matches of a run.
#[must_use]
pub fn render_run<'a>(sample: &'a str, run: &MatchRun) -> Vec<Span<'a>> {
    render(sample, &run.matches)
}

fn span(sample: &str, kind: SpanKind, range: Range<usize>) -> Span<'_> {
    Span {
        kind,
        text: &sample[range.clone()],
        range,
    }
}
