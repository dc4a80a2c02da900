//! Highlight rendering tests.

use regex_lab::{FlagSet, MatchEngine, SpanKind, render, render_run};

#[test]
fn highlights_follow_engine_matches() {
    let sample = "Call 555-1234 or 555-9876.";
    let run = MatchEngine::default().run(r"\d{3}-\d{4}", FlagSet::decode("g"), sample);
    let spans = render_run(sample, &run);

    let texts: Vec<(&str, bool)> = spans.iter().map(|s| (s.text, s.is_match())).collect();
    assert_eq!(
        texts,
        vec![
            ("Call ", false),
            ("555-1234", true),
            (" or ", false),
            ("555-9876", true),
            (".", false),
        ]
    );
}

#[test]
fn whole_text_match_is_a_single_span() {
    let sample = "abc";
    let run = MatchEngine::default().run(".+", FlagSet::decode("g"), sample);
    let spans = render(sample, &run.matches);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].kind, SpanKind::Match(0));
    assert_eq!(spans[0].range, 0..3);
}

#[test]
fn invalid_run_renders_plain_text() {
    let sample = "abc";
    let run = MatchEngine::default().run("(", FlagSet::decode("g"), sample);
    let spans = render_run(sample, &run);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].kind, SpanKind::Plain);
    assert_eq!(spans[0].text, sample);
}

#[test]
fn multibyte_spans_slice_cleanly() {
    let sample = "naïve café";
    let run = MatchEngine::default().run(r"\w*é", FlagSet::decode("g"), sample);
    let spans = render_run(sample, &run);
    assert_eq!(spans.last().unwrap().text, "café");
    assert_eq!(spans.iter().map(|s| s.text).collect::<String>(), sample);
}
