//! Basic regex-lab usage example.
//!
//! This example walks through a short editing session: building a pattern
//! from palette tokens, waiting for the debounced evaluation, and printing
//! the highlighted sample.
//!
//! Run with: `cargo run --example basic`

use regex_lab::logging;
use regex_lab::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = LabConfig::resolve(None)?;
    logging::init(&config.logging)?;

    println!("regex-lab Basic Example");
    println!("=======================\n");

    let mut session = TesterSession::new(&config);
    let mut results = session.subscribe();

    // Example 1: Build a pattern from tokens at the caret
    session.set_sample("Order #1042 shipped 2024-03-18, order #77 pending.");
    session.set_pattern("#");
    session.observe_caret(CaretEvent::PointerPress, CaretRange::at(1));
    session.insert_token(r"\d");
    session.insert_token("+");
    println!("1. Pattern: /{}/{}", session.pattern(), session.flags());

    let evaluation = results
        .wait_for(|e| e.state.is_settled())
        .await
        .map_err(|e| LabError::config(e.to_string()))?
        .clone();
    print_evaluation(&evaluation);

    // Example 2: Load a library pattern
    let library = PatternLibrary::from_config(&config.library);
    if let Some(date) = library.get(&PatternId::builtin("date-iso")) {
        println!("\n2. Loading '{}' from the library", date.name);
        session.load_entry(date);
        print_evaluation(&session.evaluate_now());
    }

    // Example 3: Share the current pattern
    let link = session.share().to_url("https://regex-lab.example/")?;
    println!("\n3. Share link: {link}");

    Ok(())
}

fn print_evaluation(evaluation: &Evaluation) {
    if let Some(message) = evaluation.state.error() {
        println!("   Invalid pattern: {message}");
        return;
    }
    let Some(run) = evaluation.state.run() else {
        return;
    };
    println!("   {} match(es) in {:.3} ms", run.len(), run.elapsed_ms());
    let highlighted: String = render_run(&evaluation.input.sample, run)
        .iter()
        .map(|span| match span.kind {
            SpanKind::Plain => span.text.to_string(),
            SpanKind::Match(_) => format!("[{}]", span.text),
        })
        .collect();
    println!("   {highlighted}");
}
