//! Echo Demo
//!
//! Runs every verb against httpbin and prints what comes back on the
//! caller's execution context.

// Example-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use courier::prelude::*;

// ============================================================================
// Listener
// ============================================================================

/// Prints each outcome and counts them.
#[derive(Debug)]
struct Printer {
    seen: Arc<AtomicUsize>,
}

impl Listener for Printer {
    fn on_finish(&self, success: Success) {
        self.seen.fetch_add(1, Ordering::SeqCst);
        println!(
            "{} -> {} {}",
            success.verb(),
            success.status(),
            success.reason()
        );
        if let Some(body) = success.body() {
            for line in body.lines().take(5) {
                println!("    {line}");
            }
        }
    }

    fn on_error(&self, failure: Failure) {
        self.seen.fetch_add(1, Ordering::SeqCst);
        eprintln!("{} failed: {}", failure.verb(), failure.error());
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let base = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://httpbin.org/anything".to_string());

    let mut context = ExecutionContext::new();
    let mut client = RestClient::builder(base, context.handle())
        .max_workers(2)
        .with_logging()
        .build();
    client
        .add_param("lang", "rust")
        .add_param("query", "async callbacks")
        .add_header("Accept", "application/json");

    let seen = Arc::new(AtomicUsize::new(0));
    client.set_listener(Printer {
        seen: Arc::clone(&seen),
    });

    println!("=== Listener ===");
    for verb in Verb::ALL {
        client.execute(verb)?;
    }
    while seen.load(Ordering::SeqCst) < Verb::ALL.len() {
        context.dispatch_next().await;
    }

    println!("\n=== Per-call callback ===");
    client.execute_with(Verb::Get, |outcome| match outcome.into_result() {
        Ok(success) => println!("GET callback -> {}", success.status()),
        Err(failure) => eprintln!("GET callback failed: {}", failure.error()),
    })?;
    context.dispatch_next().await;

    Ok(())
}
