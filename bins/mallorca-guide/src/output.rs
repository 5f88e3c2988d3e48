//! Terminal output helpers.

use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

/// Pretty-prints a value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn header(title: &str) {
    println!();
    println!("  {}", title.if_supports_color(Stream::Stdout, |t| t.bold()));
    println!("  {}", "─".repeat(60).if_supports_color(Stream::Stdout, |t| t.dimmed()));
}

/// Formats a distance with two decimals, colored by how far it is.
pub fn distance(km: f64) -> String {
    let text = format!("{:>7.2} km", km);
    if km <= 5.0 {
        text.if_supports_color(Stream::Stdout, |t| t.green()).to_string()
    } else if km <= 25.0 {
        text.if_supports_color(Stream::Stdout, |t| t.yellow()).to_string()
    } else {
        text.if_supports_color(Stream::Stdout, |t| t.red()).to_string()
    }
}

pub fn dimmed(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.dimmed()).to_string()
}

/// Prints the process metrics to stderr.
pub fn print_metrics() {
    let snapshot = mallorca_telemetry::metrics().snapshot();
    eprintln!();
    eprintln!(
        "{} session {}",
        "Metrics".if_supports_color(Stream::Stderr, |t| t.cyan()),
        snapshot.session_id
    );
    for (name, value) in &snapshot.counters {
        eprintln!("  {:<28} {}", name, value);
    }
    for (name, stats) in &snapshot.histograms {
        eprintln!(
            "  {:<28} n={} mean={:.3}ms p95={:.3}ms",
            name, stats.count, stats.mean, stats.p95
        );
    }
}
