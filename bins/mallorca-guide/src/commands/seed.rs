//! Seed command - write the built-in dataset to a snapshot

use crate::output;
use anyhow::Result;
use mallorca_catalog::seed;
use owo_colors::{OwoColorize, Stream};
use std::path::Path;

pub fn run(output_path: &Path, json: bool) -> Result<()> {
    let store = seed::mallorca()?;
    store.save(output_path)?;
    let stats = store.stats();

    if json {
        return output::print_json(&stats);
    }

    println!(
        "{} Wrote {}",
        "✓".if_supports_color(Stream::Stdout, |t| t.green()),
        output_path.display()
    );
    println!(
        "  {} zones, {} localities, {} beaches, {} restaurants, {} heritage sites, {} markets, \
         {} dishes",
        stats.zones,
        stats.localities,
        stats.beaches,
        stats.restaurants,
        stats.heritage_sites,
        stats.markets,
        stats.dishes
    );
    Ok(())
}
