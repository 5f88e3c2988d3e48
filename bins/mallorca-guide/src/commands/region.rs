//! In-region command - bounding box membership

use crate::output;
use anyhow::Result;
use mallorca_geo::{is_point_in_region, MALLORCA_BOUNDS};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RegionOutput {
    latitude: f64,
    longitude: f64,
    in_region: bool,
}

pub fn run(lat: f64, lon: f64, json: bool) -> Result<()> {
    let in_region = is_point_in_region(lat, lon);

    if json {
        return output::print_json(&RegionOutput {
            latitude: lat,
            longitude: lon,
            in_region,
        });
    }

    if in_region {
        println!(
            "{} ({}, {}) is inside Mallorca",
            "✓".if_supports_color(Stream::Stdout, |t| t.green()),
            lat,
            lon
        );
    } else {
        println!(
            "{} ({}, {}) is outside Mallorca",
            "✗".if_supports_color(Stream::Stdout, |t| t.red()),
            lat,
            lon
        );
        println!(
            "{}",
            output::dimmed(&format!(
                "  expected latitude {}..{}, longitude {}..{}",
                MALLORCA_BOUNDS.min_lat,
                MALLORCA_BOUNDS.max_lat,
                MALLORCA_BOUNDS.min_lon,
                MALLORCA_BOUNDS.max_lon
            ))
        );
    }
    Ok(())
}
