//! Distance command - great-circle distance between two points

use crate::output;
use anyhow::Result;
use mallorca_core::Error;
use mallorca_geo::{distance_km, is_within_region, Coordinate};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct DistanceOutput {
    from: Coordinate,
    to: Coordinate,
    distance_km: f64,
}

pub fn run(lat1: f64, lon1: f64, lat2: f64, lon2: f64, json: bool) -> Result<()> {
    let from = Coordinate::try_new(lat1, lon1).map_err(Error::from)?;
    let to = Coordinate::try_new(lat2, lon2).map_err(Error::from)?;
    let km = distance_km(&from, &to);

    if json {
        return output::print_json(&DistanceOutput {
            from,
            to,
            distance_km: km,
        });
    }

    println!(
        "{} → {}: {}",
        from,
        to,
        format!("{:.2} km", km).if_supports_color(Stream::Stdout, |t| t.bold())
    );
    if !is_within_region(&from) || !is_within_region(&to) {
        println!("{}", output::dimmed("note: at least one point lies outside Mallorca"));
    }
    Ok(())
}
