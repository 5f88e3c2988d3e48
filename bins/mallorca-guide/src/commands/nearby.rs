//! Nearby command - points of interest around a location

use crate::context::AppContext;
use crate::output;
use anyhow::Result;
use mallorca_catalog::{PlacesNearby, PoiKind};
use mallorca_geo::Coordinate;
use mallorca_telemetry::{metrics, timed_span};
use owo_colors::{OwoColorize, Stream};

pub fn run(
    ctx: &AppContext,
    lat: f64,
    lon: f64,
    radius: Option<f64>,
    limit: Option<usize>,
    kind: Option<PoiKind>,
) -> Result<()> {
    let reference = Coordinate::new(lat, lon);
    let kinds: Vec<PoiKind> = kind.map_or_else(|| PoiKind::ALL.to_vec(), |k| vec![k]);

    metrics().increment("queries.nearby");
    let nearby = query(ctx, reference, &kinds, radius, limit)?;

    if ctx.json {
        return output::print_json(&nearby);
    }

    let PlacesNearby {
        reference,
        radius_km,
        total_within_radius,
        results,
    } = &nearby;

    output::header(&format!("Near {} within {} km", reference, radius_km));
    if results.is_empty() {
        println!("  {}", output::dimmed("Nothing found. Try a larger --radius."));
        return Ok(());
    }

    for (rank, result) in results.iter().enumerate() {
        let place = &result.candidate;
        println!(
            "  {:>2}. {}  {:<10} {}",
            rank + 1,
            output::distance(result.distance_km),
            place.kind.to_string().if_supports_color(Stream::Stdout, |t| t.cyan()),
            place.name
        );
    }
    println!();
    println!(
        "  {}",
        output::dimmed(&format!(
            "Showing {} of {} places within {} km",
            results.len(),
            total_within_radius,
            radius_km
        ))
    );
    Ok(())
}

fn query(
    ctx: &AppContext,
    reference: Coordinate,
    kinds: &[PoiKind],
    radius: Option<f64>,
    limit: Option<usize>,
) -> Result<PlacesNearby> {
    timed_span!("query.nearby", kinds = kinds.len());
    Ok(ctx.orchestrator().places_nearby(reference, kinds, radius, limit)?)
}
