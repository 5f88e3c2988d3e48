//! List command - filtered catalog listings with optional distances

use crate::context::AppContext;
use crate::output;
use crate::EntityKind;
use anyhow::Result;
use clap::Args;
use mallorca_catalog::{
    Beach, BeachFilter, BeachType, CandidateSource, CatalogStore, Dish, DishFilter,
    HeritageFilter, HeritageSite, ListOptions, LocalMarket, Locality, LocalityFilter,
    MarketFilter, Page, PointOfInterest, PriceRange, Restaurant, RestaurantFilter, Zone,
    ZoneFilter,
};
use mallorca_core::Error;
use mallorca_geo::Coordinate;
use mallorca_telemetry::{metrics, timed_span};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// What to list
    pub kind: EntityKind,

    /// Zone id (beaches, localities)
    #[arg(long)]
    pub zone: Option<i64>,

    /// Locality id (beaches)
    #[arg(long)]
    pub locality: Option<i64>,

    /// Beach type: sand, cove, rock, pebble
    #[arg(long = "type")]
    pub beach_type: Option<BeachType>,

    /// Featured beaches only; `--featured false` lists the others
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub featured: Option<bool>,

    /// Name contains (beaches)
    #[arg(long)]
    pub name: Option<String>,

    /// Location contains (restaurants, markets)
    #[arg(long)]
    pub location: Option<String>,

    /// Cuisine type (restaurants)
    #[arg(long)]
    pub cuisine: Option<String>,

    /// Price band, € to €€€€ or 1 to 4 (restaurants)
    #[arg(long)]
    pub price: Option<PriceRange>,

    /// Historical period (heritage)
    #[arg(long)]
    pub period: Option<String>,

    /// Dish category
    #[arg(long)]
    pub category: Option<String>,

    /// Include soft-deleted entries
    #[arg(long)]
    pub include_inactive: bool,

    /// Reference latitude; enables distances
    #[arg(long, requires = "lon")]
    pub lat: Option<f64>,

    /// Reference longitude
    #[arg(long, requires = "lat")]
    pub lon: Option<f64>,

    /// Radius in km around the reference
    #[arg(long)]
    pub radius: Option<f64>,

    /// Sort by distance to the reference
    #[arg(long)]
    pub order_by_distance: bool,

    #[arg(long, default_value_t = 0)]
    pub skip: usize,

    /// Page size (config default when omitted)
    #[arg(long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    fn reference(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }

    fn options(&self, ctx: &AppContext) -> ListOptions {
        let requested = self.limit.unwrap_or(ctx.listing.default_limit);
        let limit = if requested > ctx.listing.max_limit {
            warn!(requested, max = ctx.listing.max_limit, "Limit capped");
            ctx.listing.max_limit
        } else {
            requested
        };

        ListOptions {
            reference: self.reference(),
            radius_km: self.radius,
            skip: self.skip,
            limit,
            order_by_distance: self.order_by_distance,
        }
    }
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    metrics().increment("queries.list");
    timed_span!("query.list", kind = ?args.kind);

    let options = args.options(ctx);
    let include_inactive = args.include_inactive;

    match args.kind {
        EntityKind::Beach => {
            let filter = BeachFilter {
                zone_id: args.zone,
                locality_id: args.locality,
                beach_type: args.beach_type,
                featured: args.featured,
                name: args.name.clone(),
                include_inactive,
            };
            list_places::<Beach>(ctx, &filter, &options)
        }
        EntityKind::Restaurant => {
            let filter = RestaurantFilter {
                location: args.location.clone(),
                cuisine_type: args.cuisine.clone(),
                price: args.price,
                include_inactive,
            };
            list_places::<Restaurant>(ctx, &filter, &options)
        }
        EntityKind::Heritage => {
            let filter = HeritageFilter {
                period: args.period.clone(),
                include_inactive,
            };
            list_places::<HeritageSite>(ctx, &filter, &options)
        }
        EntityKind::Market => {
            let filter = MarketFilter {
                location: args.location.clone(),
                include_inactive,
            };
            list_places::<LocalMarket>(ctx, &filter, &options)
        }
        EntityKind::Dish => {
            let filter = DishFilter {
                category: args.category.clone(),
                include_inactive,
            };
            list_places::<Dish>(ctx, &filter, &options)
        }
        EntityKind::Zone | EntityKind::Locality if options.reference.is_some() => {
            Err(Error::invalid_input(
                "--lat/--lon apply to beaches, restaurants, heritage sites, markets and dishes",
            )
            .into())
        }
        EntityKind::Zone => {
            let zones: Vec<Zone> = ctx
                .store
                .list(&ZoneFilter { include_inactive }, Page::new(options.skip, options.limit));
            print_rows(ctx, "Zones", &zones, |z| (z.id, z.name.as_str(), z.is_active))
        }
        EntityKind::Locality => {
            let filter = LocalityFilter {
                zone_id: args.zone,
                include_inactive,
            };
            let localities: Vec<Locality> =
                ctx.store.list(&filter, Page::new(options.skip, options.limit));
            print_rows(ctx, "Localities", &localities, |l| (l.id, l.name.as_str(), l.is_active))
        }
    }
}

fn list_places<T>(ctx: &AppContext, filter: &T::Filter, options: &ListOptions) -> Result<()>
where
    T: PointOfInterest + Serialize,
    CatalogStore: CandidateSource<T>,
{
    let listings = ctx.orchestrator().list_with_optional_distance::<T>(filter, options)?;

    if ctx.json {
        return output::print_json(&listings);
    }

    output::header(&format!("{} ({})", T::KIND, listings.len()));
    for listing in &listings {
        let item = &listing.item;
        let distance = listing.distance_km.map(output::distance).unwrap_or_default();
        println!(
            "  {:>4}  {}  {}{}",
            item.id().if_supports_color(Stream::Stdout, |t| t.dimmed()),
            distance,
            item.name(),
            inactive_marker(item.is_active())
        );
    }
    Ok(())
}

fn print_rows<T: Serialize>(
    ctx: &AppContext,
    title: &str,
    rows: &[T],
    fields: impl Fn(&T) -> (i64, &str, bool),
) -> Result<()> {
    if ctx.json {
        return output::print_json(rows);
    }

    output::header(&format!("{} ({})", title, rows.len()));
    for row in rows {
        let (id, name, active) = fields(row);
        println!(
            "  {:>4}  {}{}",
            id.if_supports_color(Stream::Stdout, |t| t.dimmed()),
            name,
            inactive_marker(active)
        );
    }
    Ok(())
}

fn inactive_marker(active: bool) -> String {
    if active {
        String::new()
    } else {
        format!(" {}", output::dimmed("(inactive)"))
    }
}
