//! Show command - one catalog entry by id

use crate::context::AppContext;
use crate::output;
use crate::EntityKind;
use anyhow::Result;
use mallorca_catalog::{Beach, Dish, HeritageSite, LocalMarket, Locality, Restaurant, Zone};
use owo_colors::{OwoColorize, Stream};
use serde_json::Value;

pub fn run(ctx: &AppContext, kind: EntityKind, id: i64) -> Result<()> {
    let store = &ctx.store;
    let value = match kind {
        EntityKind::Beach => serde_json::to_value(store.get::<Beach>(id)?)?,
        EntityKind::Restaurant => serde_json::to_value(store.get::<Restaurant>(id)?)?,
        EntityKind::Heritage => serde_json::to_value(store.get::<HeritageSite>(id)?)?,
        EntityKind::Market => serde_json::to_value(store.get::<LocalMarket>(id)?)?,
        EntityKind::Dish => serde_json::to_value(store.get::<Dish>(id)?)?,
        EntityKind::Zone => serde_json::to_value(store.get::<Zone>(id)?)?,
        EntityKind::Locality => locality_details(ctx, id)?,
    };

    if ctx.json {
        return output::print_json(&value);
    }

    let title = value.get("name").and_then(Value::as_str).unwrap_or("?");
    output::header(title);
    if let Value::Object(fields) = &value {
        for (key, field) in fields {
            if key == "name" {
                continue;
            }
            println!(
                "  {:<22} {}",
                key.if_supports_color(Stream::Stdout, |t| t.dimmed()),
                render(field)
            );
        }
    }
    Ok(())
}

/// A locality with its zone nested under `zone`.
fn locality_details(ctx: &AppContext, id: i64) -> Result<Value> {
    let locality = ctx.store.get::<Locality>(id)?;
    let zone = ctx.store.get::<Zone>(locality.zone_id)?;

    let mut value = serde_json::to_value(locality)?;
    if let Value::Object(fields) = &mut value {
        fields.insert("zone".to_string(), serde_json::to_value(zone)?);
    }
    Ok(value)
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(", "),
        Value::Object(fields) => match (fields.get("name"), fields.get("id")) {
            (Some(Value::String(name)), Some(id)) => format!("{} (#{})", name, id),
            _ => value.to_string(),
        },
        other => other.to_string(),
    }
}
