//! Route inspection commands.

use anyhow::{Context as _, Result};
use waypoint_core::site_routes;

use super::{RoutesArgs, RoutesCommand};
use crate::context::Context;
use crate::output::kind_badge;

/// Run the routes command.
pub async fn run(args: RoutesArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(RoutesCommand::List) | None => list_routes(ctx),
        Some(RoutesCommand::Match { path }) => match_route(&path, ctx),
    }
}

fn list_routes(ctx: &Context) -> Result<()> {
    let registry = site_routes()?;

    if ctx.output.is_json() {
        ctx.output.json(&registry.routes());
        return Ok(());
    }

    ctx.output.header("Routes");
    let widths = [24, 8, 34, 0];
    ctx.output.table_row(&["PATTERN", "KIND", "MODULE", "EXPORTS"], &widths);

    for entry in registry.routes() {
        let pattern = entry.pattern.to_string();
        let kind = serde_json::to_value(entry.kind)?
            .as_str()
            .unwrap_or_default()
            .to_string();
        let depth = "  ".repeat(entry.parents.len());
        let module = format!("{}{}", depth, entry.id);
        let exports = entry.meta.exports().join(",");
        ctx.output
            .table_row(&[&pattern, &kind_badge(&kind), &module, &exports], &widths);
    }

    Ok(())
}

fn match_route(path: &str, ctx: &Context) -> Result<()> {
    let registry = site_routes()?;
    let matched = registry
        .try_resolve(path)
        .with_context(|| format!("No route for {}", path))?;

    if ctx.output.is_json() {
        ctx.output.json(&matched);
        return Ok(());
    }

    ctx.output.header(&format!("Match for {}", path));
    ctx.output.kv("route", &matched.id);
    ctx.output.kv("pattern", &matched.pattern);
    for (name, value) in matched.params.iter() {
        ctx.output.kv(&format!("param {}", name), value);
    }

    ctx.output.info("Matches:");
    for m in &matched.matches {
        let handle = m
            .handle
            .as_ref()
            .map(|h| format!(" handle={}", h))
            .unwrap_or_default();
        ctx.output.list_item(&format!("{} ({}){}", m.id, m.pattern, handle));
    }

    Ok(())
}
