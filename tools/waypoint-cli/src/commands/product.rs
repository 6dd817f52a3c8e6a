//! Run the product page loaders.

use anyhow::Result;
use waypoint_data::loaders::{product_client_loader, product_loader, Product};
use waypoint_data::LoaderError;

use super::ProductArgs;
use crate::context::Context;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let loaders = ctx.loaders()?;
    let pid = Some(args.pid.as_str());

    let spinner = ctx.output.spinner(&format!("Loading product {}", args.pid));
    let result = if args.client {
        product_client_loader(&loaders, pid, product_loader(&loaders, pid)).await
    } else {
        product_loader(&loaders, pid).await
    };
    spinner.finish_and_clear();

    let product = result.map_err(|e| describe(&e))?;
    show(&product, ctx);
    Ok(())
}

/// Turn a loader failure into what the route's error boundary would say.
fn describe(err: &LoaderError) -> anyhow::Error {
    let report = waypoint_core::ErrorReport::root(&err.route_failure(), true);
    anyhow::anyhow!("{}: {} ({})", report.heading, report.details, err)
}

fn show(product: &Product, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return;
    }

    ctx.output.header(&format!("ID: {}", product.post.id));
    ctx.output.kv("title", &product.post.title);
    if let Some(user_id) = product.post.user_id {
        ctx.output.kv("user", &user_id.to_string());
    }
    ctx.output.kv(
        "loaded by",
        &serde_json::to_value(product.loaded_by)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default(),
    );
    println!();
    println!("{}", product.post.body);
}
