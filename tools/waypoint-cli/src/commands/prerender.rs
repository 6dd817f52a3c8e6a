//! Prerender path computation.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::Utc;
use waypoint_core::{prerender_paths, PrerenderManifest};

use super::PrerenderArgs;
use crate::context::Context;

/// Run the prerender command.
pub async fn run(args: PrerenderArgs, ctx: &Context) -> Result<()> {
    let registry = ctx.site()?;
    let mut settings = ctx.config.prerender.clone();
    if args.offline {
        settings.products = false;
    }

    let post_ids = if settings.products {
        let spinner = ctx.output.spinner("Fetching posts");
        let result = ctx.api()?.post_ids().await;
        spinner.finish_and_clear();
        result.context("Failed to fetch posts for product pages")?
    } else {
        Vec::new()
    };

    let manifest = PrerenderManifest {
        generated_at: Utc::now().to_rfc3339(),
        paths: prerender_paths(&registry, &settings, &post_ids),
    };

    if args.dry_run {
        if ctx.output.is_json() {
            ctx.output.json(&manifest);
        } else {
            ctx.output.header(&format!("{} paths", manifest.paths.len()));
            for path in &manifest.paths {
                ctx.output.list_item(path);
            }
        }
        return Ok(());
    }

    let target = args
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| ctx.cwd.join(&settings.output));
    let content = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(&target, content)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    if ctx.output.is_json() {
        ctx.output.json(&manifest);
    } else {
        ctx.output.success(&format!(
            "Wrote {} paths to {}",
            manifest.paths.len(),
            target.display()
        ));
    }

    Ok(())
}
