//! Configuration management commands.

use anyhow::{bail, Context as _, Result};
use waypoint_core::{SiteConfig, CONFIG_FILE};

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let site = &ctx.config.site;
    ctx.output.info("");
    ctx.output.info("[site]");
    ctx.output.kv("name", &site.name);
    ctx.output.kv("title", &site.title);
    ctx.output.kv("description", &site.description);
    if let Some(css) = &site.css_path {
        ctx.output.kv("css_path", css);
    }

    let api = &ctx.config.api;
    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &api.base_url);
    ctx.output.kv("timeout_ms", &api.timeout_ms.to_string());
    ctx.output.kv("retries", &api.retries.to_string());
    ctx.output.kv("retry_delay_ms", &api.retry_delay_ms.to_string());

    let prerender = &ctx.config.prerender;
    ctx.output.info("");
    ctx.output.info("[prerender]");
    ctx.output.kv("static_routes", &prerender.static_routes.to_string());
    ctx.output.kv("products", &prerender.products.to_string());
    ctx.output.kv("output", &prerender.output);

    ctx.output.info("");
    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level.to_string());
    ctx.output.kv("format", &ctx.config.log.format.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_FILE);
    if path.exists() && !force {
        bail!("{} already exists. Use --force to overwrite.", path.display());
    }

    SiteConfig::default()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    ctx.output.success(&format!("Created {}", path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let routes = ctx.site()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": true,
            "routes": routes.routes().len(),
        }));
    } else {
        ctx.output.success(&format!(
            "Configuration is valid ({} routes)",
            routes.routes().len()
        ));
    }
    Ok(())
}
