//! Waypoint CLI - inspect and exercise the Waypoint site from a terminal.
//!
//! Commands:
//! - `waypoint routes` - List routes or match a path against them
//! - `waypoint prerender` - Compute the paths to render ahead of time
//! - `waypoint product` - Run the product page loaders
//! - `waypoint wizard` - Fill in the sign-up wizard
//! - `waypoint config` - Manage `waypoint.toml`

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, PrerenderArgs, ProductArgs, RoutesArgs, WizardArgs};

/// Waypoint CLI - routes, loaders and the wizard without a browser
#[derive(Parser)]
#[command(name = "waypoint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format (logs on stderr too)
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes or resolve a path
    Routes(RoutesArgs),

    /// List the paths to prerender
    Prerender(PrerenderArgs),

    /// Load a product page's data
    Product(ProductArgs),

    /// Fill in the multi-step wizard
    Wizard(WizardArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    if cli.json {
        waypoint_observability::init_json_tracing(filter);
    } else {
        waypoint_observability::init_tracing(filter);
    }

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Routes(args) => commands::routes::run(args, &ctx).await,
        Commands::Prerender(args) => commands::prerender::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Wizard(args) => commands::wizard::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
