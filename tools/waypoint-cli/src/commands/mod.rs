//! CLI command implementations.

pub mod config;
pub mod prerender;
pub mod product;
pub mod routes;
pub mod wizard;

use clap::{Args, Subcommand};

/// Arguments for the routes command.
#[derive(Args)]
pub struct RoutesArgs {
    #[command(subcommand)]
    pub command: Option<RoutesCommand>,
}

#[derive(Subcommand)]
pub enum RoutesCommand {
    /// List every route in declaration order.
    List,
    /// Resolve a path to its route and parameters.
    Match {
        /// Path to resolve, e.g. `/teams/42`.
        path: String,
    },
}

/// Arguments for the prerender command.
#[derive(Args)]
pub struct PrerenderArgs {
    /// Write the manifest to this file (default: `prerender.output`).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Skip fetching posts; list static routes only.
    #[arg(long)]
    pub offline: bool,

    /// Print the paths without writing a manifest.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product (post) id.
    pub pid: String,

    /// Also run the client loader, as on hydration.
    #[arg(long)]
    pub client: bool,
}

/// Arguments for the wizard command.
///
/// With any field flag the wizard runs unattended: fields are filled in,
/// every step is advanced and the form is submitted.
#[derive(Args)]
pub struct WizardArgs {
    /// Start at this wizard path, e.g. `/wizard/step-2`.
    #[arg(long, default_value = "/wizard")]
    pub start: String,

    /// Name for step 1.
    #[arg(long)]
    pub name: Option<String>,

    /// Email for step 1.
    #[arg(long)]
    pub email: Option<String>,

    /// Plan for step 2 (basic, standard, premium).
    #[arg(long)]
    pub plan: Option<String>,

    /// Accept the terms on step 3.
    #[arg(long)]
    pub agree: bool,
}

impl WizardArgs {
    pub fn is_unattended(&self) -> bool {
        self.name.is_some() || self.email.is_some() || self.plan.is_some() || self.agree
    }
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default `waypoint.toml` in the current directory.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
