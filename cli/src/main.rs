use std::path::PathBuf;

use checklist_core::{ChecklistClient, ChecklistPage};
use clap::Parser;

mod commands;
mod config;
mod logging;
mod transport;

use transport::UreqTransport;

#[derive(Parser, Debug)]
#[command(
    name = "checklist",
    version,
    long_about = Some("Manage checklist tasks held by a checklist REST service.")
)]
struct Args {
    /// Base URL of the checklist service [default: http://localhost:8080]
    #[arg(long, env = "CHECKLIST_BASE_URL", global = true)]
    base_url: Option<String>,

    /// TOML file providing `base_url`
    #[arg(long, env = "CHECKLIST_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    logging::setup()?;

    let args = Args::parse();
    let base_url = config::resolve_base_url(args.base_url.as_deref(), args.config.as_deref())?;
    tracing::debug!(%base_url, "using checklist service");

    let mut page = ChecklistPage::new(ChecklistClient::new(&base_url), UreqTransport::new());
    args.command.execute(&mut page, &mut std::io::stdout().lock())?;
    Ok(())
}
