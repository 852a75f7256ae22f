use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use embers::app::AppContext;
use embers::cli::{commands, Cli, Commands};
use embers::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(config, cli.workers);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::List { category, pages } => {
            commands::list_category(&ctx, category, pages).await?;
        }
        Commands::Show { id } => {
            commands::show_item(&ctx, id).await?;
        }
        Commands::Tui => {
            embers::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
