use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use stock_profit::cli::{Cli, query};
use stock_profit::config::{AppConfig, FeedKind};
use stock_profit::feed::build_feed;
use stock_profit::report::{render_json, render_text};
use stock_profit::utils::Timer;

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "stock_profit=info,warn",
        1 => "stock_profit=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = AppConfig::load()?;
    if let Some(dir) = &cli.data_dir {
        config.feed.kind = FeedKind::Directory;
        config.feed.data_dir = dir.clone();
    }

    info!("Stock name: {}, year: {}", cli.symbol, cli.year);
    let _t = Timer::start(format!("{} {}", cli.symbol, cli.year));

    let feed = build_feed(&config.feed).context("Failed to set up price feed")?;
    let result = query(feed.as_ref(), &cli.symbol, cli.year)
        .await
        .with_context(|| format!("Failed to calculate stock profit for {}", cli.symbol))?;

    if cli.json {
        println!("{}", render_json(&result)?);
    } else {
        println!("{}", render_text(&result));
    }

    Ok(())
}
