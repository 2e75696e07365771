use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use food_expenses::{
    config::{self, AppConfig},
    db::{self, DbPool},
    handlers::AppServices,
    ingest::Ingester,
    scrape,
};
use serde::Serialize;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config().context("failed to load application config")?;
    config::init_tracing(config.log_level(), config.log_json);

    match cli.command {
        Commands::Migrate => handle_migrate(&config).await?,
        Commands::Ingest(args) => handle_ingest(&config, args, cli.json).await?,
        Commands::ExtractUrls(args) => handle_extract_urls(&config, args, cli.json).await?,
        Commands::ParsePages(args) => handle_parse_pages(&config, args, cli.json).await?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "food-expenses-cli",
    about = "Schema migrations and offline staging tools for food-expenses",
    version
)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Load the staging document into the database
    Ingest(IngestArgs),
    /// Collect shipment links from a saved order history page
    ExtractUrls(ExtractUrlsArgs),
    /// Build the staging document from saved shipment pages
    ParsePages(ParsePagesArgs),
}

#[derive(Args)]
struct IngestArgs {
    #[arg(long, help = "Staging JSON to load (defaults to the configured staging path)")]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct ExtractUrlsArgs {
    #[arg(long, help = "Saved order history page (defaults to {pages_dir}/shipments.html)")]
    history: Option<PathBuf>,
    #[arg(long, help = "Where to write the links (defaults to {staging_dir}/shipment_urls.txt)")]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct ParsePagesArgs {
    #[arg(long, help = "Shipment links, one per line (defaults to {staging_dir}/shipment_urls.txt)")]
    urls: Option<PathBuf>,
    #[arg(long, help = "Directory of saved {shipment_num}.html pages")]
    pages: Option<PathBuf>,
    #[arg(long, help = "Staging JSON to write (defaults to the configured staging path)")]
    out: Option<PathBuf>,
}

async fn connect(config: &AppConfig) -> Result<Arc<DbPool>> {
    let pool = db::establish_connection_from_app_config(config)
        .await
        .context("failed to connect to database")?;
    Ok(Arc::new(pool))
}

fn urls_path(config: &AppConfig) -> PathBuf {
    PathBuf::from(&config.staging_dir).join("shipment_urls.txt")
}

async fn handle_migrate(config: &AppConfig) -> Result<()> {
    let pool = connect(config).await?;
    db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;
    println!("Migrations applied");
    Ok(())
}

async fn handle_ingest(config: &AppConfig, args: IngestArgs, json: bool) -> Result<()> {
    let path = args.file.unwrap_or_else(|| config.staging_path());
    let pool = connect(config).await?;
    if config.auto_migrate {
        db::run_migrations(&pool)
            .await
            .context("failed to run migrations")?;
    }

    let services = AppServices::new(pool, &config.delivered_status);
    let summary = Ingester::new(&services)
        .ingest_file(&path)
        .await
        .with_context(|| format!("ingest of {} stopped", path.display()))?;

    if json {
        print_json(&summary)?;
    } else {
        println!(
            "Loaded {} shipments and {} products from {}",
            summary.shipments,
            summary.products,
            path.display()
        );
    }
    Ok(())
}

async fn handle_extract_urls(config: &AppConfig, args: ExtractUrlsArgs, json: bool) -> Result<()> {
    let history = args
        .history
        .unwrap_or_else(|| config.pages_dir().join("shipments.html"));
    let out = args.out.unwrap_or_else(|| urls_path(config));

    let count = scrape::extract_urls(&history, &out)
        .await
        .context("failed to extract shipment links")?;

    if json {
        print_json(&serde_json::json!({ "links": count }))?;
    } else {
        println!("Wrote {} shipment links to {}", count, out.display());
    }
    Ok(())
}

async fn handle_parse_pages(config: &AppConfig, args: ParsePagesArgs, json: bool) -> Result<()> {
    let urls = args.urls.unwrap_or_else(|| urls_path(config));
    let pages = args.pages.unwrap_or_else(|| config.pages_dir());
    let out = args.out.unwrap_or_else(|| config.staging_path());
    info!(urls = %urls.display(), pages = %pages.display(), "parsing saved shipment pages");

    let summary = scrape::parse_pages(&urls, &pages, &out)
        .await
        .context("failed to parse shipment pages")?;

    if json {
        print_json(&summary)?;
    } else {
        println!(
            "Staged {} shipments and {} products in {}",
            summary.shipments,
            summary.products,
            out.display()
        );
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
