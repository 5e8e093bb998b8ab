mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storefront_lib::AdminConfig;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "storefront-admin")]
#[command(about = "Manage the categories and products of a storefront backend")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and edit categories
    Categories(commands::categories::CategoriesArgs),
    /// List and edit products
    Products(commands::products::ProductsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("storefront=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let config = AdminConfig::from_env();
    let client = config.client()?;

    match &cli.command {
        Commands::Categories(args) => commands::categories::run(args, &client, &format).await?,
        Commands::Products(args) => commands::products::run(args, &client, &format).await?,
    }

    Ok(())
}
