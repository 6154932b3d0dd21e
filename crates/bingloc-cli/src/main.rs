use anyhow::Context;
use clap::{Parser, Subcommand};

use bingloc_bing::BingClient;
use bingloc_core::LocationRecord;

#[derive(Debug, Parser)]
#[command(name = "bingloc-cli")]
#[command(about = "Bing location lookup command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the address, point-of-interest, and phonebook services for a
    /// free-text query and print the aggregated records as JSON.
    Lookup {
        query: String,
        /// Override the configured per-category result limit.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Resolve a dropped pin's coordinates to nearby address resources.
    Reverse {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = bingloc_core::load_app_config_from_env()?;

    match cli.command {
        Commands::Lookup { query, limit } => {
            if let Some(limit) = limit {
                config.items_per_category = limit;
            }
            let client = BingClient::new(&config)?;

            // The three services share no state, so query them in parallel.
            // Each failure is a hard error: zero results must stay
            // distinguishable from a lookup that never completed.
            let (addresses, businesses, phonebook) = tokio::join!(
                client.geocode_lookup(&query),
                client.business_lookup(&query),
                client.phonebook_lookup(&query),
            );
            let addresses: Vec<LocationRecord> =
                addresses.context("geocode lookup failed")?;
            let businesses: Vec<LocationRecord> =
                businesses.context("business lookup failed")?;
            let phonebook: Vec<LocationRecord> =
                phonebook.context("phonebook lookup failed")?;

            tracing::info!(
                addresses = addresses.len(),
                businesses = businesses.len(),
                phonebook = phonebook.len(),
                "lookup complete"
            );

            let aggregated = serde_json::json!({
                "address": addresses,
                "point_of_interest": businesses,
                "phonebook": phonebook,
            });
            println!("{}", serde_json::to_string_pretty(&aggregated)?);
        }
        Commands::Reverse {
            latitude,
            longitude,
        } => {
            let client = BingClient::new(&config)?;
            let resources = client.reverse_geocode(latitude, longitude).await?;
            if resources.is_empty() {
                tracing::warn!("reverse geocode returned no resources");
            }
            println!("{}", serde_json::to_string_pretty(&resources)?);
        }
    }

    Ok(())
}
