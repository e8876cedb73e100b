//! Command-line front end for the flight insurance contract.
//!
//! ```text
//! flight-surety [--config FILE] [--network NAME] <command>
//!     → config (file + overrides, validated)
//!     → SuretyClient::connect (RPC client, account bootstrap)
//!     → one contract operation, result printed as JSON
//! ```

use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use flight_surety::config::loader::{read_config, ConfigError};
use flight_surety::config::validation::validate_config;
use flight_surety::config::SuretyConfig;
use flight_surety::observability::{logging, metrics};
use flight_surety::SuretyClient;

#[derive(Parser)]
#[command(name = "flight-surety")]
#[command(about = "Client for the FlightSurety insurance contract", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network from the configuration to use.
    #[arg(short, long)]
    network: Option<String>,

    /// Override the RPC endpoint of the selected network.
    #[arg(long)]
    rpc_url: Option<String>,

    /// Override the contract address of the selected network.
    #[arg(long)]
    app_address: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether the contract is operational
    Status,
    /// List the bootstrapped owner, airline and passenger accounts
    Accounts,
    /// Switch the operational flag (owner only)
    SetOperational {
        #[arg(action = clap::ArgAction::Set)]
        mode: bool,
    },
    /// Check whether an address is a known airline
    IsAirline { airline: Address },
    /// Show the funds staked by an airline, in ether
    Funds { airline: Address },
    /// Register or vote for an airline
    RegisterAirline {
        airline: Address,
        name: String,
        /// Proposing airline; defaults to the owner
        #[arg(long)]
        from: Option<Address>,
    },
    /// Stake the airline funding amount
    Fund { airline: Address },
    /// Register a flight
    RegisterFlight {
        flight: String,
        timestamp: u64,
        /// Operating airline; defaults to the first airline account
        #[arg(long)]
        airline: Option<Address>,
    },
    /// List registered flights
    Flights,
    /// Buy insurance for a flight
    Buy {
        flight: String,
        /// Premium in ether
        amount: String,
        /// Defaults to the first passenger account
        #[arg(long)]
        passenger: Option<Address>,
    },
    /// Claim the payout for a delayed flight
    Pay {
        flight: String,
        /// Defaults to the first passenger account
        #[arg(long)]
        passenger: Option<Address>,
    },
    /// Ask the oracles for a flight status
    FetchStatus { flight: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => SuretyConfig::default(),
    };
    apply_overrides(&mut config, &cli);

    logging::init(&config.observability.log_level);
    validate_config(&config).map_err(ConfigError::Validation)?;

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    tracing::debug!(network = %config.network, "Configuration loaded");
    let client = SuretyClient::connect(&config).await?;
    run(&client, cli.command).await
}

/// Fold command-line overrides into the selected network.
fn apply_overrides(config: &mut SuretyConfig, cli: &Cli) {
    if let Some(network) = &cli.network {
        config.network = network.clone();
    }
    if cli.rpc_url.is_none() && cli.app_address.is_none() {
        return;
    }

    let network = config.networks.entry(config.network.clone()).or_default();
    if let Some(url) = &cli.rpc_url {
        network.url = url.clone();
    }
    if let Some(address) = &cli.app_address {
        network.app_address = address.clone();
    }
}

async fn run(client: &SuretyClient, command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Status => print_json(&serde_json::json!({
            "operational": client.is_operational().await?,
        })),
        Commands::Accounts => print_json(client.accounts()),
        Commands::SetOperational { mode } => print_json(&client.set_operating_status(mode).await?),
        Commands::IsAirline { airline } => print_json(&serde_json::json!({
            "airline": airline,
            "registered": client.is_airline_registered(airline).await?,
        })),
        Commands::Funds { airline } => print_json(&serde_json::json!({
            "airline": airline,
            "ether": client.get_airline_funds(airline).await?,
        })),
        Commands::RegisterAirline { airline, name, from } => {
            let from = from.unwrap_or(client.owner());
            print_json(&client.register_airline(from, airline, &name).await?)
        }
        Commands::Fund { airline } => print_json(&client.fund_airline(airline).await?),
        Commands::RegisterFlight {
            flight,
            timestamp,
            airline,
        } => {
            let airline = airline.unwrap_or(client.airlines()[0]);
            print_json(&client.register_flight(airline, &flight, timestamp).await?)
        }
        Commands::Flights => print_json(&client.get_flights().await?),
        Commands::Buy {
            flight,
            amount,
            passenger,
        } => {
            let passenger = passenger.unwrap_or(client.passengers()[0]);
            print_json(&client.buy(passenger, &flight, &amount).await?)
        }
        Commands::Pay { flight, passenger } => {
            let passenger = passenger.unwrap_or(client.passengers()[0]);
            print_json(&client.pay_insurance(passenger, &flight).await?)
        }
        Commands::FetchStatus { flight } => print_json(&client.fetch_flight_status(&flight).await?),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
