//! Fieldform CLI
//!
//! Command-line front end for the field sales intake API.
//!
//! # Usage
//!
//! ```bash
//! fieldform submit --salesman "John Doe" --customer "Jane" --operator CGS ...
//! fieldform salesmen search jo
//! fieldform login fk_live_abc123
//! fieldform submissions list --format json
//! fieldform config set api_url http://intake.example.com/api
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod output;
mod session;

#[derive(Parser)]
#[command(name = "fieldform")]
#[command(version = "0.1.0")]
#[command(about = "Fieldform Command Line Interface", long_about = None)]
struct Cli {
    /// API endpoint URL
    #[arg(long, env = "FIELDFORM_API_URL")]
    api_url: Option<String>,

    /// Admin API key (overrides the stored one)
    #[arg(long, env = "FIELDFORM_API_KEY")]
    api_key: Option<String>,

    /// Output format (falls back to the configured default_format, then table)
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit an intake form
    Submit(SubmitArgs),
    /// Browse and manage the salesman registry
    Salesmen {
        #[command(subcommand)]
        action: SalesmanCommands,
    },
    /// Browse and manage building types
    BuildingTypes {
        #[command(subcommand)]
        action: BuildingTypeCommands,
    },
    /// Search the village registry
    Villages {
        #[command(subcommand)]
        action: VillageCommands,
    },
    /// Inspect stored submissions (admin)
    Submissions {
        #[command(subcommand)]
        action: SubmissionCommands,
    },
    /// Verify an API key and store it for admin commands
    Login { key: String },
    /// Forget the stored API key
    Logout,
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Args)]
struct SubmitArgs {
    /// Read draft fields from a JSON file; flags below override it
    #[arg(long)]
    from_json: Option<PathBuf>,
    #[arg(long)]
    salesman: Option<String>,
    #[arg(long)]
    customer: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    home_no: Option<String>,
    #[arg(long)]
    village: Option<String>,
    /// "lat,lon", e.g. 3.456,89.012
    #[arg(long)]
    coordinates: Option<String>,
    #[arg(long)]
    building_type: Option<String>,
    /// Repeat for each operator tag
    #[arg(long = "operator")]
    operators: Vec<String>,
    #[arg(long)]
    remarks: Option<String>,
    /// Repeat for each photo to attach (jpg, png, gif, webp)
    #[arg(long = "photo")]
    photos: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum SalesmanCommands {
    /// List the full registry
    List,
    /// Server-side search
    Search { query: String },
    /// Append a salesman (admin)
    Add { name: String },
}

#[derive(Subcommand)]
enum BuildingTypeCommands {
    /// List all building types
    List,
    /// Append a building type (admin)
    Add { name: String },
}

#[derive(Subcommand)]
enum VillageCommands {
    /// Server-side search
    Search { query: String },
}

#[derive(Subcommand)]
enum SubmissionCommands {
    /// List all submissions
    List,
    /// Get submission details
    Get { id: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_default();
    let format = output::OutputFormat::resolve(cli.format, config.default_format.as_deref());
    let api_url = cli
        .api_url
        .or(config.api_url)
        .unwrap_or_else(|| fieldform_sdk::DEFAULT_BASE_URL.to_string());

    let client = fieldform_sdk::ApiClient::new(api_url);
    let store = session::FileKeyStore::new(cli.profile.clone());

    let result = match cli.command {
        Commands::Submit(args) => commands::submit::handle(args, &client).await,
        Commands::Salesmen { action } => {
            commands::registry::salesmen(action, &client, &store, cli.api_key.as_deref(), format)
                .await
        }
        Commands::BuildingTypes { action } => {
            commands::registry::building_types(
                action,
                &client,
                &store,
                cli.api_key.as_deref(),
                format,
            )
            .await
        }
        Commands::Villages { action } => {
            commands::registry::villages(action, &client, format).await
        }
        Commands::Submissions { action } => {
            commands::submissions::handle(action, &client, &store, cli.api_key.as_deref(), format)
                .await
        }
        Commands::Login { key } => commands::auth::login(&client, &store, &key).await,
        Commands::Logout => commands::auth::logout(&store),
        Commands::Config { action } => commands::config::handle(action).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
