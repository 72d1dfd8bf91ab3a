//! ClubHub CLI
//!
//! Command-line interface for the ClubHub club and activity API.
//!
//! # Usage
//!
//! ```bash
//! clubhub clubs list
//! clubhub user get 42 --token "$TOKEN"
//! clubhub activity new --field title="Beach cleanup" --file photo=./cleanup.jpg
//! clubhub register school --group-id 42 --club "Eco Club" --students 120 \
//!     --total-classes 8 --classes "6A,6B" --coordinator "Ms. Rao" \
//!     --phone 5550100 --referral Kiran
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clubhub_client::{BearerToken, Client, ClientConfig, StatusPolicy};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "clubhub")]
#[command(version)]
#[command(about = "ClubHub Command Line Interface", long_about = None)]
struct Cli {
    /// API base URL
    #[arg(long, env = "CLUBHUB_API_URL")]
    api_url: Option<String>,

    /// Bearer token for authenticated endpoints
    #[arg(long, env = "CLUBHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Output format
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    /// Treat non-2xx answers on reads as errors
    #[arg(long)]
    strict_status: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Manage activities
    Activity {
        #[command(subcommand)]
        action: ActivityCommands,
    },
    /// Browse clubs
    Clubs {
        #[command(subcommand)]
        action: ClubCommands,
    },
    /// Registration workflows
    Register {
        #[command(subcommand)]
        action: RegisterCommands,
    },
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Get user details
    Get { id: String },
}

#[derive(Subcommand)]
enum ActivityCommands {
    /// List all activities
    List,
    /// Upload a new activity as multipart form data
    New {
        /// Text part, as key=value
        #[arg(long = "field", value_parser = parse_key_value)]
        fields: Vec<(String, String)>,
        /// File part, as key=path
        #[arg(long = "file", value_parser = parse_key_value)]
        files: Vec<(String, String)>,
    },
}

#[derive(Subcommand)]
enum ClubCommands {
    /// List clubs a school can join
    List,
}

#[derive(Subcommand)]
enum RegisterCommands {
    /// Submit the additional details for a school group
    School(SchoolArgs),
}

/// Raw form input. Values are validated by the form schema, not by clap.
#[derive(Args)]
struct SchoolArgs {
    /// Group the school registered as
    #[arg(long)]
    group_id: Option<String>,
    /// Club name, repeat for several
    #[arg(long = "club")]
    clubs: Vec<String>,
    /// Number of students this year
    #[arg(long)]
    students: Option<String>,
    /// Total number of classes
    #[arg(long)]
    total_classes: Option<String>,
    /// List of classes
    #[arg(long)]
    classes: Option<String>,
    /// Your coordinator
    #[arg(long)]
    coordinator: Option<String>,
    /// Phone number
    #[arg(long)]
    phone: Option<String>,
    /// Referral name
    #[arg(long)]
    referral: Option<String>,
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

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{}`", raw)),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Commands that talk to the API, as opposed to local configuration
enum ApiCommand {
    User(UserCommands),
    Activity(ActivityCommands),
    Clubs(ClubCommands),
    Register(RegisterCommands),
}

impl Commands {
    fn into_api(self) -> std::result::Result<ApiCommand, ConfigCommands> {
        match self {
            Commands::User { action } => Ok(ApiCommand::User(action)),
            Commands::Activity { action } => Ok(ApiCommand::Activity(action)),
            Commands::Clubs { action } => Ok(ApiCommand::Clubs(action)),
            Commands::Register { action } => Ok(ApiCommand::Register(action)),
            Commands::Config { action } => Err(action),
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let profile = cli.profile.as_deref();
    let command = match cli.command.into_api() {
        Ok(command) => command,
        Err(action) => return commands::config::handle(action, profile),
    };

    let config = config::Config::load(profile).context("loading configuration")?;
    let format = cli
        .format
        .or_else(|| output::OutputFormat::from_config(config.default_format.as_deref()))
        .unwrap_or_default();
    let status_policy = if cli.strict_status || config.strict_status.unwrap_or(false) {
        StatusPolicy::Strict
    } else {
        StatusPolicy::Lenient
    };

    let client = Client::with_config(ClientConfig {
        base_url: config.resolve_api_url(cli.api_url),
        status_policy,
        ..Default::default()
    })?;
    let token = config.resolve_token(cli.token).map(BearerToken::from);
    tracing::debug!(base_url = client.base_url(), ?status_policy, "client ready");

    match command {
        ApiCommand::User(action) => {
            commands::users::handle(action, &client, token.as_ref(), format).await
        }
        ApiCommand::Activity(action) => {
            commands::activities::handle(action, &client, token.as_ref(), format).await
        }
        ApiCommand::Clubs(action) => commands::clubs::handle(action, &client, format).await,
        ApiCommand::Register(action) => commands::register::handle(action, &client).await,
    }
}
