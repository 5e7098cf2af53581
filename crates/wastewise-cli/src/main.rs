use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "wastewise-cli", version, about = "WasteWise CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collection route prioritization
    Route {
        #[command(subcommand)]
        action: commands::route::RouteAction,
    },
    /// Fuel savings estimation
    Fuel {
        #[command(subcommand)]
        action: commands::fuel::FuelAction,
    },
    /// Festival surge prediction
    Surge {
        #[command(subcommand)]
        action: commands::surge::SurgeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Route { action } => commands::route::run(action),
        Commands::Fuel { action } => commands::fuel::run(action),
        Commands::Surge { action } => commands::surge::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
