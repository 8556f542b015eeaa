use anyhow::Result;
use clap::{Parser, Subcommand};
use portfolio_web::commands::{self, ConfigArgs};
use portfolio_web::logging;

#[derive(Parser)]
#[command(author, version, about = "Personal portfolio website", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Check that the backend API is reachable
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the resolved configuration
    Config {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Serve { config } => commands::serve::execute_serve(config.load()?).await,
        Commands::Check { config } => commands::check::execute_check(&config.load()?).await,
        Commands::Config { config } => commands::show_config::execute_show_config(&config.load()?),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli.command).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }

    Ok(())
}
