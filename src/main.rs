//! CLI entry point for marquee

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee::config::SiteConfig;
use marquee::Marquee;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(version = "0.1.0")]
#[command(about = "A marketing site and blog served from a headless CMS", long_about = None)]
struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the site server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Render the whole site to static files
    #[command(alias = "g")]
    Generate {
        /// Output directory
        #[arg(short, long, default_value = "public")]
        out: PathBuf,
    },

    /// List posts from the CMS
    List,

    /// Remove generated output
    Clean {
        /// Output directory
        #[arg(short, long, default_value = "public")]
        out: PathBuf,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A local .env is optional; deployments set the environment directly.
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = if cli.debug {
        "marquee=debug,info"
    } else {
        "marquee=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, ip } => {
            let config = SiteConfig::from_env()?;
            let app = Marquee::new(config)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            marquee::server::start(app, &ip, port).await?;
        }

        Commands::Generate { out } => {
            let config = SiteConfig::from_env()?;
            let app = Marquee::new(config)?;
            tracing::info!("Generating static files...");
            marquee::commands::generate::run(&app, &out).await?;
            println!("Generated successfully!");
        }

        Commands::List => {
            let config = SiteConfig::from_env()?;
            let app = Marquee::new(config)?;
            marquee::commands::list::run(&app).await?;
        }

        Commands::Clean { out } => {
            marquee::commands::clean::run(&out)?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("marquee version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
