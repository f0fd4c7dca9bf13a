use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use reqwest::Client;

use preisschild::commands;
use preisschild::config::load_config;
use preisschild::web::{serve, AppState};

#[derive(Parser)]
#[command(name = "preisschild", version, about = "Price tags for ofen.de product pages")]
struct Cli {
    /// Settings file; missing keys fall back to built-in defaults
    #[arg(short, long, default_value = "Settings.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web form
    Serve {
        /// Address to listen on, overrides `server.bind`
        #[arg(long)]
        bind: Option<String>,
    },
    /// Scrape a product page and write the price tag
    Generate {
        url: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show page setup and contents of a generated price tag
    Inspect { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration settings
    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", format!("Failed to load configuration: {}", e).red());
            return Err(e.into());
        }
    };

    println!(
        "{}",
        format!("{} {}", config.base.name, config.base.version).bold()
    );

    let client = Client::new();

    match cli.command {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            serve(AppState::new(config, client), &bind).await?;
        }
        Command::Generate { url, output } => {
            let dir = std::env::current_dir()?;
            if let Err(e) = commands::generate(&client, &config, &url, output.as_deref(), &dir).await {
                eprintln!("{}", format!("❌ {:#}", e).red());
                std::process::exit(1);
            }
        }
        Command::Inspect { file } => {
            let layout = commands::inspect(&file).await?;
            commands::print_layout(&layout);
        }
    }

    Ok(())
}
