use anyhow::Result;
use clap::Parser;
use log::{ debug, info };

use epubdiff::config::HarnessConfig;
mod cli;
use cli::{ Commands, EpubDiffCli };

#[tokio::main]
async fn main() {
    // Parse the command line arguments
    let cli = EpubDiffCli::parse();

    // Setup logging
    setup_logging(&cli.log_level);

    match dotenv::dotenv() {
        Ok(path) => debug!("Loaded environment variables from {}", path.display()),
        Err(_) => debug!("No .env file loaded"),
    }

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            cli::ui::print_error(&format!("{:#}", e));
            1
        }
    };

    std::process::exit(code);
}

async fn run(cli: EpubDiffCli) -> Result<i32> {
    let config = HarnessConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Compose { book, chapter, output_dir } => {
            let dir = output_dir.unwrap_or_else(|| config.screenshots.directory.clone());
            cli::commands::compose::execute(&book, &chapter, &dir, &config.composer)?;
            Ok(0)
        }

        Commands::Judge { reference, candidate, output, pretty } => {
            cli::commands::judge::execute(
                &reference,
                &candidate,
                output.as_deref(),
                pretty,
                &config.judge
            ).await
        }
    }
}

fn setup_logging(log_level: &str) {
    // Set up the logger based on the log level
    let level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };

    env_logger::Builder::new().filter_level(level).init();

    info!("Logger initialized with level: {}", log_level);
}
