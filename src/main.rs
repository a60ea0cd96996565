// MedVault - Medical Document Compliance Core
// Copyright (c) 2025 MedVault Contributors
// Licensed under the MIT License

use clap::Parser;
use medvault::cli::{Cli, Commands};
use medvault::config::{load_config, LoggingConfig};
use medvault::log_error_with_context;
use medvault::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; a broken
    // or absent config falls back to console-only defaults here and gets
    // reported properly by the dispatched command.
    let (logging_config, config_level) = match load_config(&cli.config) {
        Ok(config) => (config.logging, Some(config.application.log_level)),
        Err(_) => (LoggingConfig::default(), None),
    };

    // CLI flag wins over the config file
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());

    if let Err(e) = init_logging(&log_level, &logging_config) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(5);
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "MedVault - Medical Document Compliance Core"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // Exit with appropriate code
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Process(args) => args.execute(&cli.config).await,
        Commands::Classify(args) => args.execute().await,
        Commands::Redact(args) => args.execute(&cli.config).await,
        Commands::Chain(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
