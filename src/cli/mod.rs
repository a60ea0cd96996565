//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for MedVault using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// MedVault - Medical Document Compliance Core
#[derive(Parser, Debug)]
#[command(name = "medvault")]
#[command(version, about, long_about = None)]
#[command(author = "MedVault Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "medvault.toml", env = "MEDVAULT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MEDVAULT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full compliance pipeline over one or more documents
    Process(commands::process::ProcessArgs),

    /// Classify a document without touching the audit trail
    Classify(commands::classify::ClassifyArgs),

    /// Redact a document under a disclosure mode
    Redact(commands::redact::RedactArgs),

    /// Print the audit chain, optionally verifying its integrity
    Chain(commands::chain::ChainArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
